// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

pub const REPLY_TIMESTAMP: &str = "Just now";
pub const REPLY_AGENT_NAME: &str = "You";
pub const REPLY_AGENT_INITIALS: &str = "YO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Closed,
}

impl ConversationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Badge text for the list row; normal priority has no badge.
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::High => Some("High"),
            Self::Urgent => Some("Urgent"),
        }
    }

    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    New,
}

impl CustomerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::New => "new",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Agent,
    Bot,
}

impl Sender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Agent => "agent",
            Self::Bot => "bot",
        }
    }
}

/// Category tags for conversation lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversationTab {
    #[default]
    All,
    Unread,
    Open,
    Closed,
}

impl ConversationTab {
    pub const ALL: [Self; 4] = [Self::All, Self::Unread, Self::Open, Self::Closed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "unread" => Some(Self::Unread),
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

/// Category tags for the customer directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTab {
    #[default]
    All,
    Active,
    Inactive,
    New,
}

impl CustomerTab {
    pub const ALL: [Self; 4] = [Self::All, Self::Active, Self::Inactive, Self::New];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::New => "new",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::New => "New",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Inbox,
    Conversations,
    Customers,
    Analytics,
    Settings,
}

impl ViewKind {
    pub const ALL: [Self; 5] = [
        Self::Inbox,
        Self::Conversations,
        Self::Customers,
        Self::Analytics,
        Self::Settings,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Conversations => "conversations",
            Self::Customers => "customers",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inbox" => Some(Self::Inbox),
            "conversations" => Some(Self::Conversations),
            "customers" => Some(Self::Customers),
            "analytics" => Some(Self::Analytics),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Conversations => "conversations",
            Self::Customers => "customers",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
        }
    }

    /// Only the inbox carries priority badges and the assist panels.
    pub const fn has_assist(self) -> bool {
        matches!(self, Self::Inbox)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Narrow,
    Wide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_initials: Option<String>,
}

impl Message {
    /// A reply written by the local agent at the given 1-based position.
    pub fn agent_reply(position: usize, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::for_position(position),
            sender: Sender::Agent,
            content: content.into(),
            timestamp: REPLY_TIMESTAMP.to_owned(),
            agent_name: Some(REPLY_AGENT_NAME.to_owned()),
            agent_avatar: None,
            agent_initials: Some(REPLY_AGENT_INITIALS.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub customer: CustomerProfile,
    pub subject: String,
    pub preview: String,
    pub date: String,
    pub unread: bool,
    pub status: ConversationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or(Priority::Normal)
    }

    /// Position for the next appended message: `len + 1` while that id is
    /// free, otherwise one past the highest `m<N>` already present.
    pub fn next_message_position(&self) -> usize {
        let next = self.messages.len() + 1;
        let candidate = MessageId::for_position(next);
        if !self.messages.iter().any(|message| message.id == candidate) {
            return next;
        }
        self.messages
            .iter()
            .filter_map(|message| message.id.position())
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Display name for the author of `message` inside this conversation.
    pub fn author_label<'a>(&'a self, message: &'a Message) -> &'a str {
        match message.sender {
            Sender::Customer => &self.customer.name,
            Sender::Bot => "Intercom AI",
            Sender::Agent => message.agent_name.as_deref().unwrap_or(REPLY_AGENT_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: CustomerStatus,
    pub last_active: String,
    pub conversations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    pub first_seen: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub initials: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Friendly,
    Concise,
}

impl Tone {
    pub const ALL: [Self; 3] = [Self::Formal, Self::Friendly, Self::Concise];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Concise => "concise",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Friendly => "Friendly",
            Self::Concise => "Concise",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub tone: Tone,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Frustrated,
    Neutral,
    Satisfied,
}

impl Sentiment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frustrated => "frustrated",
            Self::Neutral => "neutral",
            Self::Satisfied => "satisfied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub sentiment: Sentiment,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Helpful,
    NotHelpful,
}
