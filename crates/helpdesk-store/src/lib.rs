// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use helpdesk_app::{Conversation, ConversationId, Customer, Message, MessageId, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info};

pub const APP_NAME: &str = "helpdesk";

const DEMO_SEED: &str = include_str!("../seed/demo.json");

/// Records in seed order. Membership and order never change after
/// construction; conversations only grow by appended messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore<R: Record> {
    items: Vec<R>,
}

impl<R> ItemStore<R>
where
    R: Record,
    R::Id: Hash,
{
    pub fn new(items: Vec<R>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                bail!(
                    "duplicate record id {:?}; ids must be unique within a store",
                    item.id()
                );
            }
        }
        Ok(Self { items })
    }
}

impl<R: Record> ItemStore<R> {
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: &R::Id) -> Option<&mut R> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

impl ItemStore<Conversation> {
    pub fn append_message(&mut self, id: &ConversationId, mut message: Message) -> Result<()> {
        let conversation = self
            .get_mut(id)
            .ok_or_else(|| anyhow!("conversation {id} not found"))?;
        if conversation.messages.iter().any(|m| m.id == message.id) {
            let reassigned = MessageId::for_position(conversation.next_message_position());
            debug!(
                conversation = %id,
                requested = %message.id,
                assigned = %reassigned,
                "message id taken; reassigning"
            );
            message.id = reassigned;
        }
        debug!(
            conversation = %id,
            message = %message.id,
            sender = message.sender.as_str(),
            "append message"
        );
        conversation.messages.push(message);
        Ok(())
    }
}

/// Seed file contents: the wire shape of the demo data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Seed {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl Seed {
    /// The built-in data set: five conversations and six customers.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_SEED).context("parse embedded demo seed")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let seed: Self = serde_json::from_str(raw).context("decode seed JSON")?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| {
            format!(
                "load seed file {}; see `helpdesk --help` for the expected shape",
                path.display()
            )
        })
    }

    pub fn validate(&self) -> Result<()> {
        for conversation in &self.conversations {
            if conversation.customer.name.trim().is_empty() {
                bail!("conversation {} has an empty customer name", conversation.id);
            }
            let mut message_ids = HashSet::with_capacity(conversation.messages.len());
            for message in &conversation.messages {
                if !message_ids.insert(&message.id) {
                    bail!(
                        "conversation {} repeats message id {}",
                        conversation.id,
                        message.id
                    );
                }
            }
        }
        for customer in &self.customers {
            if customer.name.trim().is_empty() {
                bail!("customer {} has an empty name", customer.id);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stores {
    pub conversations: ItemStore<Conversation>,
    pub customers: ItemStore<Customer>,
}

impl Stores {
    pub fn from_seed(seed: Seed) -> Result<Self> {
        let conversations =
            ItemStore::new(seed.conversations).context("build conversation store")?;
        let customers = ItemStore::new(seed.customers).context("build customer store")?;
        info!(
            conversations = conversations.len(),
            customers = customers.len(),
            "stores loaded"
        );
        Ok(Self {
            conversations,
            customers,
        })
    }

    pub fn demo() -> Result<Self> {
        Self::from_seed(Seed::demo()?)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEMO_SEED, Seed};

    #[test]
    fn embedded_seed_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(DEMO_SEED).expect("embedded seed parses as JSON");
        assert!(value.get("conversations").is_some());
        assert!(value.get("customers").is_some());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = Seed::from_json("{}").expect("empty object is a valid seed");
        assert!(seed.conversations.is_empty());
        assert!(seed.customers.is_empty());
    }
}
