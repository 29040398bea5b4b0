// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use helpdesk_app::{
    AssistDelays, Assistant, Conversation, ConversationId, Customer, Message, Suggestion, Summary,
};
use helpdesk_assist::CannedAssistant;
use helpdesk_store::Stores;
use helpdesk_tui::SettingRow;

/// In-memory stores plus the canned assistant, wired up for the terminal UI.
pub struct DemoRuntime {
    stores: Stores,
    assistant: CannedAssistant,
    settings: Vec<SettingRow>,
    assist_enabled: bool,
    delays: AssistDelays,
}

impl DemoRuntime {
    pub fn new(stores: Stores, settings: Vec<SettingRow>) -> Self {
        Self {
            stores,
            assistant: CannedAssistant::new(),
            settings,
            assist_enabled: true,
            delays: AssistDelays::default(),
        }
    }

    pub fn with_assist(mut self, enabled: bool, delays: AssistDelays) -> Self {
        self.assist_enabled = enabled;
        self.delays = delays;
        self
    }
}

impl helpdesk_tui::AppRuntime for DemoRuntime {
    fn conversations(&self) -> &[Conversation] {
        self.stores.conversations.items()
    }

    fn customers(&self) -> &[Customer] {
        self.stores.customers.items()
    }

    fn append_message(&mut self, conversation: &ConversationId, message: Message) -> Result<()> {
        self.stores.conversations.append_message(conversation, message)
    }

    fn suggestions(&self, conversation: &Conversation) -> Vec<Suggestion> {
        self.assistant.suggestions(conversation)
    }

    fn summarize(&self, conversation: &Conversation) -> Summary {
        self.assistant.summarize(conversation)
    }

    fn settings_rows(&self) -> Vec<SettingRow> {
        self.settings.clone()
    }

    fn assist_enabled(&self) -> bool {
        self.assist_enabled
    }

    fn assist_delays(&self) -> AssistDelays {
        self.delays
    }
}

#[cfg(test)]
mod tests {
    use super::DemoRuntime;
    use anyhow::{Result, anyhow};
    use helpdesk_app::{AssistDelays, ConversationId, Message, Sentiment, Tone};
    use helpdesk_store::Stores;
    use helpdesk_testkit::{expect_ids, fixture_conversations};
    use helpdesk_tui::{AppRuntime, SettingRow};
    use std::time::Duration;

    fn runtime() -> Result<DemoRuntime> {
        Ok(DemoRuntime::new(
            Stores::demo()?,
            vec![SettingRow::new("data.seed", "demo")],
        ))
    }

    #[test]
    fn exposes_seeded_records_in_order() -> Result<()> {
        let runtime = runtime()?;
        assert_eq!(runtime.conversations(), fixture_conversations().as_slice());
        expect_ids(
            runtime.customers().iter().map(|customer| customer.id.as_str()),
            &["1", "2", "3", "4", "5", "6"],
        )
    }

    #[test]
    fn append_message_is_visible_through_runtime() -> Result<()> {
        let mut runtime = runtime()?;
        let id = ConversationId::from("2");
        runtime.append_message(&id, Message::agent_reply(2, "on it"))?;
        let conversation = runtime
            .conversations()
            .iter()
            .find(|conversation| conversation.id == id)
            .ok_or_else(|| anyhow!("conversation 2 missing"))?;
        assert_eq!(
            conversation.messages.last().map(|m| m.content.as_str()),
            Some("on it")
        );
        Ok(())
    }

    #[test]
    fn assistant_is_the_canned_one() -> Result<()> {
        let runtime = runtime()?;
        let first = runtime
            .conversations()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("seed has no conversations"))?;
        let tones: Vec<Tone> = runtime
            .suggestions(&first)
            .iter()
            .map(|suggestion| suggestion.tone)
            .collect();
        assert_eq!(tones, Tone::ALL.to_vec());
        assert_eq!(runtime.summarize(&first).sentiment, Sentiment::Frustrated);
        Ok(())
    }

    #[test]
    fn assist_settings_default_on_and_can_be_overridden() -> Result<()> {
        let runtime = runtime()?;
        assert!(runtime.assist_enabled());
        assert_eq!(runtime.assist_delays(), AssistDelays::default());

        let delays = AssistDelays {
            suggestions: Duration::from_millis(5),
            summary: Duration::from_millis(6),
        };
        let runtime = runtime.with_assist(false, delays);
        assert!(!runtime.assist_enabled());
        assert_eq!(runtime.assist_delays(), delays);
        assert_eq!(runtime.settings_rows()[0].value, "demo");
        Ok(())
    }
}
