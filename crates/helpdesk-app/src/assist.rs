// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Conversation, Summary, Suggestion, Tone};

/// Source of reply suggestions and conversation summaries.
pub trait Assistant {
    /// One suggestion per tone, in `Tone::ALL` order.
    fn suggestions(&self, conversation: &Conversation) -> Vec<Suggestion>;

    fn summarize(&self, conversation: &Conversation) -> Summary;

    fn suggestion_for(&self, conversation: &Conversation, tone: Tone) -> Option<Suggestion> {
        self.suggestions(conversation)
            .into_iter()
            .find(|suggestion| suggestion.tone == tone)
    }
}
