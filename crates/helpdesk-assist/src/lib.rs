// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Canned reply suggestions and conversation summaries.
//!
//! Stands in for a real summarization backend: output depends only on the
//! conversation handed in, never on timing or prior calls.

use helpdesk_app::{Assistant, Conversation, Sentiment, Suggestion, Summary, Tone};
use tracing::debug;

const FORMAL_REPLY: &str = "Thank you for reaching out about your subscription renewal issue. I've checked your account and can confirm that your payment method appears to be valid in our system. Let me investigate further to identify what might be causing the error message you're seeing. In the meantime, could you please let me know which payment method you're using (credit card, PayPal, etc.) and when you last attempted to renew your subscription?";

const FRIENDLY_REPLY: &str = "Hi there! Thanks for letting us know about the trouble with your subscription renewal. I just checked your account and interestingly, your payment method looks perfectly fine on our end! Let's figure this out together. Could you tell me which payment method you're trying to use and when you last tried to renew? That will help me get to the bottom of this for you right away!";

const CONCISE_REPLY: &str = "I've checked your account and your payment method appears valid. To help troubleshoot, please confirm: 1) Which payment method you're using 2) When you last attempted renewal 3) The exact error message you received. I'll resolve this promptly.";

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAssistant;

impl CannedAssistant {
    pub fn new() -> Self {
        Self
    }

    fn reply_for(tone: Tone) -> &'static str {
        match tone {
            Tone::Formal => FORMAL_REPLY,
            Tone::Friendly => FRIENDLY_REPLY,
            Tone::Concise => CONCISE_REPLY,
        }
    }
}

impl Assistant for CannedAssistant {
    fn suggestions(&self, conversation: &Conversation) -> Vec<Suggestion> {
        debug!(conversation = %conversation.id, "canned suggestions");
        Tone::ALL
            .into_iter()
            .map(|tone| Suggestion {
                tone,
                content: Self::reply_for(tone).to_owned(),
            })
            .collect()
    }

    fn summarize(&self, conversation: &Conversation) -> Summary {
        debug!(conversation = %conversation.id, "canned summary");
        match conversation.id.as_str() {
            "1" => renewal_summary(),
            "3" => refund_summary(),
            _ => generic_summary(conversation),
        }
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_owned()).collect()
}

fn renewal_summary() -> Summary {
    Summary {
        summary: "Customer is experiencing issues with subscription renewal due to an invalid payment method error, despite having verified their payment details.".to_owned(),
        key_points: owned(&[
            "Payment method shows as invalid during renewal",
            "Customer has verified their payment information is correct",
            "Customer needs assistance troubleshooting the renewal process",
        ]),
        sentiment: Sentiment::Frustrated,
        next_steps: owned(&[
            "Verify payment method status in the system",
            "Check for any failed transaction logs",
            "Provide manual renewal option if needed",
        ]),
    }
}

fn refund_summary() -> Summary {
    Summary {
        summary: "Customer noticed an unexpected 'Premium Add-on' charge on their invoice and requested clarification. The AI assistant explained the charge, disabled the feature, and processed a refund.".to_owned(),
        key_points: owned(&[
            "Unexpected 'Premium Add-on' charge appeared on invoice",
            "Customer did not recall activating this feature",
            "Feature was activated on June 15th",
            "Customer requested to disable the feature",
        ]),
        sentiment: Sentiment::Satisfied,
        next_steps: owned(&[
            "Confirm refund processing (3-5 business days)",
            "Follow up to ensure customer satisfaction",
            "Review activation process to prevent unintended sign-ups",
        ]),
    }
}

fn generic_summary(conversation: &Conversation) -> Summary {
    let subject = conversation.subject.to_lowercase();
    let priority = conversation.effective_priority();
    let priority_point = if priority.is_elevated() {
        format!("This is a {} priority issue", priority.as_str())
    } else {
        "Standard priority issue".to_owned()
    };
    Summary {
        summary: format!("Customer has reached out regarding {subject} and requires assistance."),
        key_points: vec![
            format!("Customer initiated conversation about {subject}"),
            "Issue requires follow-up from support team".to_owned(),
            priority_point,
        ],
        sentiment: Sentiment::Neutral,
        next_steps: owned(&[
            "Acknowledge the customer's inquiry",
            "Gather more information about the specific issue",
            "Provide relevant documentation or solutions",
        ]),
    }
}
