// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use helpdesk_app::{
    Conversation, ConversationId, ConversationStatus, Customer, CustomerId, CustomerProfile,
    CustomerStatus, Message, MessageId, Priority, Sender,
};

/// Builder for a conversation record with sensible defaults.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    conversation: Conversation,
}

impl ConversationBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            conversation: Conversation {
                id: ConversationId::from(id),
                customer: CustomerProfile {
                    name: name.to_owned(),
                    email: email_for(name),
                    avatar: None,
                    initials: initials_for(name),
                },
                subject: format!("Question from {name}"),
                preview: String::new(),
                date: "Today".to_owned(),
                unread: false,
                status: ConversationStatus::Open,
                priority: None,
                messages: Vec::new(),
            },
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.conversation.customer.email = email.to_owned();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.conversation.subject = subject.to_owned();
        self
    }

    pub fn preview(mut self, preview: &str) -> Self {
        self.conversation.preview = preview.to_owned();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.conversation.date = date.to_owned();
        self
    }

    pub fn unread(mut self) -> Self {
        self.conversation.unread = true;
        self
    }

    pub fn closed(mut self) -> Self {
        self.conversation.status = ConversationStatus::Closed;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.conversation.priority = Some(priority);
        self
    }

    pub fn customer_says(self, content: &str) -> Self {
        self.message(Sender::Customer, content, None)
    }

    pub fn bot_says(self, content: &str) -> Self {
        self.message(Sender::Bot, content, None)
    }

    pub fn agent_says(self, agent: &str, content: &str) -> Self {
        self.message(Sender::Agent, content, Some(agent))
    }

    fn message(mut self, sender: Sender, content: &str, agent: Option<&str>) -> Self {
        let position = self.conversation.next_message_position();
        self.conversation.messages.push(Message {
            id: MessageId::for_position(position),
            sender,
            content: content.to_owned(),
            timestamp: self.conversation.date.clone(),
            agent_name: agent.map(str::to_owned),
            agent_avatar: None,
            agent_initials: agent.map(initials_for),
        });
        self
    }

    pub fn build(self) -> Conversation {
        self.conversation
    }
}

/// Builder for a customer directory record.
#[derive(Debug, Clone)]
pub struct CustomerBuilder {
    customer: Customer,
}

impl CustomerBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            customer: Customer {
                id: CustomerId::from(id),
                name: name.to_owned(),
                email: email_for(name),
                company: None,
                status: CustomerStatus::Active,
                last_active: "Just now".to_owned(),
                conversations: 1,
                location: None,
                browser: None,
                os: None,
                first_seen: "Jan 1, 2023".to_owned(),
                avatar: None,
                initials: initials_for(name),
            },
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.customer.email = email.to_owned();
        self
    }

    pub fn company(mut self, company: &str) -> Self {
        self.customer.company = Some(company.to_owned());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.customer.status = status;
        self
    }

    pub fn last_active(mut self, last_active: &str) -> Self {
        self.customer.last_active = last_active.to_owned();
        self
    }

    pub fn conversations(mut self, count: u32) -> Self {
        self.customer.conversations = count;
        self
    }

    pub fn environment(mut self, location: &str, browser: &str, os: &str) -> Self {
        self.customer.location = Some(location.to_owned());
        self.customer.browser = Some(browser.to_owned());
        self.customer.os = Some(os.to_owned());
        self
    }

    pub fn first_seen(mut self, first_seen: &str) -> Self {
        self.customer.first_seen = first_seen.to_owned();
        self
    }

    pub fn build(self) -> Customer {
        self.customer
    }
}

fn email_for(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("someone").to_lowercase();
    match parts.last() {
        Some(last) => {
            let initial = last.chars().next().map(|c| c.to_lowercase().to_string());
            format!("{first}.{}@example.com", initial.unwrap_or_default())
        }
        None => format!("{first}@example.com"),
    }
}

fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// The five-conversation inbox fixture.
pub fn fixture_conversations() -> Vec<Conversation> {
    vec![
        ConversationBuilder::new("1", "Sarah Johnson")
            .subject("Help with subscription")
            .preview("I'm having trouble with my subscription renewal...")
            .date("10:23 AM")
            .unread()
            .priority(Priority::High)
            .customer_says("Hi there, I'm having trouble with my subscription renewal. It says my payment method is invalid but I've checked and everything seems correct. Can you help?")
            .build(),
        ConversationBuilder::new("2", "Michael Chen")
            .subject("Feature request")
            .preview("I was wondering if you could add a feature that...")
            .date("Yesterday")
            .customer_says("I was wondering if you could add a feature that allows us to export data in CSV format? This would be really helpful for our reporting.")
            .agent_says("Alex Rivera", "Hi Michael, thanks for reaching out! That's a great suggestion. We actually have this feature on our roadmap for the next quarter. I'll make a note of your request and let our product team know there's interest.")
            .customer_says("That's great to hear! Looking forward to it. Is there any way to get early access when it's in beta?")
            .build(),
        ConversationBuilder::new("3", "Emma Wilson")
            .subject("Billing question")
            .preview("I noticed an extra charge on my last invoice...")
            .date("2 days ago")
            .closed()
            .customer_says("I noticed an extra charge on my last invoice labeled 'Premium Add-on' but I don't recall signing up for this. Could you explain what this is?")
            .bot_says("Hi Emma, I'm the Intercom AI assistant. I see you have a question about a charge on your invoice. Let me look into that for you. The 'Premium Add-on' is an additional service that provides advanced analytics and reporting features. According to our records, this was activated on your account on June 15th. Would you like me to help you disable this feature?")
            .customer_says("Yes, please disable it. I don't remember activating this feature.")
            .bot_says("I've gone ahead and disabled the 'Premium Add-on' feature from your account. You will no longer be charged for this service going forward. I've also processed a refund for the last charge, which should appear on your account within 3-5 business days. Is there anything else I can help you with today?")
            .customer_says("No, that's all. Thank you for your help!")
            .build(),
        ConversationBuilder::new("4", "James Rodriguez")
            .subject("Account access")
            .preview("I can't log into my account after changing my...")
            .date("3 days ago")
            .priority(Priority::Urgent)
            .customer_says("I can't log into my account after changing my password. I keep getting an 'invalid credentials' error even though I'm sure I'm using the right password.")
            .build(),
        ConversationBuilder::new("5", "Olivia Kim")
            .subject("Integration help")
            .preview("Do you have any documentation on how to integrate...")
            .date("1 week ago")
            .closed()
            .customer_says("Do you have any documentation on how to integrate your API with Shopify? I'm trying to set up automatic order syncing.")
            .build(),
    ]
}

/// The six-customer directory fixture.
pub fn fixture_customers() -> Vec<Customer> {
    vec![
        CustomerBuilder::new("1", "Sarah Johnson")
            .company("Acme Inc.")
            .last_active("2 minutes ago")
            .conversations(3)
            .environment("New York, USA", "Chrome", "Windows")
            .first_seen("Jan 15, 2023")
            .build(),
        CustomerBuilder::new("2", "Michael Chen")
            .company("TechGrowth")
            .last_active("1 hour ago")
            .conversations(7)
            .environment("San Francisco, USA", "Firefox", "macOS")
            .first_seen("Mar 3, 2023")
            .build(),
        CustomerBuilder::new("3", "Emma Wilson")
            .company("Wilson Enterprises")
            .status(CustomerStatus::Inactive)
            .last_active("2 weeks ago")
            .conversations(2)
            .environment("London, UK", "Safari", "iOS")
            .first_seen("Nov 20, 2022")
            .build(),
        CustomerBuilder::new("4", "James Rodriguez")
            .company("Global Solutions")
            .last_active("3 days ago")
            .conversations(5)
            .environment("Toronto, Canada", "Edge", "Windows")
            .first_seen("Feb 8, 2023")
            .build(),
        CustomerBuilder::new("5", "Olivia Kim")
            .company("Fashion Forward")
            .status(CustomerStatus::New)
            .last_active("Just now")
            .conversations(1)
            .environment("Seoul, South Korea", "Chrome", "Android")
            .first_seen("May 1, 2023")
            .build(),
        CustomerBuilder::new("6", "David Müller")
            .company("Müller GmbH")
            .last_active("5 hours ago")
            .conversations(4)
            .environment("Berlin, Germany", "Chrome", "Windows")
            .first_seen("Dec 12, 2022")
            .build(),
    ]
}

/// Asserts ids come out in exactly the expected order.
pub fn expect_ids<'a, I>(actual: I, expected: &[&str]) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let actual: Vec<&str> = actual.into_iter().collect();
    if actual != expected {
        bail!("expected ids {expected:?}, got {actual:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{email_for, fixture_conversations, fixture_customers, initials_for};

    #[test]
    fn derived_contact_fields_follow_seed_conventions() {
        assert_eq!(email_for("Sarah Johnson"), "sarah.j@example.com");
        assert_eq!(email_for("David Müller"), "david.m@example.com");
        assert_eq!(initials_for("James Rodriguez"), "JR");
        assert_eq!(initials_for("Olivia Kim"), "OK");
    }

    #[test]
    fn fixture_sizes() {
        assert_eq!(fixture_conversations().len(), 5);
        assert_eq!(fixture_customers().len(), 6);
    }
}
