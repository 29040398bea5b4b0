// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Category and free-text filtering over record lists.
//!
//! Filtering is a pure projection: it borrows the records, preserves their
//! order, and never mutates the store they came from.

use std::fmt::Debug;

use crate::{
    Conversation, ConversationId, ConversationStatus, ConversationTab, Customer, CustomerId,
    CustomerStatus, CustomerTab,
};

/// A record that can be listed, filtered and selected by id.
pub trait Record {
    type Id: Clone + Eq + Debug;
    type Tab: Copy + Eq + Debug + Default;

    fn id(&self) -> &Self::Id;

    fn matches_tab(&self, tab: Self::Tab) -> bool;

    /// `needle` is already lower-cased and non-empty.
    fn matches_query(&self, needle: &str) -> bool;

    /// Whether the view offers a search box for this record type.
    fn searchable() -> bool {
        false
    }
}

impl Record for Conversation {
    type Id = ConversationId;
    type Tab = ConversationTab;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn matches_tab(&self, tab: ConversationTab) -> bool {
        match tab {
            ConversationTab::All => true,
            ConversationTab::Unread => self.unread,
            ConversationTab::Open => self.status == ConversationStatus::Open,
            ConversationTab::Closed => self.status == ConversationStatus::Closed,
        }
    }

    fn matches_query(&self, _needle: &str) -> bool {
        true
    }
}

impl Record for Customer {
    type Id = CustomerId;
    type Tab = CustomerTab;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn matches_tab(&self, tab: CustomerTab) -> bool {
        match tab {
            CustomerTab::All => true,
            CustomerTab::Active => self.status == CustomerStatus::Active,
            CustomerTab::Inactive => self.status == CustomerStatus::Inactive,
            CustomerTab::New => self.status == CustomerStatus::New,
        }
    }

    fn matches_query(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
            || contains_folded(&self.email, needle)
            || self
                .company
                .as_deref()
                .is_some_and(|company| contains_folded(company, needle))
    }

    fn searchable() -> bool {
        true
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Records matching both `tab` and `query`, in store order.
pub fn filter_records<'a, R: Record>(records: &'a [R], tab: R::Tab, query: &str) -> Vec<&'a R> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| needle.is_empty() || record.matches_query(&needle))
        .filter(|record| record.matches_tab(tab))
        .collect()
}

/// Per-tab counts with no text query applied, in `tabs` order.
pub fn tab_counts<R: Record>(records: &[R], tabs: &[R::Tab]) -> Vec<(R::Tab, usize)> {
    tabs.iter()
        .map(|tab| {
            let count = records.iter().filter(|record| record.matches_tab(*tab)).count();
            (*tab, count)
        })
        .collect()
}

/// Filters conversations by a raw tag value; unrecognized tags pass everything through.
pub fn filter_conversations_by_tag<'a>(
    conversations: &'a [Conversation],
    tag: &str,
) -> Vec<&'a Conversation> {
    let tab = ConversationTab::parse(tag).unwrap_or_default();
    filter_records(conversations, tab, "")
}

/// Filters customers by a raw tag value and search text; unrecognized tags pass through.
pub fn filter_customers_by_tag<'a>(
    customers: &'a [Customer],
    tag: &str,
    query: &str,
) -> Vec<&'a Customer> {
    let tab = CustomerTab::parse(tag).unwrap_or_default();
    filter_records(customers, tab, query)
}

#[cfg(test)]
mod tests {
    use super::{Record, filter_records, tab_counts};
    use crate::{
        Conversation, ConversationId, ConversationStatus, ConversationTab, Customer, CustomerId,
        CustomerProfile, CustomerStatus, CustomerTab,
    };

    fn conversation(id: &str, status: ConversationStatus, unread: bool) -> Conversation {
        Conversation {
            id: ConversationId::from(id),
            customer: CustomerProfile {
                name: format!("Customer {id}"),
                email: format!("c{id}@example.com"),
                avatar: None,
                initials: "CC".to_owned(),
            },
            subject: format!("Subject {id}"),
            preview: String::new(),
            date: "Today".to_owned(),
            unread,
            status,
            priority: None,
            messages: Vec::new(),
        }
    }

    fn customer(id: &str, name: &str, company: Option<&str>, status: CustomerStatus) -> Customer {
        Customer {
            id: CustomerId::from(id),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            company: company.map(str::to_owned),
            status,
            last_active: "now".to_owned(),
            conversations: 1,
            location: None,
            browser: None,
            os: None,
            first_seen: "Jan 1, 2024".to_owned(),
            avatar: None,
            initials: "XX".to_owned(),
        }
    }

    #[test]
    fn unread_tab_keeps_only_unread_in_order() {
        let records = vec![
            conversation("1", ConversationStatus::Open, true),
            conversation("2", ConversationStatus::Closed, false),
            conversation("3", ConversationStatus::Closed, true),
        ];
        let ids: Vec<&str> = filter_records(&records, ConversationTab::Unread, "")
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn conversations_ignore_search_text() {
        let records = vec![conversation("1", ConversationStatus::Open, false)];
        assert_eq!(filter_records(&records, ConversationTab::All, "zzz").len(), 1);
    }

    #[test]
    fn customer_query_matches_company_case_insensitively() {
        let records = vec![
            customer("1", "Ada Lovelace", Some("Analytical Engines"), CustomerStatus::Active),
            customer("2", "Grace Hopper", None, CustomerStatus::Active),
        ];
        let found = filter_records(&records, CustomerTab::All, "ENGINES");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "1");
    }

    #[test]
    fn customer_without_company_matches_on_email() {
        let records = vec![customer("2", "Grace Hopper", None, CustomerStatus::New)];
        assert_eq!(filter_records(&records, CustomerTab::New, "grace.hopper@").len(), 1);
        assert!(filter_records(&records, CustomerTab::Active, "grace").is_empty());
    }

    #[test]
    fn tab_counts_cover_every_tab() {
        let records = vec![
            conversation("1", ConversationStatus::Open, true),
            conversation("2", ConversationStatus::Closed, false),
        ];
        let counts = tab_counts(&records, &ConversationTab::ALL);
        assert_eq!(
            counts,
            vec![
                (ConversationTab::All, 2),
                (ConversationTab::Unread, 1),
                (ConversationTab::Open, 1),
                (ConversationTab::Closed, 1),
            ]
        );
    }

    #[test]
    fn customers_are_searchable_and_conversations_are_not() {
        assert!(Customer::searchable());
        assert!(!Conversation::searchable());
    }
}
