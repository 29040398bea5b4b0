// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use helpdesk_app::{
    ConversationId, ConversationTab, Customer, CustomerTab, Message, Sender,
    filter_conversations_by_tag, filter_customers_by_tag, filter_records,
};
use helpdesk_store::{ItemStore, Seed, Stores};
use helpdesk_testkit::{
    ConversationBuilder, CustomerBuilder, expect_ids, fixture_conversations, fixture_customers,
};

#[test]
fn demo_seed_matches_fixture() -> Result<()> {
    let seed = Seed::demo()?;
    assert_eq!(seed.conversations, fixture_conversations());
    assert_eq!(seed.customers, fixture_customers());
    Ok(())
}

#[test]
fn closed_tag_returns_three_and_five_in_order() -> Result<()> {
    let stores = Stores::demo()?;
    let closed = filter_conversations_by_tag(stores.conversations.items(), "closed");
    expect_ids(closed.iter().map(|c| c.id.as_str()), &["3", "5"])
}

#[test]
fn wilson_query_returns_only_emma() -> Result<()> {
    let stores = Stores::demo()?;
    let found = filter_records(stores.customers.items(), CustomerTab::All, "wilson");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Emma Wilson");
    Ok(())
}

#[test]
fn unknown_tag_passes_everything_through() -> Result<()> {
    let stores = Stores::demo()?;
    let all = filter_conversations_by_tag(stores.conversations.items(), "archived");
    assert_eq!(all.len(), stores.conversations.len());

    let customers = filter_customers_by_tag(stores.customers.items(), "vip", "");
    assert_eq!(customers.len(), 6);
    Ok(())
}

#[test]
fn every_tab_yields_order_preserving_subset() -> Result<()> {
    let stores = Stores::demo()?;
    let items = stores.conversations.items();
    for tab in ConversationTab::ALL {
        let visible = filter_records(items, tab, "");
        let positions: Vec<usize> = visible
            .iter()
            .map(|record| {
                items
                    .iter()
                    .position(|item| item.id == record.id)
                    .expect("filtered record comes from the store")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{tab:?}");
    }

    let customers = stores.customers.items();
    for tab in CustomerTab::ALL {
        for record in filter_records(customers, tab, "") {
            assert!(tab == CustomerTab::All || record.status.as_str() == tab.as_str());
        }
    }
    Ok(())
}

#[test]
fn empty_query_returns_store_unchanged() -> Result<()> {
    let stores = Stores::demo()?;
    let all: Vec<&Customer> = filter_records(stores.customers.items(), CustomerTab::All, "");
    let expected: Vec<&Customer> = stores.customers.items().iter().collect();
    assert_eq!(all, expected);
    Ok(())
}

#[test]
fn query_matches_email_and_company_fields() -> Result<()> {
    let stores = Stores::demo()?;
    let by_email = filter_customers_by_tag(stores.customers.items(), "all", "OLIVIA.K@");
    expect_ids(by_email.iter().map(|c| c.id.as_str()), &["5"])?;

    let by_company = filter_customers_by_tag(stores.customers.items(), "active", "gmbh");
    expect_ids(by_company.iter().map(|c| c.id.as_str()), &["6"])?;

    let wrong_tab = filter_customers_by_tag(stores.customers.items(), "new", "gmbh");
    assert!(wrong_tab.is_empty());
    Ok(())
}

#[test]
fn filtering_does_not_mutate_store() -> Result<()> {
    let stores = Stores::demo()?;
    let before = stores.clone();
    let _ = filter_records(stores.customers.items(), CustomerTab::Inactive, "e");
    let _ = filter_conversations_by_tag(stores.conversations.items(), "unread");
    assert_eq!(stores, before);
    Ok(())
}

#[test]
fn duplicate_ids_are_rejected() {
    let error = ItemStore::new(vec![
        CustomerBuilder::new("1", "Ann Lee").build(),
        CustomerBuilder::new("1", "Ben Ng").build(),
    ])
    .expect_err("duplicate ids should fail");
    assert!(error.to_string().contains("duplicate record id"));
}

#[test]
fn append_message_grows_only_target_conversation() -> Result<()> {
    let mut stores = Stores::demo()?;
    let id = ConversationId::from("1");
    stores
        .conversations
        .append_message(&id, Message::agent_reply(2, "hello"))?;

    let conversation = stores.conversations.get(&id).expect("seeded conversation");
    assert_eq!(conversation.messages.len(), 2);
    let last = conversation.messages.last().expect("appended message");
    assert_eq!(last.sender, Sender::Agent);
    assert_eq!(last.content, "hello");

    let untouched = stores
        .conversations
        .get(&ConversationId::from("4"))
        .expect("seeded conversation");
    assert_eq!(untouched.messages.len(), 1);
    Ok(())
}

#[test]
fn append_after_gapped_seed_keeps_message_ids_unique() -> Result<()> {
    let mut conversation = ConversationBuilder::new("1", "Ann Lee")
        .customer_says("one")
        .customer_says("two")
        .build();
    conversation.messages[1].id = "m3".into();
    let mut conversations = ItemStore::new(vec![conversation])?;
    let id = ConversationId::from("1");

    let next = conversations
        .get(&id)
        .expect("seeded conversation")
        .next_message_position();
    conversations.append_message(&id, Message::agent_reply(next, "three"))?;
    // A caller that still counts messages gets its colliding id replaced.
    conversations.append_message(&id, Message::agent_reply(3, "four"))?;

    let conversation = conversations.get(&id).expect("seeded conversation");
    let ids: Vec<&str> = conversation.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3", "m4", "m5"]);

    let seed = Seed {
        conversations: conversations.items().to_vec(),
        customers: Vec::new(),
    };
    seed.validate()?;
    Ok(())
}

#[test]
fn append_to_unknown_conversation_fails() -> Result<()> {
    let mut stores = Stores::demo()?;
    let error = stores
        .conversations
        .append_message(&ConversationId::from("99"), Message::agent_reply(1, "hi"))
        .expect_err("unknown conversation should fail");
    assert!(error.to_string().contains("conversation 99 not found"));
    Ok(())
}

#[test]
fn seed_with_unknown_status_is_rejected() {
    let raw = r#"{"customers":[{"id":"1","name":"A","email":"a@x","status":"vip",
        "lastActive":"now","conversations":0,"firstSeen":"today","initials":"A"}]}"#;
    let error = Seed::from_json(raw).expect_err("unknown status should fail");
    assert!(format!("{error:#}").contains("decode seed JSON"));
}

#[test]
fn seed_with_repeated_message_ids_is_rejected() {
    let mut conversation = ConversationBuilder::new("1", "Ann Lee")
        .customer_says("one")
        .build();
    conversation.messages.push(conversation.messages[0].clone());
    let seed = Seed {
        conversations: vec![conversation],
        customers: Vec::new(),
    };
    let error = seed.validate().expect_err("repeated message id should fail");
    assert!(error.to_string().contains("repeats message id m1"));
}

#[test]
fn load_reads_seed_from_disk() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("seed.json");
    let seed = Seed {
        conversations: vec![ConversationBuilder::new("7", "Ann Lee").closed().build()],
        customers: vec![CustomerBuilder::new("7", "Ann Lee").company("Lee Co").build()],
    };
    std::fs::write(&path, serde_json::to_string_pretty(&seed)?)?;

    let loaded = Seed::load(&path)?;
    assert_eq!(loaded, seed);
    Ok(())
}

#[test]
fn load_missing_file_names_path() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("absent.json");
    let error = Seed::load(&path).expect_err("missing file should fail");
    assert!(error.to_string().contains("absent.json"));
    Ok(())
}
