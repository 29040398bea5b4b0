// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::filter::{Record, filter_records};
use crate::{Layout, Selection};

/// View-local list state shared by the inbox, conversation and customer views:
/// active tab, search text, keyboard cursor and selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<R: Record> {
    tab: R::Tab,
    query: String,
    cursor: usize,
    selection: Selection<R::Id>,
}

impl<R: Record> Default for ListView<R> {
    fn default() -> Self {
        Self {
            tab: R::Tab::default(),
            query: String::new(),
            cursor: 0,
            selection: Selection::default(),
        }
    }
}

impl<R: Record> ListView<R> {
    pub fn tab(&self) -> R::Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: R::Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.cursor = 0;
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.cursor = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    pub fn visible<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        filter_records(records, self.tab, &self.query)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor within the visible rows, clamping at both ends.
    pub fn move_cursor(&mut self, records: &[R], delta: isize) {
        let len = self.visible(records).len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let current = self.cursor.min(len - 1) as isize;
        self.cursor = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn cursor_record<'a>(&self, records: &'a [R]) -> Option<&'a R> {
        self.visible(records).get(self.cursor).copied()
    }

    /// Selects the row under the cursor and returns its id.
    pub fn select_at_cursor(&mut self, records: &[R], layout: Layout) -> Option<R::Id> {
        let id = self.cursor_record(records)?.id().clone();
        self.selection.select(id.clone(), layout);
        Some(id)
    }

    pub fn back(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection<R::Id> {
        &self.selection
    }

    /// The selected record, looked up in the full store so a record that the
    /// current tab hides stays open in the detail pane.
    pub fn selected_record<'a>(&self, records: &'a [R]) -> Option<&'a R> {
        let id = self.selection.selected()?;
        records.iter().find(|record| record.id() == id)
    }
}
