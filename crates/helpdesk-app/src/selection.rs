// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Layout;

/// At most one selected record, plus the narrow-layout detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id> {
    selected: Option<Id>,
    overlay_open: bool,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            selected: None,
            overlay_open: false,
        }
    }
}

impl<Id: Clone + Eq> Selection<Id> {
    pub fn select(&mut self, id: Id, layout: Layout) {
        self.selected = Some(id);
        if layout == Layout::Narrow {
            self.overlay_open = true;
        }
    }

    /// Closes the overlay; the selection itself is kept so reopening shows it again.
    pub fn clear(&mut self) {
        self.overlay_open = false;
    }

    pub fn selected(&self) -> Option<&Id> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn detail_visible(&self, layout: Layout) -> bool {
        match layout {
            Layout::Wide => self.selected.is_some(),
            Layout::Narrow => self.overlay_open && self.selected.is_some(),
        }
    }

    pub fn list_visible(&self, layout: Layout) -> bool {
        match layout {
            Layout::Wide => true,
            Layout::Narrow => !self.detail_visible(layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::Layout;

    #[test]
    fn narrow_select_then_back_keeps_selection() {
        let mut selection = Selection::default();
        selection.select("r1".to_owned(), Layout::Narrow);
        assert!(selection.overlay_open());
        assert!(selection.detail_visible(Layout::Narrow));
        assert!(!selection.list_visible(Layout::Narrow));

        selection.clear();
        assert_eq!(selection.selected().map(String::as_str), Some("r1"));
        assert!(!selection.overlay_open());
        assert!(selection.list_visible(Layout::Narrow));
    }

    #[test]
    fn wide_select_never_opens_overlay() {
        let mut selection = Selection::default();
        assert!(!selection.detail_visible(Layout::Wide));

        selection.select(7_u32, Layout::Wide);
        assert!(!selection.overlay_open());
        assert!(selection.detail_visible(Layout::Wide));
        assert!(selection.list_visible(Layout::Wide));
    }

    #[test]
    fn reselecting_replaces_previous_record() {
        let mut selection = Selection::default();
        selection.select(1_u32, Layout::Wide);
        selection.select(2_u32, Layout::Wide);
        assert!(selection.is_selected(&2));
        assert!(!selection.is_selected(&1));
    }
}
