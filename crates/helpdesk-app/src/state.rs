// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{Layout, ViewKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_view: ViewKind,
    pub layout: Layout,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_view: ViewKind::Inbox,
            layout: Layout::Wide,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextView,
    PrevView,
    ShowView(ViewKind),
    SetLayout(Layout),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(ViewKind),
    LayoutChanged(Layout),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextView => self.rotate_view(1),
            AppCommand::PrevView => self.rotate_view(-1),
            AppCommand::ShowView(view) => {
                if self.active_view == view {
                    return Vec::new();
                }
                self.active_view = view;
                debug!(view = view.as_str(), "view changed");
                vec![AppEvent::ViewChanged(view)]
            }
            AppCommand::SetLayout(layout) => {
                if self.layout == layout {
                    return Vec::new();
                }
                self.layout = layout;
                vec![AppEvent::LayoutChanged(layout)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_view(&mut self, delta: isize) -> Vec<AppEvent> {
        let views = ViewKind::ALL;
        let current = views
            .iter()
            .position(|view| *view == self.active_view)
            .unwrap_or(0) as isize;
        let len = views.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_view = views[next];
        debug!(view = self.active_view.as_str(), "view changed");
        vec![AppEvent::ViewChanged(self.active_view)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{Layout, ViewKind};

    #[test]
    fn view_rotation_wraps() {
        let mut state = AppState {
            active_view: ViewKind::Settings,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextView);
        assert_eq!(state.active_view, ViewKind::Inbox);
        assert_eq!(events, vec![AppEvent::ViewChanged(ViewKind::Inbox)]);

        state.dispatch(AppCommand::PrevView);
        assert_eq!(state.active_view, ViewKind::Settings);
    }

    #[test]
    fn showing_current_view_is_silent() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::ShowView(ViewKind::Inbox)).is_empty());
        assert_eq!(
            state.dispatch(AppCommand::ShowView(ViewKind::Customers)),
            vec![AppEvent::ViewChanged(ViewKind::Customers)]
        );
    }

    #[test]
    fn layout_change_emits_once() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::SetLayout(Layout::Narrow)),
            vec![AppEvent::LayoutChanged(Layout::Narrow)]
        );
        assert!(state.dispatch(AppCommand::SetLayout(Layout::Narrow)).is_empty());
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::SetStatus("reply sent".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("reply sent"));
        assert_eq!(events, vec![AppEvent::StatusUpdated("reply sent".to_owned())]);

        state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
    }
}
