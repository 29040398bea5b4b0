// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Reply composer: draft text, submission, and the simulated assist panels.
//!
//! Each assist panel moves `idle -> busy -> revealed -> idle`. Only a reveal
//! carrying the in-flight request id can move a panel out of `busy`; a newer
//! request supersedes an older one and the older reveal is dropped.

use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::{debug, info};

use crate::reveal::PendingReveal;
use crate::{Conversation, Feedback, Message, Tone};

pub const SUGGESTION_DELAY: Duration = Duration::from_millis(1500);
pub const SUMMARY_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    Suggestions,
    Summary,
}

impl AssistKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Suggestions => "suggestions",
            Self::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistDelays {
    pub suggestions: Duration,
    pub summary: Duration,
}

impl Default for AssistDelays {
    fn default() -> Self {
        Self {
            suggestions: SUGGESTION_DELAY,
            summary: SUMMARY_DELAY,
        }
    }
}

impl AssistDelays {
    pub const fn for_kind(&self, kind: AssistKind) -> Duration {
        match kind {
            AssistKind::Suggestions => self.suggestions,
            AssistKind::Summary => self.summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRequest {
    pub request_id: u64,
    pub kind: AssistKind,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Idle,
    Busy,
    Revealed,
}

#[derive(Debug)]
pub struct Composer {
    draft: String,
    delays: AssistDelays,
    in_flight: Option<RevealRequest>,
    pending: Option<PendingReveal>,
    suggestions_visible: bool,
    summary_visible: bool,
    active_tone: Tone,
    next_request_id: u64,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(AssistDelays::default())
    }
}

impl Composer {
    pub fn new(delays: AssistDelays) -> Self {
        Self {
            draft: String::new(),
            delays,
            in_flight: None,
            pending: None,
            suggestions_visible: false,
            summary_visible: false,
            active_tone: Tone::Formal,
            next_request_id: 0,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Builds the reply for `selected` from the current draft, then clears the
    /// draft and the suggestion panel. Returns `None` without touching any
    /// state when the draft is blank or nothing is selected.
    pub fn submit(&mut self, selected: Option<&Conversation>) -> Option<Message> {
        let conversation = selected?;
        if !self.can_submit() {
            return None;
        }

        let draft = std::mem::take(&mut self.draft);
        let message = Message::agent_reply(conversation.next_message_position(), draft);
        self.suggestions_visible = false;
        info!(
            conversation = %conversation.id,
            message = %message.id,
            "reply submitted"
        );
        Some(message)
    }

    /// Marks `kind` busy and returns the reveal that should be scheduled for it.
    pub fn begin(&mut self, kind: AssistKind) -> RevealRequest {
        if let Some(previous) = self.in_flight.take() {
            debug!(
                request_id = previous.request_id,
                kind = previous.kind.label(),
                "superseding in-flight assist request"
            );
        }
        self.pending = None;
        self.next_request_id = self.next_request_id.saturating_add(1);
        let request = RevealRequest {
            request_id: self.next_request_id,
            kind,
            delay: self.delays.for_kind(kind),
        };
        self.in_flight = Some(request);
        debug!(
            request_id = request.request_id,
            kind = kind.label(),
            delay_ms = request.delay.as_millis() as u64,
            "assist requested"
        );
        request
    }

    /// Starts `kind` and schedules its reveal on `tx`. The reveal is cancelled
    /// if this composer is dropped or another request supersedes it.
    pub fn generate<E, F>(&mut self, kind: AssistKind, tx: &Sender<E>, event: F) -> RevealRequest
    where
        E: Send + 'static,
        F: FnOnce(RevealRequest) -> E,
    {
        let request = self.begin(kind);
        self.pending = Some(PendingReveal::spawn(request.delay, tx.clone(), event(request)));
        request
    }

    pub fn generate_suggestions<E, F>(&mut self, tx: &Sender<E>, event: F) -> RevealRequest
    where
        E: Send + 'static,
        F: FnOnce(RevealRequest) -> E,
    {
        self.generate(AssistKind::Suggestions, tx, event)
    }

    pub fn generate_summary<E, F>(&mut self, tx: &Sender<E>, event: F) -> RevealRequest
    where
        E: Send + 'static,
        F: FnOnce(RevealRequest) -> E,
    {
        self.generate(AssistKind::Summary, tx, event)
    }

    /// Applies a fired reveal. Stale request ids are ignored.
    pub fn complete(&mut self, request_id: u64) -> Option<AssistKind> {
        let in_flight = self.in_flight?;
        if in_flight.request_id != request_id {
            debug!(request_id, "ignoring stale assist reveal");
            return None;
        }

        self.in_flight = None;
        self.pending = None;
        match in_flight.kind {
            AssistKind::Suggestions => {
                self.suggestions_visible = true;
                self.active_tone = Tone::Formal;
            }
            AssistKind::Summary => self.summary_visible = true,
        }
        debug!(request_id, kind = in_flight.kind.label(), "assist revealed");
        Some(in_flight.kind)
    }

    pub fn cancel(&mut self) -> Option<RevealRequest> {
        self.pending = None;
        let cancelled = self.in_flight.take();
        if let Some(request) = cancelled {
            debug!(request_id = request.request_id, "assist request cancelled");
        }
        cancelled
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RevealRequest> {
        self.in_flight
    }

    pub fn phase(&self, kind: AssistKind) -> PanelPhase {
        if self.in_flight.is_some_and(|request| request.kind == kind) {
            return PanelPhase::Busy;
        }
        let visible = match kind {
            AssistKind::Suggestions => self.suggestions_visible,
            AssistKind::Summary => self.summary_visible,
        };
        if visible {
            PanelPhase::Revealed
        } else {
            PanelPhase::Idle
        }
    }

    pub fn dismiss(&mut self, kind: AssistKind) {
        match kind {
            AssistKind::Suggestions => self.suggestions_visible = false,
            AssistKind::Summary => self.summary_visible = false,
        }
    }

    pub fn active_tone(&self) -> Tone {
        self.active_tone
    }

    pub fn cycle_tone(&mut self) -> Tone {
        self.active_tone = self.active_tone.next();
        self.active_tone
    }

    /// Copies a suggestion into the draft and closes the panel. Does not submit.
    pub fn choose_suggestion(&mut self, content: &str) -> bool {
        if !self.suggestions_visible {
            return false;
        }
        self.draft = content.to_owned();
        self.suggestions_visible = false;
        true
    }

    /// Feedback on a revealed panel is acknowledged and otherwise discarded.
    pub fn record_feedback(&self, kind: AssistKind, feedback: Feedback) -> bool {
        if self.phase(kind) != PanelPhase::Revealed {
            return false;
        }
        debug!(kind = kind.label(), ?feedback, "assist feedback");
        true
    }
}
