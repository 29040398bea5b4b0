// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use helpdesk_app::{
    AppCommand, AppEvent, AppState, AssistDelays, AssistKind, Composer, Conversation,
    ConversationId, ConversationTab, Customer, CustomerTab, Feedback, Layout as PaneLayout,
    ListView, Message, PanelPhase, Record, RevealRequest, Summary, Suggestion, Tone, ViewKind,
    tab_counts,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_NARROW_WIDTH: u16 = 100;

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const LIST_PERCENT: u16 = 38;
const PREVIEW_CHARS: usize = 48;

/// Terminal-facing knobs that do not belong to the app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub narrow_width: u16,
    pub force_narrow: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            narrow_width: DEFAULT_NARROW_WIDTH,
            force_narrow: false,
        }
    }
}

impl UiOptions {
    pub fn layout_for_width(&self, width: u16) -> PaneLayout {
        if self.force_narrow || width < self.narrow_width {
            PaneLayout::Narrow
        } else {
            PaneLayout::Wide
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub label: String,
    pub value: String,
}

impl SettingRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything the UI needs from the outside world: the stores, the assistant
/// and the effective configuration.
pub trait AppRuntime {
    fn conversations(&self) -> &[Conversation];
    fn customers(&self) -> &[Customer];
    fn append_message(&mut self, conversation: &ConversationId, message: Message) -> Result<()>;
    fn suggestions(&self, conversation: &Conversation) -> Vec<Suggestion>;
    fn summarize(&self, conversation: &Conversation) -> Summary;
    fn settings_rows(&self) -> Vec<SettingRow>;
    fn assist_enabled(&self) -> bool {
        true
    }
    fn assist_delays(&self) -> AssistDelays {
        AssistDelays::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    Reveal { generation: u64, request: RevealRequest },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Nav,
    Reply,
    Search,
}

impl Focus {
    const fn badge(self) -> &'static str {
        match self {
            Self::Nav => "NAV",
            Self::Reply => "REPLY",
            Self::Search => "SEARCH",
        }
    }
}

/// View-local UI state. Rebuilt on every view switch; `generation` tags the
/// reveals scheduled by the current composer so late ones from a previous
/// view are dropped.
#[derive(Debug, Default)]
struct ViewData {
    inbox: ListView<Conversation>,
    conversations: ListView<Conversation>,
    customers: ListView<Customer>,
    composer: Option<Composer>,
    focus: Focus,
    generation: u64,
    help_visible: bool,
    status_deadline: Option<Instant>,
}

impl ViewData {
    fn for_view(view: ViewKind, delays: AssistDelays) -> Self {
        let mut data = Self::default();
        data.reset(view, delays);
        data
    }

    fn reset(&mut self, view: ViewKind, delays: AssistDelays) {
        self.inbox = ListView::default();
        self.conversations = ListView::default();
        self.customers = ListView::default();
        self.focus = Focus::Nav;
        self.generation = self.generation.saturating_add(1);
        // Replacing the composer drops any pending reveal with it.
        self.composer = match view {
            ViewKind::Inbox | ViewKind::Conversations => Some(Composer::new(delays)),
            ViewKind::Customers | ViewKind::Analytics | ViewKind::Settings => None,
        };
    }

    fn conversation_list(&self, view: ViewKind) -> Option<&ListView<Conversation>> {
        match view {
            ViewKind::Inbox => Some(&self.inbox),
            ViewKind::Conversations => Some(&self.conversations),
            _ => None,
        }
    }

    fn conversation_list_mut(&mut self, view: ViewKind) -> Option<&mut ListView<Conversation>> {
        match view {
            ViewKind::Inbox => Some(&mut self.inbox),
            ViewKind::Conversations => Some(&mut self.conversations),
            _ => None,
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::for_view(state.active_view, runtime.assist_delays());
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    match terminal.size() {
        Ok(size) => {
            state.dispatch(AppCommand::SetLayout(options.layout_for_width(size.width)));
        }
        Err(error) => warn!(%error, "terminal size unavailable; keeping default layout"),
    }
    info!(
        view = state.active_view.as_str(),
        layout = ?state.layout,
        "ui started"
    );

    loop {
        process_internal_events(state, &mut view_data, &internal_rx);
        clear_expired_status(state, &mut view_data, Instant::now());

        if let Err(error) = terminal.draw(|frame| render(frame, state, &*runtime, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let next = match event::poll(Duration::from_millis(120)) {
            Ok(true) => event::read().map(Some),
            Ok(false) => Ok(None),
            Err(error) => Err(error),
        };
        match next.context("read terminal event") {
            Ok(Some(Event::Key(key))) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(Some(Event::Resize(width, _))) => {
                state.dispatch(AppCommand::SetLayout(options.layout_for_width(width)));
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    drop(view_data);
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("ui stopped");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(state, view_data, event);
    }
}

fn handle_internal_event(state: &mut AppState, view_data: &mut ViewData, event: InternalEvent) {
    match event {
        InternalEvent::Reveal {
            generation,
            request,
        } => {
            if generation != view_data.generation {
                debug!(
                    generation,
                    request_id = request.request_id,
                    "dropping reveal from a previous view"
                );
                return;
            }
            let revealed = view_data
                .composer
                .as_mut()
                .and_then(|composer| composer.complete(request.request_id));
            if let Some(kind) = revealed {
                emit_status(state, view_data, format!("{} ready", kind.label()));
            }
        }
    }
}

/// Clears the status line once its deadline passes; checked on every poll tick.
fn clear_expired_status(state: &mut AppState, view_data: &mut ViewData, now: Instant) {
    if view_data
        .status_deadline
        .is_some_and(|deadline| deadline <= now)
    {
        view_data.status_deadline = None;
        state.dispatch(AppCommand::ClearStatus);
    }
}

fn emit_status(state: &mut AppState, view_data: &mut ViewData, message: impl Into<String>) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_deadline = Some(Instant::now() + STATUS_CLEAR_DELAY);
}

fn dispatch_and_reset<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    command: AppCommand,
) {
    for event in state.dispatch(command) {
        match event {
            AppEvent::ViewChanged(view) => view_data.reset(view, runtime.assist_delays()),
            AppEvent::StatusUpdated(_) => {
                view_data.status_deadline = Some(Instant::now() + STATUS_CLEAR_DELAY);
            }
            AppEvent::LayoutChanged(_) | AppEvent::StatusCleared => {}
        }
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        let cancelled = view_data.composer.as_mut().and_then(Composer::cancel);
        let status = match cancelled {
            Some(request) => format!("{} canceled", request.kind.label()),
            None => "cancel requested; nothing is generating".to_owned(),
        };
        emit_status(state, view_data, status);
        return false;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.focus {
        Focus::Reply => handle_reply_key(state, runtime, view_data, key),
        Focus::Search => handle_search_key(view_data, key),
        Focus::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let view = state.active_view;
    match key.code {
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('f') => {
            dispatch_and_reset(state, runtime, view_data, AppCommand::NextView);
        }
        KeyCode::Char('b') => {
            dispatch_and_reset(state, runtime, view_data, AppCommand::PrevView);
        }
        KeyCode::Char(digit @ '1'..='5') => {
            let index = (digit as usize).saturating_sub('1' as usize);
            if let Some(target) = ViewKind::ALL.get(index) {
                let command = AppCommand::ShowView(*target);
                dispatch_and_reset(state, runtime, view_data, command);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(&*runtime, view_data, view, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(&*runtime, view_data, view, -1),
        KeyCode::Char('g') | KeyCode::Home => {
            let rows = store_len(&*runtime, view) as isize;
            move_cursor(&*runtime, view_data, view, -rows);
        }
        KeyCode::Char('G') | KeyCode::End => {
            let rows = store_len(&*runtime, view) as isize;
            move_cursor(&*runtime, view_data, view, rows);
        }
        KeyCode::Char('l') | KeyCode::Right => cycle_tab(view_data, view, 1),
        KeyCode::Char('h') | KeyCode::Left => cycle_tab(view_data, view, -1),
        KeyCode::Enter => select_at_cursor(state, &*runtime, view_data),
        KeyCode::Esc => close_detail(view_data, view),
        KeyCode::Char('r') => start_reply(state, &*runtime, view_data),
        KeyCode::Char('/') => {
            if view == ViewKind::Customers && Customer::searchable() {
                view_data.focus = Focus::Search;
            } else {
                emit_status(state, view_data, "search is only in customers");
            }
        }
        KeyCode::Char('s') => {
            request_assist(state, &*runtime, view_data, internal_tx, AssistKind::Suggestions);
        }
        KeyCode::Char('S') => {
            request_assist(state, &*runtime, view_data, internal_tx, AssistKind::Summary);
        }
        KeyCode::Char('t') => cycle_tone(state, &*runtime, view_data),
        KeyCode::Char('u') => use_active_suggestion(state, &*runtime, view_data),
        KeyCode::Char('x') => {
            dismiss_panel(state, &*runtime, view_data, AssistKind::Suggestions);
        }
        KeyCode::Char('X') => dismiss_panel(state, &*runtime, view_data, AssistKind::Summary),
        KeyCode::Char('+') => rate_panel(state, &*runtime, view_data, Feedback::Helpful),
        KeyCode::Char('-') => rate_panel(state, &*runtime, view_data, Feedback::NotHelpful),
        _ => {}
    }
}

fn handle_reply_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => view_data.focus = Focus::Nav,
        KeyCode::Enter => submit_reply(state, runtime, view_data),
        KeyCode::Backspace => {
            if let Some(composer) = view_data.composer.as_mut() {
                composer.pop_char();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(composer) = view_data.composer.as_mut() {
                composer.push_char(ch);
            }
        }
        _ => {}
    }
}

fn handle_search_key(view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => view_data.focus = Focus::Nav,
        KeyCode::Backspace => view_data.customers.pop_query_char(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.customers.push_query_char(ch);
        }
        _ => {}
    }
}

fn store_len<R: AppRuntime>(runtime: &R, view: ViewKind) -> usize {
    match view {
        ViewKind::Inbox | ViewKind::Conversations => runtime.conversations().len(),
        ViewKind::Customers => runtime.customers().len(),
        ViewKind::Analytics | ViewKind::Settings => 0,
    }
}

fn move_cursor<R: AppRuntime>(runtime: &R, view_data: &mut ViewData, view: ViewKind, delta: isize) {
    match view {
        ViewKind::Inbox | ViewKind::Conversations => {
            if let Some(list) = view_data.conversation_list_mut(view) {
                list.move_cursor(runtime.conversations(), delta);
            }
        }
        ViewKind::Customers => view_data.customers.move_cursor(runtime.customers(), delta),
        ViewKind::Analytics | ViewKind::Settings => {}
    }
}

fn rotate<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|item| *item == current).unwrap_or(0) as isize;
    all[(index + delta).rem_euclid(len) as usize]
}

fn cycle_tab(view_data: &mut ViewData, view: ViewKind, delta: isize) {
    match view {
        ViewKind::Inbox | ViewKind::Conversations => {
            if let Some(list) = view_data.conversation_list_mut(view) {
                let next = rotate(&ConversationTab::ALL, list.tab(), delta);
                list.set_tab(next);
            }
        }
        ViewKind::Customers => {
            let next = rotate(&CustomerTab::ALL, view_data.customers.tab(), delta);
            view_data.customers.set_tab(next);
        }
        ViewKind::Analytics | ViewKind::Settings => {}
    }
}

fn select_at_cursor<R: AppRuntime>(state: &AppState, runtime: &R, view_data: &mut ViewData) {
    let layout = state.layout;
    let selected = match state.active_view {
        view @ (ViewKind::Inbox | ViewKind::Conversations) => view_data
            .conversation_list_mut(view)
            .and_then(|list| list.select_at_cursor(runtime.conversations(), layout))
            .map(|id| id.to_string()),
        ViewKind::Customers => view_data
            .customers
            .select_at_cursor(runtime.customers(), layout)
            .map(|id| id.to_string()),
        ViewKind::Analytics | ViewKind::Settings => None,
    };
    if let Some(id) = selected {
        debug!(view = state.active_view.as_str(), id = %id, "record selected");
    }
}

fn close_detail(view_data: &mut ViewData, view: ViewKind) {
    match view {
        ViewKind::Inbox | ViewKind::Conversations => {
            if let Some(list) = view_data.conversation_list_mut(view) {
                list.back();
            }
        }
        ViewKind::Customers => view_data.customers.back(),
        ViewKind::Analytics | ViewKind::Settings => {}
    }
}

/// The selected conversation, but only while its detail pane is on screen.
/// In narrow layouts `esc` hides the detail and keeps the selection, so
/// actions that act on the open conversation must not reach it.
fn open_conversation<'a>(
    conversations: &'a [Conversation],
    state: &AppState,
    view_data: &ViewData,
) -> Option<&'a Conversation> {
    let list = view_data.conversation_list(state.active_view)?;
    if !list.selection().detail_visible(state.layout) {
        return None;
    }
    list.selected_record(conversations)
}

fn no_open_conversation_status(state: &AppState, view_data: &ViewData) -> &'static str {
    let selected = view_data
        .conversation_list(state.active_view)
        .is_some_and(|list| list.selection().selected().is_some());
    if selected {
        "open a conversation first"
    } else {
        "select a conversation first"
    }
}

fn start_reply<R: AppRuntime>(state: &mut AppState, runtime: &R, view_data: &mut ViewData) {
    if view_data.composer.is_none() {
        emit_status(state, view_data, "replies are written in conversations");
        return;
    }
    if open_conversation(runtime.conversations(), state, view_data).is_none() {
        let status = no_open_conversation_status(state, view_data);
        emit_status(state, view_data, status);
        return;
    }
    view_data.focus = Focus::Reply;
}

fn submit_reply<R: AppRuntime>(state: &mut AppState, runtime: &mut R, view_data: &mut ViewData) {
    let Some(id) = open_conversation(runtime.conversations(), state, view_data)
        .map(|conversation| conversation.id.clone())
    else {
        view_data.focus = Focus::Nav;
        let status = no_open_conversation_status(state, view_data);
        emit_status(state, view_data, status);
        return;
    };
    let Some(composer) = view_data.composer.as_mut() else {
        return;
    };
    let conversation = runtime.conversations().iter().find(|c| c.id == id);
    let status = match composer.submit(conversation) {
        Some(message) => match runtime.append_message(&id, message) {
            Ok(()) => "reply sent".to_owned(),
            Err(error) => format!("send failed: {error:#}"),
        },
        None => "draft is empty".to_owned(),
    };
    emit_status(state, view_data, status);
}

fn request_assist<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    kind: AssistKind,
) {
    if !state.active_view.has_assist() {
        emit_status(state, view_data, "assist is only in the inbox");
        return;
    }
    if !runtime.assist_enabled() {
        emit_status(
            state,
            view_data,
            "assist is disabled; set [assist] enabled = true in the config",
        );
        return;
    }
    if open_conversation(runtime.conversations(), state, view_data).is_none() {
        let status = no_open_conversation_status(state, view_data);
        emit_status(state, view_data, status);
        return;
    }
    if view_data.composer.as_ref().is_some_and(Composer::is_busy) {
        emit_status(state, view_data, "already generating; ctrl+c cancels");
        return;
    }

    let generation = view_data.generation;
    if let Some(composer) = view_data.composer.as_mut() {
        composer.generate(kind, internal_tx, |request| InternalEvent::Reveal {
            generation,
            request,
        });
    }
    emit_status(state, view_data, format!("generating {}...", kind.label()));
}

/// Panels are only shown, and so only actionable, inside an open detail pane.
fn panel_on_screen<R: AppRuntime>(
    state: &AppState,
    runtime: &R,
    view_data: &ViewData,
    kind: AssistKind,
) -> bool {
    revealed(view_data, kind) && open_conversation(runtime.conversations(), state, view_data).is_some()
}

fn revealed(view_data: &ViewData, kind: AssistKind) -> bool {
    view_data
        .composer
        .as_ref()
        .is_some_and(|composer| composer.phase(kind) == PanelPhase::Revealed)
}

fn cycle_tone<R: AppRuntime>(state: &mut AppState, runtime: &R, view_data: &mut ViewData) {
    if !panel_on_screen(state, runtime, view_data, AssistKind::Suggestions) {
        return;
    }
    if let Some(composer) = view_data.composer.as_mut() {
        let tone = composer.cycle_tone();
        emit_status(state, view_data, format!("tone: {}", tone.label()));
    }
}

fn use_active_suggestion<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
) {
    if !panel_on_screen(state, runtime, view_data, AssistKind::Suggestions) {
        emit_status(state, view_data, "no suggestions yet; press s");
        return;
    }
    let Some(conversation) = open_conversation(runtime.conversations(), state, view_data) else {
        return;
    };
    let Some(composer) = view_data.composer.as_mut() else {
        return;
    };
    let tone = composer.active_tone();
    let Some(suggestion) = runtime
        .suggestions(conversation)
        .into_iter()
        .find(|suggestion| suggestion.tone == tone)
    else {
        return;
    };
    if composer.choose_suggestion(&suggestion.content) {
        view_data.focus = Focus::Reply;
        emit_status(
            state,
            view_data,
            format!("{} response copied to reply", tone.label().to_lowercase()),
        );
    }
}

fn dismiss_panel<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    kind: AssistKind,
) {
    if !panel_on_screen(state, runtime, view_data, kind) {
        return;
    }
    if let Some(composer) = view_data.composer.as_mut() {
        composer.dismiss(kind);
        emit_status(state, view_data, format!("{} closed", kind.label()));
    }
}

fn rate_panel<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    feedback: Feedback,
) {
    let kind = if revealed(view_data, AssistKind::Suggestions) {
        AssistKind::Suggestions
    } else {
        AssistKind::Summary
    };
    let recorded = panel_on_screen(state, runtime, view_data, kind)
        && view_data
            .composer
            .as_ref()
            .is_some_and(|composer| composer.record_feedback(kind, feedback));
    let status = if recorded {
        format!("thanks for the {} feedback", kind.label())
    } else {
        "nothing to rate yet".to_owned()
    };
    emit_status(state, view_data, status);
}

struct Pane {
    title: String,
    body: String,
}

fn render<R: AppRuntime>(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    runtime: &R,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = ViewKind::ALL
        .iter()
        .position(|view| *view == state.active_view)
        .unwrap_or(0);
    let titles = ViewKind::ALL
        .iter()
        .enumerate()
        .map(|(index, view)| format!("{} {}", index + 1, view.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("helpdesk").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.active_view {
        ViewKind::Inbox | ViewKind::Conversations => {
            render_conversation_view(frame, layout[1], state, runtime, view_data);
        }
        ViewKind::Customers => render_customer_view(frame, layout[1], state, runtime, view_data),
        ViewKind::Analytics => render_pane(
            frame,
            layout[1],
            Pane {
                title: "analytics".to_owned(),
                body: render_analytics_text(runtime.conversations(), runtime.customers()),
            },
        ),
        ViewKind::Settings => render_pane(
            frame,
            layout[1],
            Pane {
                title: "settings".to_owned(),
                body: render_settings_text(&runtime.settings_rows()),
            },
        ),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(80, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_pane(frame: &mut ratatui::Frame<'_>, area: Rect, pane: Pane) {
    let widget = Paragraph::new(pane.body)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(pane.title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// Wide layouts show list and detail side by side; narrow layouts show the
/// detail overlay in place of the list.
fn render_panes(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    layout: PaneLayout,
    list: Pane,
    detail: Option<Pane>,
) {
    match (layout, detail) {
        (PaneLayout::Wide, detail) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(LIST_PERCENT),
                    Constraint::Percentage(100 - LIST_PERCENT),
                ])
                .split(area);
            render_pane(frame, columns[0], list);
            let detail = detail.unwrap_or(Pane {
                title: "detail".to_owned(),
                body: "select a row with enter".to_owned(),
            });
            render_pane(frame, columns[1], detail);
        }
        (PaneLayout::Narrow, Some(detail)) => render_pane(frame, area, detail),
        (PaneLayout::Narrow, None) => render_pane(frame, area, list),
    }
}

fn render_conversation_view<R: AppRuntime>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    runtime: &R,
    view_data: &ViewData,
) {
    let view = state.active_view;
    let Some(list) = view_data.conversation_list(view) else {
        return;
    };
    let conversations = runtime.conversations();
    let list_pane = Pane {
        title: view.label().to_owned(),
        body: render_conversation_list_text(list, conversations, view.has_assist()),
    };

    let detail = if list.selection().detail_visible(state.layout) {
        list.selected_record(conversations).map(|conversation| {
            let composer = view_data.composer.as_ref();
            let suggestions = if revealed(view_data, AssistKind::Suggestions) {
                runtime.suggestions(conversation)
            } else {
                Vec::new()
            };
            let summary = revealed(view_data, AssistKind::Summary)
                .then(|| runtime.summarize(conversation));
            Pane {
                title: format!("{} · back: esc", conversation.customer.name),
                body: render_conversation_detail_text(
                    conversation,
                    composer,
                    &suggestions,
                    summary.as_ref(),
                    view.has_assist(),
                    view_data.focus == Focus::Reply,
                ),
            }
        })
    } else {
        None
    };
    render_panes(frame, area, state.layout, list_pane, detail);
}

fn render_customer_view<R: AppRuntime>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    runtime: &R,
    view_data: &ViewData,
) {
    let customers = runtime.customers();
    let list = &view_data.customers;
    let list_pane = Pane {
        title: "customers".to_owned(),
        body: render_customer_list_text(list, customers, view_data.focus == Focus::Search),
    };
    let detail = if list.selection().detail_visible(state.layout) {
        list.selected_record(customers).map(|customer| Pane {
            title: format!("{} · back: esc", customer.name),
            body: render_customer_detail_text(customer),
        })
    } else {
        None
    };
    render_panes(frame, area, state.layout, list_pane, detail);
}

fn tab_bar_text<T: Copy + PartialEq>(
    active: T,
    counts: &[(T, usize)],
    label: fn(T) -> &'static str,
) -> String {
    counts
        .iter()
        .map(|(tab, count)| {
            let text = format!("{} {count}", label(*tab));
            if *tab == active {
                format!("[{text}]")
            } else {
                text
            }
        })
        .collect::<Vec<String>>()
        .join("  ")
}

fn row_marks<Id: Clone + Eq>(
    index: usize,
    cursor: usize,
    selection: &helpdesk_app::Selection<Id>,
    id: &Id,
) -> String {
    let cursor = if index == cursor { ">" } else { " " };
    let selected = if selection.is_selected(id) { "*" } else { " " };
    format!("{cursor}{selected}")
}

fn render_conversation_list_text(
    list: &ListView<Conversation>,
    conversations: &[Conversation],
    show_priority: bool,
) -> String {
    let counts = tab_counts(conversations, &ConversationTab::ALL);
    let mut lines = vec![
        tab_bar_text(list.tab(), &counts, ConversationTab::label),
        String::new(),
    ];

    let visible = list.visible(conversations);
    if visible.is_empty() {
        lines.push("no conversations in this tab".to_owned());
    }
    for (index, conversation) in visible.iter().enumerate() {
        let marks = row_marks(index, list.cursor(), list.selection(), &conversation.id);
        let unread = if conversation.unread { "●" } else { " " };
        let mut head = format!(
            "{marks}{unread} {}  {}",
            conversation.customer.name, conversation.date
        );
        if show_priority && let Some(badge) = conversation.effective_priority().badge() {
            head.push_str(&format!("  [{badge}]"));
        }
        lines.push(head);
        lines.push(format!("    {}", conversation.subject));
        lines.push(format!(
            "    {}",
            truncate_label(&conversation.preview, PREVIEW_CHARS)
        ));
    }
    lines.join("\n")
}

fn render_conversation_detail_text(
    conversation: &Conversation,
    composer: Option<&Composer>,
    suggestions: &[Suggestion],
    summary: Option<&Summary>,
    show_assist: bool,
    replying: bool,
) -> String {
    let mut header = format!("{}  ({})", conversation.subject, conversation.status.as_str());
    if show_assist && let Some(badge) = conversation.effective_priority().badge() {
        header.push_str(&format!("  [{badge}]"));
    }
    let mut lines = vec![
        header,
        format!(
            "{} ({})",
            conversation.customer.name, conversation.customer.email
        ),
        String::new(),
    ];

    if show_assist && let Some(composer) = composer {
        push_summary_panel(&mut lines, composer, summary);
    }

    for message in &conversation.messages {
        lines.push(format!(
            "{} · {}",
            conversation.author_label(message),
            message.timestamp
        ));
        lines.push(format!("  {}", message.content));
        lines.push(String::new());
    }

    if show_assist && let Some(composer) = composer {
        push_suggestion_panel(&mut lines, composer, suggestions);
    }

    if let Some(composer) = composer {
        let caret = if replying { "_" } else { "" };
        lines.push(format!("reply> {}{caret}", composer.draft()));
        let hint = match (replying, composer.can_submit()) {
            (false, _) => "r to reply",
            (true, true) => "enter send | esc done",
            (true, false) => "type a reply | esc done",
        };
        lines.push(hint.to_owned());
    }
    lines.join("\n")
}

fn push_summary_panel(lines: &mut Vec<String>, composer: &Composer, summary: Option<&Summary>) {
    match composer.phase(AssistKind::Summary) {
        PanelPhase::Idle => {}
        PanelPhase::Busy => {
            lines.push("AI summary: generating...".to_owned());
            lines.push(String::new());
        }
        PanelPhase::Revealed => {
            let Some(summary) = summary else {
                return;
            };
            lines.push("AI conversation summary".to_owned());
            lines.push(format!("  {}", summary.summary));
            lines.push("  key points".to_owned());
            lines.extend(summary.key_points.iter().map(|point| format!("    • {point}")));
            lines.push(format!("  sentiment: {}", summary.sentiment.as_str()));
            lines.push("  next steps".to_owned());
            lines.extend(summary.next_steps.iter().map(|step| format!("    • {step}")));
            lines.push("  helpful? +/-  X close".to_owned());
            lines.push(String::new());
        }
    }
}

fn push_suggestion_panel(lines: &mut Vec<String>, composer: &Composer, suggestions: &[Suggestion]) {
    match composer.phase(AssistKind::Suggestions) {
        PanelPhase::Idle => {}
        PanelPhase::Busy => {
            lines.push("AI suggestions: generating...".to_owned());
            lines.push(String::new());
        }
        PanelPhase::Revealed => {
            let active = composer.active_tone();
            lines.push(format!("AI suggested responses  {}", tone_bar_text(active)));
            if let Some(suggestion) = suggestions.iter().find(|s| s.tone == active) {
                lines.push(format!("  {}", suggestion.content));
            }
            lines.push("  t tone  u use response  +/- helpful  x close".to_owned());
            lines.push(String::new());
        }
    }
}

fn tone_bar_text(active: Tone) -> String {
    Tone::ALL
        .iter()
        .map(|tone| {
            if *tone == active {
                format!("[{}]", tone.label())
            } else {
                tone.label().to_owned()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn render_customer_list_text(
    list: &ListView<Customer>,
    customers: &[Customer],
    searching: bool,
) -> String {
    let caret = if searching { "_" } else { "" };
    let counts = tab_counts(customers, &CustomerTab::ALL);
    let mut lines = vec![
        format!("search: {}{caret}", list.query()),
        tab_bar_text(list.tab(), &counts, CustomerTab::label),
        String::new(),
    ];

    let visible = list.visible(customers);
    if visible.is_empty() {
        lines.push("no customers match".to_owned());
    }
    for (index, customer) in visible.iter().enumerate() {
        let marks = row_marks(index, list.cursor(), list.selection(), &customer.id);
        lines.push(format!(
            "{marks} {}  {}",
            customer.name,
            customer.status.as_str()
        ));
        let company = customer.company.as_deref().unwrap_or("-");
        lines.push(format!("    {} · {company}", customer.email));
    }
    lines.join("\n")
}

fn render_customer_detail_text(customer: &Customer) -> String {
    let or_dash = |value: &Option<String>| value.as_deref().unwrap_or("-").to_owned();
    [
        format!("{} ({})", customer.name, customer.initials),
        customer.email.clone(),
        String::new(),
        format!("company: {}", or_dash(&customer.company)),
        format!("status: {}", customer.status.as_str()),
        format!("last active: {}", customer.last_active),
        format!("conversations: {}", customer.conversations),
        format!("first seen: {}", customer.first_seen),
        String::new(),
        format!("location: {}", or_dash(&customer.location)),
        format!("browser: {}", or_dash(&customer.browser)),
        format!("os: {}", or_dash(&customer.os)),
    ]
    .join("\n")
}

fn render_analytics_text(conversations: &[Conversation], customers: &[Customer]) -> String {
    let mut lines = vec!["conversations".to_owned()];
    for (tab, count) in tab_counts(conversations, &ConversationTab::ALL) {
        lines.push(format!("  {:<12}{count}", tab.as_str()));
    }
    let elevated = conversations
        .iter()
        .filter(|conversation| conversation.effective_priority().is_elevated())
        .count();
    lines.push(format!("  {:<12}{elevated}", "high/urgent"));
    let messages: usize = conversations
        .iter()
        .map(|conversation| conversation.messages.len())
        .sum();
    lines.push(format!("  {:<12}{messages}", "messages"));

    lines.push(String::new());
    lines.push("customers".to_owned());
    for (tab, count) in tab_counts(customers, &CustomerTab::ALL) {
        lines.push(format!("  {:<12}{count}", tab.as_str()));
    }
    lines.join("\n")
}

fn render_settings_text(rows: &[SettingRow]) -> String {
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    let mut lines = rows
        .iter()
        .map(|row| format!("{:<width$}  {}", row.label, row.value))
        .collect::<Vec<String>>();
    lines.push(String::new());
    lines.push("read-only; edit the config file and restart".to_owned());
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let hints = match view_data.focus {
        Focus::Nav => nav_hints(state.active_view),
        Focus::Reply => "type | enter send | esc nav",
        Focus::Search => "type to filter | enter/esc done",
    };
    let badge = view_data.focus.badge();
    match &state.status_line {
        Some(status) => format!("{badge} | {status} | {hints}"),
        None => format!("{badge} | {hints}"),
    }
}

fn nav_hints(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Inbox => {
            "j/k h/l enter esc | r reply | s suggest S summary | b/f views | ? help | ctrl+q"
        }
        ViewKind::Conversations => "j/k h/l enter esc | r reply | b/f views | ? help | ctrl+q",
        ViewKind::Customers => "j/k h/l enter esc | / search | b/f views | ? help | ctrl+q",
        ViewKind::Analytics | ViewKind::Settings => "b/f views | 1-5 jump | ? help | ctrl+q",
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ctrl+c cancel generation | ? help\n\
views: b/f prev/next | 1-5 jump\n\
lists: j/k move | g/G top/bottom | h/l tab | enter open | esc back\n\
reply: r start | enter send | esc stop typing\n\
customers: / search | enter/esc done\n\
inbox assist: s suggestions | S summary | t tone | u use response\n\
inbox assist: x/X close suggestions/summary | +/- helpful/not helpful"
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
