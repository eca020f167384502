// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive shell (ratatui + crossterm): a document picker, the query box with
//! the result-count slider, the ranked result list and a page view the overlays are drawn on.
//! Network calls run on the tokio runtime; their answers come back over a channel and are applied
//! between frames.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::backend::Backend;
use crate::document::DocumentLayout;
use crate::edit::AreaEdit;
use crate::model::{
    filter_options, EmbeddingId, EmbeddingInfo, HighlightId, HighlightKind, ResultHighlight,
    ViewportRect,
};
use crate::nav::{hash_for, NavOutcome};
use crate::query::{QueryOutcome, QueryTicket};
use crate::render::text::{excerpt, page_label, NO_RESULTS};
use crate::render::{similarity_tip, ContextAction, ContextMenu, Gesture};
use crate::ui::ViewerState;
use crate::viewport::ViewportMapper;

mod viewport;

use self::viewport::{PageRow, TerminalViewport};

const FOCUS_COLOR: Color = Color::LightGreen;
const EDIT_COLOR: Color = Color::LightMagenta;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const PAGE_HEADER_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "intrasearch";
const CUTOFF_BAR_WIDTH: usize = 12;

/// Runs the interactive terminal UI until the user quits.
///
/// `handle` must belong to a runtime that outlives the call; requests are spawned onto it.
pub fn run(
    backend: Backend,
    initial: Option<EmbeddingId>,
    handle: tokio::runtime::Handle,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<NetEvent>();
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(backend.label(), initial);

    while !app.should_quit {
        for request in app.take_requests() {
            let backend = backend.clone();
            let tx = tx.clone();
            handle.spawn(async move {
                let _ = tx.send(perform(backend, request).await);
            });
        }
        while let Ok(event) = rx.try_recv() {
            app.apply_net_event(event);
        }
        if let Some((text, what)) = app.take_clipboard() {
            match copy_to_clipboard(&text) {
                Ok(backend) => app.set_toast(format!("Copied {what} ({backend})")),
                Err(err) => app.set_toast(format!("Clipboard error: {err}")),
            }
        }

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// Work the shell hands to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NetRequest {
    ListEmbeddings,
    Document(EmbeddingId),
    Query(QueryTicket),
}

#[derive(Debug)]
enum NetEvent {
    Embeddings(Result<Vec<EmbeddingInfo>, ApiError>),
    Document { embedding_id: EmbeddingId, result: Result<Option<Vec<u8>>, ApiError> },
    Query { ticket: QueryTicket, result: Result<Vec<ResultHighlight>, ApiError> },
}

async fn perform(backend: Backend, request: NetRequest) -> NetEvent {
    match request {
        NetRequest::ListEmbeddings => NetEvent::Embeddings(backend.list_embeddings().await),
        NetRequest::Document(embedding_id) => {
            let result = backend.document(&embedding_id).await;
            NetEvent::Document { embedding_id, result }
        }
        NetRequest::Query(ticket) => {
            let result = backend.query(&ticket.embedding_id, &ticket.query).await;
            NetEvent::Query { ticket, result }
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let direction =
        if stack_panes_vertically(main_area) { Direction::Vertical } else { Direction::Horizontal };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(main_area);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(30), Constraint::Length(4), Constraint::Min(0)])
        .split(panes[0]);

    draw_documents(frame, app, sidebar[0]);
    draw_search(frame, app, sidebar[1]);
    draw_results(frame, app, sidebar[2]);
    draw_page(frame, app, panes[1]);

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let prompt = match app.mode {
        InputMode::Filter => Some(("/", app.document_filter.as_str())),
        InputMode::Query => Some(("Search: ", app.query_input.as_str())),
        InputMode::DeepLink => Some(("Go to: ", app.deep_link_input.as_str())),
        InputMode::Normal | InputMode::Menu | InputMode::AreaEdit => None,
    };
    if let Some((prefix, input)) = prompt {
        let cursor_x = status_area
            .x
            .saturating_add(prefix.chars().count() as u16)
            .saturating_add(input.chars().count() as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        let status = Paragraph::new(prompt_footer_line(prefix, input, &toast_suffix));
        frame.render_widget(status, status_area);
        frame.set_cursor_position((cursor_x, status_area.y));
    } else {
        let status = Paragraph::new(footer_help_line(app, &toast_suffix));
        frame.render_widget(status, status_area);
        let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
        frame.render_widget(brand, status_area);
    }

    if let Some(menu) = app.menu.as_ref() {
        render_menu(frame, menu, main_area);
    }
    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn draw_documents(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let current = app.viewer.store().embedding_id();
    let items = if app.visible_documents.is_empty() {
        let empty = if app.documents.is_empty() { "No documents" } else { "No matches" };
        vec![ListItem::new(empty).style(Style::default().fg(Color::DarkGray))]
    } else {
        app.visible_documents
            .iter()
            .filter_map(|idx| app.documents.get(*idx))
            .map(|info| {
                let marker = if current == Some(&info.id) { "● " } else { "  " };
                ListItem::new(format!("{marker}{}", info.label()))
            })
            .collect()
    };

    let filter_tail = (!app.document_filter.is_empty()).then(|| format!("/{}", app.document_filter));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Documents", '1', filter_tail.as_deref()))
                .border_style(panel_border_style(app.focus, Focus::Documents)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.documents_state);
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let filter = app.viewer.filter();
    let total = app.viewer.store().len();
    let query_line = if app.query_input.is_empty() && app.mode != InputMode::Query {
        Line::from(Span::styled("press i to search", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![Span::raw("> "), Span::raw(app.query_input.clone())])
    };
    let mut cutoff = vec![
        Span::raw(format!("Shown {}/{} ", filter.staged().min(total), total)),
        Span::styled(
            cutoff_bar(filter.staged().min(total), total, CUTOFF_BAR_WIDTH),
            Style::default().fg(FOOTER_KEY_COLOR),
        ),
    ];
    if filter.apply_available() {
        cutoff.push(Span::styled(" f to apply", Style::default().fg(FOCUS_COLOR)));
    }

    let busy = app.viewer.queries().is_busy().then_some("searching…");
    let paragraph = Paragraph::new(vec![query_line, Line::from(cutoff)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Search", '2', busy))
            .border_style(panel_border_style(app.focus, Focus::Search)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_results(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let working_set = app.viewer.working_set();
    let focused = app.viewer.nav().focused_id();
    let editing = app.viewer.editor().editing_id();
    let items = if working_set.is_empty() {
        vec![ListItem::new(NO_RESULTS).style(Style::default().fg(Color::DarkGray))]
    } else {
        working_set
            .iter()
            .enumerate()
            .map(|(rank, highlight)| {
                let style = if editing == Some(&highlight.id) {
                    Style::default().fg(EDIT_COLOR)
                } else if focused == Some(&highlight.id) {
                    Style::default().fg(FOCUS_COLOR)
                } else {
                    Style::default()
                };
                let lines = vec![
                    Line::from(format!("{:>2}. {}", rank + 1, excerpt(highlight))),
                    Line::from(Span::styled(
                        format!("    {} · {}", page_label(highlight), highlight.similarity_label()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                ListItem::new(lines).style(style)
            })
            .collect()
    };

    let tip = app
        .results_state
        .selected()
        .and_then(|idx| working_set.get(idx))
        .map(similarity_tip);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Results", '3', tip.as_deref()))
                .border_style(panel_border_style(app.focus, Focus::Results)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn draw_page(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block_title = {
        let page_count = app.viewport.layout().page_count();
        let tail = format!("{}/{}", app.viewport.current_page(), page_count);
        view_title("Page", '4', Some(&tail))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(block_title)
        .border_style(panel_border_style(app.focus, Focus::Page));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.viewport.resize(inner.width as usize, inner.height as usize);
    app.repaint();

    let lines = app
        .viewport
        .visible_rows()
        .into_iter()
        .map(|row| page_row_line(row, &app.overlay_flags, app.edit_rect.as_ref()))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Filter,
    Query,
    DeepLink,
    Menu,
    AreaEdit,
}

/// How one overlay is drawn, indexed by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OverlayFlags {
    kind: HighlightKind,
    focused: bool,
    editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MenuPopup {
    highlight_id: HighlightId,
    text: Option<String>,
    actions: Vec<ContextAction>,
    cursor: usize,
}

/// Captures what the viewer asks to show so the shell can draw it as a popup.
#[derive(Debug, Default)]
struct MenuCapture {
    popup: Option<MenuPopup>,
}

impl ContextMenu for MenuCapture {
    fn open(&mut self, highlight: &ResultHighlight, actions: &[ContextAction]) {
        self.popup = Some(MenuPopup {
            highlight_id: highlight.id.clone(),
            text: highlight.content.text.clone(),
            actions: actions.to_vec(),
            cursor: 0,
        });
    }
}

struct App {
    viewer: ViewerState,
    viewport: TerminalViewport,
    overlay_flags: Vec<OverlayFlags>,
    layout_from_pdf: bool,
    backend_label: String,
    focus: Focus,
    mode: InputMode,
    documents: Vec<EmbeddingInfo>,
    document_filter: String,
    visible_documents: Vec<usize>,
    documents_state: ListState,
    query_input: String,
    results_state: ListState,
    deep_link_input: String,
    menu: Option<MenuPopup>,
    edit_rect: Option<ViewportRect>,
    requests: Vec<NetRequest>,
    pending_clipboard: Option<(String, &'static str)>,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(backend_label: String, initial: Option<EmbeddingId>) -> Self {
        let mut viewer = ViewerState::new();
        viewer.mount();

        let mut app = Self {
            viewer,
            viewport: TerminalViewport::new(DocumentLayout::default()),
            overlay_flags: Vec::new(),
            layout_from_pdf: false,
            backend_label,
            focus: Focus::Documents,
            mode: InputMode::Normal,
            documents: Vec::new(),
            document_filter: String::new(),
            visible_documents: Vec::new(),
            documents_state: ListState::default(),
            query_input: String::new(),
            results_state: ListState::default(),
            deep_link_input: String::new(),
            menu: None,
            edit_rect: None,
            requests: vec![NetRequest::ListEmbeddings],
            pending_clipboard: None,
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            should_quit: false,
        };
        if let Some(embedding_id) = initial {
            app.open_document(embedding_id);
            app.focus = Focus::Search;
        }
        app
    }

    fn take_requests(&mut self) -> Vec<NetRequest> {
        std::mem::take(&mut self.requests)
    }

    fn take_clipboard(&mut self) -> Option<(String, &'static str)> {
        self.pending_clipboard.take()
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }

    fn apply_net_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::Embeddings(Ok(documents)) => {
                debug!(count = documents.len(), backend = %self.backend_label, "documents listed");
                self.documents = documents;
                self.refresh_documents();
                let current = self.viewer.store().embedding_id().cloned();
                if let Some(current) = current {
                    let position = self
                        .visible_documents
                        .iter()
                        .position(|idx| self.documents[*idx].id == current);
                    if position.is_some() {
                        self.documents_state.select(position);
                    }
                }
            }
            NetEvent::Embeddings(Err(err)) => {
                warn!(error = %err, "listing documents failed");
                self.set_toast("Unable to fetch embedding info!");
            }
            NetEvent::Document { embedding_id, result } => {
                if self.viewer.store().embedding_id() != Some(&embedding_id) {
                    debug!(embedding = %embedding_id, "dropping document for a previous selection");
                    return;
                }
                match result {
                    Ok(Some(bytes)) => match DocumentLayout::from_pdf(&bytes) {
                        Ok(layout) => {
                            self.viewport.set_layout(layout);
                            self.layout_from_pdf = true;
                        }
                        Err(err) => {
                            warn!(embedding = %embedding_id, error = %err, "unreadable document");
                            self.set_toast("Unable to read document pages");
                        }
                    },
                    Ok(None) => {}
                    Err(err) => {
                        warn!(embedding = %embedding_id, error = %err, "document download failed");
                        self.set_toast("Unable to fetch document!");
                    }
                }
            }
            NetEvent::Query { ticket, result } => match self.viewer.complete_query(ticket, result) {
                Ok(QueryOutcome::Applied { count }) => {
                    if !self.layout_from_pdf {
                        let layout = DocumentLayout::from_highlights(self.viewer.store().highlights());
                        self.viewport.set_layout(layout);
                    }
                    self.results_state.select((count > 0).then_some(0));
                    if count == 0 {
                        self.set_toast(NO_RESULTS);
                    } else {
                        self.set_toast(format!("{count} results"));
                    }
                }
                Ok(QueryOutcome::Stale) => {}
                Err(err) => {
                    warn!(error = ?err, "query failed");
                    self.set_toast(err.to_string());
                }
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::PageDown => self.help_scroll_page(1),
                KeyCode::PageUp => self.help_scroll_page(-1),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        match self.mode {
            InputMode::Normal => {}
            InputMode::Filter => {
                self.handle_filter_key(code);
                return false;
            }
            InputMode::Query => {
                self.handle_query_key(code);
                return false;
            }
            InputMode::DeepLink => {
                self.handle_deep_link_key(code);
                return false;
            }
            InputMode::Menu => {
                self.handle_menu_key(code);
                return false;
            }
            InputMode::AreaEdit => {
                self.handle_area_edit_key(code);
                return false;
            }
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Char('1') => self.focus = Focus::Documents,
            KeyCode::Char('2') => self.focus = Focus::Search,
            KeyCode::Char('3') => self.focus = Focus::Results,
            KeyCode::Char('4') => self.focus = Focus::Page,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.viewer.nudge_rowcount(1);
            }
            KeyCode::Char('-') => {
                self.viewer.nudge_rowcount(-1);
            }
            KeyCode::Char('f') => self.apply_rowcount(),
            KeyCode::Char('g') => {
                self.deep_link_input.clear();
                self.mode = InputMode::DeepLink;
            }
            KeyCode::Char('y') => self.yank_deep_link(),
            KeyCode::Char('m') => self.open_menu(),
            KeyCode::Char('/') => {
                self.focus = Focus::Documents;
                self.mode = InputMode::Filter;
            }
            KeyCode::Char('i') => {
                self.focus = Focus::Search;
                self.mode = InputMode::Query;
            }
            _ => match self.focus {
                Focus::Documents => self.handle_documents_key(code),
                Focus::Search => {
                    if code == KeyCode::Enter {
                        self.mode = InputMode::Query;
                    }
                }
                Focus::Results => self.handle_results_key(code),
                Focus::Page => self.handle_page_key(code),
            },
        }

        false
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        self.help_scroll = (i32::from(self.help_scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }

    fn help_scroll_page(&mut self, direction: i32) {
        let step = i32::from(self.help_viewport_height.saturating_sub(1).max(1));
        self.help_scroll_by(direction.signum() * step);
    }

    fn handle_documents_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                move_cursor(&mut self.documents_state, self.visible_documents.len(), 1)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                move_cursor(&mut self.documents_state, self.visible_documents.len(), -1)
            }
            KeyCode::Enter => {
                let selected = self
                    .documents_state
                    .selected()
                    .and_then(|idx| self.visible_documents.get(idx))
                    .and_then(|idx| self.documents.get(*idx))
                    .map(|info| info.id.clone());
                if let Some(embedding_id) = selected {
                    self.open_document(embedding_id);
                    self.focus = Focus::Search;
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        let len = self.viewer.working_set().len();
        match code {
            KeyCode::Down | KeyCode::Char('j') => move_cursor(&mut self.results_state, len, 1),
            KeyCode::Up | KeyCode::Char('k') => move_cursor(&mut self.results_state, len, -1),
            KeyCode::Enter => self.focus_selected_result(),
            KeyCode::Char('e') => self.begin_area_edit(),
            _ => {}
        }
    }

    fn handle_page_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('n') => return self.step_overlay(1),
            KeyCode::Char('N') | KeyCode::Char('p') => return self.step_overlay(-1),
            KeyCode::Enter => return self.activate_overlay_in_view(),
            KeyCode::Char('e') => return self.begin_area_edit(),
            KeyCode::Down | KeyCode::Char('j') => self.viewport.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.viewport.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.viewport.scroll_page(1),
            KeyCode::PageUp => self.viewport.scroll_page(-1),
            KeyCode::Home => self.viewport.scroll_to_row(0),
            KeyCode::End => self.viewport.scroll_to_row(usize::MAX),
            _ => return,
        }
        self.check_scroll_away();
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.document_filter.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => self.mode = InputMode::Normal,
            _ => edit_input(&mut self.document_filter, code),
        }
        self.refresh_documents();
    }

    fn handle_query_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => self.submit_query(),
            _ => edit_input(&mut self.query_input, code),
        }
    }

    fn handle_deep_link_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                let fragment = std::mem::take(&mut self.deep_link_input);
                if let NavOutcome::Scrolled(id) = self.viewer.hash_changed(&fragment, &mut self.viewport)
                {
                    self.select_result(&id);
                }
            }
            _ => edit_input(&mut self.deep_link_input, code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let Some(menu) = self.menu.as_mut() else {
            self.mode = InputMode::Normal;
            return;
        };
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                menu.cursor = (menu.cursor + 1).min(menu.actions.len().saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => menu.cursor = menu.cursor.saturating_sub(1),
            KeyCode::Enter => {
                let copied = match menu.actions.get(menu.cursor) {
                    Some(ContextAction::CopyDeepLink) => {
                        Some((format!("#{}", hash_for(menu.highlight_id.as_str())), "link"))
                    }
                    Some(ContextAction::CopyText) => menu.text.clone().map(|text| (text, "text")),
                    None => None,
                };
                self.pending_clipboard = copied;
                self.close_menu();
            }
            KeyCode::Esc | KeyCode::Char('m') => self.close_menu(),
            _ => {}
        }
    }

    fn handle_area_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('h') | KeyCode::Left => self.adjust_edit_rect(-1.0, 0.0, 0.0, 0.0),
            KeyCode::Char('l') | KeyCode::Right => self.adjust_edit_rect(1.0, 0.0, 0.0, 0.0),
            KeyCode::Char('k') | KeyCode::Up => self.adjust_edit_rect(0.0, -1.0, 0.0, 0.0),
            KeyCode::Char('j') | KeyCode::Down => self.adjust_edit_rect(0.0, 1.0, 0.0, 0.0),
            KeyCode::Char('H') => self.adjust_edit_rect(0.0, 0.0, -1.0, 0.0),
            KeyCode::Char('L') => self.adjust_edit_rect(0.0, 0.0, 1.0, 0.0),
            KeyCode::Char('K') => self.adjust_edit_rect(0.0, 0.0, 0.0, -1.0),
            KeyCode::Char('J') => self.adjust_edit_rect(0.0, 0.0, 0.0, 1.0),
            KeyCode::Enter => self.finish_area_edit(),
            KeyCode::Esc => {
                self.viewer.cancel_area_edit();
                self.edit_rect = None;
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn refresh_documents(&mut self) {
        self.visible_documents = filter_options(&self.documents, &self.document_filter);
        let len = self.visible_documents.len();
        let selected = match self.documents_state.selected() {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => Some(0),
        };
        self.documents_state.select(selected);
    }

    /// Switches documents. The page layout falls back to the default until the new one loads.
    fn open_document(&mut self, embedding_id: EmbeddingId) {
        self.viewer.select_document(Some(embedding_id.clone()));
        self.viewport.set_layout(DocumentLayout::default());
        self.layout_from_pdf = false;
        self.results_state.select(None);
        self.edit_rect = None;
        self.close_menu();
        self.requests.push(NetRequest::Document(embedding_id));
    }

    fn submit_query(&mut self) {
        match self.viewer.submit_query(&self.query_input) {
            Ok(ticket) => {
                self.requests.push(NetRequest::Query(ticket));
                self.mode = InputMode::Normal;
                self.focus = Focus::Results;
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn apply_rowcount(&mut self) {
        if !self.viewer.filter().apply_available() {
            return;
        }
        let shown = self.viewer.commit_rowcount();
        let selected = self.results_state.selected().map(|idx| idx.min(shown.saturating_sub(1)));
        self.results_state.select(if shown == 0 { None } else { selected });
        self.set_toast(format!("Showing {shown} results"));
    }

    fn selected_result_id(&self) -> Option<HighlightId> {
        self.results_state
            .selected()
            .and_then(|idx| self.viewer.working_set().get(idx))
            .map(|highlight| highlight.id.clone())
    }

    fn select_result(&mut self, id: &HighlightId) {
        let store = self.viewer.store();
        if store.is_in_working_set(id.as_str()) {
            self.results_state.select(store.position_of(id.as_str()));
        }
    }

    fn focus_selected_result(&mut self) {
        let Some(id) = self.selected_result_id() else {
            return;
        };
        self.viewer.focus(&id, &mut self.viewport);
    }

    /// Focuses an overlay from the page view and selects its list entry, so `m` and `e` act on it.
    fn activate_overlay(&mut self, id: &HighlightId) {
        self.viewer.focus(id, &mut self.viewport);
        self.select_result(id);
    }

    /// Moves to the next (or previous) overlay in reading order, wrapping at either end.
    fn step_overlay(&mut self, delta: isize) {
        let overlays = self.viewer.overlays(&self.viewport);
        let mut order = overlays
            .iter()
            .filter_map(|overlay| Some((overlay.rects().first()?, overlay)))
            .collect::<Vec<_>>();
        if order.is_empty() {
            self.set_toast(NO_RESULTS);
            return;
        }
        order.sort_by(|(a, _), (b, _)| {
            a.page_number
                .cmp(&b.page_number)
                .then(a.top.total_cmp(&b.top))
                .then(a.left.total_cmp(&b.left))
        });

        let len = order.len() as isize;
        let current = self
            .viewer
            .nav()
            .focused_id()
            .and_then(|id| order.iter().position(|(_, overlay)| &overlay.id == id));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        let id = order[next as usize].1.id.clone();
        self.activate_overlay(&id);
    }

    /// Activates the overlay under the first marked cell of the view, scanning rows top down.
    fn activate_overlay_in_view(&mut self) {
        self.repaint();
        let overlays = self.viewer.overlays(&self.viewport);
        let hit = self
            .viewport
            .visible_rows()
            .into_iter()
            .find_map(|row| {
                let PageRow::Cells { page, y, cells } = row else {
                    return None;
                };
                let y = y as f64 + 0.5;
                (0..cells.len()).find_map(|x| {
                    overlays.iter().find(|overlay| overlay.contains(page, x as f64 + 0.5, y))
                })
            })
            .map(|overlay| overlay.id.clone());

        match hit {
            Some(id) => self.activate_overlay(&id),
            None => self.set_toast("No result in view"),
        }
    }

    /// Drops focus once the focused highlight has scrolled out of view.
    fn check_scroll_away(&mut self) {
        let visible = match self.viewer.nav().focused_id() {
            None => return,
            Some(id) => self
                .viewer
                .store()
                .lookup_by_id(id.as_str())
                .map(|h| self.viewport.scaled_to_viewport(&h.position.bounding_rect))
                .is_some_and(|rect| self.viewport.is_visible(&rect)),
        };
        if !visible {
            self.viewer.scroll_away();
        }
    }

    fn yank_deep_link(&mut self) {
        match self.viewer.nav().deep_link() {
            Some(link) => self.pending_clipboard = Some((link, "link")),
            None => self.set_toast("No highlight focused"),
        }
    }

    fn open_menu(&mut self) {
        let Some(id) = self.selected_result_id() else {
            self.set_toast("No result selected");
            return;
        };
        let mut capture = MenuCapture::default();
        if self.viewer.open_context_menu(&id, &mut capture) {
            self.menu = capture.popup;
            self.mode = InputMode::Menu;
        }
    }

    fn close_menu(&mut self) {
        self.menu = None;
        if self.mode == InputMode::Menu {
            self.mode = InputMode::Normal;
        }
    }

    fn begin_area_edit(&mut self) {
        let Some(id) = self.selected_result_id() else {
            return;
        };
        let overlays = self.viewer.overlays(&self.viewport);
        let Some(overlay) = overlays.iter().find(|overlay| overlay.id == id) else {
            return;
        };
        if !overlay.accepts(Gesture::EditStart) {
            self.set_toast("Only area results can be resized");
            return;
        }
        let Some(region) = overlay.rects().first().copied() else {
            return;
        };
        if let Err(err) = self.viewer.begin_area_edit(&id) {
            self.set_toast(err.to_string());
            return;
        }

        self.viewer.focus(&id, &mut self.viewport);
        self.edit_rect = Some(region.normalized());
        self.mode = InputMode::AreaEdit;
        self.focus = Focus::Page;
    }

    /// Moves the edge positions of the pending region, kept inside its page.
    fn adjust_edit_rect(&mut self, dx: f64, dy: f64, dw: f64, dh: f64) {
        let Some(rect) = self.edit_rect.as_mut() else {
            return;
        };
        let Some(page) = self.viewport.page_size(rect.page_number) else {
            return;
        };
        rect.width = (rect.width + dw).clamp(1.0, page.width);
        rect.height = (rect.height + dh).clamp(1.0, page.height);
        rect.left = (rect.left + dx).clamp(0.0, page.width - rect.width);
        rect.top = (rect.top + dy).clamp(0.0, page.height - rect.height);
    }

    fn finish_area_edit(&mut self) {
        self.mode = InputMode::Normal;
        let Some(rect) = self.edit_rect.take() else {
            return;
        };
        let Some(id) = self.viewer.editor().editing_id().cloned() else {
            return;
        };

        self.repaint();
        let snapshot = self.viewport.screenshot(&rect);
        match self.viewer.finish_area_edit(&id, AreaEdit { rect, snapshot }, &self.viewport) {
            Ok(true) => self.set_toast("Area updated"),
            Ok(false) => self.set_toast("Result is no longer available"),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    /// Re-derives overlays from the viewer and paints them onto the page canvases.
    fn repaint(&mut self) {
        let overlays = self.viewer.overlays(&self.viewport);
        self.overlay_flags = overlays
            .iter()
            .map(|overlay| OverlayFlags {
                kind: overlay.kind(),
                focused: overlay.scrolled_to,
                editing: overlay.editing,
            })
            .collect();
        if let Err(err) = self.viewport.paint(&overlays, self.viewer.working_set()) {
            warn!(error = %err, "page paint failed");
        }
    }
}

fn move_cursor(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = if delta < 0 {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs()).min(len - 1)
    };
    state.select(Some(next));
}

fn edit_input(input: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(ch) => input.push(ch),
        KeyCode::Backspace => {
            input.pop();
        }
        _ => {}
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
