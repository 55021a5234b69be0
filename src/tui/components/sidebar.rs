//! # Sidebar Component
//!
//! The navigational menu: a search input above the filtered category list.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` and owns the memoized filter
//!   result (rebuilt only when the query changes) plus cursor/scroll state
//! - `Sidebar` is created each frame with borrowed state
//!
//! In wide terminals the sidebar is a fixed column; in narrow terminals it
//! renders as a full-height overlay when the menu is open.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// One rendered line of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Category(String),
    Item { id: String, title: String },
    /// Spacer between categories; never selectable.
    Blank,
}

/// Persistent sidebar state: the memoized filtered view plus navigation.
pub struct SidebarState {
    rows: Vec<Row>,
    /// Row indices that hold items, in order. Cursor moves over these.
    selectable: Vec<usize>,
    /// Index into `selectable`.
    cursor: usize,
    list_state: ListState,
    /// Query the current `rows` were built from. `None` forces a rebuild.
    cached_query: Option<String>,
    /// List viewport from the last render pass, for click hit testing.
    last_list_area: Rect,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selectable: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
            cached_query: None,
            last_list_area: Rect::default(),
        }
    }

    /// Rebuild the filtered view if the query changed since last time.
    /// The filter itself is pure; this is the single memoization point.
    pub fn sync(&mut self, app: &App) {
        if self.cached_query.as_deref() == Some(app.search_query.as_str()) {
            return;
        }

        let keep_id = self.selected_id().map(str::to_string);
        self.rows.clear();
        self.selectable.clear();
        for (i, category) in app.corpus.filter(&app.search_query).iter().enumerate() {
            if i > 0 {
                self.rows.push(Row::Blank);
            }
            self.rows.push(Row::Category(category.title.to_string()));
            for item in &category.items {
                self.selectable.push(self.rows.len());
                self.rows.push(Row::Item {
                    id: item.id.clone(),
                    title: item.title.clone(),
                });
            }
        }
        self.cached_query = Some(app.search_query.clone());

        // Keep the cursor on the same section when it survives the filter,
        // otherwise fall back to the first visible item.
        self.cursor = keep_id
            .and_then(|id| self.position_of(&id))
            .unwrap_or(0);
        self.apply_cursor();
    }

    /// Move the cursor onto the given section id, if visible.
    pub fn focus_id(&mut self, id: &str) {
        if let Some(pos) = self.position_of(id) {
            self.cursor = pos;
            self.apply_cursor();
        }
    }

    /// Id under the cursor, if the filtered list is non-empty.
    pub fn selected_id(&self) -> Option<&str> {
        let row_idx = *self.selectable.get(self.cursor)?;
        match &self.rows[row_idx] {
            Row::Item { id, .. } => Some(id),
            _ => None,
        }
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.selectable.iter().position(|&ri| {
            matches!(&self.rows[ri], Row::Item { id: row_id, .. } if row_id == id)
        })
    }

    fn apply_cursor(&mut self) {
        match self.selectable.get(self.cursor) {
            Some(&row_idx) => self.list_state.select(Some(row_idx)),
            None => self.list_state.select(None),
        }
    }

    /// Map a terminal click onto an item row. Uses the layout recorded
    /// during the last render pass.
    pub fn hit_test(&self, _col: u16, row: u16) -> Option<&str> {
        let area = self.last_list_area;
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let row_idx = (row - area.y) as usize + self.list_state.offset();
        match self.rows.get(row_idx)? {
            Row::Item { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::CursorUp => {
                if !self.selectable.is_empty() {
                    self.cursor = self.cursor.saturating_sub(1);
                    self.apply_cursor();
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.selectable.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.selectable.len() - 1);
                    self.apply_cursor();
                }
                None
            }
            TuiEvent::Submit => self
                .selected_id()
                .map(|id| SidebarEvent::Activate(id.to_string())),
            _ => None,
        }
    }
}

/// Events emitted by the sidebar.
pub enum SidebarEvent {
    /// Open this section in the content pane.
    Activate(String),
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    app: &'a App,
    /// True while the user is editing the search query.
    searching: bool,
    /// Render as a full overlay (narrow-terminal menu) instead of a column.
    overlay: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, app: &'a App, searching: bool, overlay: bool) -> Self {
        Self {
            state,
            app,
            searching,
            overlay,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.app);

        let block = if self.overlay {
            frame.render_widget(Clear, area);
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Contents ")
                .padding(Padding::horizontal(1))
        } else {
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1))
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [search_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.render_search(frame, search_area);
        self.state.last_list_area = list_area;

        if self.state.rows.is_empty() {
            self.render_no_results(frame, list_area);
            return;
        }

        let width = list_area.width as usize;
        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .map(|row| self.row_line(row, width))
            .map(ListItem::new)
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let line = if self.searching {
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(Color::Yellow)),
                Span::raw(self.app.search_query.clone()),
                Span::styled("▌", Style::default().fg(Color::Yellow)),
            ])
        } else if self.app.search_query.is_empty() {
            Line::from(Span::styled(
                "/ search docs…",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.app.search_query.clone()),
                Span::styled("  (Esc clears)", Style::default().fg(Color::DarkGray)),
            ])
        };
        frame.render_widget(line, area);
    }

    fn render_no_results(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("No results for \"{}\"", self.app.search_query.trim()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Esc to clear search",
                Style::default().fg(Color::Yellow),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn row_line(&self, row: &Row, width: usize) -> Line<'static> {
        match row {
            Row::Blank => Line::default(),
            Row::Category(title) => Line::from(Span::styled(
                truncate_to_width(&title.to_uppercase(), width),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )),
            Row::Item { id, title } => {
                let is_active = *id == self.app.active_id;
                let marker = if is_active { "› " } else { "  " };
                let style = if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    truncate_to_width(&format!("{marker}{title}"), width),
                    style,
                ))
            }
        }
    }
}

/// Truncate a string to a display width, appending `…` when cut. Width is
/// measured in terminal cells, not chars, so wide glyphs count double.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
