//! # Content Pane Component
//!
//! Scrollable view of the active section: title, rendered markdown body,
//! and a prev/next footer over the flattened corpus order.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContentState` owns scroll position and a render cache keyed by
//!   section id (bodies are static, so re-rendering markdown every frame
//!   would be pure waste)
//! - `ContentPane` is created each frame with borrowed state
//!
//! An `active_id` that doesn't resolve renders a "content not found"
//! fallback instead of failing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::core::corpus::DocItem;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Persistent content pane state.
pub struct ContentState {
    pub scroll_state: tui_scrollview::ScrollViewState,
    /// (section id, pane width) the cache was rendered for.
    cache_key: Option<(String, u16)>,
    cached_text: Text<'static>,
    /// Total rendered height and viewport height from the last render,
    /// for paging and scroll clamping.
    content_height: u16,
    viewport_height: u16,
    /// Footer hit areas recorded during the last render pass.
    prev_area: Rect,
    next_area: Rect,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentState {
    pub fn new() -> Self {
        Self {
            scroll_state: tui_scrollview::ScrollViewState::default(),
            cache_key: None,
            cached_text: Text::default(),
            content_height: 0,
            viewport_height: 0,
            prev_area: Rect::default(),
            next_area: Rect::default(),
        }
    }

    /// Reset the scroll position to the top of the pane.
    pub fn scroll_to_top(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset();
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let y = current.y as i32 + delta;
        let y = y.clamp(0, max_y as i32) as u16;
        self.scroll_state.set_offset(Position { x: 0, y });
    }

    /// Map a click onto the prev/next footer targets.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<FooterHit> {
        let pos = Position { x: col, y: row };
        if self.prev_area.contains(pos) {
            Some(FooterHit::Prev)
        } else if self.next_area.contains(pos) {
            Some(FooterHit::Next)
        } else {
            None
        }
    }
}

impl EventHandler for ContentState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let page = self.viewport_height.saturating_sub(1).max(1) as i32;
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-page),
            TuiEvent::ScrollPageDown => self.scroll_by(page),
            TuiEvent::ScrollTop => self.scroll_to_top(),
            TuiEvent::ScrollBottom => self.scroll_by(i32::MAX.min(self.content_height as i32)),
            _ => return None,
        }
        Some(())
    }
}

/// Footer click targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterHit {
    Prev,
    Next,
}

/// Transient render wrapper for the content pane.
pub struct ContentPane<'a> {
    state: &'a mut ContentState,
    app: &'a App,
    code_theme: &'a str,
}

impl<'a> ContentPane<'a> {
    pub fn new(state: &'a mut ContentState, app: &'a App, code_theme: &'a str) -> Self {
        Self {
            state,
            app,
            code_theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(item) = self.app.corpus.get(&self.app.active_id) else {
            self.render_not_found(frame, area);
            return;
        };

        // Body above, a stable three-line footer below. The footer never
        // moves, whether or not a neighbor exists on either side.
        let [body_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

        self.render_body(frame, body_area, item);
        self.render_footer(frame, footer_area);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, item: &DocItem) {
        let pad = Rect {
            x: area.x + 2,
            y: area.y,
            width: area.width.saturating_sub(3),
            height: area.height,
        };
        // Leave one column for the scrollbar.
        let text_width = pad.width.saturating_sub(1);

        let key = (item.id.clone(), text_width);
        if self.state.cache_key.as_ref() != Some(&key) {
            let mut text = Text::default();
            text.lines.push(Line::from(Span::styled(
                item.title.clone(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            text.lines.extend(markdown::render(&item.body, self.code_theme).lines);
            self.state.cached_text = text;
            self.state.cache_key = Some(key);
        }

        let paragraph = Paragraph::new(self.state.cached_text.clone()).wrap(Wrap { trim: false });
        let height = paragraph.line_count(text_width) as u16;

        self.state.content_height = height;
        self.state.viewport_height = pad.height;

        let mut scroll_view = ScrollView::new(Size::new(text_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, text_width, height));

        // Clamp before rendering so a section switch from a long body to a
        // short one can't leave the offset past the end.
        let max_y = height.saturating_sub(pad.height);
        if self.state.scroll_state.offset().y > max_y {
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, pad, &mut self.state.scroll_state);
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [prev_area, next_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);
        self.state.prev_area = prev_area;
        self.state.next_area = next_area;

        let (prev, next) = self.app.corpus.neighbors(&self.app.active_id);

        // Absent neighbors still get their half of the footer, so the
        // layout never shifts at the corpus boundaries.
        if let Some(item) = prev {
            let lines = vec![
                Line::from(Span::styled("PREVIOUS", Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(
                    format!("← {}", item.title),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), prev_area);
        }
        if let Some(item) = next {
            let lines = vec![
                Line::from(Span::styled("NEXT", Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(
                    format!("{} →", item.title),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Right), next_area);
        }
    }

    fn render_not_found(&mut self, frame: &mut Frame, area: Rect) {
        // No neighbors to click when the id is unknown.
        self.state.prev_area = Rect::default();
        self.state.next_area = Rect::default();

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "Content not found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("No section with id \"{}\"", self.app.active_id),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let fallback = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(fallback, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use crate::core::config::DEFAULT_CODE_THEME;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, state: &mut ContentState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ContentPane::new(state, app, DEFAULT_CODE_THEME).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_title_and_body() {
        let app = test_app();
        let mut state = ContentState::new();
        let text = draw(&app, &mut state);
        assert!(text.contains("Introduction"));
        assert!(text.contains("sample"));
    }

    #[test]
    fn first_section_has_next_but_no_prev() {
        let app = test_app();
        let mut state = ContentState::new();
        let text = draw(&app, &mut state);
        assert!(text.contains("NEXT"));
        assert!(text.contains("Installation →"));
        assert!(!text.contains("PREVIOUS"));
    }

    #[test]
    fn last_section_has_prev_but_no_next() {
        let mut app = test_app();
        app.active_id = "api".to_string();
        let mut state = ContentState::new();
        let text = draw(&app, &mut state);
        assert!(text.contains("PREVIOUS"));
        assert!(text.contains("← Advanced Usage"));
        assert!(!text.contains("NEXT"));
    }

    #[test]
    fn middle_section_has_both_neighbors() {
        let mut app = test_app();
        app.active_id = "quickstart".to_string();
        let mut state = ContentState::new();
        let text = draw(&app, &mut state);
        assert!(text.contains("← Installation"));
        assert!(text.contains("Advanced Usage →"));
    }

    #[test]
    fn unresolved_id_renders_fallback() {
        let mut app = test_app();
        app.active_id = "ghost".to_string();
        let mut state = ContentState::new();
        let text = draw(&app, &mut state);
        assert!(text.contains("Content not found"));
        assert!(text.contains("ghost"));
        assert!(!text.contains("NEXT"));
    }

    #[test]
    fn render_cache_follows_active_section() {
        let mut app = test_app();
        let mut state = ContentState::new();
        draw(&app, &mut state);
        assert!(state.cache_key.as_ref().unwrap().0 == "introduction");

        app.active_id = "api".to_string();
        let text = draw(&app, &mut state);
        assert!(state.cache_key.as_ref().unwrap().0 == "api");
        assert!(text.contains("API Reference"));
    }

    #[test]
    fn footer_hit_test_targets_prev_and_next() {
        let mut app = test_app();
        app.active_id = "quickstart".to_string();
        let mut state = ContentState::new();
        draw(&app, &mut state);

        let prev = state.prev_area;
        let next = state.next_area;
        assert_eq!(state.hit_test(prev.x, prev.y), Some(FooterHit::Prev));
        assert_eq!(state.hit_test(next.x + 1, next.y), Some(FooterHit::Next));
        assert_eq!(state.hit_test(0, 0), None);
    }

    #[test]
    fn scroll_events_move_and_clamp() {
        let app = test_app();
        let mut state = ContentState::new();
        draw(&app, &mut state);

        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll_state.offset().y, 0);

        state.handle_event(&TuiEvent::ScrollDown);
        let after_down = state.scroll_state.offset().y;
        // Short body: either clamped at 0 or moved one line, never past
        // the end.
        assert!(after_down <= state.content_height);

        state.scroll_to_top();
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
