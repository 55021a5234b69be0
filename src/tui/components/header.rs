//! # Header Component
//!
//! Top bar showing the corpus name, its version badge, and a transient
//! status message (e.g. "Copied to clipboard").
//!
//! Purely presentational: all three fields are props copied from app
//! state, so the component is trivial to test against a `TestBackend`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct Header {
    pub name: String,
    pub version: Option<String>,
    pub status_message: String,
}

impl Header {
    pub fn new(name: String, version: Option<String>, status_message: String) -> Self {
        Self {
            name,
            version,
            status_message,
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" ", Style::default()),
            Span::styled(
                self.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(version) = &self.version {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("v{version}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            " docs",
            Style::default().fg(Color::DarkGray),
        ));
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  │  {}", self.status_message),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
