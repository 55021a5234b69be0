//! Frame composition: header, sidebar + content split, help line.
//!
//! Two layouts depending on terminal width:
//!
//! - **Wide** (width ≥ `narrow_threshold`): the sidebar is a fixed column
//!   next to the content pane, always visible.
//! - **Narrow**: the content pane takes the full width and the sidebar
//!   renders as an overlay only while the menu is open (Tab toggles it).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::components::{ContentPane, Header, Sidebar};
use crate::tui::component::Component;
use crate::tui::{Mode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, config: &ResolvedConfig) {
    use Constraint::{Length, Min};
    let [header_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let mut header = Header::new(
        app.corpus.meta().name.clone(),
        app.corpus.meta().version.clone(),
        app.status_message.clone(),
    );
    header.render(frame, header_area);

    let searching = tui.mode == Mode::Search;
    let wide = frame.area().width >= config.narrow_threshold;
    tui.sidebar_visible = wide || app.menu_open;

    if wide {
        let [sidebar_area, content_area] =
            Layout::horizontal([Length(config.sidebar_width), Min(0)]).areas(main_area);
        ContentPane::new(&mut tui.content, app, &config.code_theme)
            .render(frame, content_area);
        Sidebar::new(&mut tui.sidebar, app, searching, false).render(frame, sidebar_area);
    } else {
        ContentPane::new(&mut tui.content, app, &config.code_theme).render(frame, main_area);
        if app.menu_open {
            let overlay = overlay_rect(main_area, config.sidebar_width);
            Sidebar::new(&mut tui.sidebar, app, searching, true).render(frame, overlay);
        }
    }

    frame.render_widget(help_line(searching), help_area);
}

/// Left-anchored, full-height overlay for the narrow-terminal menu.
fn overlay_rect(main_area: Rect, sidebar_width: u16) -> Rect {
    Rect {
        x: main_area.x,
        y: main_area.y,
        width: sidebar_width.min(main_area.width),
        height: main_area.height,
    }
}

fn help_line(searching: bool) -> Span<'static> {
    let text = if searching {
        " type to filter   ↑↓ results   Enter open   Esc clear"
    } else {
        " ↑↓ navigate   Enter open   ←→ prev/next   / search   c copy   Tab menu   q quit"
    };
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{TomeConfig, resolve};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn wide_layout_shows_sidebar_and_content() {
        let app = test_app();
        let mut tui = TuiState::new();
        let config = resolve(&TomeConfig::default(), None, None);
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, &config))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sample")); // header
        assert!(text.contains("GETTING STARTED")); // sidebar
        assert!(text.contains("Welcome")); // content
        assert!(text.contains("q quit")); // help line
        assert!(tui.sidebar_visible);
    }

    #[test]
    fn narrow_layout_hides_sidebar_until_menu_opens() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let config = resolve(&TomeConfig::default(), None, None);
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, &config))
            .unwrap();
        assert!(!buffer_text(&terminal).contains("GETTING STARTED"));
        assert!(!tui.sidebar_visible);

        app.menu_open = true;
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, &config))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Contents"));
        assert!(text.contains("GETTING STARTED"));
        assert!(tui.sidebar_visible);
    }

    #[test]
    fn search_mode_swaps_the_help_line() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.mode = Mode::Search;
        let config = resolve(&TomeConfig::default(), None, None);
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, &config))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("type to filter"));
        assert!(!text.contains("q quit"));
    }
}
