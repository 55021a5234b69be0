//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard/mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! core state machine is UI-agnostic.
//!
//! ## Redraw Strategy
//!
//! The event loop only redraws when something changed:
//!
//! - **Idle**: sleeps in `event::poll` up to 500ms; redraws on input
//!   events or terminal resize.
//! - **Status flash pending** (e.g. "Copied to clipboard"): polls on a
//!   short timeout so the message clears promptly when its deadline
//!   passes. Re-triggering the flash replaces the deadline — resets are
//!   restarted, never stacked.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentState, FooterHit, SidebarEvent, SidebarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long the "Copied to clipboard" status flash stays visible.
const STATUS_FLASH: Duration = Duration::from_secs(2);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigate sections; plain keys are commands (`q`, `/`, `c`).
    Browse,
    /// Edit the search query; plain keys are query characters.
    Search,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub sidebar: SidebarState,
    pub content: ContentState,
    pub mode: Mode,
    /// Whether the sidebar was rendered last frame (always in wide
    /// layouts, only while the menu is open in narrow ones). Used to
    /// route mouse clicks.
    pub sidebar_visible: bool,
    /// When the current status flash should clear.
    pub status_deadline: Option<Instant>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            sidebar: SidebarState::new(),
            content: ContentState::new(),
            mode: Mode::Browse,
            sidebar_visible: false,
            status_deadline: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(mut app: App, config: &ResolvedConfig) -> std::io::Result<()> {
    let mut tui = TuiState::new();
    tui.sidebar.sync(&app);
    tui.sidebar.focus_id(&app.active_id);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => guard,
        Err(e) => {
            ratatui::restore();
            return Err(e);
        }
    };

    let mut needs_redraw = true; // force first frame

    loop {
        // Expire the status flash before drawing.
        if let Some(deadline) = tui.status_deadline
            && Instant::now() >= deadline
        {
            app.status_message.clear();
            tui.status_deadline = None;
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, config))?;
            needs_redraw = false;
        }

        // Short poll while a flash is pending so it clears on time.
        let timeout = if tui.status_deadline.is_some() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };

        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process the first event + drain all pending events before the
        // next draw.
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &event) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate one terminal event into state changes. Returns true when the
/// app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> bool {
    // Global events, regardless of mode.
    match event {
        TuiEvent::ForceQuit => return dispatch(app, tui, Action::Quit),
        TuiEvent::Resize => return false, // redraw already flagged
        TuiEvent::ToggleMenu => return dispatch(app, tui, Action::ToggleMenu),
        TuiEvent::MouseClick(col, row) => {
            if tui.sidebar_visible
                && let Some(id) = tui.sidebar.hit_test(*col, *row).map(str::to_string)
            {
                return dispatch(app, tui, Action::SelectItem(id));
            }
            match tui.content.hit_test(*col, *row) {
                Some(FooterHit::Prev) => return dispatch(app, tui, Action::PrevItem),
                Some(FooterHit::Next) => return dispatch(app, tui, Action::NextItem),
                None => return false,
            }
        }
        // Content pane scrolling works in both modes.
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollTop
        | TuiEvent::ScrollBottom => {
            tui.content.handle_event(event);
            return false;
        }
        _ => {}
    }

    match tui.mode {
        Mode::Browse => match event {
            TuiEvent::InputChar('q') => dispatch(app, tui, Action::Quit),
            TuiEvent::InputChar('/') => {
                tui.mode = Mode::Search;
                false
            }
            TuiEvent::InputChar('c') => dispatch(app, tui, Action::CopyExcerpt),
            TuiEvent::PrevSection => dispatch(app, tui, Action::PrevItem),
            TuiEvent::NextSection => dispatch(app, tui, Action::NextItem),
            TuiEvent::Escape if !app.search_query.is_empty() => {
                dispatch(app, tui, Action::ClearSearch)
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::Submit => {
                if let Some(SidebarEvent::Activate(id)) = tui.sidebar.handle_event(event) {
                    return dispatch(app, tui, Action::SelectItem(id));
                }
                false
            }
            _ => false,
        },
        Mode::Search => match event {
            TuiEvent::InputChar(c) => {
                let mut query = app.search_query.clone();
                query.push(*c);
                dispatch(app, tui, Action::SetSearchQuery(query))
            }
            TuiEvent::Backspace => {
                let mut query = app.search_query.clone();
                query.pop();
                dispatch(app, tui, Action::SetSearchQuery(query))
            }
            TuiEvent::Escape => {
                tui.mode = Mode::Browse;
                dispatch(app, tui, Action::ClearSearch)
            }
            TuiEvent::Submit => {
                if let Some(SidebarEvent::Activate(id)) = tui.sidebar.handle_event(event) {
                    tui.mode = Mode::Browse;
                    return dispatch(app, tui, Action::SelectItem(id));
                }
                false
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                tui.sidebar.handle_event(event);
                false
            }
            _ => false,
        },
    }
}

/// Run one action through the reducer and carry out its effect.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::None => false,
        Effect::ScrollToTop => {
            tui.content.scroll_to_top();
            // Keep the sidebar cursor on whatever is now active.
            tui.sidebar.sync(app);
            tui.sidebar.focus_id(&app.active_id);
            false
        }
        Effect::CopyToClipboard(text) => {
            let outcome = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text));
            app.status_message = match outcome {
                Ok(()) => {
                    info!("Copied excerpt of '{}' to clipboard", app.active_id);
                    "Copied to clipboard".to_string()
                }
                Err(e) => {
                    warn!("Clipboard write failed: {e}");
                    "Clipboard unavailable".to_string()
                }
            };
            // Restart the flash timer; a second copy before the first
            // deadline supersedes it.
            tui.status_deadline = Some(Instant::now() + STATUS_FLASH);
            false
        }
    }
}
