use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events.
///
/// These are deliberately low-level: mode-dependent meaning (is `n` a
/// search character or "next section"?) is decided by the dispatcher in
/// `tui::run`, not here.
pub enum TuiEvent {
    /// Ctrl+C — quits regardless of mode.
    ForceQuit,
    InputChar(char),
    Backspace,
    Submit,
    Escape,
    /// Tab — toggles the sidebar overlay in narrow terminals.
    ToggleMenu,
    CursorUp,
    CursorDown,
    PrevSection,
    NextSection,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Tab) => Some(TuiEvent::ToggleMenu),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::PrevSection),
                (_, KeyCode::Right) => Some(TuiEvent::NextSection),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                (_, KeyCode::Home) => Some(TuiEvent::ScrollTop),
                (_, KeyCode::End) => Some(TuiEvent::ScrollBottom),
                _ => None,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse.column, mouse.row))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
