//! # Actions
//!
//! Everything that can happen in tome becomes an `Action`.
//! User picks a section in the sidebar? That's `Action::SelectItem(id)`.
//! User types in the search box? That's `Action::SetSearchQuery(q)`.
//!
//! The `update()` function applies an action to the current state and
//! returns an `Effect` describing the one side effect (if any) the caller
//! must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  mutated State + Effect
//! ```
//!
//! This keeps the session state machine testable without a terminal:
//! apply actions, assert on the state and the returned effects.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::core::state::App;

/// A user-level state transition.
#[derive(Debug, Clone)]
pub enum Action {
    /// Show the section with this id. The id is not validated here —
    /// resolution handles unknown ids with a fallback view.
    SelectItem(String),
    /// Move to the successor in the flattened corpus, if there is one.
    NextItem,
    /// Move to the predecessor in the flattened corpus, if there is one.
    PrevItem,
    /// Flip the sidebar overlay (only visible in narrow terminals).
    ToggleMenu,
    SetSearchQuery(String),
    /// Identical to `SetSearchQuery("")`.
    ClearSearch,
    /// Copy an excerpt of the active section to the OS clipboard.
    CopyExcerpt,
    Quit,
}

/// Side effect the event loop must carry out after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Reset the content pane scroll to the top.
    ScrollToTop,
    /// Write this text to the OS clipboard (fire-and-forget).
    CopyToClipboard(String),
    Quit,
}

/// Apply one action to the app state.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectItem(id) => {
            app.active_id = id;
            // Selecting always dismisses the overlay menu, whatever opened it.
            app.menu_open = false;
            Effect::ScrollToTop
        }
        Action::NextItem => {
            let (_, next) = app.corpus.neighbors(&app.active_id);
            match next.map(|item| item.id.clone()) {
                Some(id) => update(app, Action::SelectItem(id)),
                None => Effect::None, // already at the last section
            }
        }
        Action::PrevItem => {
            let (prev, _) = app.corpus.neighbors(&app.active_id);
            match prev.map(|item| item.id.clone()) {
                Some(id) => update(app, Action::SelectItem(id)),
                None => Effect::None,
            }
        }
        Action::ToggleMenu => {
            app.menu_open = !app.menu_open;
            Effect::None
        }
        Action::SetSearchQuery(query) => {
            // The active section is deliberately left alone: filtering only
            // narrows the menu listing, never what the content pane shows.
            app.search_query = query;
            Effect::None
        }
        Action::ClearSearch => update(app, Action::SetSearchQuery(String::new())),
        Action::CopyExcerpt => match app.corpus.get(&app.active_id) {
            Some(item) => Effect::CopyToClipboard(copy_excerpt(&item.body)),
            None => Effect::None,
        },
        Action::Quit => Effect::Quit,
    }
}

/// The text the copy affordance puts on the clipboard: the first fenced
/// code block of the body, verbatim, or the whole body when the section
/// has no code block.
fn copy_excerpt(body: &str) -> String {
    first_code_block(body).unwrap_or_else(|| body.to_string())
}

fn first_code_block(body: &str) -> Option<String> {
    let mut in_block = false;
    let mut code = String::new();
    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_block = true,
            Event::Text(text) if in_block => code.push_str(&text),
            Event::End(TagEnd::CodeBlock) => return Some(code),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn select_item_sets_active_and_closes_menu() {
        let mut app = test_app();
        app.menu_open = true;
        let effect = update(&mut app, Action::SelectItem("api".to_string()));
        assert_eq!(app.active_id, "api");
        assert!(!app.menu_open);
        assert_eq!(effect, Effect::ScrollToTop);
    }

    #[test]
    fn select_item_accepts_unknown_id() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SelectItem("ghost".to_string()));
        assert_eq!(app.active_id, "ghost");
        assert_eq!(effect, Effect::ScrollToTop);
    }

    #[test]
    fn next_walks_the_flattened_sequence() {
        let mut app = test_app();
        assert_eq!(app.active_id, "introduction");
        assert_eq!(update(&mut app, Action::NextItem), Effect::ScrollToTop);
        assert_eq!(app.active_id, "installation");
        assert_eq!(update(&mut app, Action::NextItem), Effect::ScrollToTop);
        // Crossed a category boundary.
        assert_eq!(app.active_id, "quickstart");
    }

    #[test]
    fn next_at_last_section_is_a_no_op() {
        let mut app = test_app();
        app.active_id = "api".to_string();
        assert_eq!(update(&mut app, Action::NextItem), Effect::None);
        assert_eq!(app.active_id, "api");
    }

    #[test]
    fn prev_at_first_section_is_a_no_op() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::PrevItem), Effect::None);
        assert_eq!(app.active_id, "introduction");
    }

    #[test]
    fn prev_and_next_also_close_the_menu() {
        let mut app = test_app();
        app.active_id = "quickstart".to_string();
        app.menu_open = true;
        update(&mut app, Action::PrevItem);
        assert!(!app.menu_open);
    }

    #[test]
    fn toggle_menu_flips_only_the_menu() {
        let mut app = test_app();
        update(&mut app, Action::ToggleMenu);
        assert!(app.menu_open);
        assert_eq!(app.active_id, "introduction");
        update(&mut app, Action::ToggleMenu);
        assert!(!app.menu_open);
    }

    #[test]
    fn search_query_does_not_alter_active_section() {
        let mut app = test_app();
        app.active_id = "quickstart".to_string();
        // "zzzzz" filters quickstart (and everything else) out of the menu,
        // but the content pane keeps showing it.
        update(&mut app, Action::SetSearchQuery("zzzzz".to_string()));
        assert_eq!(app.active_id, "quickstart");
        assert!(app.corpus.filter(&app.search_query).is_empty());
    }

    #[test]
    fn clear_search_equals_setting_empty_query() {
        let mut app_a = test_app();
        let mut app_b = test_app();
        update(&mut app_a, Action::SetSearchQuery("intro".to_string()));
        update(&mut app_b, Action::SetSearchQuery("intro".to_string()));

        update(&mut app_a, Action::ClearSearch);
        update(&mut app_b, Action::SetSearchQuery(String::new()));
        assert_eq!(app_a.search_query, app_b.search_query);
        assert!(app_a.search_query.is_empty());
    }

    #[test]
    fn copy_excerpt_takes_first_code_block() {
        let mut app = test_app();
        // "installation" has two fenced blocks; only the first is copied.
        app.active_id = "installation".to_string();
        let Effect::CopyToClipboard(text) = update(&mut app, Action::CopyExcerpt) else {
            panic!("expected clipboard effect");
        };
        assert!(text.contains("cargo install"));
        assert!(!text.contains("git clone"));
    }

    #[test]
    fn copy_excerpt_falls_back_to_whole_body() {
        let mut app = test_app();
        app.active_id = "introduction".to_string();
        let Effect::CopyToClipboard(text) = update(&mut app, Action::CopyExcerpt) else {
            panic!("expected clipboard effect");
        };
        assert_eq!(
            text,
            app.corpus.get("introduction").unwrap().body
        );
    }

    #[test]
    fn copy_excerpt_with_unresolved_id_does_nothing() {
        let mut app = test_app();
        app.active_id = "ghost".to_string();
        assert_eq!(update(&mut app, Action::CopyExcerpt), Effect::None);
    }

    #[test]
    fn quit_produces_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
