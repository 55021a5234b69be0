//! # Application State
//!
//! Core session state for tome. This module contains domain state only -
//! no TUI-specific types. Presentation state (scroll offsets, list
//! highlights) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── corpus: Corpus             // static documentation set
//! ├── active_id: String          // section shown in the content pane
//! ├── search_query: String       // sidebar filter ("" = no filter)
//! ├── menu_open: bool            // sidebar overlay in narrow terminals
//! └── status_message: String     // transient header status
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! so there are no surprise mutations and no ambient globals.

use crate::core::corpus::Corpus;

pub struct App {
    pub corpus: Corpus,
    /// Id of the section shown in the content pane. May reference a
    /// section that doesn't resolve — the content pane renders a fallback
    /// in that case rather than failing.
    pub active_id: String,
    pub search_query: String,
    pub menu_open: bool,
    pub status_message: String,
}

impl App {
    pub fn new(corpus: Corpus) -> Self {
        let active_id = corpus.first_id().unwrap_or_default().to_string();
        Self {
            corpus,
            active_id,
            search_query: String::new(),
            menu_open: false,
            status_message: String::new(),
        }
    }

    /// Start on a specific section instead of the corpus default.
    /// An unknown id is kept as-is; resolution handles the miss.
    pub fn with_start_id(corpus: Corpus, start_id: Option<&str>) -> Self {
        let mut app = Self::new(corpus);
        if let Some(id) = start_id {
            app.active_id = id.to_string();
        }
        app
    }
}
