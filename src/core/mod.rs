//! # Core Application Logic
//!
//! This module contains tome's domain logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Corpus (content)     │
//!                    │  • State (session)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal I/O here.  │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`corpus`]: the static documentation set plus filter/resolve/neighbor queries
//! - [`content`]: the built-in default corpus
//! - [`state`]: the `App` struct — all session state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: user configuration with the defaults → file → env → CLI hierarchy

pub mod action;
pub mod config;
pub mod content;
pub mod corpus;
pub mod state;
