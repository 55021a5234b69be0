//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, matching how each component holds data:
//!
//! - **Stateless (props-based)**: receives everything as struct fields and
//!   just draws. [`Header`] is one of these.
//! - **Stateful (persistent state + transient wrapper)**: a `*State` struct
//!   lives in `TuiState` across frames (cursor, scroll offset, caches); a
//!   borrowing wrapper is created per frame to render it. [`Sidebar`] and
//!   [`ContentPane`] follow this pattern.
//!
//! Each component file is self-contained: state types, event types,
//! rendering, and its tests all live together.

pub mod content;
pub mod header;
pub mod sidebar;

pub use content::{ContentPane, ContentState, FooterHit};
pub use header::Header;
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
