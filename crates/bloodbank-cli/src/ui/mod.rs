//! UI primitives for the Blood Bank CLI.
//!
//! - **Context**: environment detection (TTY, color)
//! - **Theme**: badge tokens
//! - **Render**: badges, tables, key-value lines

mod context;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use render::{badge, header, kv, print_error, table};
pub use theme::Badge;
