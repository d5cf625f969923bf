//! Row-based text buffer and tab-aware coordinate mapping.
//!
//! The buffer is an ordered `Vec` of [`Row`]s. Each row owns its raw bytes
//! (tabs preserved) plus a derived render buffer and highlight array that the
//! [`RowStore`] regenerates after every mutation. Column math works in two
//! spaces:
//! * char offsets index raw bytes (`cx`);
//! * render columns index the tab-expanded render buffer (`rx`).
//!
//! The [`tabs`] module holds the pure conversion functions between them.

pub mod row;
pub mod store;
pub mod tabs;

pub use row::Row;
pub use store::RowStore;
pub use tabs::{DEFAULT_TAB_STOP, char_to_render, expand_tabs, render_to_char};
