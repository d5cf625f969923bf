//! Syntax highlighting engine.
//!
//! The engine classifies every byte of a row's *render* buffer (tabs already
//! expanded) into a [`Highlight`] class. It is attribute-agnostic: mapping a
//! class to a terminal color is the compositor's job (`core-render`).
//!
//! Layout:
//! * `highlight` - the class enum shared by the row store, find overlay and
//!   compositor.
//! * `database`  - the static table of [`SyntaxDef`] entries and filename
//!   based selection.
//! * `engine`    - the per-row state machine (`highlight_row`).
//!
//! Cross-row propagation of the "comment still open" flag is NOT handled
//! here; `highlight_row` only reports the trailing flag and the row store
//! (`core-text`) decides whether the following row needs another pass.

mod database;
mod engine;
mod highlight;

pub use database::{DATABASE, SyntaxDef, SyntaxFlags, select_syntax};
pub use engine::{highlight_row, is_separator};
pub use highlight::Highlight;
