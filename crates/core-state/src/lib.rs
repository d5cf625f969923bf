//! Editor state: the single owned context threaded through every operation.
//!
//! `EditorState` bundles the row store, cursor, viewport, file name and the
//! transient status message. The binary constructs exactly one instance and
//! passes it by `&mut` into the dispatcher, the find controller and the
//! compositor; there are no process-wide singletons.
//!
//! Editing and motion primitives live in `edit` and `motion`. They operate
//! on the cursor position, delegate byte/row mutation to
//! [`RowStore`](core_text::RowStore), and never fail: requests at invalid
//! positions are ignored or clamped.
//!
//! Ephemeral status messages: `set_ephemeral` stamps the text with the
//! current instant; the compositor asks `visible_status(now)` at render time
//! and the message disappears once `message_ttl` has elapsed.

use core_model::{Cursor, Viewport};
use core_syntax::select_syntax;
use core_text::{DEFAULT_TAB_STOP, RowStore};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

mod edit;
mod motion;

pub use motion::Direction;

/// Rows reserved below the text area (status bar + message line).
pub const STATUS_ROWS: usize = 2;

pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Transient message shown in the message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralMessage {
    pub text: String,
    pub set_at: Instant,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub rows: RowStore,
    pub cursor: Cursor,
    pub viewport: Viewport,
    pub file_name: Option<PathBuf>,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub message_ttl: Duration,
    /// Effective vertical scroll margin (already clamped by config).
    pub scroll_margin: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(RowStore::new(DEFAULT_TAB_STOP))
    }
}

impl EditorState {
    pub fn new(rows: RowStore) -> Self {
        Self {
            rows,
            cursor: Cursor::default(),
            viewport: Viewport::default(),
            file_name: None,
            ephemeral_status: None,
            message_ttl: DEFAULT_MESSAGE_TTL,
            scroll_margin: 0,
        }
    }

    /// Apply terminal dimensions; the text area excludes [`STATUS_ROWS`].
    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.viewport.resize(rows.saturating_sub(STATUS_ROWS), cols);
    }

    /// Replace the buffer contents (file load), resetting cursor and view.
    pub fn replace_rows(&mut self, rows: RowStore, file_name: Option<PathBuf>) {
        self.rows = rows;
        self.file_name = file_name;
        self.cursor = Cursor::default();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        self.select_syntax();
    }

    /// Re-select the syntax definition from the current file name and
    /// re-highlight every row.
    pub fn select_syntax(&mut self) {
        let syntax = self
            .file_name
            .as_deref()
            .and_then(Path::to_str)
            .and_then(select_syntax);
        self.rows.set_syntax(syntax);
    }

    pub fn is_dirty(&self) -> bool {
        self.rows.is_dirty()
    }

    /// File name for display, `None` for an unnamed buffer.
    pub fn display_name(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
    }

    pub fn file_type(&self) -> Option<&'static str> {
        self.rows.syntax().map(|s| s.file_type)
    }

    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S) {
        self.set_ephemeral_at(msg, Instant::now());
    }

    pub fn set_ephemeral_at<S: Into<String>>(&mut self, msg: S, now: Instant) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            set_at: now,
        });
    }

    pub fn clear_ephemeral(&mut self) {
        self.ephemeral_status = None;
    }

    /// Message text if it is non-empty and younger than `message_ttl`.
    pub fn visible_status(&self, now: Instant) -> Option<&str> {
        let msg = self.ephemeral_status.as_ref()?;
        let age = now.saturating_duration_since(msg.set_at);
        (!msg.text.is_empty() && age < self.message_ttl).then_some(msg.text.as_str())
    }
}
