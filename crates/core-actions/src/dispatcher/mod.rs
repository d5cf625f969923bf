//! Dispatcher applying keys and `Action`s to the editor state.
//!
//! The dispatcher owns the short-lived interaction state that is not part of
//! the document: the remaining quit confirmations and an optional prompt
//! session. While a session is active every key goes to it; otherwise keys
//! are translated and applied directly.
//!
//! * `session` - search and save-as prompt handling

use crate::io_ops::save_file;
use crate::{Action, translate_key};
use core_input::Key;
use core_state::EditorState;

mod session;

use session::Session;

/// Result of dispatching a single key or `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self { quit: false }
    }
    pub fn quit() -> Self {
        Self { quit: true }
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    quit_times: u32,
    quit_remaining: u32,
    session: Option<Session>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Dispatcher {
    /// `quit_times` extra Ctrl-Q presses are required to leave a dirty buffer.
    pub fn new(quit_times: u32) -> Self {
        Self {
            quit_times,
            quit_remaining: quit_times,
            session: None,
        }
    }

    pub fn prompt_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn handle_key(&mut self, key: Key, state: &mut EditorState) -> DispatchResult {
        if let Some(session) = self.session.take() {
            self.quit_remaining = self.quit_times;
            self.session = session.feed(key, state);
            return DispatchResult::clean();
        }
        self.dispatch(translate_key(key), state)
    }

    pub fn dispatch(&mut self, action: Action, state: &mut EditorState) -> DispatchResult {
        tracing::trace!(target: "edit", ?action, cy = state.cursor.cy, cx = state.cursor.cx, "dispatch");
        if action == Action::Quit {
            return self.quit(state);
        }
        self.quit_remaining = self.quit_times;
        match action {
            Action::InsertChar(ch) => state.insert_char(ch),
            Action::InsertNewline => state.insert_newline(),
            Action::DeleteBackward => state.delete_char(),
            Action::DeleteForward => state.delete_forward(),
            Action::Move(dir) => state.move_cursor(dir),
            Action::LineStart => state.move_home(),
            Action::LineEnd => state.move_end(),
            Action::PageUp => state.page(core_state::Direction::Up),
            Action::PageDown => state.page(core_state::Direction::Down),
            Action::Save => self.save(state),
            Action::Find => self.session = Some(Session::find(state)),
            Action::Quit | Action::Noop => {}
        }
        DispatchResult::clean()
    }

    fn quit(&mut self, state: &mut EditorState) -> DispatchResult {
        if state.is_dirty() && self.quit_remaining > 0 {
            state.set_ephemeral(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_remaining
            ));
            self.quit_remaining -= 1;
            tracing::debug!(target: "runtime", remaining = self.quit_remaining, "quit_blocked_dirty");
            return DispatchResult::clean();
        }
        tracing::info!(target: "runtime", dirty = state.is_dirty(), "quit");
        DispatchResult::quit()
    }

    fn save(&mut self, state: &mut EditorState) {
        if state.file_name.is_none() {
            self.session = Some(Session::save_as(state));
            return;
        }
        write_and_report(state);
    }
}

/// Save and put the outcome in the message line.
pub(crate) fn write_and_report(state: &mut EditorState) {
    match save_file(state) {
        Ok(n) => state.set_ephemeral(format!("{n} bytes written to disk")),
        Err(e) => state.set_ephemeral(format!("Can't save! I/O error: {e}")),
    }
}
