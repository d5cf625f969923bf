//! Key translation, dispatch, incremental search and file I/O.
//!
//! A decoded [`Key`] is first offered to an active prompt session (search or
//! save-as). Without one it is translated into an [`Action`] and applied to
//! the [`EditorState`](core_state::EditorState) by the [`Dispatcher`].

pub mod dispatcher;
pub mod find;
pub mod io_ops;
pub mod prompt;

pub use dispatcher::{DispatchResult, Dispatcher};
pub use find::FindController;
pub use io_ops::{SaveError, open_file, save_file};
pub use prompt::{Prompt, PromptEvent};

use core_input::Key;
use core_state::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InsertChar(u8),
    InsertNewline,
    DeleteBackward,
    /// Move right, then delete backward.
    DeleteForward,
    Move(Direction),
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    Save,
    Quit,
    Find,
    Noop,
}

/// Map a key to the editing action it triggers outside of a prompt.
pub fn translate_key(key: Key) -> Action {
    match key {
        Key::Enter => Action::InsertNewline,
        Key::Ctrl(b'q') => Action::Quit,
        Key::Ctrl(b's') => Action::Save,
        Key::Ctrl(b'f') => Action::Find,
        Key::Ctrl(b'h') | Key::Backspace => Action::DeleteBackward,
        Key::Ctrl(b'l') | Key::Escape => Action::Noop,
        Key::Delete => Action::DeleteForward,
        Key::Home => Action::LineStart,
        Key::End => Action::LineEnd,
        Key::PageUp => Action::PageUp,
        Key::PageDown => Action::PageDown,
        Key::ArrowUp => Action::Move(Direction::Up),
        Key::ArrowDown => Action::Move(Direction::Down),
        Key::ArrowLeft => Action::Move(Direction::Left),
        Key::ArrowRight => Action::Move(Direction::Right),
        // Remaining control chords insert their raw byte.
        Key::Ctrl(letter) => Action::InsertChar(letter & 0x1f),
        Key::Char(b) => Action::InsertChar(b),
    }
}
