//! Single-line input editor used by search and save-as.

use core_input::Key;

/// Outcome of feeding one key to a [`Prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// Input bytes changed.
    Edited,
    /// Escape was pressed.
    Cancelled,
    /// Enter was pressed on non-empty input.
    Confirmed,
    /// Key left the input untouched.
    Ignored(Key),
}

#[derive(Debug, Clone)]
pub struct Prompt {
    prefix: &'static str,
    suffix: &'static str,
    input: Vec<u8>,
}

impl Prompt {
    pub fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            prefix,
            suffix,
            input: Vec::new(),
        }
    }

    pub fn search() -> Self {
        Self::new("Search: ", " (Use ESC/Arrows/Enter)")
    }

    pub fn save_as() -> Self {
        Self::new("Save as: ", " (ESC to cancel)")
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// Message line text for the current input.
    pub fn message(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            String::from_utf8_lossy(&self.input),
            self.suffix
        )
    }

    pub fn handle_key(&mut self, key: Key) -> PromptEvent {
        match key {
            Key::Backspace | Key::Delete | Key::Ctrl(b'h') => {
                if self.input.pop().is_some() {
                    PromptEvent::Edited
                } else {
                    PromptEvent::Ignored(key)
                }
            }
            Key::Escape => PromptEvent::Cancelled,
            Key::Enter if !self.input.is_empty() => PromptEvent::Confirmed,
            Key::Char(b) if !b.is_ascii_control() && b.is_ascii() => {
                self.input.push(b);
                PromptEvent::Edited
            }
            _ => PromptEvent::Ignored(key),
        }
    }
}
