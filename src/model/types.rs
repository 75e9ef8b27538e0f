//! Shared types for the Model
//!
//! Small state types used by several section sub-models.

use crate::logic::errors::ErrorType;

/// Outcome of the most recent API call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Nothing answered yet
    #[default]
    Unknown,
    Connected,
    /// The last call failed (transport or server error)
    Disconnected {
        error_type: ErrorType,
        message: String,
    },
}

/// Independently loaded region of a section
#[derive(Debug, Clone, PartialEq)]
pub enum Pane<T> {
    /// Nothing requested yet (or selection cleared)
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for Pane<T> {
    fn default() -> Self {
        Pane::Idle
    }
}

impl<T> Pane<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Pane::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Pane::Ready(items) => items,
            _ => &[],
        }
    }
}

/// Text typed into a single-line input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    pub buffer: String,
}

impl LineInput {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_items() {
        let pane: Pane<u32> = Pane::Ready(vec![1, 2]);
        assert_eq!(pane.items(), &[1, 2]);
        assert!(Pane::<u32>::Loading.items().is_empty());
        assert!(Pane::<u32>::Loading.is_loading());
    }

    #[test]
    fn test_line_input() {
        let mut input = LineInput::new("ab");
        input.push('c');
        input.backspace();
        input.backspace();
        assert_eq!(input.buffer, "a");
        input.clear();
        assert!(input.buffer.is_empty());
    }
}
