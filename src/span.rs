//! Byte spans within a source string.

use serde::{Deserialize, Serialize};

/// A contiguous span of text from one byte index to another in a &str.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// The byte index of the first character.
    pub start: usize,
    /// The byte index after the last character.
    pub end: usize,
}
impl Span {
    /// Returns a 0-length span at the given index.
    pub fn empty(idx: usize) -> Self {
        Self {
            start: idx,
            end: idx,
        }
    }
    /// Returns the substring with this span from a string.
    pub fn of_str(self, s: &str) -> &str {
        &s[self.start..self.end]
    }
    /// Returns the length of the span in bytes.
    pub fn len(self) -> usize {
        self.end - self.start
    }
    /// Returns whether the span is empty.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}
