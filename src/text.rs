//! Character-offset view over UTF-8 text.
//!
//! Every offset exposed by this crate counts Unicode scalar values, so a caret
//! reported by a text widget can be used as-is. Byte offsets stay internal.

use core::ops::Range;

/// Byte position of the `char_offset`-th character, or `text.len()` when the
/// offset is at or past the end.
pub fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by a character range. Out-of-range bounds are clamped.
pub fn char_slice(text: &str, range: Range<usize>) -> &str {
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end.max(range.start));
    &text[start..end]
}

/// Precomputed character boundaries for repeated slicing of one string.
///
/// Pagination slices the same buffer O(P log N) times per pass, so the
/// boundaries are collected once up front.
#[derive(Clone, Debug)]
pub struct CharIndex<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    /// Index `text`.
    pub fn new(text: &'a str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len().saturating_add(1));
        boundaries.extend(text.char_indices().map(|(byte, _)| byte));
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Number of characters.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Slice by character range. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> &'a str {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }
}

/// The single logical text buffer owned by the flow controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowBuffer {
    text: String,
    char_len: usize,
}

impl FlowBuffer {
    /// Create a buffer seeded with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = char_len(&text);
        Self { text, char_len }
    }

    /// Full text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Slice by character range. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> &str {
        char_slice(&self.text, range)
    }

    /// Replace the characters in `range` with `replacement`.
    ///
    /// The range is clamped to the buffer first. Returns the clamped range
    /// that was replaced.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) -> Range<usize> {
        let start = range.start.min(self.char_len);
        let end = range.end.clamp(start, self.char_len);
        let byte_start = byte_offset(&self.text, start);
        let byte_end = byte_start + byte_offset(&self.text[byte_start..], end - start);
        self.text.replace_range(byte_start..byte_end, replacement);
        self.char_len = self.char_len - (end - start) + char_len(replacement);
        start..end
    }

    /// Replace the whole buffer.
    pub fn replace(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<&str> for FlowBuffer {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FlowBuffer {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
