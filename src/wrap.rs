//! Greedy soft-wrap row breaking.
//!
//! Text is broken into visual rows the way a `<textarea>` does it: explicit
//! `\n` always starts a new row, words move whole to the next row when they
//! overflow, whitespace hangs past the right edge, and a word wider than the
//! row is split between characters.
//!
//! Appending characters never reduces the row count, which is the
//! monotonicity the pagination search relies on.

use core::ops::Range;

/// Row breaker for a fixed content width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBreaker {
    max_width: f32,
}

impl RowBreaker {
    /// Create a breaker for rows of `max_width` pixels.
    pub fn new(max_width: f32) -> Self {
        let max_width = if max_width.is_finite() {
            max_width.max(0.0)
        } else {
            0.0
        };
        Self { max_width }
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    /// Visual rows of `text` as byte ranges (newlines excluded).
    ///
    /// Empty text has no rows; a trailing newline opens an empty last row.
    pub fn rows<A>(&self, text: &str, advance: A) -> Vec<Range<usize>>
    where
        A: Fn(char) -> f32,
    {
        let mut rows = Vec::with_capacity(8);
        self.walk_rows(text, &advance, &mut |row| {
            rows.push(row);
            true
        });
        rows
    }

    /// Number of visual rows of `text`.
    pub fn count_rows<A>(&self, text: &str, advance: A) -> usize
    where
        A: Fn(char) -> f32,
    {
        let mut count = 0usize;
        self.walk_rows(text, &advance, &mut |_| {
            count += 1;
            true
        });
        count
    }

    /// Whether `text` needs more than `limit` rows. Stops walking as soon as
    /// the answer is known.
    pub fn exceeds_rows<A>(&self, text: &str, advance: A, limit: usize) -> bool
    where
        A: Fn(char) -> f32,
    {
        let mut count = 0usize;
        self.walk_rows(text, &advance, &mut |_| {
            count += 1;
            count <= limit
        });
        count > limit
    }

    fn walk_rows(
        &self,
        text: &str,
        advance: &dyn Fn(char) -> f32,
        on_row: &mut dyn FnMut(Range<usize>) -> bool,
    ) {
        if text.is_empty() {
            return;
        }
        let mut base = 0usize;
        for line in text.split('\n') {
            if !self.walk_line(line, base, advance, on_row) {
                return;
            }
            base += line.len() + 1;
        }
    }

    fn walk_line(
        &self,
        line: &str,
        base: usize,
        advance: &dyn Fn(char) -> f32,
        on_row: &mut dyn FnMut(Range<usize>) -> bool,
    ) -> bool {
        let mut row_start = 0usize;
        let mut x = 0.0f32;
        // Byte index where the word after the last whitespace begins.
        let mut break_at: Option<usize> = None;
        let mut word_width = 0.0f32;

        for (idx, ch) in line.char_indices() {
            let width = advance(ch).max(0.0);
            if ch.is_whitespace() {
                x += width;
                break_at = Some(idx + ch.len_utf8());
                word_width = 0.0;
                continue;
            }
            if x > 0.0 && x + width > self.max_width {
                match break_at.filter(|&at| at > row_start && at <= idx) {
                    Some(at) => {
                        if !on_row(base + row_start..base + at) {
                            return false;
                        }
                        row_start = at;
                        x = word_width;
                        break_at = None;
                        if x > 0.0 && x + width > self.max_width {
                            if !on_row(base + row_start..base + idx) {
                                return false;
                            }
                            row_start = idx;
                            x = 0.0;
                            word_width = 0.0;
                        }
                    }
                    None => {
                        if !on_row(base + row_start..base + idx) {
                            return false;
                        }
                        row_start = idx;
                        x = 0.0;
                        word_width = 0.0;
                    }
                }
            }
            x += width;
            word_width += width;
        }
        on_row(base + row_start..base + line.len())
    }
}
