use std::sync::atomic::{AtomicUsize, Ordering};

use pageflow::{MeasureError, MeasurementOracle, ViewportGeometry};

const WORDS: &[&str] = &[
    "the", "lich", "sleeps", "below", "tower", "roll", "initiative", "goblin", "sword", "of",
    "ancient", "fire", "ñandú", "über", "café", "owlbear", "and", "a", "dungeon", "map",
];

/// Deterministic xorshift generator so property runs are reproducible.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `0..bound` (`bound` > 0).
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Prose-like text of roughly `words` words with occasional line breaks.
pub fn notebook_text(seed: u64, words: usize) -> String {
    let mut rng = Rng::new(seed);
    let mut out = String::new();
    for idx in 0..words {
        if idx > 0 {
            match rng.below(12) {
                0 => out.push('\n'),
                1 => out.push_str("\n\n"),
                _ => out.push(' '),
            }
        }
        out.push_str(WORDS[rng.below(WORDS.len())]);
    }
    out
}

/// `len` ASCII letters cycling through the alphabet.
pub fn filler(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

/// Oracle wrapper counting `fits` calls.
pub struct CountingOracle<O> {
    inner: O,
    calls: AtomicUsize,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<O: MeasurementOracle> MeasurementOracle for CountingOracle<O> {
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.fits(text, viewport)
    }
}

/// Oracle that accepts nothing but the empty string.
pub struct NothingFits;

impl MeasurementOracle for NothingFits {
    fn fits(&self, text: &str, _viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        Ok(text.is_empty())
    }
}

/// Grid viewport with ten 8px columns and `rows` rows of 20px.
pub fn grid_viewport(rows: u32) -> ViewportGeometry {
    let mut viewport = ViewportGeometry::for_content(80.0, rows as f32 * 20.0);
    viewport.line_height = 20.0;
    viewport
}
