//! Measurement oracles.
//!
//! Pagination never lays text out itself. It only asks an oracle whether a
//! candidate slice fits one page. Implementations must be deterministic for a
//! fixed viewport and monotonic: if a slice does not fit, no longer slice
//! starting at the same offset fits either.

use unicode_width::UnicodeWidthChar;

use crate::error::MeasureError;
use crate::text::char_len;
use crate::viewport::{FontSpec, ViewportGeometry, FIT_EPSILON};
use crate::wrap::RowBreaker;

/// Predicate deciding whether text fits a page's content box.
pub trait MeasurementOracle {
    /// Whether `text` rendered with `viewport` stays within its content
    /// height.
    ///
    /// `viewport` is already the effective viewport for the page being
    /// filled, so the first page's reserved lines are accounted for.
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError>;
}

impl<T> MeasurementOracle for &T
where
    T: MeasurementOracle + ?Sized,
{
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        (**self).fits(text, viewport)
    }
}

/// Text-shaping hook reporting rendered height.
///
/// This is the natural seam for a layout library: wrap it in
/// [`HeightOracle`] to use it for pagination.
pub trait HeightMeasurer {
    /// Rendered height of `text` in pixels for the viewport's width and
    /// typography.
    fn measure_height(&self, text: &str, viewport: &ViewportGeometry)
        -> Result<f32, MeasureError>;
}

/// Oracle adapter comparing measured height against the content box.
#[derive(Clone, Debug, Default)]
pub struct HeightOracle<M> {
    measurer: M,
}

impl<M> HeightOracle<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }
}

impl<M> MeasurementOracle for HeightOracle<M>
where
    M: HeightMeasurer,
{
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        let height = self.measurer.measure_height(text, viewport)?;
        if !height.is_finite() {
            return Err(MeasureError::failed("non-finite height"));
        }
        Ok(height <= viewport.content_box_height() + FIT_EPSILON)
    }
}

/// Fixed-advance measurer for monospace surfaces.
///
/// A glyph advances by one cell per terminal column it occupies, so wide
/// CJK glyphs take two cells and combining marks take none. Letter spacing is
/// added once per visible glyph. Rows are broken with [`RowBreaker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    advance_px: f32,
}

impl MonospaceMeasurer {
    /// Typical advance of a monospace glyph relative to its em size.
    const EM_ADVANCE_RATIO: f32 = 0.6;

    /// Create a measurer with an explicit glyph advance.
    pub fn new(advance_px: f32) -> Self {
        Self {
            advance_px: if advance_px.is_finite() {
                advance_px.max(0.0)
            } else {
                0.0
            },
        }
    }

    /// Derive the advance from a font's size.
    pub fn for_font(font: &FontSpec) -> Self {
        Self::new(font.size_px * Self::EM_ADVANCE_RATIO)
    }

    pub fn advance_px(&self) -> f32 {
        self.advance_px
    }

    fn glyph_advance(&self, ch: char, spacing: f32) -> f32 {
        let cells = ch.width().unwrap_or(0);
        if cells == 0 {
            return 0.0;
        }
        (self.advance_px * cells as f32 + spacing).max(0.0)
    }

    /// Visual rows `text` occupies in `viewport`.
    pub fn rows(&self, text: &str, viewport: &ViewportGeometry) -> usize {
        let spacing = letter_spacing(viewport);
        RowBreaker::new(viewport.usable_width())
            .count_rows(text, |ch| self.glyph_advance(ch, spacing))
    }
}

impl HeightMeasurer for MonospaceMeasurer {
    fn measure_height(
        &self,
        text: &str,
        viewport: &ViewportGeometry,
    ) -> Result<f32, MeasureError> {
        Ok(self.rows(text, viewport) as f32 * viewport.usable_line_height())
    }
}

impl MeasurementOracle for MonospaceMeasurer {
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        let spacing = letter_spacing(viewport);
        let capacity = viewport.box_line_capacity();
        let breaker = RowBreaker::new(viewport.usable_width());
        Ok(!breaker.exceeds_rows(text, |ch| self.glyph_advance(ch, spacing), capacity))
    }
}

fn letter_spacing(viewport: &ViewportGeometry) -> f32 {
    let spacing = viewport.font.letter_spacing;
    if spacing.is_finite() {
        spacing
    } else {
        0.0
    }
}

/// Oracle admitting a fixed number of characters per page.
///
/// Suited to grid surfaces where every cell holds one character, and to
/// exercising pagination without any geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharBudgetOracle {
    per_page: usize,
}

impl CharBudgetOracle {
    pub fn new(per_page: usize) -> Self {
        Self { per_page }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

impl MeasurementOracle for CharBudgetOracle {
    fn fits(&self, text: &str, _viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        Ok(char_len(text) <= self.per_page)
    }
}
