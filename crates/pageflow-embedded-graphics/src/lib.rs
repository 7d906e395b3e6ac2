//! embedded-graphics measurement and drawing for `pageflow` spreads.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X9, FONT_7X14, FONT_8X13},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use pageflow::{
    FontSpec, HeightMeasurer, MeasureError, MeasurementOracle, RowBreaker, Side,
    TextFlowController, ViewportGeometry,
};
use std::borrow::Cow;

/// Measurement oracle using the same mono fonts the renderer draws with.
///
/// A row is as tall as the larger of the viewport's line height and the
/// selected glyph height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EgMeasurer;

impl EgMeasurer {
    pub fn new() -> Self {
        Self
    }

    /// Mono font used for `font`'s size.
    pub fn font_for(font: &FontSpec) -> &'static MonoFont<'static> {
        if !family_supported(&font.family) {
            log::trace!("eg: no mono face for family {:?}, using size match", font.family);
        }
        if font.size_px >= 24.0 {
            &FONT_10X20
        } else if font.size_px >= 20.0 {
            &FONT_8X13
        } else if font.size_px >= 16.0 {
            &FONT_7X14
        } else {
            &FONT_6X9
        }
    }

    /// Horizontal advance of one glyph cell, letter spacing included.
    pub fn advance_px(font: &FontSpec) -> f32 {
        let mono = Self::font_for(font);
        let spacing = if font.letter_spacing.is_finite() {
            font.letter_spacing
        } else {
            0.0
        };
        (mono.character_size.width as f32 + mono.character_spacing as f32 + spacing).max(0.0)
    }

    /// Height of one visual row in `viewport`.
    pub fn row_height(viewport: &ViewportGeometry) -> f32 {
        let glyph = Self::font_for(&viewport.font).character_size.height as f32;
        viewport.usable_line_height().max(glyph)
    }

    /// Visual rows of `text` as byte ranges.
    pub fn rows(&self, text: &str, viewport: &ViewportGeometry) -> Vec<core::ops::Range<usize>> {
        let advance = Self::advance_px(&viewport.font);
        RowBreaker::new(viewport.usable_width()).rows(text, |ch| advance * cell_count(ch))
    }

    fn row_capacity(viewport: &ViewportGeometry) -> usize {
        let row_height = Self::row_height(viewport);
        if row_height <= 0.0 {
            return 0;
        }
        (viewport.content_box_height() / row_height + 0.01).floor() as usize
    }
}

impl MeasurementOracle for EgMeasurer {
    fn fits(&self, text: &str, viewport: &ViewportGeometry) -> Result<bool, MeasureError> {
        let advance = Self::advance_px(&viewport.font);
        let breaker = RowBreaker::new(viewport.usable_width());
        let limit = Self::row_capacity(viewport);
        Ok(!breaker.exceeds_rows(text, |ch| advance * cell_count(ch), limit))
    }
}

impl HeightMeasurer for EgMeasurer {
    fn measure_height(
        &self,
        text: &str,
        viewport: &ViewportGeometry,
    ) -> Result<f32, MeasureError> {
        Ok(self.rows(text, viewport).len() as f32 * Self::row_height(viewport))
    }
}

fn family_supported(family: &str) -> bool {
    matches!(
        family.trim().to_ascii_lowercase().as_str(),
        "monospace" | "mono" | "fixed" | "serif" | "sans-serif"
    )
}

/// Glyph cells `ch` takes once normalized for the ASCII mono fonts.
fn cell_count(ch: char) -> f32 {
    if ch == '\u{2026}' {
        3.0
    } else {
        1.0
    }
}

fn normalize_text_for_mono(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| {
        matches!(
            ch,
            '\u{00A0}' // nbsp
                | '\u{2013}' // en dash
                | '\u{2014}' // em dash
                | '\u{2018}' // left single quote
                | '\u{2019}' // right single quote
                | '\u{201C}' // left double quote
                | '\u{201D}' // right double quote
                | '\u{2026}' // ellipsis
        )
    }) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00A0}' => out.push(' '),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Page drawing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EgRenderConfig {
    /// Clear display before drawing a spread.
    pub clear_first: bool,
    /// Draw a ruling line under every text line.
    pub draw_rulings: bool,
    /// Top-left corner of the left page's content box.
    pub origin: Point,
    /// Horizontal gap between the two pages.
    pub gutter_px: i32,
}

impl Default for EgRenderConfig {
    fn default() -> Self {
        Self {
            clear_first: true,
            draw_rulings: true,
            origin: Point::zero(),
            gutter_px: 16,
        }
    }
}

/// Draws flow pages onto embedded-graphics targets.
#[derive(Clone, Debug, Default)]
pub struct EgPageRenderer {
    cfg: EgRenderConfig,
    measurer: EgMeasurer,
}

impl EgPageRenderer {
    pub fn new(cfg: EgRenderConfig) -> Self {
        Self {
            cfg,
            measurer: EgMeasurer,
        }
    }

    pub fn config(&self) -> EgRenderConfig {
        self.cfg
    }

    /// Draw both visible pages of `flow`.
    pub fn render_spread<D>(&self, display: &mut D, flow: &TextFlowController) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.cfg.clear_first {
            display.clear(BinaryColor::Off)?;
        }
        let viewport = flow.viewport();
        let spread_start = flow.spread_start();
        let right_x = viewport.usable_width() as i32 + self.cfg.gutter_px;
        for (side, offset) in [(Side::Left, 0), (Side::Right, right_x)] {
            let origin = self.cfg.origin + Point::new(offset, 0);
            self.render_page(
                display,
                origin,
                flow.visible_text(side),
                viewport,
                side.page_index(spread_start),
            )?;
        }
        Ok(())
    }

    /// Draw one page's text with its content box at `origin`.
    ///
    /// Returns the number of rows drawn.
    pub fn render_page<D>(
        &self,
        display: &mut D,
        origin: Point,
        text: &str,
        viewport: &ViewportGeometry,
        page_index: usize,
    ) -> Result<usize, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.cfg.draw_rulings {
            let width = viewport.usable_width() as i32;
            let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
            for offset in viewport.ruling_offsets(page_index) {
                let y = origin.y + offset as i32 - 1;
                Line::new(Point::new(origin.x, y), Point::new(origin.x + width - 1, y))
                    .into_styled(style)
                    .draw(display)?;
            }
        }

        let font = EgMeasurer::font_for(&viewport.font);
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let row_height = EgMeasurer::row_height(viewport) as i32;
        let glyph_height = font.character_size.height as i32;
        let top = if page_index == 0 {
            (viewport.reserved_lines as f32 * viewport.usable_line_height()) as i32
        } else {
            0
        };

        let rows = self.measurer.rows(text, viewport);
        for (row_idx, range) in rows.iter().enumerate() {
            let row_text = normalize_text_for_mono(text[range.clone()].trim_end());
            if row_text.is_empty() {
                continue;
            }
            // Glyphs sit on the bottom of the row.
            let y = origin.y + top + row_idx as i32 * row_height + (row_height - glyph_height);
            Text::with_baseline(row_text.as_ref(), Point::new(origin.x, y), style, Baseline::Top)
                .draw(display)?;
        }
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use pageflow::FlowOptions;

    #[derive(Default)]
    struct PixelCaptureDisplay {
        size: Size,
        on_pixels: Vec<Point>,
    }

    impl PixelCaptureDisplay {
        fn with_size(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                on_pixels: Vec::new(),
            }
        }
    }

    impl OriginDimensions for PixelCaptureDisplay {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for PixelCaptureDisplay {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if color == BinaryColor::On {
                    self.on_pixels.push(point);
                }
            }
            Ok(())
        }
    }

    /// Ten 7px columns and three 14px rows.
    fn small_viewport() -> ViewportGeometry {
        let mut viewport = ViewportGeometry::for_content(70.0, 42.0);
        viewport.line_height = 14.0;
        viewport.font.size_px = 16.0;
        viewport
    }

    #[test]
    fn font_selection_follows_size() {
        let mut font = FontSpec {
            size_px: 10.0,
            ..FontSpec::default()
        };
        assert_eq!(EgMeasurer::font_for(&font).character_size, FONT_6X9.character_size);
        font.size_px = 28.0;
        assert_eq!(
            EgMeasurer::font_for(&font).character_size,
            FONT_10X20.character_size
        );
    }

    #[test]
    fn measurer_fits_three_rows() {
        let viewport = small_viewport();
        let measurer = EgMeasurer::new();
        assert!(measurer
            .fits("the lich sleeps below", &viewport)
            .expect("fits"));
        assert!(!measurer
            .fits("the lich sleeps below the tower", &viewport)
            .expect("fits"));
        assert_eq!(
            measurer
                .measure_height("one\ntwo", &viewport)
                .expect("height"),
            28.0
        );
    }

    #[test]
    fn tall_glyphs_widen_rows() {
        let mut viewport = small_viewport();
        viewport.line_height = 10.0;
        assert_eq!(EgMeasurer::row_height(&viewport), 14.0);
        assert!(!EgMeasurer.fits("a\nb\nc\nd", &viewport).expect("fits"));
    }

    #[test]
    fn ellipsis_takes_three_cells() {
        let viewport = small_viewport();
        assert_eq!(EgMeasurer.rows("abcdefgh\u{2026}", &viewport).len(), 2);
        assert_eq!(EgMeasurer.rows("abcdefg\u{2026}", &viewport).len(), 1);
    }

    #[test]
    fn rulings_cover_page_width() {
        let renderer = EgPageRenderer::new(EgRenderConfig {
            clear_first: false,
            ..EgRenderConfig::default()
        });
        let mut display = PixelCaptureDisplay::with_size(100, 60);
        let rows = renderer
            .render_page(&mut display, Point::zero(), "", &small_viewport(), 1)
            .expect("draw");
        assert_eq!(rows, 0);
        assert_eq!(display.on_pixels.len(), 3 * 70);
        assert!(display
            .on_pixels
            .iter()
            .all(|p| [13, 27, 41].contains(&p.y) && (0..70).contains(&p.x)));
    }

    #[test]
    fn text_stays_inside_its_rows() {
        let renderer = EgPageRenderer::new(EgRenderConfig {
            clear_first: false,
            draw_rulings: false,
            ..EgRenderConfig::default()
        });
        let mut display = PixelCaptureDisplay::with_size(100, 60);
        let rows = renderer
            .render_page(&mut display, Point::zero(), "ab\ncd", &small_viewport(), 1)
            .expect("draw");
        assert_eq!(rows, 2);
        assert!(!display.on_pixels.is_empty());
        assert!(display.on_pixels.iter().all(|p| (0..28).contains(&p.y)));
        assert!(display.on_pixels.iter().any(|p| p.y >= 14));
    }

    #[test]
    fn spread_draws_right_page_after_gutter() {
        let options = FlowOptions {
            viewport: small_viewport(),
            ..FlowOptions::default()
        };
        let text = "a\nb\nc\nd";
        let flow = TextFlowController::with_oracle(text, options, EgMeasurer);
        // The newline closing page 0 would open a fourth row there.
        assert_eq!(flow.cuts().as_slice(), &[5, 7]);

        let renderer = EgPageRenderer::new(EgRenderConfig {
            draw_rulings: false,
            gutter_px: 10,
            ..EgRenderConfig::default()
        });
        let mut display = PixelCaptureDisplay::with_size(200, 60);
        renderer.render_spread(&mut display, &flow).expect("draw");
        assert!(display.on_pixels.iter().any(|p| p.x >= 80));
        assert!(display.on_pixels.iter().any(|p| p.x < 70));
    }
}
