use serde::{Deserialize, Serialize};

/// Typography the hosting surface renders page text with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// CSS-like family name, e.g. `"serif"` or `"monospace"`.
    pub family: String,
    /// Font size in device-independent pixels.
    pub size_px: f32,
    /// Extra spacing added after every glyph.
    pub letter_spacing: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size_px: 16.0,
            letter_spacing: 0.0,
        }
    }
}

/// Geometric and typographic parameters of one page's content box.
///
/// The pagination algorithm treats this as opaque and only hands it to the
/// measurement oracle. The one exception is `reserved_lines`, which shrinks
/// the first page (see [`for_page`](Self::for_page)).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    /// Content box width in device-independent pixels.
    pub content_width: f32,
    /// Content box height in device-independent pixels.
    pub content_height: f32,
    /// Computed line height in pixels.
    pub line_height: f32,
    /// Font used by the rendering surface.
    pub font: FontSpec,
    /// Lines held back at the top of page 0 for an in-page header.
    #[serde(default)]
    pub reserved_lines: u32,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            content_width: 360.0,
            content_height: 520.0,
            line_height: 24.0,
            font: FontSpec::default(),
            reserved_lines: 0,
        }
    }
}

impl ViewportGeometry {
    /// Convenience for a content-box size with default typography.
    pub fn for_content(width: f32, height: f32) -> Self {
        Self {
            content_width: width,
            content_height: height,
            ..Self::default()
        }
    }

    /// Set the header allowance on page 0.
    pub fn with_reserved_lines(mut self, lines: u32) -> Self {
        self.reserved_lines = lines;
        self
    }

    /// Content width with negative and non-finite values treated as zero.
    pub fn usable_width(&self) -> f32 {
        sanitize_px(self.content_width)
    }

    /// Line height with negative and non-finite values treated as zero.
    pub fn usable_line_height(&self) -> f32 {
        sanitize_px(self.line_height)
    }

    /// Content box height with negative and non-finite values treated as zero.
    pub fn content_box_height(&self) -> f32 {
        sanitize_px(self.content_height)
    }

    /// Whole lines that fit in the content box, ignoring `reserved_lines`.
    pub fn box_line_capacity(&self) -> usize {
        lines_in(self.content_box_height(), self.usable_line_height())
    }

    /// Height left for text on `page_index`.
    pub fn usable_height(&self, page_index: usize) -> f32 {
        let height = self.content_box_height();
        if page_index != 0 {
            return height;
        }
        let reserved = self.reserved_lines as f32 * self.usable_line_height();
        (height - reserved).max(0.0)
    }

    /// Effective viewport for `page_index`.
    ///
    /// Only page 0 is adjusted: its content height loses
    /// `reserved_lines * line_height`. Other pages get a plain copy with the
    /// allowance cleared, so oracles never need to know about it.
    pub fn for_page(&self, page_index: usize) -> ViewportGeometry {
        ViewportGeometry {
            content_height: self.usable_height(page_index),
            reserved_lines: 0,
            ..self.clone()
        }
    }

    /// Whole lines that fit on `page_index`.
    pub fn line_capacity(&self, page_index: usize) -> usize {
        lines_in(self.usable_height(page_index), self.usable_line_height())
    }

    /// Y offsets of the ruling lines drawn under each text line of
    /// `page_index`, relative to the top of the full content box.
    ///
    /// Page 0 starts below its reserved header lines.
    pub fn ruling_offsets(&self, page_index: usize) -> Vec<f32> {
        let line_height = self.usable_line_height();
        if line_height < MIN_RULING_LINE_HEIGHT_PX {
            return Vec::new();
        }
        let top = if page_index == 0 {
            self.reserved_lines as f32 * line_height
        } else {
            0.0
        };
        (1..=self.line_capacity(page_index).min(MAX_RULING_LINES))
            .map(|line| top + line as f32 * line_height)
            .collect()
    }
}

/// Tolerance used when comparing rendered heights against the content box.
pub(crate) const FIT_EPSILON: f32 = 0.01;

/// Rulings closer together than one pixel cannot be drawn apart.
const MIN_RULING_LINE_HEIGHT_PX: f32 = 1.0;
const MAX_RULING_LINES: usize = 4096;

fn lines_in(height: f32, line_height: f32) -> usize {
    if line_height <= 0.0 {
        return 0;
    }
    (height / line_height + FIT_EPSILON).floor() as usize
}

fn sanitize_px(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
