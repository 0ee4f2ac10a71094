//! Rendering-quality hints carried by a canvas.

use resvg::tiny_skia::FilterQuality;

/// Edge smoothing for filled shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
    #[default]
    AntiAlias,
    None,
}

/// Resampling filter used when scaling images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    HighQualityBicubic,
    Bilinear,
    NearestNeighbor,
}

/// Where pixel centers sit relative to integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelOffset {
    /// Pixel centers at half-pixel positions.
    #[default]
    HighQuality,
    /// Pixel centers on integer coordinates.
    Integer,
}

/// Text rasterization mode recorded for text drawn onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRenderingHint {
    #[default]
    AntiAliasGridFit,
    AntiAlias,
    SingleBitPerPixel,
}

/// The full set of quality hints a [`DrawingContext`](super::DrawingContext)
/// honors.
///
/// The default is the fixed blank-canvas configuration: antialiased edges,
/// bicubic interpolation, high-quality pixel offset and grid-fit antialiased
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderHints {
    pub smoothing: Smoothing,
    pub interpolation: Interpolation,
    pub pixel_offset: PixelOffset,
    pub text_rendering: TextRenderingHint,
}

impl RenderHints {
    /// Sets edge smoothing.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Sets the image interpolation filter.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the pixel offset mode.
    pub fn with_pixel_offset(mut self, pixel_offset: PixelOffset) -> Self {
        self.pixel_offset = pixel_offset;
        self
    }

    /// Sets the text rendering mode.
    pub fn with_text_rendering(mut self, text_rendering: TextRenderingHint) -> Self {
        self.text_rendering = text_rendering;
        self
    }

    pub(crate) fn anti_alias(&self) -> bool {
        self.smoothing == Smoothing::AntiAlias
    }

    pub(crate) fn filter_quality(&self) -> FilterQuality {
        match self.interpolation {
            Interpolation::HighQualityBicubic => FilterQuality::Bicubic,
            Interpolation::Bilinear => FilterQuality::Bilinear,
            Interpolation::NearestNeighbor => FilterQuality::Nearest,
        }
    }

    /// Translation applied to every draw call.
    ///
    /// tiny-skia samples at pixel centers, so only integer-centered
    /// coordinates need a shift.
    pub(crate) fn origin_offset(&self) -> f32 {
        match self.pixel_offset {
            PixelOffset::HighQuality => 0.0,
            PixelOffset::Integer => 0.5,
        }
    }
}
