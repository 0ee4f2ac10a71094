//! Key-sized drawing surfaces.
//!
//! A [`Canvas`] owns a raster surface together with the [`RenderHints`] used
//! to draw on it. [`new_blank_canvas`] returns the standard 72×72 key surface
//! filled with opaque black; callers then draw through
//! [`Canvas::context`] and hand the result to the codec.
//!
//! # Example
//!
//! ```
//! use deckkit::new_blank_canvas;
//! use palette::Srgba;
//!
//! let mut canvas = new_blank_canvas();
//! let bounds = canvas.bounds();
//! {
//!     let mut ctx = canvas.context();
//!     ctx.fill_rect(bounds.inset(8), Srgba::new(255, 255, 255, 255));
//! }
//! let encoded = canvas.encode(true).unwrap();
//! assert!(encoded.starts_with(deckkit::HEADER_MARKER));
//! ```

pub mod hints;
mod pixels;

pub use hints::{Interpolation, PixelOffset, RenderHints, Smoothing, TextRenderingHint};

use image::{Rgba, RgbaImage};
use palette::Srgba;
use resvg::tiny_skia::{Color, Paint, Pixmap, PixmapPaint, Rect, Transform};

use crate::codec;
use crate::error::CodecError;
use crate::geometry::RectPx;

/// Width and height of a standard key image, in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 72;

/// Allocates the standard key surface: 72×72, opaque black, default hints.
pub fn new_blank_canvas() -> Canvas {
    Canvas::with_size(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
        .expect("default canvas size is non-zero")
}

// ============================================================================
// Canvas
// ============================================================================

/// A raster surface plus the rendering hints its drawing context applies.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
    hints: RenderHints,
}

impl Canvas {
    /// Allocates an opaque black canvas of the given size.
    ///
    /// Returns `None` if either dimension is zero.
    pub fn with_size(width: u32, height: u32) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(Color::BLACK);
        Some(Self {
            pixmap,
            hints: RenderHints::default(),
        })
    }

    /// Replaces the rendering hints.
    pub fn with_hints(mut self, hints: RenderHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the full canvas area as a rectangle at the origin.
    pub fn bounds(&self) -> RectPx {
        RectPx::from_size(self.width(), self.height())
    }

    pub fn hints(&self) -> &RenderHints {
        &self.hints
    }

    /// Returns a drawing context bound to this canvas.
    pub fn context(&mut self) -> DrawingContext<'_> {
        DrawingContext {
            pixmap: &mut self.pixmap,
            hints: self.hints,
        }
    }

    /// Reads a single pixel as straight RGBA.
    ///
    /// Returns `None` for coordinates outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        // Pixmap::pixel indexes the flat buffer and only checks its length
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(pixels::to_rgba)
    }

    /// Copies the surface into a non-premultiplied image buffer.
    pub fn to_image(&self) -> RgbaImage {
        pixels::pixmap_to_rgba_image(&self.pixmap)
    }

    /// Consumes the canvas and returns its pixels.
    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }

    /// Encodes the current surface as Base64 PNG.
    pub fn encode(&self, with_header: bool) -> Result<String, CodecError> {
        codec::encode_image(&self.to_image(), with_header)
    }
}

// ============================================================================
// DrawingContext
// ============================================================================

/// Draws onto a [`Canvas`] using the canvas's [`RenderHints`].
pub struct DrawingContext<'a> {
    pixmap: &'a mut Pixmap,
    hints: RenderHints,
}

impl DrawingContext<'_> {
    pub fn hints(&self) -> &RenderHints {
        &self.hints
    }

    /// Floods the whole surface with `color`.
    pub fn fill(&mut self, color: Srgba<u8>) {
        self.pixmap.fill(to_color(color));
    }

    /// Fills `rect` with `color`, blending source-over.
    pub fn fill_rect(&mut self, rect: RectPx, color: Srgba<u8>) {
        let Some(rect) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
        paint.anti_alias = self.hints.anti_alias();

        self.pixmap.fill_rect(rect, &paint, self.origin_transform(), None);
    }

    /// Scales `image` into `rect` and composites it over the surface.
    ///
    /// Aspect ratio is not preserved; the image fills `rect` exactly.
    pub fn draw_image(&mut self, image: &RgbaImage, rect: RectPx) {
        if rect.is_empty() {
            return;
        }
        let Some(source) = pixels::rgba_image_to_pixmap(image) else {
            return;
        };

        let scale_x = rect.width as f32 / source.width() as f32;
        let scale_y = rect.height as f32 / source.height() as f32;
        let offset = self.hints.origin_offset();
        let transform = Transform::from_scale(scale_x, scale_y)
            .post_translate(rect.x as f32 + offset, rect.y as f32 + offset);

        let paint = PixmapPaint {
            quality: self.hints.filter_quality(),
            ..PixmapPaint::default()
        };

        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn origin_transform(&self) -> Transform {
        let offset = self.hints.origin_offset();
        Transform::from_translate(offset, offset)
    }
}

fn to_color(color: Srgba<u8>) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Srgba<u8> {
        Srgba::new(255, 255, 255, 255)
    }

    #[test]
    fn blank_canvas_is_opaque_black() {
        let canvas = new_blank_canvas();
        assert_eq!(canvas.width(), 72);
        assert_eq!(canvas.height(), 72);
        assert_eq!(*canvas.hints(), RenderHints::default());

        let image = canvas.into_image();
        assert_eq!(image.dimensions(), (72, 72));
        assert!(image.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn custom_size_and_zero_size() {
        let canvas = Canvas::with_size(144, 144).unwrap();
        assert_eq!(canvas.bounds(), RectPx::from_size(144, 144));
        assert!(Canvas::with_size(0, 72).is_none());
    }

    #[test]
    fn fill_replaces_every_pixel() {
        let mut canvas = new_blank_canvas();
        canvas.context().fill(Srgba::new(0, 128, 255, 255));

        assert!(
            canvas
                .to_image()
                .pixels()
                .all(|p| *p == Rgba([0, 128, 255, 255]))
        );
    }

    #[test]
    fn fill_rect_only_touches_rect() {
        let mut canvas = new_blank_canvas();
        canvas.context().fill_rect(RectPx::new(0, 0, 10, 10), white());

        assert_eq!(canvas.pixel(5, 5), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(canvas.pixel(20, 20), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn pixel_outside_canvas_is_none() {
        let mut canvas = new_blank_canvas();
        canvas.context().fill_rect(RectPx::new(0, 0, 10, 10), white());

        assert_eq!(canvas.pixel(72, 0), None);
        assert_eq!(canvas.pixel(100, 0), None);
        assert_eq!(canvas.pixel(0, 72), None);
        assert_eq!(canvas.pixel(71, 71), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn draw_image_scales_into_rect() {
        let mut canvas = new_blank_canvas();
        let source = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        canvas.context().draw_image(&source, canvas_bounds());

        assert_eq!(canvas.pixel(36, 36), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn draw_image_into_empty_rect_is_noop() {
        let mut canvas = new_blank_canvas();
        let source = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        canvas.context().draw_image(&source, RectPx::new(10, 10, 0, 5));

        assert!(
            canvas
                .to_image()
                .pixels()
                .all(|p| *p == Rgba([0, 0, 0, 255]))
        );
    }

    #[test]
    fn encoded_canvas_decodes_to_same_pixels() {
        let mut canvas = new_blank_canvas();
        canvas.context().fill_rect(RectPx::new(8, 8, 16, 16), white());

        let encoded = canvas.encode(false).unwrap();
        assert_eq!(codec::decode(&encoded), Some(canvas.to_image()));
    }

    fn canvas_bounds() -> RectPx {
        RectPx::from_size(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}
