//! Pixel-space geometry for drawing onto a key canvas.

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `width x height` pixels.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a rectangle shrunk by `margin` pixels on every side.
    ///
    /// Collapses to an empty rectangle at the center when the margin is
    /// larger than half the width or height. The origin saturates at
    /// `u32::MAX`.
    pub fn inset(&self, margin: u32) -> Self {
        let dx = margin.min(self.width / 2);
        let dy = margin.min(self.height / 2);
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width - dx * 2,
            height: self.height - dy * 2,
        }
    }
}
