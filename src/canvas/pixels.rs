//! Conversions between tiny-skia pixmaps and `image` buffers.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{IntSize, Pixmap, PremultipliedColorU8};

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (src, dst) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        *dst = to_rgba(*src);
    }

    img
}

/// Reads one pixel as straight (non-premultiplied) RGBA.
pub(crate) fn to_rgba(color: PremultipliedColorU8) -> Rgba<u8> {
    let (r, g, b, a) = unpremultiply(color.red(), color.green(), color.blue(), color.alpha());
    Rgba([r, g, b, a])
}

/// Converts an image::RgbaImage to a premultiplied tiny_skia Pixmap.
///
/// Returns `None` for zero-sized images.
pub(crate) fn rgba_image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = Vec::with_capacity(image.as_raw().len());

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = premultiply(r, g, b, a);
        data.extend_from_slice(&[r, g, b, a]);
    }

    Pixmap::from_vec(data, size)
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8) {
    let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    (scale(r), scale(g), scale(b))
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
