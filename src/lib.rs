//! deckkit: image and settings plumbing for key-surface plugins
//!
//! Plugins that render onto fixed-size hardware keys talk to their host over
//! a JSON control protocol. This crate covers the two data-shape concerns of
//! that conversation:
//!
//! - **Images**: encode raster images to Base64 PNG (optionally as a
//!   `data:` URI) and decode them back, plus a 72×72 drawing canvas with
//!   quality rendering hints.
//! - **Settings**: merge untyped JSON payloads into typed settings structs
//!   through an explicit per-type [`Schema`].
//!
//! # Example
//!
//! ```
//! use deckkit::{HEADER_MARKER, decode, encode_image, new_blank_canvas};
//!
//! let canvas = new_blank_canvas();
//! let encoded = encode_image(&canvas.to_image(), true).unwrap();
//! assert!(encoded.starts_with(HEADER_MARKER));
//!
//! let image = decode(&encoded).unwrap();
//! assert_eq!(image.dimensions(), (72, 72));
//!
//! // Corrupt data degrades to "no image" instead of an error.
//! assert!(decode("definitely not an image").is_none());
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. Decode failures are logged at
//! `warn`, missing files and duplicate schema keys at `debug`, and per-key
//! merge decisions at `trace`. No logger is installed by this crate.

mod canvas;
mod codec;
mod error;
mod filename;
mod geometry;
mod settings;

pub use canvas::{
    Canvas, DEFAULT_CANVAS_SIZE, DrawingContext, Interpolation, PixelOffset, RenderHints,
    Smoothing, TextRenderingHint, new_blank_canvas,
};
pub use codec::{HEADER_MARKER, decode, encode_file, encode_image, strip_header};
pub use error::{CodecError, SettingsError};
pub use filename::{FAKE_PATH_PREFIX, normalize_filename_from_payload};
pub use geometry::RectPx;
pub use settings::{
    FieldBinding, FieldKind, FieldMap, Payload, Schema, Settings, SettingsExt, build_field_map,
    export, merge, merge_json,
};
