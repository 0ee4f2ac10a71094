//! Normalization of file names delivered by browser-style file pickers.

use percent_encoding::percent_decode_str;

/// Placeholder directory that file inputs substitute for the real location.
pub const FAKE_PATH_PREFIX: &str = "C:\\fakepath\\";

/// Strips the fake-path prefix and percent-decodes what remains.
///
/// Sequences that do not form valid UTF-8 after decoding are replaced with
/// `U+FFFD`. A `%` not followed by two hex digits is kept as is.
///
/// ```
/// use deckkit::normalize_filename_from_payload;
///
/// assert_eq!(
///     normalize_filename_from_payload("C:\\fakepath\\My%20Song.mp3"),
///     "My Song.mp3"
/// );
/// ```
pub fn normalize_filename_from_payload(value: &str) -> String {
    let stripped = value.strip_prefix(FAKE_PATH_PREFIX).unwrap_or(value);
    percent_decode_str(stripped).decode_utf8_lossy().into_owned()
}
