//! Error types for the image codec and the settings mapper.

/// Errors raised while converting images to and from their text form.
///
/// Only [`encode_image`](crate::encode_image) surfaces this type. The
/// file and decode entry points log it and return `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Reading the source file failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// Image bytes could not be decoded or PNG encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Base64 decoding failed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors raised while merging a payload into a settings object.
///
/// Unknown keys and absent payloads are never errors. Every variant here
/// means the payload broke the contract of a key the settings type declares.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A bound key carried a value that cannot become the field's type.
    #[error("cannot coerce value for key `{key}`: {source}")]
    Coerce {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A filesystem path field received something other than a string.
    #[error("value for path key `{key}` is not a string")]
    NotAString { key: String },

    /// A bound field could not be serialized during export.
    #[error("cannot serialize field for key `{key}`: {source}")]
    Export {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload text was not valid JSON.
    #[error("invalid payload json: {0}")]
    Parse(#[source] serde_json::Error),

    /// The payload was valid JSON but not an object or `null`.
    #[error("payload is not a json object")]
    NotAnObject,
}
