//! Partial updates of typed settings from untyped JSON payloads.
//!
//! A settings type implements [`Settings`] by declaring a [`Schema`]: which
//! of its fields are addressable from the host, under which external key,
//! and whether the field holds a file-picker path. [`merge`] then copies a
//! payload into an instance key by key.
//!
//! Unknown keys and absent payloads are expected and ignored, so older and
//! newer hosts can talk to the same settings type. A bound key whose value
//! cannot become the field's type is a contract violation and fails the
//! merge.
//!
//! # Example
//!
//! ```
//! use deckkit::{Schema, Settings, SettingsExt};
//! use serde_json::json;
//!
//! #[derive(Debug, Default)]
//! struct SoundboardSettings {
//!     title: String,
//!     volume: u8,
//!     sound_file: String,
//! }
//!
//! impl Settings for SoundboardSettings {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .field("title", |s: &Self| &s.title, |s: &mut Self| &mut s.title)
//!             .field("volume", |s: &Self| &s.volume, |s: &mut Self| &mut s.volume)
//!             .path_field(
//!                 "soundFile",
//!                 |s: &Self| &s.sound_file,
//!                 |s: &mut Self| &mut s.sound_file,
//!             )
//!     }
//! }
//!
//! let payload = json!({
//!     "title": "Airhorn",
//!     "volume": "80",
//!     "soundFile": "C:\\fakepath\\air%20horn.wav",
//!     "addedInV2": true
//! });
//!
//! let mut settings = SoundboardSettings::default();
//! let updated = settings.apply_payload(payload.as_object()).unwrap();
//!
//! assert_eq!(updated, 3);
//! assert_eq!(settings.volume, 80);
//! assert_eq!(settings.sound_file, "air horn.wav");
//! ```

mod coerce;
pub mod schema;

pub use schema::{FieldBinding, FieldKind, FieldMap, Schema};

use serde_json::{Map, Value};

use crate::error::SettingsError;

/// A JSON object as delivered by the host.
pub type Payload = Map<String, Value>;

/// Types whose fields can be synchronized from host payloads.
pub trait Settings: Sized + 'static {
    /// Declares the externally addressable fields of this type.
    ///
    /// Called on every merge; the result is not cached.
    fn schema() -> Schema<Self>;
}

/// Builds the key lookup for `T` from a freshly declared schema.
///
/// The map borrows `schema`; keep it alive for as long as the map is used.
pub fn build_field_map<T: Settings>(schema: &Schema<T>) -> FieldMap<'_, T> {
    FieldMap::build(schema)
}

/// Merges `payload` into `target` and returns how many fields were written.
///
/// Keys are visited in payload order. Keys with no binding are skipped. An
/// absent payload writes nothing. The first coercion failure aborts the
/// merge; fields written before it keep their new values.
pub fn merge<T: Settings>(
    target: &mut T,
    payload: Option<&Payload>,
) -> Result<usize, SettingsError> {
    let Some(payload) = payload else {
        return Ok(0);
    };

    let schema = T::schema();
    let fields = build_field_map(&schema);
    let mut updated = 0;

    for (key, value) in payload {
        let Some(binding) = fields.get(key) else {
            log::trace!("skipping unbound key `{key}`");
            continue;
        };

        binding.assign(target, value)?;
        log::trace!("assigned key `{key}` ({:?})", binding.kind());
        updated += 1;
    }

    Ok(updated)
}

/// Parses `json` and merges it into `target`.
///
/// A top-level `null` is treated as an absent payload.
pub fn merge_json<T: Settings>(target: &mut T, json: &str) -> Result<usize, SettingsError> {
    match serde_json::from_str::<Value>(json).map_err(SettingsError::Parse)? {
        Value::Null => merge(target, None),
        Value::Object(payload) => merge(target, Some(&payload)),
        _ => Err(SettingsError::NotAnObject),
    }
}

/// Serializes every bound field of `source` under its external key.
///
/// Keys appear in declaration order. Duplicate bindings are skipped just as
/// [`merge`] skips them.
pub fn export<T: Settings>(source: &T) -> Result<Payload, SettingsError> {
    let schema = T::schema();
    let fields = build_field_map(&schema);
    let mut payload = Payload::new();

    for binding in schema.bindings() {
        if fields.owns(binding) {
            payload.insert(binding.key().to_string(), binding.read(source)?);
        }
    }

    Ok(payload)
}

/// Method-call sugar for [`merge`] and [`export`].
pub trait SettingsExt: Settings {
    /// Applies a host payload to this instance.
    fn apply_payload(&mut self, payload: Option<&Payload>) -> Result<usize, SettingsError> {
        merge(self, payload)
    }

    /// Exports the current settings as a host payload.
    fn to_payload(&self) -> Result<Payload, SettingsError> {
        export(self)
    }
}

impl<T: Settings> SettingsExt for T {}

// ============================================================================
// Tests
// ============================================================================
