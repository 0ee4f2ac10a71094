//! Per-type binding tables between external keys and native fields.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::coerce::coerce;
use crate::error::SettingsError;
use crate::filename::normalize_filename_from_payload;

/// How a payload value is transformed before it is written to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Coerce the value to the field's type and assign it.
    #[default]
    Plain,
    /// Treat the value as a file-picker path: strip the fake-path prefix
    /// and percent-decode before assigning.
    FilesystemPath,
}

type Assign<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), SettingsError> + Send + Sync>;
type Read<T> = Box<dyn Fn(&T) -> Result<Value, serde_json::Error> + Send + Sync>;

/// One external key bound to one field of `T`.
pub struct FieldBinding<T> {
    key: String,
    kind: FieldKind,
    assign: Assign<T>,
    read: Read<T>,
}

impl<T> FieldBinding<T> {
    /// The key this field is addressed by in payloads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the value is coerced or normalized as a path.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Writes `value` into the bound field of `target`.
    pub(crate) fn assign(&self, target: &mut T, value: &Value) -> Result<(), SettingsError> {
        (self.assign)(target, value)
    }

    /// Reads the bound field of `source` as JSON.
    pub(crate) fn read(&self, source: &T) -> Result<Value, SettingsError> {
        (self.read)(source).map_err(|source| SettingsError::Export {
            key: self.key.clone(),
            source,
        })
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// The externally addressable fields of a settings type, in declaration order.
///
/// Fields not registered here are never read or written by the mapper.
///
/// # Example
///
/// ```
/// use deckkit::Schema;
///
/// #[derive(Default)]
/// struct Counter {
///     step: u32,
///     sound: String,
/// }
///
/// let schema = Schema::<Counter>::new()
///     .field("step", |s| &s.step, |s| &mut s.step)
///     .path_field("soundFile", |s| &s.sound, |s| &mut s.sound);
///
/// assert_eq!(schema.len(), 2);
/// ```
pub struct Schema<T> {
    bindings: Vec<FieldBinding<T>>,
}

impl<T: 'static> Schema<T> {
    /// Creates a schema with no bindings.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `key` to a field whose value is coerced from the payload.
    pub fn field<V, G, M>(mut self, key: impl Into<String>, get: G, get_mut: M) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let key = key.into();
        let error_key = key.clone();

        self.bindings.push(FieldBinding {
            key,
            kind: FieldKind::Plain,
            assign: Box::new(move |target: &mut T, value: &Value| -> Result<(), SettingsError> {
                let coerced: V = coerce(value).map_err(|source| SettingsError::Coerce {
                    key: error_key.clone(),
                    source,
                })?;
                *get_mut(target) = coerced;
                Ok(())
            }),
            read: Box::new(move |source: &T| serde_json::to_value(get(source))),
        });
        self
    }

    /// Binds `key` to a filesystem path field.
    ///
    /// The payload value must be a string; it is passed through
    /// [`normalize_filename_from_payload`] before assignment.
    pub fn path_field<V, G, M>(mut self, key: impl Into<String>, get: G, get_mut: M) -> Self
    where
        V: Serialize + From<String> + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let key = key.into();
        let error_key = key.clone();

        self.bindings.push(FieldBinding {
            key,
            kind: FieldKind::FilesystemPath,
            assign: Box::new(move |target: &mut T, value: &Value| -> Result<(), SettingsError> {
                let Value::String(raw) = value else {
                    return Err(SettingsError::NotAString {
                        key: error_key.clone(),
                    });
                };
                *get_mut(target) = V::from(normalize_filename_from_payload(raw));
                Ok(())
            }),
            read: Box::new(move |source: &T| serde_json::to_value(get(source))),
        });
        self
    }
}

impl<T> Schema<T> {
    /// Returns the bindings in declaration order, duplicates included.
    pub fn bindings(&self) -> &[FieldBinding<T>] {
        &self.bindings
    }

    /// Number of bindings, counting duplicate keys separately.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no field is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Builds the key lookup table for this schema.
    pub fn field_map(&self) -> FieldMap<'_, T> {
        FieldMap::build(self)
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.bindings).finish()
    }
}

// ============================================================================
// FieldMap
// ============================================================================

/// Lookup from external key to the binding that owns it.
///
/// When several bindings claim one key, the first declared wins and the
/// rest are never consulted.
pub struct FieldMap<'s, T> {
    by_key: HashMap<&'s str, &'s FieldBinding<T>>,
}

impl<'s, T> FieldMap<'s, T> {
    /// Indexes `schema` by external key, first binding wins.
    pub fn build(schema: &'s Schema<T>) -> Self {
        let mut by_key: HashMap<&'s str, &'s FieldBinding<T>> =
            HashMap::with_capacity(schema.len());

        for binding in schema.bindings() {
            if by_key.contains_key(binding.key()) {
                log::debug!(
                    "ignoring duplicate binding for key `{}` in {}",
                    binding.key(),
                    std::any::type_name::<T>()
                );
                continue;
            }
            by_key.insert(binding.key(), binding);
        }

        Self { by_key }
    }

    /// Returns the binding that owns `key`, if any.
    pub fn get(&self, key: &str) -> Option<&'s FieldBinding<T>> {
        self.by_key.get(key).copied()
    }

    /// Returns true if some binding owns `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Returns the transform kind of the field bound to `key`.
    pub fn kind(&self, key: &str) -> Option<FieldKind> {
        self.get(key).map(FieldBinding::kind)
    }

    /// Returns true if `binding` is the one that owns its key.
    pub(crate) fn owns(&self, binding: &FieldBinding<T>) -> bool {
        self.get(binding.key())
            .is_some_and(|owner| std::ptr::eq(owner, binding))
    }

    /// Number of distinct external keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if the schema bound no keys.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Sample {
        title: String,
        alt_title: String,
        path: String,
    }

    fn schema() -> Schema<Sample> {
        Schema::new()
            .field(
                "title",
                |s: &Sample| &s.title,
                |s: &mut Sample| &mut s.title,
            )
            .field(
                "title",
                |s: &Sample| &s.alt_title,
                |s: &mut Sample| &mut s.alt_title,
            )
            .path_field("path", |s: &Sample| &s.path, |s: &mut Sample| &mut s.path)
    }

    #[test]
    fn first_binding_owns_duplicate_key() {
        let schema = schema();
        let map = schema.field_map();

        assert_eq!(schema.len(), 3);
        assert_eq!(map.len(), 2);
        assert!(map.owns(&schema.bindings()[0]));
        assert!(!map.owns(&schema.bindings()[1]));
    }

    #[test]
    fn kinds_are_recorded() {
        let schema = schema();
        let map = schema.field_map();

        assert_eq!(map.kind("title"), Some(FieldKind::Plain));
        assert_eq!(map.kind("path"), Some(FieldKind::FilesystemPath));
        assert_eq!(map.kind("missing"), None);
        assert_eq!(schema.bindings()[2].kind(), FieldKind::FilesystemPath);
        assert!(map.contains_key("path"));
        assert!(!map.contains_key("alt_title"));
    }

    #[test]
    fn path_binding_requires_string() {
        let schema = schema();
        let binding = schema.field_map().get("path").unwrap();
        let mut sample = Sample::default();

        let err = binding.assign(&mut sample, &json!(5)).unwrap_err();
        assert!(matches!(err, SettingsError::NotAString { ref key } if key == "path"));

        binding
            .assign(&mut sample, &json!("C:\\fakepath\\a%20b.wav"))
            .unwrap();
        assert_eq!(sample.path, "a b.wav");
    }

    #[test]
    fn empty_schema_has_empty_map() {
        let schema = Schema::<Sample>::new();
        assert!(schema.is_empty());
        assert!(schema.field_map().is_empty());
    }
}
