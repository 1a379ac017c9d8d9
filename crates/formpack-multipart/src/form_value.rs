//! [`FormValue`] — the universal value type for form snapshots.
//!
//! A form snapshot is mostly plain JSON, except that file-bearing fields may
//! hold an in-memory file the user has picked but not yet uploaded. JSON has
//! no representation for that, so the snapshot is modelled as a JSON-superset
//! tree with one extra [`FormValue::File`] variant.

use serde_json::Value;

/// An in-memory file selected by the user but not yet uploaded.
///
/// A file-bearing form field holds at most one representation at a time:
/// `null`, a remote URL string (an already-persisted asset, carried in a
/// `*_url` companion field), or a `FileHandle`. The handle, when present,
/// wins for both preview and upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Original file name, used as the multipart `filename` attribute.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type reported by the picker (e.g. `image/png`).
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Value tree for form snapshots: JSON plus in-memory files.
///
/// Objects are ordered key-value pairs, so field order survives the round
/// trip from hydration through editing to submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// JSON null — also the empty state of a file-bearing field.
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer > `i64::MAX`
    UInteger(u64),
    /// Floating-point number
    Float(f64),
    /// String (including remote-URL references to persisted assets)
    Str(String),
    /// A picked-but-not-yet-uploaded file
    File(FileHandle),
    /// Array of form values (repeating groups are arrays of objects)
    Array(Vec<FormValue>),
    /// Object (ordered key-value pairs)
    Object(Vec<(String, FormValue)>),
}

impl FormValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            FormValue::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FormValue]> {
        match self {
            FormValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, FormValue)]> {
        match self {
            FormValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a field of an object value. Returns `None` for non-objects
    /// and missing keys alike.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        match self {
            FormValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FormValue> {
        match self {
            FormValue::Object(entries) => entries
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Element of an array value by index.
    pub fn at(&self, index: usize) -> Option<&FormValue> {
        match self {
            FormValue::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut FormValue> {
        match self {
            FormValue::Array(items) => items.get_mut(index),
            _ => None,
        }
    }

    /// Sets a field on an object value, replacing in place when the key
    /// already exists (field order is preserved) and appending otherwise.
    /// No-op on non-objects.
    pub fn insert(&mut self, key: impl Into<String>, value: FormValue) {
        if let FormValue::Object(entries) = self {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key, value)),
            }
        }
    }
}

impl From<Value> for FormValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FormValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    FormValue::UInteger(u)
                } else {
                    FormValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => FormValue::Str(s),
            Value::Array(arr) => FormValue::Array(arr.into_iter().map(FormValue::from).collect()),
            Value::Object(obj) => FormValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, FormValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for FormValue {
    fn from(v: &Value) -> Self {
        FormValue::from(v.clone())
    }
}
