//! Ordered part container for a single submission.

use crate::form_value::FileHandle;

/// Body of a single multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    /// Text payload, optionally with an explicit `Content-Type`.
    Text {
        text: String,
        content_type: Option<String>,
    },
    /// Binary file payload; filename and content type come from the handle.
    File(FileHandle),
}

/// A named multipart part.
///
/// The name is the binding contract with the receiving endpoint: group files
/// are keyed `{group}[{index}].{field}`, top-level files `{field}`, and the
/// JSON document `json_body`. Renaming parts requires versioning both sides
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    name: String,
    body: PartBody,
}

impl Part {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: PartBody::Text {
                text: text.into(),
                content_type: None,
            },
        }
    }

    pub fn text_with_type(
        name: impl Into<String>,
        text: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body: PartBody::Text {
                text: text.into(),
                content_type: Some(content_type.into()),
            },
        }
    }

    pub fn file(name: impl Into<String>, file: FileHandle) -> Self {
        Self {
            name: name.into(),
            body: PartBody::File(file),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &PartBody {
        &self.body
    }

    pub fn is_file(&self) -> bool {
        matches!(self.body, PartBody::File(_))
    }
}

/// An ordered list of named parts, ready for wire serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// First part with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Text content of the named part, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name).map(Part::body) {
            Some(PartBody::Text { text, .. }) => Some(text),
            _ => None,
        }
    }

    /// Names of all file parts, in payload order.
    pub fn file_part_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|p| p.is_file())
            .map(Part::name)
            .collect()
    }
}
