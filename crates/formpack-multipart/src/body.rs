//! `multipart/form-data` wire serialization (RFC 2046 framing).

use rand::{distributions::Alphanumeric, Rng};

use crate::part::{MultipartPayload, Part, PartBody};

const CRLF: &[u8] = b"\r\n";

/// Generates a random multipart boundary in the browser style the receiving
/// endpoint already accepts.
pub fn generate_boundary() -> String {
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("----FormpackBoundary{tail}")
}

/// `Content-Type` header value for a body framed with the given boundary.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Renders a [`MultipartPayload`] into body bytes.
///
/// The writer is deterministic given a fixed boundary, which the tests rely
/// on for byte-exact expectations.
#[derive(Debug, Clone)]
pub struct MultipartWriter {
    boundary: String,
}

impl Default for MultipartWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartWriter {
    /// Writer with a freshly generated random boundary.
    pub fn new() -> Self {
        Self {
            boundary: generate_boundary(),
        }
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        content_type(&self.boundary)
    }

    pub fn write(&self, payload: &MultipartPayload) -> Vec<u8> {
        let mut out = Vec::new();
        for part in payload.parts() {
            out.extend_from_slice(b"--");
            out.extend_from_slice(self.boundary.as_bytes());
            out.extend_from_slice(CRLF);
            self.write_part(part, &mut out);
        }
        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--");
        out.extend_from_slice(CRLF);
        out
    }

    fn write_part(&self, part: &Part, out: &mut Vec<u8>) {
        match part.body() {
            PartBody::Text { text, content_type } => {
                write_disposition(part.name(), None, out);
                if let Some(ct) = content_type {
                    out.extend_from_slice(b"Content-Type: ");
                    out.extend_from_slice(ct.as_bytes());
                    out.extend_from_slice(CRLF);
                }
                out.extend_from_slice(CRLF);
                out.extend_from_slice(text.as_bytes());
            }
            PartBody::File(file) => {
                write_disposition(part.name(), Some(file.name()), out);
                out.extend_from_slice(b"Content-Type: ");
                out.extend_from_slice(file.content_type().as_bytes());
                out.extend_from_slice(CRLF);
                out.extend_from_slice(CRLF);
                out.extend_from_slice(file.data());
            }
        }
        out.extend_from_slice(CRLF);
    }
}

fn write_disposition(name: &str, filename: Option<&str>, out: &mut Vec<u8>) {
    out.extend_from_slice(b"Content-Disposition: form-data; name=\"");
    out.extend_from_slice(escape_quoted(name).as_bytes());
    out.extend_from_slice(b"\"");
    if let Some(filename) = filename {
        out.extend_from_slice(b"; filename=\"");
        out.extend_from_slice(escape_quoted(filename).as_bytes());
        out.extend_from_slice(b"\"");
    }
    out.extend_from_slice(CRLF);
}

/// Quoted-string escaping for header attribute values. CR/LF cannot appear
/// inside a header line and are replaced with spaces.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_boundary_shape() {
        let a = generate_boundary();
        let b = generate_boundary();
        assert!(a.starts_with("----FormpackBoundary"));
        assert_eq!(a.len(), "----FormpackBoundary".len() + 16);
        assert!(a
            .strip_prefix("----FormpackBoundary")
            .unwrap()
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("plain"), "plain");
        assert_eq!(escape_quoted("a\"b"), "a\\\"b");
        assert_eq!(escape_quoted("a\\b"), "a\\\\b");
        assert_eq!(escape_quoted("a\r\nb"), "a  b");
    }
}
