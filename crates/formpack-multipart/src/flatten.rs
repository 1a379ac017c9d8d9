//! Bracket-path flattening of a form snapshot into multipart parts.
//!
//! The legacy encoding used by the older builders: instead of a JSON sidecar,
//! the whole snapshot is flattened into individually named parts, with nested
//! keys spelled `parent[key]` and array elements `parent[index]`. Null fields
//! are omitted, files become file parts, and every other scalar is sent as
//! text.
//!
//! # Example
//!
//! ```
//! use formpack_multipart::{flatten, FormValue};
//! use serde_json::json;
//!
//! let form = FormValue::from(json!({
//!     "name": "Fade Factory",
//!     "tagline": null,
//!     "links": [{"url": "https://x", "clicks": 3}]
//! }));
//! let payload = flatten::flatten(&form);
//! assert_eq!(payload.text("name"), Some("Fade Factory"));
//! assert_eq!(payload.text("links[0][url]"), Some("https://x"));
//! assert_eq!(payload.text("links[0][clicks]"), Some("3"));
//! assert!(payload.get("tagline").is_none());
//! ```

use crate::form_value::FormValue;
use crate::part::{MultipartPayload, Part};

/// Flattens an object snapshot into a payload. Non-object roots have no
/// named fields to flatten and produce an empty payload.
pub fn flatten(form: &FormValue) -> MultipartPayload {
    let mut payload = MultipartPayload::new();
    flatten_into(form, None, &mut payload);
    payload
}

/// Flattens `form` into `out`, prefixing every key with `parent` when given.
pub fn flatten_into(form: &FormValue, parent: Option<&str>, out: &mut MultipartPayload) {
    if let FormValue::Object(entries) = form {
        for (key, value) in entries {
            let full_key = match parent {
                Some(parent) => format!("{parent}[{key}]"),
                None => key.clone(),
            };
            flatten_entry(&full_key, value, out);
        }
    }
}

fn flatten_entry(key: &str, value: &FormValue, out: &mut MultipartPayload) {
    match value {
        FormValue::Null => {}
        FormValue::File(file) => out.push(Part::file(key, file.clone())),
        FormValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_entry(&format!("{key}[{index}]"), item, out);
            }
        }
        FormValue::Object(entries) => {
            for (child_key, child) in entries {
                flatten_entry(&format!("{key}[{child_key}]"), child, out);
            }
        }
        FormValue::Bool(b) => out.push(Part::text(key, if *b { "true" } else { "false" })),
        FormValue::Integer(i) => out.push(Part::text(key, i.to_string())),
        FormValue::UInteger(u) => out.push(Part::text(key, u.to_string())),
        FormValue::Float(f) => out.push(Part::text(key, f.to_string())),
        FormValue::Str(s) => out.push(Part::text(key, s.clone())),
    }
}
