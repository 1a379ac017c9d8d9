//! Form-to-multipart submission encoding.
//!
//! [`encode_submission`] turns a form snapshot into the dual payload the
//! builder API expects: one binary part per pending file, keyed by its path
//! in the form, plus a single `json_body` part holding the full document
//! with every extracted file nulled out and every repeating-group item
//! stamped with its `placement_order`.

use serde_json::{Map, Value};
use thiserror::Error;

use formpack_multipart::{FormValue, MultipartPayload, Part};

use crate::rules::{ExtractionRules, GroupRule};

/// Name of the JSON part of every submission.
pub const JSON_BODY_PART: &str = "json_body";

/// Field injected into every ruled-group item, equal to the item's
/// zero-based index at encode time.
pub const PLACEMENT_ORDER_FIELD: &str = "placement_order";

/// Malformed form snapshot. Raised before any payload is produced; the
/// snapshot itself is never mutated, so the caller can fix up and retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("form snapshot root must be an object")]
    RootNotObject,
    #[error("group `{group}` must be an array or null")]
    GroupNotArray { group: String },
    #[error("item {index} of group `{group}` must be an object")]
    ItemNotObject { group: String, index: usize },
    #[error("file field `{path}` must hold null, a URL string, or a pending file")]
    UnexpectedFieldShape { path: String },
    #[error("pending file at `{path}` is not covered by any extraction rule")]
    StrayFile { path: String },
    #[error("failed to serialize submission document: {0}")]
    Serialize(String),
}

/// Encodes a form snapshot into a multipart payload.
///
/// Pure and deterministic: given the same snapshot, rules, and context, the
/// output is identical down to the serialized JSON bytes. The snapshot is
/// borrowed immutably; the JSON half is a fresh projection, never a mutation
/// of the input.
///
/// `context` fields are merged into the document's top level after the form
/// fields and win on key collision (parent ids, theme object, layout name —
/// opaque to the encoder).
///
/// # Example
///
/// ```
/// use formpack_core::{encode_submission, ExtractionRules, JSON_BODY_PART};
/// use formpack_multipart::{FileHandle, FormValue};
/// use serde_json::{json, Map};
///
/// let mut form = FormValue::from(json!({
///     "name": "Fade Factory",
///     "logo": null,
///     "services": [
///         {"id": null, "name": "Cut", "image": null},
///         {"id": 5, "name": "Wash", "image_url": "https://cdn.example/wash.png"}
///     ]
/// }));
/// let picked = FileHandle::new("cut.png", "image/png", vec![0x89, 0x50]);
/// form.get_mut("services").unwrap().at_mut(0).unwrap()
///     .insert("image", FormValue::File(picked));
///
/// let rules = ExtractionRules::new()
///     .group_with_file("services", "image")
///     .file("logo");
///
/// let payload = encode_submission(&form, &rules, &Map::new()).unwrap();
/// assert_eq!(payload.file_part_names(), ["services[0].image"]);
///
/// let body: serde_json::Value =
///     serde_json::from_str(payload.text(JSON_BODY_PART).unwrap()).unwrap();
/// assert_eq!(body["services"][0]["image"], json!(null));
/// assert_eq!(body["services"][0]["placement_order"], json!(0));
/// assert_eq!(body["services"][1]["placement_order"], json!(1));
/// assert_eq!(body["services"][1]["image_url"], json!("https://cdn.example/wash.png"));
/// ```
pub fn encode_submission(
    form: &FormValue,
    rules: &ExtractionRules,
    context: &Map<String, Value>,
) -> Result<MultipartPayload, ConfigurationError> {
    let fields = match form {
        FormValue::Object(fields) => fields,
        _ => return Err(ConfigurationError::RootNotObject),
    };

    // Files are captured from the original snapshot, not the projection:
    // they have no JSON representation and would not survive it.
    let file_parts = collect_file_parts(fields, rules)?;
    let document = project_document(fields, rules, context)?;
    let json = serde_json::to_string(&Value::Object(document))
        .map_err(|e| ConfigurationError::Serialize(e.to_string()))?;

    let mut payload = MultipartPayload::new();
    for part in file_parts {
        payload.push(part);
    }
    payload.push(Part::text_with_type(JSON_BODY_PART, json, "application/json"));
    Ok(payload)
}

/// Binary-part collection pass, in rule order: file-bearing groups first
/// (item order within each), then top-level file fields.
fn collect_file_parts(
    fields: &[(String, FormValue)],
    rules: &ExtractionRules,
) -> Result<Vec<Part>, ConfigurationError> {
    let mut parts = Vec::new();

    for rule in rules.groups() {
        let Some(file_field) = rule.file_field() else {
            continue;
        };
        let Some(group) = lookup(fields, rule.name()) else {
            continue;
        };
        let items = match group {
            FormValue::Null => continue,
            FormValue::Array(items) => items,
            _ => {
                return Err(ConfigurationError::GroupNotArray {
                    group: rule.name().to_string(),
                })
            }
        };
        for (index, item) in items.iter().enumerate() {
            let entries = match item {
                FormValue::Object(entries) => entries,
                _ => {
                    return Err(ConfigurationError::ItemNotObject {
                        group: rule.name().to_string(),
                        index,
                    })
                }
            };
            let path = format!("{}[{}].{}", rule.name(), index, file_field);
            match lookup(entries, file_field) {
                None | Some(FormValue::Null) | Some(FormValue::Str(_)) => {}
                Some(FormValue::File(file)) => parts.push(Part::file(path, file.clone())),
                Some(_) => return Err(ConfigurationError::UnexpectedFieldShape { path }),
            }
        }
    }

    for field in rules.files() {
        match lookup(fields, field) {
            None | Some(FormValue::Null) | Some(FormValue::Str(_)) => {}
            Some(FormValue::File(file)) => parts.push(Part::file(field.clone(), file.clone())),
            Some(_) => {
                return Err(ConfigurationError::UnexpectedFieldShape {
                    path: field.clone(),
                })
            }
        }
    }

    Ok(parts)
}

/// Projection pass, in form-field order: ruled file positions become null,
/// ruled group items get `placement_order`, context is merged last.
fn project_document(
    fields: &[(String, FormValue)],
    rules: &ExtractionRules,
    context: &Map<String, Value>,
) -> Result<Map<String, Value>, ConfigurationError> {
    let mut document = Map::new();
    for (key, value) in fields {
        let projected = if let Some(rule) = rules.group_rule(key) {
            project_group(rule, value)?
        } else if rules.has_file_rule(key) {
            project_file_field(key, value)?
        } else {
            project_value(value, key)?
        };
        document.insert(key.clone(), projected);
    }
    for (key, value) in context {
        document.insert(key.clone(), value.clone());
    }
    Ok(document)
}

fn project_group(rule: &GroupRule, group: &FormValue) -> Result<Value, ConfigurationError> {
    let items = match group {
        FormValue::Null => return Ok(Value::Null),
        FormValue::Array(items) => items,
        _ => {
            return Err(ConfigurationError::GroupNotArray {
                group: rule.name().to_string(),
            })
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let entries = match item {
            FormValue::Object(entries) => entries,
            _ => {
                return Err(ConfigurationError::ItemNotObject {
                    group: rule.name().to_string(),
                    index,
                })
            }
        };
        let mut object = Map::new();
        for (key, value) in entries {
            let path = format!("{}[{}].{}", rule.name(), index, key);
            let projected = if rule.file_field() == Some(key.as_str()) {
                project_file_field(&path, value)?
            } else {
                project_value(value, &path)?
            };
            object.insert(key.clone(), projected);
        }
        // Overwrites any hydrated placement_order in place: the index at
        // encode time is the only order that counts.
        object.insert(PLACEMENT_ORDER_FIELD.to_string(), Value::from(index as u64));
        out.push(Value::Object(object));
    }
    Ok(Value::Array(out))
}

fn project_file_field(path: &str, value: &FormValue) -> Result<Value, ConfigurationError> {
    match value {
        // Pending files were captured in the collection pass.
        FormValue::Null | FormValue::File(_) => Ok(Value::Null),
        FormValue::Str(url) => Ok(Value::String(url.clone())),
        _ => Err(ConfigurationError::UnexpectedFieldShape {
            path: path.to_string(),
        }),
    }
}

fn project_value(value: &FormValue, path: &str) -> Result<Value, ConfigurationError> {
    match value {
        FormValue::Null => Ok(Value::Null),
        FormValue::Bool(b) => Ok(Value::Bool(*b)),
        FormValue::Integer(i) => Ok(Value::from(*i)),
        FormValue::UInteger(u) => Ok(Value::from(*u)),
        FormValue::Float(f) => Ok(Value::from(*f)),
        FormValue::Str(s) => Ok(Value::String(s.clone())),
        FormValue::File(_) => Err(ConfigurationError::StrayFile {
            path: path.to_string(),
        }),
        FormValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(project_value(item, &format!("{path}[{index}]"))?);
            }
            Ok(Value::Array(out))
        }
        FormValue::Object(entries) => {
            let mut object = Map::new();
            for (key, value) in entries {
                object.insert(key.clone(), project_value(value, &format!("{path}.{key}"))?);
            }
            Ok(Value::Object(object))
        }
    }
}

fn lookup<'a>(entries: &'a [(String, FormValue)], key: &str) -> Option<&'a FormValue> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpack_multipart::FileHandle;
    use serde_json::json;

    fn png() -> FileHandle {
        FileHandle::new("a.png", "image/png", vec![0x89])
    }

    #[test]
    fn test_root_must_be_object() {
        let rules = ExtractionRules::new();
        let err = encode_submission(&FormValue::Null, &rules, &Map::new()).unwrap_err();
        assert_eq!(err, ConfigurationError::RootNotObject);
    }

    #[test]
    fn test_group_must_be_array_or_null() {
        let rules = ExtractionRules::new().group_with_file("links", "image");
        let form = FormValue::from(json!({"links": "oops"}));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::GroupNotArray {
                group: "links".to_string()
            }
        );
    }

    #[test]
    fn test_placement_only_group_must_still_be_an_array() {
        let rules = ExtractionRules::new().group("faqs");
        let form = FormValue::from(json!({"faqs": 7}));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::GroupNotArray {
                group: "faqs".to_string()
            }
        );
    }

    #[test]
    fn test_group_item_must_be_object() {
        let rules = ExtractionRules::new().group_with_file("links", "image");
        let form = FormValue::from(json!({"links": [{"image": null}, 3]}));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ItemNotObject {
                group: "links".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_ruled_field_with_unexpected_shape_aborts() {
        let rules = ExtractionRules::new().file("logo");
        let form = FormValue::from(json!({"logo": 0}));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnexpectedFieldShape {
                path: "logo".to_string()
            }
        );
    }

    #[test]
    fn test_ruled_group_field_with_unexpected_shape_aborts() {
        let rules = ExtractionRules::new().group_with_file("links", "image");
        let form = FormValue::from(json!({"links": [{"image": false}]}));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnexpectedFieldShape {
                path: "links[0].image".to_string()
            }
        );
    }

    #[test]
    fn test_stray_file_outside_rules_is_rejected() {
        let rules = ExtractionRules::new();
        let mut form = FormValue::from(json!({"avatar": null}));
        form.insert("avatar", FormValue::File(png()));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::StrayFile {
                path: "avatar".to_string()
            }
        );
    }

    #[test]
    fn test_stray_file_nested_in_group_item_is_rejected_with_path() {
        let rules = ExtractionRules::new().group_with_file("links", "image");
        let mut form = FormValue::from(json!({"links": [{"image": null, "icon": null}]}));
        form.get_mut("links")
            .unwrap()
            .at_mut(0)
            .unwrap()
            .insert("icon", FormValue::File(png()));
        let err = encode_submission(&form, &rules, &Map::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::StrayFile {
                path: "links[0].icon".to_string()
            }
        );
    }

    #[test]
    fn test_missing_ruled_group_and_field_are_skipped() {
        let rules = ExtractionRules::new()
            .group_with_file("links", "image")
            .file("logo");
        let form = FormValue::from(json!({"name": "x"}));
        let payload = encode_submission(&form, &rules, &Map::new()).unwrap();
        assert!(payload.file_part_names().is_empty());
        assert_eq!(payload.text(JSON_BODY_PART), Some(r#"{"name":"x"}"#));
    }

    #[test]
    fn test_null_group_passes_through_as_null() {
        let rules = ExtractionRules::new().group_with_file("links", "image");
        let form = FormValue::from(json!({"links": null}));
        let payload = encode_submission(&form, &rules, &Map::new()).unwrap();
        assert_eq!(payload.text(JSON_BODY_PART), Some(r#"{"links":null}"#));
    }
}
