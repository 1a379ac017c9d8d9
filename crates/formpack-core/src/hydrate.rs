//! Hydration of server documents into form state.
//!
//! The inverse of submission encoding: a fetched record becomes the initial
//! form snapshot for an edit session. Repeating groups are stored with an
//! explicit `placement_order`, but the API does not guarantee response
//! order, so every ruled group is stable-sorted by it on the way in. A
//! missing or non-integer `placement_order` sorts as 0.

use serde_json::Value;

use formpack_multipart::FormValue;

use crate::encoder::PLACEMENT_ORDER_FIELD;
use crate::rules::ExtractionRules;

/// Converts a server JSON document into a form snapshot, ordering every
/// ruled repeating group by its persisted `placement_order`.
///
/// Hydration never fails: values of unexpected shape pass through unchanged
/// and are caught later, at encode time, if they sit at a ruled position.
///
/// # Example
///
/// ```
/// use formpack_core::{hydrate, ExtractionRules};
/// use serde_json::json;
///
/// let doc = json!({"faqs": [
///     {"question": "B?", "placement_order": 1},
///     {"question": "A?", "placement_order": 0}
/// ]});
/// let rules = ExtractionRules::new().group("faqs");
/// let form = hydrate(&doc, &rules);
/// let first = form.get("faqs").unwrap().at(0).unwrap();
/// assert_eq!(first.get("question").unwrap().as_str(), Some("A?"));
/// ```
pub fn hydrate(doc: &Value, rules: &ExtractionRules) -> FormValue {
    match doc {
        Value::Object(fields) => FormValue::Object(
            fields
                .iter()
                .map(|(key, value)| {
                    let hydrated = if rules.group_rule(key).is_some() {
                        hydrate_group(value)
                    } else {
                        FormValue::from(value)
                    };
                    (key.clone(), hydrated)
                })
                .collect(),
        ),
        other => FormValue::from(other),
    }
}

fn hydrate_group(value: &Value) -> FormValue {
    match value {
        Value::Array(items) => {
            let mut ordered: Vec<&Value> = items.iter().collect();
            ordered.sort_by_key(|item| placement_of(item));
            FormValue::Array(ordered.into_iter().map(FormValue::from).collect())
        }
        other => FormValue::from(other),
    }
}

fn placement_of(item: &Value) -> i64 {
    item.get(PLACEMENT_ORDER_FIELD)
        .and_then(Value::as_i64)
        .unwrap_or(0)
}
