//! JSON Schema for the extracted record, with a strict-mode variant.
//!
//! Structured-output APIs running in strict mode reject any object schema
//! that allows extra properties or leaves a property optional. The strict
//! variant closes every object and lists all of its properties as required;
//! optional values stay expressible through `null` in the property type.

use schemars::schema_for;
use serde_json::{Map, Value};

use crate::models::record::ExtractedInvoiceRecord;

const SUBSCHEMA_LISTS: [&str; 3] = ["anyOf", "allOf", "oneOf"];
const DEFINITION_KEYS: [&str; 2] = ["$defs", "definitions"];

/// JSON Schema of [`ExtractedInvoiceRecord`].
pub fn record_schema() -> Value {
    serde_json::to_value(schema_for!(ExtractedInvoiceRecord))
        .unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Rewrite a schema so that every object forbids additional properties and
/// requires all of its declared properties.
///
/// Nested schemas are visited through definitions, properties, array items
/// and `anyOf`/`allOf`/`oneOf`. Non-object values are returned unchanged.
pub fn strict_schema(mut schema: Value) -> Value {
    make_strict(&mut schema);
    schema
}

fn make_strict(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    for key in DEFINITION_KEYS {
        if let Some(Value::Object(defs)) = map.get_mut(key) {
            defs.values_mut().for_each(make_strict);
        }
    }

    if has_type(map, "object") {
        map.insert("additionalProperties".to_string(), Value::Bool(false));

        let required = match map.get_mut("properties") {
            Some(Value::Object(props)) => {
                props.values_mut().for_each(make_strict);
                Some(props.keys().cloned().map(Value::String).collect())
            }
            _ => None,
        };
        if let Some(required) = required {
            map.insert("required".to_string(), Value::Array(required));
        }
    }

    if has_type(map, "array") {
        if let Some(items) = map.get_mut("items") {
            make_strict(items);
        }
    }

    for key in SUBSCHEMA_LISTS {
        if let Some(Value::Array(subschemas)) = map.get_mut(key) {
            subschemas.iter_mut().for_each(make_strict);
        }
    }
}

/// `"type": "object"` as well as `"type": ["object", "null"]`.
fn has_type(map: &Map<String, Value>, name: &str) -> bool {
    match map.get("type") {
        Some(Value::String(t)) => t == name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
        _ => false,
    }
}
