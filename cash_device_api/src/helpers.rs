use psg_common::MinorUnits;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

/// The first element of `value`, if it is a non-empty array.
pub fn first(value: &Value) -> Option<&Value> {
    value.as_array()?.first()
}

/// The device sends either a single record or a list of records for the same field. Normalise both to a list,
/// dropping anything that isn't a record.
pub fn records(value: Option<&Value>) -> Vec<&Record> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(record)) => vec![record],
        _ => Vec::new(),
    }
}

/// The textual form of a scalar, as the device would have written it. Numbers and strings only.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a device amount, sent as either a number or a numeric string.
pub fn device_amount(value: &Value) -> Option<MinorUnits> {
    match value {
        Value::Number(n) => n.as_f64().map(MinorUnits::from),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// A record's `type` code as text. Numeric codes are rendered as written, so `3` reads as `"3"`.
pub fn type_code(record: &Record) -> Option<String> {
    record.get("type").and_then(scalar_text)
}
