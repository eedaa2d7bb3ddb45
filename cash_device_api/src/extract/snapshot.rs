use psg_common::MajorUnits;
use serde_json::Value;

/// The amount inserted so far, in major units, from a device `/socket/latest` snapshot.
///
/// The value is read from `inserted_amount_baht`, or from `parsed.inserted_amount_baht` when the top-level field is
/// missing. No usable value gives zero.
pub fn extract_inserted_amount(latest: &Value) -> MajorUnits {
    let value = latest
        .get("inserted_amount_baht")
        .filter(|v| !v.is_null())
        .or_else(|| latest.get("parsed")?.get("inserted_amount_baht"));
    value.and_then(as_float).map(MajorUnits::new).unwrap_or(MajorUnits::ZERO)
}

fn as_float(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}
