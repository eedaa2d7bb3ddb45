use psg_common::{MajorUnits, MinorUnits};
use serde_json::Value;

use crate::helpers::{device_amount, first, records, scalar_text, Record};

/// Cash entries of this type are the pieces the customer inserted.
const ACCEPTED_CASH: &str = "1";

/// The amount the customer actually inserted, according to a device `/cashin` response.
///
/// The answer is read from `response.change_response.Body[0].ChangeResponse[0]`. The preferred source is the accepted
/// `Cash` entries: the sum over each denomination of its face value times its piece count. When that comes to nothing,
/// the reported `Amount[0].value` is used instead. Anything unreadable gives zero.
pub fn extract_cashin_amount(raw: &Value) -> MajorUnits {
    let Some(change) = change_response(raw) else {
        return MajorUnits::ZERO;
    };
    let accepted = accepted_cash_total(change);
    if accepted.is_positive() {
        return accepted.to_major();
    }
    reported_amount(change).map(MinorUnits::to_major).unwrap_or(MajorUnits::ZERO)
}

fn change_response(raw: &Value) -> Option<&Record> {
    let change_root = raw.get("response")?.get("change_response")?;
    let body = first(change_root.get("Body")?)?;
    first(body.get("ChangeResponse")?)?.as_object()
}

fn accepted_cash_total(change: &Record) -> MinorUnits {
    let Some(cash) = change.get("Cash").and_then(Value::as_array) else {
        return MinorUnits::default();
    };
    cash.iter()
        .filter_map(Value::as_object)
        .filter(|entry| is_accepted(entry))
        .flat_map(|entry| records(entry.get("Denomination")))
        .filter_map(|denomination| {
            let fv = denomination.get("fv").and_then(device_amount)?;
            Some(fv * piece_total(denomination))
        })
        .sum()
}

// Untyped entries count as accepted cash
fn is_accepted(entry: &Record) -> bool {
    match entry.get("type") {
        None | Some(Value::Null) => true,
        Some(code) => scalar_text(code).as_deref() == Some(ACCEPTED_CASH),
    }
}

// Piece counts must be whole numbers. Anything else is skipped.
fn piece_total(denomination: &Record) -> i64 {
    records(denomination.get("Piece"))
        .into_iter()
        .filter_map(|piece| piece.get("value").and_then(scalar_text))
        .filter_map(|count| count.trim().parse::<i64>().ok())
        .fold(0, i64::saturating_add)
}

fn reported_amount(change: &Record) -> Option<MinorUnits> {
    first(change.get("Amount")?)?.get("value").and_then(device_amount)
}
