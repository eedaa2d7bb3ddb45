use psg_common::MinorUnits;
use serde_json::Value;

use crate::{
    helpers::{device_amount, first, records, type_code, Record},
    DenominationEntry,
};

/// Cash-slot holding pieces that can be dispensed as change
const DISPENSABLE_SLOT: &str = "3";
/// Cash-slot reporting everything in the stacker
const STACKER_SLOT: &str = "4";

/// Map a device `/inventory` payload to the generic list of denominations, highest value first.
///
/// The cash slots are read from `Body[0].InventoryResponse[0].Cash`. Counts for the same face value are summed across
/// slots: dispensable slots (type `"3"`) go into `qty` and stacker slots (type `"4"`) into `inStacker`. Slots of any
/// other type still list their denominations, with zero counts.
pub fn map_inventory(raw: &Value) -> Vec<DenominationEntry> {
    let Some(slots) = cash_slots(raw) else {
        return Vec::new();
    };
    let mut entries: Vec<(MinorUnits, DenominationEntry)> = Vec::new();
    for slot in slots.iter().filter_map(Value::as_object) {
        let slot_type = type_code(slot);
        for denomination in records(slot.get("Denomination")) {
            let Some(fv) = denomination.get("fv").and_then(device_amount) else {
                continue;
            };
            let count = piece_count(denomination);
            let idx = match entries.iter().position(|(key, _)| *key == fv) {
                Some(idx) => idx,
                None => {
                    entries.push((fv, DenominationEntry::new(fv)));
                    entries.len() - 1
                },
            };
            let entry = &mut entries[idx].1;
            match slot_type.as_deref() {
                Some(DISPENSABLE_SLOT) => entry.qty = entry.qty.saturating_add(count),
                Some(STACKER_SLOT) => entry.in_stacker = entry.in_stacker.saturating_add(count),
                _ => {},
            }
        }
    }
    let mut entries = entries.into_iter().map(|(_, entry)| entry).collect::<Vec<_>>();
    entries.sort_by(|a, b| b.value.value().total_cmp(&a.value.value()));
    entries
}

fn cash_slots(raw: &Value) -> Option<&Vec<Value>> {
    let body = first(raw.get("Body")?)?;
    let inventory = first(body.get("InventoryResponse")?)?;
    inventory.get("Cash")?.as_array()
}

// Only the first piece record is counted. Unreadable counts are 0 and fractions are dropped.
#[allow(clippy::cast_possible_truncation)]
fn piece_count(denomination: &Record) -> i64 {
    let piece = match denomination.get("Piece") {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };
    let value = match piece {
        Some(Value::Object(p)) => p.get("value"),
        other => other,
    };
    value.and_then(device_amount).map(|n| n.value().trunc() as i64).unwrap_or(0)
}
