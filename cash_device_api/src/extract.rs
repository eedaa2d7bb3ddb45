//! Extractors for device payloads.
//!
//! None of these functions fail. A payload that doesn't have the expected shape produces an empty or zero result,
//! which is what the gateway reports when the device gives it nothing useful.
mod cashin;
mod inventory;
mod snapshot;

pub use cashin::extract_cashin_amount;
pub use inventory::map_inventory;
pub use snapshot::extract_inserted_amount;
