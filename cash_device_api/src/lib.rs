//! # Cash device API
//!
//! Client for the device-control service that drives the cash-handling terminal, plus the extractors that reshape its
//! deeply nested payloads into the small generic shapes used by the sale gateway.
//!
//! The raw device payloads are kept as [`serde_json::Value`] on purpose: most fields are optional, and single records
//! and lists of records are used interchangeably. The extractors in this crate walk those trees and degrade to empty
//! or zero results instead of failing.
mod api;
mod config;
mod data_objects;
mod error;
mod extract;
mod helpers;
mod traits;

pub use api::CashDeviceApi;
pub use config::{resolve_timeout, CashDeviceConfig, DEFAULT_HTTP_TIMEOUT_SECS};
pub use data_objects::{CashKind, DenominationEntry};
pub use error::CashDeviceApiError;
pub use extract::{extract_cashin_amount, extract_inserted_amount, map_inventory};
pub use traits::CashDevice;
