use psg_common::MajorUnits;
use serde_json::Value;

use crate::CashDeviceApiError;

/// The `CashDevice` trait defines the calls the sale gateway makes against the device-control service.
///
/// Payloads are returned raw. Callers reshape them with the extractors in this crate ([`crate::map_inventory`] and
/// friends), so that a mock device can hand back recorded device payloads verbatim.
#[allow(async_fn_in_trait)]
pub trait CashDevice {
    /// Fetch the current note and coin inventory (`GET /inventory`).
    async fn fetch_inventory(&self) -> Result<Value, CashDeviceApiError>;

    /// Ask the device to collect `amount` from the customer (`POST /cashin`).
    ///
    /// This call only returns once the customer has finished inserting cash, or the device gives up, so it can run for
    /// as long as the configured timeout. A successful response whose body is not JSON gives `Ok(None)`.
    async fn submit_cashin(&self, amount: MajorUnits) -> Result<Option<Value>, CashDeviceApiError>;

    /// Fetch the device's most recent sensor snapshot (`GET /socket/latest`).
    async fn fetch_latest_snapshot(&self) -> Result<Value, CashDeviceApiError>;

    /// Abort a cash-in in progress (`GET /cashin_cancel`).
    async fn request_cancel(&self) -> Result<(), CashDeviceApiError>;
}
