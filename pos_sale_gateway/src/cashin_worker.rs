use actix_web::web;
use cash_device_api::{extract_cashin_amount, CashDevice};
use log::*;
use psg_common::MajorUnits;
use tokio::task::JoinHandle;

use crate::order_state::OrderTracker;

/// Submits the cash-in request for a new order in the background.
///
/// The device only answers once the customer has finished paying, so the request handler must not wait for it. Do not
/// await the returned JoinHandle in a handler; it is returned so that tests can.
///
/// On a successful reply the order is acknowledged, along with the amount the device says it accepted (if it says).
/// Failures are only logged: the order stays unacknowledged and nothing is retried.
pub fn submit_cashin<D>(device: web::Data<D>, tracker: OrderTracker, amount: MajorUnits) -> JoinHandle<()>
where D: CashDevice + 'static {
    actix_web::rt::spawn(async move {
        debug!("💵️ Submitting cash-in for {amount}");
        match device.submit_cashin(amount).await {
            Ok(reply) => {
                let accepted = reply.as_ref().map(extract_cashin_amount).unwrap_or(MajorUnits::ZERO);
                if accepted.is_positive() {
                    info!("💵️ Device accepted {accepted} for an order of {amount}");
                } else {
                    debug!("💵️ Device acknowledged the cash-in without reporting an accepted amount");
                }
                tracker.acknowledge_cashin(accepted).await;
            },
            Err(e) => {
                warn!("💵️ Cash-in for {amount} failed. {e}");
            },
        }
    })
}
