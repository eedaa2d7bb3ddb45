//! In-memory order tracking.
//!
//! The gateway fronts a single cash terminal and tracks one order at a time. There are no order ids: creating an order
//! simply replaces whatever was tracked before (last write wins). Supporting several terminals would mean keying
//! [`OrderState`] by terminal or session id.
//!
//! The cancelled and acknowledged flags are one-shot. Each is reported by exactly one status read and then cleared.
use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, Utc};
use log::*;
use psg_common::MajorUnits;
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Succeeded,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => f.write_str("processing"),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    /// The amount requested for the current sale
    pub amount: MajorUnits,
    pub cancelled: bool,
    /// Set once the device has accepted the cash-in request
    pub cashin_acknowledged: bool,
    /// What the device said the customer inserted, if it said anything
    pub last_cashin: MajorUnits,
    pub created_at: Option<DateTime<Utc>>,
}

/// What a status read reports. Amounts are whole major units, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub status: OrderStatus,
    pub amount: i64,
    pub cashin: i64,
}

impl OrderState {
    /// Start tracking a new sale. Anything left over from the previous sale is discarded.
    pub fn start(&mut self, amount: MajorUnits, now: DateTime<Utc>) {
        self.cancelled = false;
        self.cashin_acknowledged = false;
        self.last_cashin = MajorUnits::ZERO;
        self.amount = amount;
        self.created_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Record a successful cash-in. A zero `accepted` amount leaves the previous value in place.
    pub fn acknowledge_cashin(&mut self, accepted: MajorUnits) {
        if accepted.is_positive() {
            self.last_cashin = accepted;
        }
        self.cashin_acknowledged = true;
    }

    /// Produce the status report and consume whichever one-shot flag it reports.
    ///
    /// `inserted` is the live amount from the device's latest snapshot.
    pub fn take_status(&mut self, inserted: MajorUnits) -> StatusReport {
        let amount = self.amount.whole();
        if self.cancelled {
            self.cancelled = false;
            self.cashin_acknowledged = false;
            self.last_cashin = MajorUnits::ZERO;
            StatusReport { status: OrderStatus::Cancelled, amount, cashin: 0 }
        } else if self.cashin_acknowledged {
            self.cashin_acknowledged = false;
            let cashin = if self.last_cashin.is_zero() { inserted } else { self.last_cashin };
            StatusReport { status: OrderStatus::Succeeded, amount, cashin: cashin.whole() }
        } else {
            StatusReport { status: OrderStatus::Processing, amount, cashin: inserted.whole() }
        }
    }
}

/// A shared handle to the order state. Clones refer to the same order.
///
/// Every transition runs entirely under the lock, so concurrent requests never see a half-reset order.
#[derive(Debug, Clone, Default)]
pub struct OrderTracker {
    state: Arc<Mutex<OrderState>>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start_order(&self, amount: MajorUnits) {
        let mut state = self.state.lock().await;
        if state.created_at.is_some() && !state.cancelled && !state.cashin_acknowledged {
            debug!("🧾️ Replacing an unfinished order for {}", state.amount);
        }
        state.start(amount, Utc::now());
        info!("🧾️ New order for {amount}");
    }

    pub async fn report_status(&self, inserted: MajorUnits) -> StatusReport {
        let report = self.state.lock().await.take_status(inserted);
        debug!("🧾️ Order status: {} amount={} cashin={}", report.status, report.amount, report.cashin);
        report
    }

    pub async fn cancel(&self) {
        self.state.lock().await.cancel();
        info!("🧾️ Order marked as cancelled");
    }

    pub async fn acknowledge_cashin(&self, accepted: MajorUnits) {
        self.state.lock().await.acknowledge_cashin(accepted);
        info!("🧾️ Cash-in acknowledged. Accepted: {accepted}");
    }

    /// A copy of the current state
    pub async fn current(&self) -> OrderState {
        self.state.lock().await.clone()
    }
}
