use chrono::{DateTime, SecondsFormat, Utc};
use psg_common::MajorUnits;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub port: u16,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(port: u16, now: DateTime<Utc>) -> Self {
        Self {
            message: "POS sale gateway is running (actix-web)".to_string(),
            port,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// The body of a create-order request: `{"amount": 50}`.
///
/// POS clients are not consistent about what they send, so the body is read leniently. The amount may be a number or
/// a numeric string. A missing body, a body that is not JSON, or an amount that can't be read all give an amount of 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewOrderRequest {
    pub amount: MajorUnits,
}

impl NewOrderRequest {
    pub fn from_body(body: &[u8]) -> Self {
        let amount = serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(|payload| payload.get("amount"))
            .and_then(read_amount)
            .unwrap_or(MajorUnits::ZERO);
        Self { amount }
    }
}

fn read_amount(value: &Value) -> Option<MajorUnits> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(MajorUnits::new(amount))
}
