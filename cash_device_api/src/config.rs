use std::time::Duration;

use log::*;
use psg_common::parse_boolean_flag;

pub const DEFAULT_UPSTREAM_BASE: &str = "http://192.168.1.33:5000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: f64 = 300.0;

#[derive(Debug, Clone)]
pub struct CashDeviceConfig {
    /// Base URL of the device-control service, e.g. `http://192.168.1.33:5000`
    pub base_url: String,
    /// Applied to every call to the device. There is no way to disable it.
    pub timeout: Duration,
    /// When true, upstream response bodies (truncated) are included in the logs.
    pub log_bodies: bool,
}

impl Default for CashDeviceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_HTTP_TIMEOUT_SECS),
            log_bodies: true,
        }
    }
}

impl CashDeviceConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self { base_url: base_url.to_string(), timeout, ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("PSG_UPSTREAM_BASE").unwrap_or_else(|_| {
            warn!("🪛️ PSG_UPSTREAM_BASE not set, using {DEFAULT_UPSTREAM_BASE} as default");
            DEFAULT_UPSTREAM_BASE.to_string()
        });
        let timeout = resolve_timeout(std::env::var("PSG_HTTP_TIMEOUT_SECONDS").ok());
        let log_bodies = parse_boolean_flag(std::env::var("PSG_LOG_UPSTREAM_BODIES").ok(), true);
        info!("🪛️ Cash device at {base_url}. Timeout: {:.1}s", timeout.as_secs_f64());
        Self { base_url, timeout, log_bodies }
    }
}

/// Resolve the device call timeout from its configured value. Missing, unparsable, non-positive and non-finite
/// values all fall back to [`DEFAULT_HTTP_TIMEOUT_SECS`], as do values too large to hold in a `Duration`.
pub fn resolve_timeout(value: Option<String>) -> Duration {
    let secs = value
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|e| warn!("🪛️ Invalid configuration value for PSG_HTTP_TIMEOUT_SECONDS ({s}). {e}"))
                .ok()
                .filter(|v| {
                    let valid = v.is_finite() && *v > 0.0;
                    if !valid {
                        warn!("🪛️ PSG_HTTP_TIMEOUT_SECONDS must be a positive number of seconds. Got {v}.");
                    }
                    valid
                })
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
        })
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::try_from_secs_f64(secs).unwrap_or_else(|e| {
        warn!("🪛️ PSG_HTTP_TIMEOUT_SECONDS of {secs} seconds cannot be used. {e}");
        Duration::from_secs_f64(DEFAULT_HTTP_TIMEOUT_SECS)
    })
}
