use std::env;

use cash_device_api::CashDeviceConfig;
use log::*;

const DEFAULT_PSG_HOST: &str = "0.0.0.0";
const DEFAULT_PSG_PORT: u16 = 5215;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How to reach the device-control service that drives the cash terminal
    pub device: CashDeviceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_PSG_HOST.to_string(), port: DEFAULT_PSG_PORT, device: CashDeviceConfig::default() }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("PSG_HOST").ok().unwrap_or_else(|| DEFAULT_PSG_HOST.into());
        let port = parse_port(env::var("PSG_PORT").ok());
        let device = CashDeviceConfig::new_from_env_or_default();
        Self { host, port, device }
    }
}

fn parse_port(value: Option<String>) -> u16 {
    value
        .map(|s| {
            s.trim().parse::<u16>().unwrap_or_else(|e| {
                error!("🪛️ {s} is not a valid port for PSG_PORT. {e} Using the default, {DEFAULT_PSG_PORT}, instead.");
                DEFAULT_PSG_PORT
            })
        })
        .unwrap_or(DEFAULT_PSG_PORT)
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// The part of the configuration that request handlers need to see.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub port: u16,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { port: config.port }
    }
}
