//! # POS sale gateway
//! A thin translation layer in front of a cash-handling terminal. It is responsible for:
//! Accepting simplified sale requests from POS clients.
//! Forwarding them to the terminal's device-control service.
//! Reshaping the device's verbose payloads into small, fixed response shapes.
//! Tracking the state of the current order in memory.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/`: A health check route.
//! * `/api/v1/balances`: The notes and coins held by the terminal.
//! * `/api/v1/order`: Start a sale.
//! * `/api/v1/status`: The status of the current sale.
//! * `/api/v1/cancel` and `/api/v1/cancel/{sale_id}`: Cancel the current sale.

pub mod cashin_worker;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod order_state;
pub mod routes;
pub mod server;
pub mod templates;
