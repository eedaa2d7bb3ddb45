use std::time::Duration;

use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{Logger, NormalizePath},
    web,
    App,
    HttpServer,
};
use cash_device_api::{CashDevice, CashDeviceApi};
use log::*;

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    order_state::OrderTracker,
    routes::{health, BalancesRoute, CancelOrderRoute, CancelSaleRoute, CreateOrderRoute, OrderStatusRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let device = CashDeviceApi::new(config.device.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, device)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, device: CashDeviceApi) -> Result<Server, ServerError> {
    // One order is tracked for the whole process, so all workers share the same tracker and device client
    let tracker = web::Data::new(OrderTracker::new());
    let device = web::Data::new(device);
    let options = web::Data::new(ServerOptions::from_config(&config));
    info!("💻️ Forwarding sales to the cash device at {}", config.device.base_url);
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target("psg::access_log"))
            .wrap(NormalizePath::trim())
            .app_data(device.clone())
            .app_data(tracker.clone())
            .app_data(options.clone())
            .service(health)
            .configure(configure_api::<CashDeviceApi>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the `/api/v1` routes, backed by the device type `D`.
///
/// The app must also provide `web::Data<D>` and `web::Data<OrderTracker>`.
pub fn configure_api<D: CashDevice + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(BalancesRoute::<D>::new())
            .service(CreateOrderRoute::<D>::new())
            .service(OrderStatusRoute::<D>::new())
            .service(CancelOrderRoute::<D>::new())
            .service(CancelSaleRoute::<D>::new()),
    );
}
