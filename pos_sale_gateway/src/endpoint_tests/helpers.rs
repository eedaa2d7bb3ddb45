use std::{fmt::Debug, time::Duration};

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
    web,
    web::ServiceConfig,
};
use cash_device_api::CashDevice;
use log::*;
use serde_json::Value;

use crate::{config::ServerOptions, order_state::OrderTracker, routes::health, server::configure_api};

/// Wires up the API against a test device, the way the real server does.
pub fn configure<D: CashDevice + 'static>(device: D, tracker: OrderTracker) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(device))
            .app_data(web::Data::new(tracker))
            .app_data(web::Data::new(ServerOptions { port: 5215 }))
            .service(health);
        configure_api::<D>(cfg);
    }
}

/// Make a request and return the status and JSON body of the response.
pub async fn call<S, R, B, E>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: Debug,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    debug!("Response ({status}): {}", String::from_utf8_lossy(&body));
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, body)
}

/// Give detached tasks (the cash-in submission) a chance to run.
pub async fn let_background_tasks_run() {
    actix_web::rt::time::sleep(Duration::from_millis(50)).await;
}
