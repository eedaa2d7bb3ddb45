//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a few lines MUST go into a separate module.
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every call to the cash device is asynchronous for this reason, and
//! the long-running cash-in call is not awaited by its handler at all (see [`crate::cashin_worker`]).
//!
//! Failures to reach the device are never reported to the caller. They are logged, and the response falls back to
//! the template defaults or to zero amounts. Only internal faults produce an error response.
use actix_web::{get, web, HttpResponse, Responder};
use cash_device_api::{extract_inserted_amount, map_inventory, CashDevice};
use chrono::Utc;
use log::*;
use psg_common::MajorUnits;

use crate::{
    cashin_worker::submit_cashin,
    config::ServerOptions,
    data_objects::{HealthResponse, NewOrderRequest},
    errors::ServerError,
    order_state::{OrderStatus, OrderTracker},
    templates::Template,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/")]
pub async fn health(options: web::Data<ServerOptions>) -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(HealthResponse::new(options.port, Utc::now()))
}

//----------------------------------------------   Balances  ----------------------------------------------------
route!(balances => Get "/balances" impl CashDevice);
/// Route handler for the balances endpoint
///
/// Reports the notes and coins held by the terminal. If the device can't be reached, or its inventory is empty or
/// unreadable, the template's default denominations (all with zero counts) are returned instead.
pub async fn balances<D: CashDevice>(device: web::Data<D>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received balances request");
    let mut response = Template::Inventory.load().map_err(|e| e.during("Failed to load inventory data"))?;
    let entries = match device.fetch_inventory().await {
        Ok(raw) => map_inventory(&raw),
        Err(e) => {
            warn!("💻️ Could not fetch the device inventory. {e}");
            Vec::new()
        },
    };
    if entries.is_empty() {
        debug!("💻️ No inventory data from the device. Returning the default balances.");
    } else {
        debug!("💻️ Device reported {} denominations", entries.len());
        response.set_data(entries).map_err(|e| e.during("Failed to load inventory data"))?;
    }
    Ok(HttpResponse::Ok().json(response.into_value()))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl CashDevice);
/// Route handler for creating a sale
///
/// Starts a new order for the requested amount, replacing any order already in progress, and asks the device to
/// collect the cash. The response does not wait for the customer to pay: the order is always reported as
/// `processing`. Poll the status endpoint for the outcome.
pub async fn create_order<D: CashDevice + 'static>(
    body: web::Bytes,
    device: web::Data<D>,
    tracker: web::Data<OrderTracker>,
) -> Result<HttpResponse, ServerError> {
    let request = NewOrderRequest::from_body(&body);
    trace!("💻️ Received new order request for {}", request.amount);
    let mut response = Template::CreateSale.load().map_err(|e| e.during("Failed to create sale"))?;
    response.set_data_field("amount", request.amount.whole()).map_err(|e| e.during("Failed to create sale"))?;
    response.set_data_field("status", OrderStatus::Processing).map_err(|e| e.during("Failed to create sale"))?;
    tracker.start_order(request.amount).await;
    submit_cashin(device, tracker.get_ref().clone(), request.amount);
    Ok(HttpResponse::Ok().json(response.into_value()))
}

route!(order_status => Get "/status" impl CashDevice);
/// Route handler for the sale status
///
/// `cashin` is what the customer has paid so far: the amount the device accepted once the cash-in has completed, or
/// the live amount from the device's latest snapshot while it is still in progress. Cancelled and succeeded outcomes
/// are each reported once; see [`crate::order_state`].
pub async fn order_status<D: CashDevice>(
    device: web::Data<D>,
    tracker: web::Data<OrderTracker>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received order status request");
    let inserted = match device.fetch_latest_snapshot().await {
        Ok(latest) => extract_inserted_amount(&latest),
        Err(e) => {
            warn!("💻️ Could not fetch the latest device snapshot. {e}");
            MajorUnits::ZERO
        },
    };
    let mut response = Template::SaleStatus.load().map_err(|e| e.during("Failed to load status"))?;
    let report = tracker.report_status(inserted).await;
    response.set_data_field("amount", report.amount).map_err(|e| e.during("Failed to load status"))?;
    response.set_data_field("cashin", report.cashin).map_err(|e| e.during("Failed to load status"))?;
    response.set_data_field("status", report.status).map_err(|e| e.during("Failed to load status"))?;
    Ok(HttpResponse::Ok().json(response.into_value()))
}

route!(cancel_order => Patch "/cancel" impl CashDevice);
/// Route handler for cancelling the current sale
///
/// The device is asked to abort the cash-in, but the order is marked as cancelled whatever it says.
pub async fn cancel_order<D: CashDevice>(
    device: web::Data<D>,
    tracker: web::Data<OrderTracker>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received cancel request");
    cancel_current_order(device.get_ref(), tracker.get_ref()).await
}

route!(cancel_sale => Patch "/cancel/{sale_id}" impl CashDevice);
/// Same as [`cancel_order`]. Only one order is tracked, so the sale id is logged and otherwise ignored.
pub async fn cancel_sale<D: CashDevice>(
    path: web::Path<String>,
    device: web::Data<D>,
    tracker: web::Data<OrderTracker>,
) -> Result<HttpResponse, ServerError> {
    let sale_id = path.into_inner();
    trace!("💻️ Received cancel request for sale {sale_id}");
    cancel_current_order(device.get_ref(), tracker.get_ref()).await
}

async fn cancel_current_order<D: CashDevice>(device: &D, tracker: &OrderTracker) -> Result<HttpResponse, ServerError> {
    let response = Template::CancelSale.load().map_err(|e| e.during("Failed to cancel sale"))?;
    if let Err(e) = device.request_cancel().await {
        warn!("💻️ Device did not take the cancel request. {e}");
    }
    tracker.cancel().await;
    Ok(HttpResponse::Ok().json(response.into_value()))
}
