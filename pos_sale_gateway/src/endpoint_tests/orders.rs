use actix_web::{http::StatusCode, middleware::NormalizePath, test, test::TestRequest, App};
use psg_common::MajorUnits;
use serde_json::{json, Value};

use super::{
    helpers::{call, configure, let_background_tasks_run},
    mocks::{device_busy, unreachable, GatedDevice, MockDevice},
};
use crate::order_state::OrderTracker;

fn snapshot(inserted: f64) -> Value {
    json!({"event": "cashin_progress", "inserted_amount_baht": inserted})
}

fn cashin_reply() -> Value {
    serde_json::from_str(include_str!("test_assets/cashin_reply.json")).expect("invalid test asset")
}

#[actix_web::test]
async fn new_order_is_processing() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device
        .expect_submit_cashin()
        .withf(|amount| *amount == MajorUnits::new(50.0))
        .times(1)
        .returning(|_| Err(device_busy()));
    device.expect_fetch_latest_snapshot().times(1).returning(|| Ok(snapshot(0.0)));
    let tracker = OrderTracker::new();
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, tracker.clone()));
    let app = test::init_service(app).await;

    let req = TestRequest::post().uri("/api/v1/order").set_json(json!({"amount": 50})).to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Sale created successfully"));
    assert_eq!(body["data"]["amount"], json!(50));
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["currency"], json!("THB"));

    let (status, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["amount"], json!(50));
    assert_eq!(body["data"]["cashin"], json!(0));
    let_background_tasks_run().await;
    let order = tracker.current().await;
    assert!(!order.cashin_acknowledged);
    assert!(order.created_at.is_some());
}

#[actix_web::test]
async fn order_response_does_not_wait_for_the_cashin() {
    let _ = env_logger::try_init();
    let (device, gate) = GatedDevice::new(cashin_reply());
    let tracker = OrderTracker::new();
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, tracker.clone()));
    let app = test::init_service(app).await;

    let req = TestRequest::post().uri("/api/v1/order").set_json(json!({"amount": 150})).to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("processing"));
    let_background_tasks_run().await;
    assert!(!tracker.current().await.cashin_acknowledged);

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["cashin"], json!(0));

    GatedDevice::release(&gate);
    let_background_tasks_run().await;
    let order = tracker.current().await;
    assert!(order.cashin_acknowledged);
    assert_eq!(order.last_cashin, MajorUnits::new(150.0));
}

#[actix_web::test]
async fn status_shows_cash_inserted_so_far() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_submit_cashin().times(1).returning(|_| Err(unreachable()));
    device.expect_fetch_latest_snapshot().times(1).returning(|| Ok(json!({"parsed": {"inserted_amount_baht": 40.0}})));
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, OrderTracker::new()));
    let app = test::init_service(app).await;

    let req = TestRequest::post().uri("/api/v1/order").set_json(json!({"amount": "100"})).to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body["data"]["amount"], json!(100));
    let_background_tasks_run().await;

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["amount"], json!(100));
    assert_eq!(body["data"]["cashin"], json!(40));
}

#[actix_web::test]
async fn completed_cashin_is_reported_once() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_submit_cashin().times(1).returning(|_| Ok(Some(cashin_reply())));
    device.expect_fetch_latest_snapshot().times(2).returning(|| Ok(snapshot(0.0)));
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, OrderTracker::new()));
    let app = test::init_service(app).await;

    let req = TestRequest::post().uri("/api/v1/order").set_json(json!({"amount": 150})).to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let_background_tasks_run().await;

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("succeeded"));
    assert_eq!(body["data"]["amount"], json!(150));
    assert_eq!(body["data"]["cashin"], json!(150));

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["cashin"], json!(0));
}

#[actix_web::test]
async fn unreadable_order_body_means_zero() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_submit_cashin().withf(|amount| amount.is_zero()).times(1).returning(|_| Ok(None));
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, OrderTracker::new()));
    let app = test::init_service(app).await;

    let req = TestRequest::post().uri("/api/v1/order").insert_header(("content-type", "application/json"));
    let (status, body) = call(&app, req.set_payload("amount=50").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], json!(0));
    assert_eq!(body["data"]["status"], json!("processing"));
    let_background_tasks_run().await;
}

#[actix_web::test]
async fn cancellation_is_reported_once() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_request_cancel().times(1).returning(|| Err(unreachable()));
    device.expect_fetch_latest_snapshot().times(2).returning(|| Ok(snapshot(20.0)));
    let tracker = OrderTracker::new();
    tracker.start_order(MajorUnits::new(80.0)).await;
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, tracker.clone()));
    let app = test::init_service(app).await;

    let (status, body) = call(&app, TestRequest::patch().uri("/api/v1/cancel/SALE-0042").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Sale cancelled successfully"));
    assert_eq!(body["data"]["status"], json!("cancelled"));
    assert!(tracker.current().await.cancelled);

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("cancelled"));
    assert_eq!(body["data"]["amount"], json!(80));
    assert_eq!(body["data"]["cashin"], json!(0));

    let (_, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["cashin"], json!(20));
}

#[actix_web::test]
async fn cancel_without_sale_id_and_with_trailing_slash() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_request_cancel().times(2).returning(|| Ok(()));
    let tracker = OrderTracker::new();
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, tracker.clone()));
    let app = test::init_service(app).await;

    let (status, body) = call(&app, TestRequest::patch().uri("/api/v1/cancel").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("cancelled"));

    let (status, _) = call(&app, TestRequest::patch().uri("/api/v1/cancel/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(tracker.current().await.cancelled);
}

#[actix_web::test]
async fn status_when_device_is_unreachable() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_fetch_latest_snapshot().times(1).returning(|| Err(unreachable()));
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, OrderTracker::new()));
    let app = test::init_service(app).await;

    let (status, body) = call(&app, TestRequest::get().uri("/api/v1/status").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Sale retrieved successfully"));
    assert_eq!(body["data"]["status"], json!("processing"));
    assert_eq!(body["data"]["amount"], json!(0));
    assert_eq!(body["data"]["cashin"], json!(0));
}
