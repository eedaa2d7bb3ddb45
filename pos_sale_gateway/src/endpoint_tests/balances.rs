use actix_web::{http::StatusCode, middleware::NormalizePath, test, test::TestRequest, App};
use serde_json::{json, Value};

use super::{
    helpers::{call, configure},
    mocks::{unreachable, MockDevice},
};
use crate::order_state::OrderTracker;

fn inventory_reply() -> Value {
    json!({
        "Body": [{
            "InventoryResponse": [{
                "Cash": [
                    {"type": "3", "Denomination": [
                        {"fv": "2000", "Piece": {"value": "5"}},
                        {"fv": "50000", "Piece": [{"value": "1"}]},
                        {"fv": "25", "Piece": {"value": "0"}}
                    ]},
                    {"type": "4", "Denomination": {"fv": "2000", "Piece": {"value": "12"}}}
                ]
            }]
        }]
    })
}

async fn get_balances(device: MockDevice) -> (StatusCode, Value) {
    let app = App::new().wrap(NormalizePath::trim()).configure(configure(device, OrderTracker::new()));
    let app = test::init_service(app).await;
    call(&app, TestRequest::get().uri("/api/v1/balances").to_request()).await
}

#[actix_web::test]
async fn balances_from_the_device() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_fetch_inventory().times(1).returning(|| Ok(inventory_reply()));
    let (status, body) = get_balances(device).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Inventory retrieved successfully"));
    assert_eq!(
        body["data"],
        json!([
            {"denom": "500.00", "value": 500, "qty": 1, "inStacker": 0, "type": 1},
            {"denom": "20.00", "value": 20, "qty": 5, "inStacker": 12, "type": 1},
            {"denom": "0.25", "value": 0.25, "qty": 0, "inStacker": 0, "type": 2}
        ])
    );
}

#[actix_web::test]
async fn balances_when_device_is_unreachable() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_fetch_inventory().times(1).returning(|| Err(unreachable()));
    let (status, body) = get_balances(device).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = body["data"].as_array().expect("data should be a list");
    assert_eq!(data.len(), 9);
    assert_eq!(data[0], json!({"denom": "1000.00", "value": 1000, "qty": 0, "inStacker": 0, "type": 1}));
    assert!(data.iter().all(|d| d["qty"] == json!(0) && d["inStacker"] == json!(0)));
}

#[actix_web::test]
async fn balances_when_inventory_is_unreadable() {
    let _ = env_logger::try_init();
    let mut device = MockDevice::new();
    device.expect_fetch_inventory().times(1).returning(|| Ok(json!({"Body": "maintenance"})));
    let (status, body) = get_balances(device).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(|d| d.len()), Some(9));
}
