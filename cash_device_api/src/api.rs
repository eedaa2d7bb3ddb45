use std::{sync::Arc, time::Instant};

use log::*;
use psg_common::{truncate_for_log, MajorUnits};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
    Method,
};
use serde_json::Value;

use crate::{config::CashDeviceConfig, traits::CashDevice, CashDeviceApiError};

const MAX_LOGGED_BODY_CHARS: usize = 2000;

#[derive(Clone)]
pub struct CashDeviceApi {
    config: CashDeviceConfig,
    client: Arc<Client>,
}

/// A completed call to the device, successful or not.
struct DeviceReply {
    status: u16,
    body: String,
}

impl CashDeviceApi {
    pub fn new(config: CashDeviceConfig) -> Result<Self, CashDeviceApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CashDeviceApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<DeviceReply, CashDeviceApiError> {
        let url = self.url(path);
        match &body {
            Some(b) => info!("📟️ Calling device {method} {url} payload={b}"),
            None => debug!("📟️ Calling device {method} {url}"),
        }
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let start = Instant::now();
        let response = req.send().await.map_err(|e| CashDeviceApiError::RestRequestError(e.to_string()))?;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await.map_err(|e| CashDeviceApiError::RestResponseError(e.to_string()))?;
        if self.config.log_bodies {
            info!(
                "📟️ Device {path} responded status={status} duration_ms={duration_ms:.1} content_type={content_type} \
                 body={}",
                truncate_for_log(&body, MAX_LOGGED_BODY_CHARS)
            );
        } else {
            info!("📟️ Device {path} responded status={status} duration_ms={duration_ms:.1}");
        }
        Ok(DeviceReply { status, body })
    }

    /// Like [`call`](Self::call), but any non-2xx status is an error.
    async fn call_expecting_success(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<String, CashDeviceApiError> {
        let reply = self.call(method, path, body).await?;
        if (200..300).contains(&reply.status) {
            Ok(reply.body)
        } else {
            let message = truncate_for_log(&reply.body, MAX_LOGGED_BODY_CHARS);
            Err(CashDeviceApiError::QueryError { status: reply.status, message })
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, CashDeviceApiError> {
        let body = self.call_expecting_success(Method::GET, path, None).await?;
        serde_json::from_str(&body).map_err(|e| CashDeviceApiError::JsonError(e.to_string()))
    }
}

impl CashDevice for CashDeviceApi {
    async fn fetch_inventory(&self) -> Result<Value, CashDeviceApiError> {
        self.get_json("/inventory").await
    }

    async fn submit_cashin(&self, amount: MajorUnits) -> Result<Option<Value>, CashDeviceApiError> {
        let payload = serde_json::json!({ "amount": amount });
        let body = self.call_expecting_success(Method::POST, "/cashin", Some(payload)).await?;
        let parsed = serde_json::from_str::<Value>(&body)
            .map_err(|e| debug!("📟️ Device /cashin reply is not JSON. {e}"))
            .ok();
        Ok(parsed)
    }

    async fn fetch_latest_snapshot(&self) -> Result<Value, CashDeviceApiError> {
        self.get_json("/socket/latest").await
    }

    async fn request_cancel(&self) -> Result<(), CashDeviceApiError> {
        self.call(Method::GET, "/cashin_cancel", None).await.map(|_| ())
    }
}
