use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Response template is invalid. {0}")]
    TemplateError(String),
    #[error("{summary}. {message}")]
    OperationFailed { summary: &'static str, message: String },
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ServerError {
    /// Attach the name of the operation that failed. The summary is what API clients see in the `error` field.
    pub fn during(self, summary: &'static str) -> Self {
        error!("💻️ {summary}. {self}");
        match self {
            Self::OperationFailed { message, .. } => Self::OperationFailed { summary, message },
            other => Self::OperationFailed { summary, message: other.to_string() },
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::OperationFailed { summary, message } => {
                json!({ "success": false, "error": summary, "message": message })
            },
            other => json!({ "success": false, "error": other.to_string(), "message": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}
