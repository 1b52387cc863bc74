//! Turns errors into HTTP responses for servers built on this crate.
//!
//! Framework-neutral: [`ErrorResponse`] is a status and a JSON body that an
//! axum, actix or hyper handler can send as is.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::{FetchError, HttpError};
use crate::status::StatusName;

/// Status and body to answer a failed request with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: Value,
}

impl ErrorResponse {
    /// Picks the response for any error.
    ///
    /// An [`HttpError`] (directly or inside [`FetchError::Http`]) answers with
    /// its own status and body; everything else becomes a generic 500. The
    /// error is logged first when detailed logs are enabled.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        if config::detailed_logs_enabled() {
            tracing::error!(error = %error, "request failed: {:?}", error);
        }

        match find_http_error(error) {
            Some(http) => Self::from_http(http),
            None => Self::internal(),
        }
    }

    /// The status and body of an HTTP error; `null` body when it has none.
    pub fn from_http(error: &HttpError) -> Self {
        Self {
            status: error.status_code(),
            body: error.body().cloned().unwrap_or(Value::Null),
        }
    }

    /// The generic 500 answer.
    pub fn internal() -> Self {
        let status = StatusName::InternalServerError.code();
        Self {
            status,
            body: json!({ "code": status, "message": "Internal server error" }),
        }
    }
}

fn find_http_error<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a HttpError> {
    if let Some(http) = error.downcast_ref::<HttpError>() {
        return Some(http);
    }
    error
        .downcast_ref::<FetchError>()
        .and_then(FetchError::as_http)
}
