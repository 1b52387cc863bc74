//! Classified HTTP failures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::base::render_pretty;
use super::{BaseError, BoxError, SerializedError};
use crate::config::{self, Settings};
use crate::status::StatusName;

/// An HTTP failure tied to a registered status.
///
/// The status code is always derived from the [`StatusName`], so the two
/// cannot disagree. `body` is the payload meant for the original caller,
/// e.g. the decoded error response of an upstream service.
pub struct HttpError {
    base: BaseError,
    status: StatusName,
    body: Option<Value>,
}

impl HttpError {
    pub(crate) const NAME: &'static str = "HttpError";

    /// Creates an HTTP error for a registered status.
    pub fn new(message: impl Into<String>, status: StatusName, body: Option<Value>) -> Self {
        Self {
            base: BaseError::new(message).named(Self::NAME),
            status,
            body,
        }
    }

    fn with_default(
        status: StatusName,
        body: impl Into<Value>,
        message: Option<&str>,
        default_message: &str,
    ) -> Self {
        Self::new(
            message.unwrap_or(default_message),
            status,
            Some(body.into()),
        )
    }

    // =========================================================================
    // Factories
    // =========================================================================

    /// 404 `NOT_FOUND`.
    pub fn not_found(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(StatusName::NotFound, body, message, "Not found")
    }

    /// 400 `BAD_REQUEST`.
    pub fn bad_request(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(StatusName::BadRequest, body, message, "Bad request")
    }

    /// 401 `UNAUTHORIZED`.
    pub fn unauthorized(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(StatusName::Unauthorized, body, message, "Unauthorized")
    }

    /// 403 `FORBIDDEN`.
    pub fn forbidden(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(StatusName::Forbidden, body, message, "Forbidden")
    }

    /// 409 `CONFLICT`.
    pub fn conflict(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(StatusName::Conflict, body, message, "Conflict")
    }

    /// 405 `METHOD_NOT_ALLOWED`.
    pub fn method_not_allowed(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(
            StatusName::MethodNotAllowed,
            body,
            message,
            "Method not allowed",
        )
    }

    /// 500 `INTERNAL_SERVER_ERROR`.
    pub fn internal_server_error(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(
            StatusName::InternalServerError,
            body,
            message,
            "Internal server error",
        )
    }

    /// 429 `TOO_MANY_REQUESTS`.
    pub fn too_many_requests(body: impl Into<Value>, message: Option<&str>) -> Self {
        Self::with_default(
            StatusName::TooManyRequests,
            body,
            message,
            "Too many requests",
        )
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    pub fn status_name(&self) -> StatusName {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The shared error fields.
    pub fn base(&self) -> &BaseError {
        &self.base
    }

    pub fn message(&self) -> &str {
        self.base.message()
    }

    pub fn into_parts(self) -> (BaseError, StatusName, Option<Value>) {
        (self.base, self.status, self.body)
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    pub fn with_cause_error<E>(mut self, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.base = self.base.with_cause_error(error);
        self
    }

    pub fn with_cause_value(mut self, value: impl Into<Value>) -> Self {
        self.base = self.base.with_cause_value(value);
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_context(key, value);
        self
    }

    pub fn with_critical(mut self, is_critical: bool) -> Self {
        self.base = self.base.with_critical(is_critical);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.base = self.base.with_code(code);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.base = self.base.with_timestamp(timestamp);
        self
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Same as [`BaseError::to_serializable`], plus the status code and name.
    pub fn to_serializable(&self) -> SerializedError {
        self.to_serializable_with(&config::current())
    }

    pub fn to_serializable_with(&self, settings: &Settings) -> SerializedError {
        SerializedError {
            status_code: Some(self.status.code()),
            status_name: Some(self.status),
            ..self.base.to_serializable_with(settings)
        }
    }

    pub fn to_pretty_string(&self) -> String {
        self.to_pretty_string_with(&config::current())
    }

    pub fn to_pretty_string_with(&self, settings: &Settings) -> String {
        render_pretty(&self.to_serializable_with(settings), self.message())
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.base, self.status.code(), self.status)
    }
}

impl fmt::Debug for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.base)?;
        writeln!(f, "    Status: {} {}", self.status.code(), self.status)?;
        if let Some(body) = &self.body {
            writeln!(f, "    Body: {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.base)
    }
}
