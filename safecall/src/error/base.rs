//! The base error type.

use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{BoxError, Cause, SerializedError};
use crate::config::{self, Settings};

/// A failure with its message, cause and debugging context.
///
/// Built once at the failure site through the chainable `with_*` methods,
/// which consume the error, and read-only afterwards.
///
/// # Example
///
/// ```rust
/// use safecall::BaseError;
///
/// let err = BaseError::new("unable to load profile")
///     .with_cause_error(std::io::Error::other("disk unplugged"))
///     .with_context("user_id", 42)
///     .with_code("PROFILE_LOAD")
///     .with_critical(false);
///
/// assert_eq!(err.message(), "unable to load profile");
/// assert_eq!(err.context_value("user_id"), Some(&serde_json::json!(42)));
/// assert!(!err.is_critical());
/// ```
pub struct BaseError {
    name: &'static str,
    message: String,
    cause: Option<Cause>,
    context: Option<BTreeMap<String, Value>>,
    is_critical: bool,
    code: Option<String>,
    timestamp: DateTime<Utc>,
    backtrace: Backtrace,
}

impl BaseError {
    pub(crate) const NAME: &'static str = "BaseError";

    /// Creates a critical error stamped with the current time.
    pub fn new(message: impl Into<String>) -> Self {
        // Captured regardless of RUST_BACKTRACE: detailed logs may be turned
        // on after construction.
        let backtrace = Backtrace::force_capture();

        Self {
            name: Self::NAME,
            message: message.into(),
            cause: None,
            context: None,
            is_critical: true,
            code: None,
            timestamp: Utc::now(),
            backtrace,
        }
    }

    pub(crate) fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// The error type name, `BaseError` or `HttpError`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn context(&self) -> Option<&BTreeMap<String, Value>> {
        self.context.as_ref()
    }

    /// Looks up a single context entry.
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.as_ref()?.get(key)
    }

    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Sets the cause.
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Sets an error as the cause.
    pub fn with_cause_error<E>(self, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.with_cause(Cause::error(error))
    }

    /// Sets an opaque value as the cause.
    pub fn with_cause_value(self, value: impl Into<Value>) -> Self {
        self.with_cause(Cause::value(value))
    }

    /// Adds a context entry. A repeated key overwrites the earlier value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_critical(mut self, is_critical: bool) -> Self {
        self.is_critical = is_critical;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Overrides the creation time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Snapshot for logging, honoring the process-wide settings as they are
    /// right now.
    pub fn to_serializable(&self) -> SerializedError {
        self.to_serializable_with(&config::current())
    }

    /// Snapshot for logging under explicit settings.
    pub fn to_serializable_with(&self, settings: &Settings) -> SerializedError {
        SerializedError {
            name: self.name.to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            is_critical: self.is_critical,
            code: self.code.clone(),
            timestamp: self.timestamp,
            status_code: None,
            status_name: None,
            stack: settings
                .detailed_logs
                .then(|| self.backtrace.to_string()),
            cause: self.cause.as_ref().map(Cause::to_serialized),
        }
    }

    /// The serialized form as JSON indented by two spaces.
    pub fn to_pretty_string(&self) -> String {
        self.to_pretty_string_with(&config::current())
    }

    pub fn to_pretty_string_with(&self, settings: &Settings) -> String {
        render_pretty(&self.to_serializable_with(settings), &self.message)
    }
}

pub(crate) fn render_pretty(serialized: &SerializedError, fallback: &str) -> String {
    serde_json::to_string_pretty(serialized).unwrap_or_else(|_| fallback.to_string())
}

impl fmt::Display for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// Multi-line and without the backtrace frames.
impl fmt::Debug for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.name, self.timestamp.to_rfc3339())?;
        writeln!(f, "    Message: {}", self.message)?;

        if let Some(code) = &self.code {
            writeln!(f, "    Code: {}", code)?;
        }
        if !self.is_critical {
            writeln!(f, "    Critical: false")?;
        }
        if let Some(context) = &self.context {
            writeln!(f, "    Context:")?;
            for (key, value) in context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }
        match &self.cause {
            Some(Cause::Error { name, error }) => writeln!(f, "    Cause: {}: {:?}", name, error)?,
            Some(Cause::Value(value)) => writeln!(f, "    Cause: {}", value)?,
            None => {}
        }

        Ok(())
    }
}

impl std::error::Error for BaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()?
            .as_error()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::backtrace::BacktraceStatus;
    use std::error::Error as _;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn defaults() {
        let before = Utc::now();
        let err = BaseError::new("boom");
        assert_eq!(err.name(), "BaseError");
        assert_eq!(err.message(), "boom");
        assert!(err.is_critical());
        assert!(err.cause().is_none());
        assert!(err.context().is_none());
        assert!(err.code().is_none());
        assert!(err.timestamp() >= before);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn builders_set_every_field() {
        let err = BaseError::new("lookup failed")
            .with_context("table", "users")
            .with_context("attempt", 2)
            .with_context("attempt", 3)
            .with_critical(false)
            .with_code("DB_LOOKUP")
            .with_timestamp(fixed_time());

        assert_eq!(err.context().unwrap().len(), 2);
        assert_eq!(err.context_value("attempt"), Some(&json!(3)));
        assert_eq!(err.context_value("missing"), None);
        assert!(!err.is_critical());
        assert_eq!(err.code(), Some("DB_LOOKUP"));
        assert_eq!(err.timestamp(), fixed_time());
    }

    #[test]
    fn source_exposes_error_causes_only() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let err = BaseError::new("fetch failed").with_cause_error(io);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "read timed out");
        assert!(source.downcast_ref::<std::io::Error>().is_some());

        let err = BaseError::new("fetch failed").with_cause_value("opaque");
        assert!(err.source().is_none());
        assert_eq!(err.cause().unwrap().as_value(), Some(&json!("opaque")));
    }

    #[test]
    fn serialization_toggles_the_stack() {
        let err = BaseError::new("boom").with_timestamp(fixed_time());

        let quiet = err.to_serializable_with(&Settings::default());
        assert!(quiet.stack.is_none());

        let detailed = err.to_serializable_with(&Settings::default().with_detailed_logs(true));
        let stack = detailed.stack.unwrap();
        assert_eq!(err.backtrace().status(), BacktraceStatus::Captured);
        assert_ne!(stack, "disabled backtrace");
        assert!(stack.contains("0: "));

        let again = err.to_serializable_with(&Settings::default());
        assert!(again.stack.is_none());
    }

    #[test]
    fn serialization_embeds_only_one_level_of_cause() {
        let inner = BaseError::new("socket reset")
            .with_cause_error(std::io::Error::other("deepest"));
        let outer = BaseError::new("request failed").with_cause_error(inner);

        let serialized = outer.to_serializable_with(&Settings::default());
        let json = serde_json::to_value(&serialized).unwrap();
        assert_eq!(json["cause"], json!({"name": "BaseError", "message": "socket reset"}));
        assert!(!json.to_string().contains("deepest"));
    }

    #[test]
    fn serialized_shape() {
        let err = BaseError::new("boom")
            .with_context("k", "v")
            .with_timestamp(fixed_time());
        let json = serde_json::to_value(err.to_serializable_with(&Settings::default())).unwrap();

        assert_eq!(
            json,
            json!({
                "name": "BaseError",
                "message": "boom",
                "context": {"k": "v"},
                "isCritical": true,
                "code": null,
                "timestamp": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn pretty_string() {
        let err = BaseError::new("boom")
            .with_code("E42")
            .with_cause_value("unreachable host")
            .with_timestamp(fixed_time());

        insta::assert_snapshot!(err.to_pretty_string_with(&Settings::default()), @r#"
        {
          "name": "BaseError",
          "message": "boom",
          "context": null,
          "isCritical": true,
          "code": "E42",
          "timestamp": "2024-05-01T12:30:00Z",
          "cause": "unreachable host"
        }
        "#);
    }

    #[test]
    fn debug_is_compact() {
        let err = BaseError::new("boom")
            .with_context("host", "example.com")
            .with_timestamp(fixed_time());
        let debug = format!("{:?}", err);
        assert!(debug.starts_with("BaseError at 2024-05-01T12:30:00+00:00"));
        assert!(debug.contains("Message: boom"));
        assert!(debug.contains("host: \"example.com\""));
    }
}
