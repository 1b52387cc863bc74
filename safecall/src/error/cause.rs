//! The prior failure wrapped by a [`BaseError`](super::BaseError).

use serde_json::Value;

use super::SerializedCause;

/// Boxed, thread-safe error object.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What went wrong before the error was built: either an error value or an
/// opaque payload (e.g. the message of a caught panic).
#[derive(Debug)]
pub enum Cause {
    /// An error value. `name` is the short type name of the original error.
    Error { name: &'static str, error: BoxError },
    /// A non-error payload.
    Value(Value),
}

impl Cause {
    /// Wraps an error, remembering its type name. The original value stays
    /// reachable through [`Cause::downcast_ref`].
    pub fn error<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Cause::Error {
            name: short_type_name::<E>(),
            error: error.into(),
        }
    }

    /// Wraps an opaque payload.
    pub fn value(value: impl Into<Value>) -> Self {
        Cause::Value(value.into())
    }

    /// The type name of an error cause.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Cause::Error { name, .. } => Some(*name),
            Cause::Value(_) => None,
        }
    }

    /// The cause as an error, if it is one.
    pub fn as_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Cause::Error { error, .. } => Some(&**error),
            Cause::Value(_) => None,
        }
    }

    /// The opaque payload, if the cause is not an error.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Cause::Error { .. } => None,
            Cause::Value(value) => Some(value),
        }
    }

    /// Borrows the original error as `T`.
    ///
    /// `String` and `&str` errors are boxed into a private std type, so they
    /// cannot be downcast; read them through [`Cause::as_error`] and
    /// `to_string()` instead.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: std::error::Error + 'static,
    {
        self.as_error()?.downcast_ref::<T>()
    }

    /// Name and message only: nested causes are not followed.
    pub(crate) fn to_serialized(&self) -> SerializedCause {
        match self {
            Cause::Error { name, error } => SerializedCause::Error {
                name: name.to_string(),
                message: error.to_string(),
            },
            Cause::Value(value) => SerializedCause::Value(value.clone()),
        }
    }
}

/// `my_crate::io::Error<T>` -> `Error`
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Refused(u16);

    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "connection refused on port {}", self.0)
        }
    }

    impl std::error::Error for Refused {}

    #[test]
    fn error_cause_keeps_the_original_value() {
        let cause = Cause::error(Refused(443));
        assert_eq!(cause.name(), Some("Refused"));
        assert_eq!(cause.downcast_ref::<Refused>(), Some(&Refused(443)));
        assert!(cause.as_value().is_none());
    }

    #[test]
    fn string_causes_become_errors() {
        let cause = Cause::error("socket closed");
        assert_eq!(cause.name(), Some("&str"));
        assert_eq!(cause.as_error().unwrap().to_string(), "socket closed");
    }

    #[test]
    fn value_cause() {
        let cause = Cause::value(serde_json::json!({"reason": "panic"}));
        assert_eq!(cause.name(), None);
        assert!(cause.as_error().is_none());
        assert_eq!(cause.as_value().unwrap()["reason"], "panic");
    }

    #[test]
    fn serialized_cause_is_flat() {
        let serialized = Cause::error(Refused(80)).to_serialized();
        assert_eq!(
            serialized,
            SerializedCause::Error {
                name: "Refused".to_string(),
                message: "connection refused on port 80".to_string(),
            }
        );
    }

    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name::<std::io::Error>(), "Error");
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<BoxError>(), "Box");
    }

    #[test]
    fn string_causes_are_read_through_as_error() {
        let cause = Cause::error(String::from("quota exceeded"));
        assert_eq!(cause.name(), Some("String"));
        assert_eq!(cause.as_error().unwrap().to_string(), "quota exceeded");
        assert!(cause.downcast_ref::<std::io::Error>().is_none());

        let cause = Cause::error("quota exceeded");
        assert_eq!(cause.name(), Some("&str"));
        assert_eq!(cause.as_error().unwrap().to_string(), "quota exceeded");
    }
}
