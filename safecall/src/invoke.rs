//! `safe_async`: run any fallible future and get an [`Outcome`] back.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::config;
use crate::error::{BaseError, BoxError, Cause};
use crate::outcome::Outcome;

/// Runs `operation` to completion and captures its failure.
///
/// `Ok(value)` becomes [`Outcome::Success`]. `Err(e)` (or a panic while
/// running the operation) becomes a [`BaseError`] whose cause is `e`. When
/// detailed logs are enabled at that moment, the rendered error is emitted
/// through `tracing`.
///
/// # Example
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use safecall::safe_async;
///
/// let outcome = safe_async(|| async { "42".parse::<u32>() }).await;
/// assert_eq!(outcome.success(), Some(&42));
///
/// let outcome = safe_async(|| async { "forty-two".parse::<u32>() }).await;
/// let err = outcome.failure().unwrap();
/// assert!(err.cause().unwrap().downcast_ref::<std::num::ParseIntError>().is_some());
/// # }
/// ```
pub async fn safe_async<F, Fut, R, E>(operation: F) -> Outcome<R, BaseError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Into<BoxError>,
{
    let operation_name = std::any::type_name::<F>();

    let cause = match run_guarded(operation).await {
        Ok(Ok(value)) => return Outcome::Success(value),
        Ok(Err(error)) => Cause::error(error),
        Err(panic) => panic,
    };

    let error = BaseError::new(format!(
        "error while calling the function ({})",
        operation_name
    ))
    .with_cause(cause)
    .with_context("operation", operation_name);

    let settings = config::current();
    if settings.detailed_logs {
        tracing::error!("{}", error.to_pretty_string_with(&settings));
    }

    Outcome::Failure(error)
}

/// Calls `operation` and awaits it, turning a panic at either step into an
/// opaque cause.
pub(crate) async fn run_guarded<F, Fut, T>(operation: F) -> Result<T, Cause>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await
        .map_err(|payload| Cause::value(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct Refused;

    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "refused")
        }
    }

    impl std::error::Error for Refused {}

    #[tokio::test]
    async fn resolved_value_is_a_success() {
        let outcome = safe_async(|| async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, Refused>(2)
        })
        .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.unwrap(), 2);
    }

    #[tokio::test]
    async fn error_becomes_the_cause() {
        let outcome = safe_async(|| async { Err::<u8, _>(Refused) }).await;

        let err = outcome.failure().expect("failure");
        assert_eq!(err.name(), "BaseError");
        assert!(err.message().starts_with("error while calling the function ("));
        assert_eq!(err.cause().unwrap().downcast_ref::<Refused>(), Some(&Refused));
        assert_eq!(err.cause().unwrap().name(), Some("Refused"));
        assert!(err.context_value("operation").is_some());
    }

    #[tokio::test]
    async fn string_errors_are_accepted() {
        let outcome = safe_async(|| async { Err::<(), _>(String::from("quota exceeded")) }).await;
        let cause = outcome.failure().unwrap().cause().unwrap();
        assert_eq!(cause.as_error().unwrap().to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn panics_are_converted() {
        let outcome = safe_async(|| async {
            if true {
                panic!("index out of range");
            }
            Ok::<u8, Refused>(0)
        })
        .await;

        let cause = outcome.failure().unwrap().cause().unwrap();
        assert_eq!(
            cause.as_value(),
            Some(&serde_json::json!("panicked: index out of range"))
        );
    }

    #[tokio::test]
    async fn synchronous_panics_are_converted() {
        let outcome = safe_async(|| -> std::future::Ready<Result<u8, Refused>> {
            panic!("{}", String::from("before the future"))
        })
        .await;

        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let (a, b) = tokio::join!(
            safe_async(|| async { Ok::<_, Refused>("a") }),
            safe_async(|| async { Err::<&str, _>(Refused) }),
        );
        assert_eq!(a.success(), Some(&"a"));
        assert!(b.is_failure());
    }
}
