//! The two-variant outcome returned by `safe_async` and `safe_fetch`.

use std::fmt;

use crate::error::BaseError;

/// Either the value of a call that completed or the error it failed with.
///
/// The variant is fixed at construction. Inspect it with `match`,
/// [`is_success`](Outcome::is_success) / [`success`](Outcome::success), or
/// convert it into a `std::result::Result` with
/// [`into_result`](Outcome::into_result).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Outcome may hold a failure that should be handled"]
pub enum Outcome<T, E = BaseError> {
    Success(T),
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// The success value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }
}

impl<T, E> Outcome<T, E>
where
    E: Send + 'static,
{
    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// On a failure, panics with an [`UnwrapFailure<E>`] payload that owns the
    /// original error. Catch it with `std::panic::catch_unwind` and downcast
    /// the payload to get the error back.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => std::panic::panic_any(UnwrapFailure { cause: error }),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

/// Panic payload of [`Outcome::unwrap`] on a failure.
pub struct UnwrapFailure<E> {
    cause: E,
}

impl<E> UnwrapFailure<E> {
    pub const MESSAGE: &'static str = "called unwrap on a failure outcome";

    /// The error the outcome held.
    pub fn cause(&self) -> &E {
        &self.cause
    }

    pub fn into_cause(self) -> E {
        self.cause
    }
}

impl<E: fmt::Display> fmt::Display for UnwrapFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", Self::MESSAGE, self.cause)
    }
}

impl<E: fmt::Debug> fmt::Debug for UnwrapFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnwrapFailure")
            .field("cause", &self.cause)
            .finish()
    }
}

impl<E> std::error::Error for UnwrapFailure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
