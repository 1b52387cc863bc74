//! The error taxonomy: [`BaseError`] for generic failures, [`HttpError`] for
//! classified HTTP failures, and [`FetchError`] for either of them.

mod base;
mod cause;
mod http;
mod serialized;

pub use self::base::BaseError;
pub use self::cause::{BoxError, Cause};
pub use self::http::HttpError;
pub use self::serialized::{SerializedCause, SerializedError};

use crate::config::Settings;

/// The failure side of `safe_fetch`.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The server answered with a registered non-success status.
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Transport or decoding failure, or an unregistered status code.
    #[error(transparent)]
    Base(#[from] BaseError),
}

impl FetchError {
    /// The shared error fields, whichever the variant.
    pub fn base(&self) -> &BaseError {
        match self {
            FetchError::Http(err) => err.base(),
            FetchError::Base(err) => err,
        }
    }

    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            FetchError::Http(err) => Some(err),
            FetchError::Base(_) => None,
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, FetchError::Http(_))
    }

    pub fn message(&self) -> &str {
        self.base().message()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.base().cause()
    }

    pub fn to_serializable(&self) -> SerializedError {
        match self {
            FetchError::Http(err) => err.to_serializable(),
            FetchError::Base(err) => err.to_serializable(),
        }
    }

    pub fn to_serializable_with(&self, settings: &Settings) -> SerializedError {
        match self {
            FetchError::Http(err) => err.to_serializable_with(settings),
            FetchError::Base(err) => err.to_serializable_with(settings),
        }
    }

    pub fn to_pretty_string(&self) -> String {
        match self {
            FetchError::Http(err) => err.to_pretty_string(),
            FetchError::Base(err) => err.to_pretty_string(),
        }
    }

    pub fn to_pretty_string_with(&self, settings: &Settings) -> String {
        match self {
            FetchError::Http(err) => err.to_pretty_string_with(settings),
            FetchError::Base(err) => err.to_pretty_string_with(settings),
        }
    }
}
