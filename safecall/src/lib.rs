//! Fallible calls as values.
//!
//! `safe_async` and `safe_fetch` run a caller-supplied future and never let
//! its failure escape: every path ends in an [`Outcome`]. HTTP responses are
//! classified against the [`StatusName`] registry into [`HttpError`] or, for
//! transport and decoding failures, a plain [`BaseError`].

pub mod config;
pub mod error;
mod fetch;
mod invoke;
pub mod outcome;
pub mod respond;
pub mod status;

pub use self::config::Settings;
pub use self::error::{BaseError, Cause, FetchError, HttpError, SerializedCause, SerializedError};
pub use self::fetch::{safe_fetch, ResponseDescriptor};
pub use self::invoke::safe_async;
pub use self::outcome::{Outcome, UnwrapFailure};
pub use self::respond::ErrorResponse;
pub use self::status::{StatusClass, StatusName};
