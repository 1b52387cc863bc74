//! The serializable snapshot of an error, as written to logs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::status::StatusName;

/// Snapshot produced by [`BaseError::to_serializable`](super::BaseError::to_serializable)
/// and [`HttpError::to_serializable`](super::HttpError::to_serializable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedError {
    pub name: String,
    pub message: String,
    pub context: Option<BTreeMap<String, Value>>,
    pub is_critical: bool,
    pub code: Option<String>,
    pub timestamp: DateTime<Utc>,

    /// Only set for HTTP errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Only set for HTTP errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_name: Option<StatusName>,

    /// Backtrace, present only when detailed logs were enabled at
    /// serialization time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<SerializedCause>,
}

/// A cause, one level deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedCause {
    /// An error cause: its type name and message.
    Error { name: String, message: String },
    /// An opaque cause, embedded as is.
    Value(Value),
}
