//! Process-wide settings read by error serialization and `safe_async`.
//!
//! There is exactly one shared value, held for the life of the process in a
//! `static RwLock`. The library only reads it; applications change it with
//! [`configure`], [`update`] and [`reset`]. Functions that take an explicit
//! [`Settings`] (e.g. [`BaseError::to_serializable_with`]) bypass it.
//!
//! [`BaseError::to_serializable_with`]: crate::BaseError::to_serializable_with

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Environment variable read by [`Settings::from_env`].
pub const DETAILED_LOGS_ENV: &str = "SAFECALL_DETAILED_LOGS";

/// Error-handling settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Include backtraces in serialized errors and log failures caught by
    /// `safe_async`.
    #[serde(default)]
    pub detailed_logs: bool,
}

impl Settings {
    const DEFAULT: Settings = Settings {
        detailed_logs: false,
    };

    /// Reads settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            detailed_logs: env_flag(DETAILED_LOGS_ENV, Self::DEFAULT.detailed_logs),
        }
    }

    /// Sets `detailed_logs`.
    pub fn with_detailed_logs(mut self, enabled: bool) -> Self {
        self.detailed_logs = enabled;
        self
    }
}

static CURRENT: RwLock<Settings> = RwLock::new(Settings::DEFAULT);

/// Returns a copy of the current process-wide settings.
pub fn current() -> Settings {
    *CURRENT.read().unwrap_or_else(|e| e.into_inner())
}

/// Replaces the process-wide settings.
pub fn configure(settings: Settings) {
    *CURRENT.write().unwrap_or_else(|e| e.into_inner()) = settings;
}

/// Applies a partial change to the process-wide settings.
pub fn update(f: impl FnOnce(&mut Settings)) {
    let mut guard = CURRENT.write().unwrap_or_else(|e| e.into_inner());
    f(&mut guard);
}

/// Restores the defaults.
pub fn reset() {
    configure(Settings::DEFAULT);
}

/// Shorthand for `current().detailed_logs`.
pub fn detailed_logs_enabled() -> bool {
    current().detailed_logs
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|val| parse_flag(&val))
        .unwrap_or(default)
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
