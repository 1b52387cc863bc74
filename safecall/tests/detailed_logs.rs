//! Exercises the process-wide settings. Kept in its own test binary with a
//! single test so nothing else observes the toggled state.

use safecall::{config, BaseError, HttpError, Settings, StatusName};

#[test]
fn detailed_logs_toggle_stack_output() {
    config::reset();
    assert!(!config::detailed_logs_enabled());

    let err = BaseError::new("cache miss").with_context("key", "user:7");
    let serialized = err.to_serializable();
    assert!(serialized.stack.is_none());
    assert!(!err.to_pretty_string().contains("\"stack\""));

    // Built while detailed logs were off; the trace is still real.
    config::configure(Settings::default().with_detailed_logs(true));
    assert!(config::detailed_logs_enabled());
    let stack = err.to_serializable().stack.unwrap_or_default();
    assert_ne!(stack, "disabled backtrace");
    assert!(stack.contains("0: "));

    let http = HttpError::new("upstream", StatusName::BadGateway, None);
    let pretty = http.to_pretty_string();
    assert!(pretty.contains("\"stack\""));
    assert!(pretty.contains("\"statusName\": \"BAD_GATEWAY\""));

    config::update(|settings| settings.detailed_logs = false);
    assert!(err.to_serializable().stack.is_none());

    config::configure(Settings::default().with_detailed_logs(true));
    config::reset();
    assert_eq!(config::current(), Settings::default());
}
