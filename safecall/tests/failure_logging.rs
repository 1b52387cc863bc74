//! Failure logging under detailed logs. Own test binary: it toggles the
//! process-wide settings and installs a capturing subscriber.

use std::io;
use std::sync::{Arc, Mutex};

use safecall::{config, safe_async, BaseError, ErrorResponse, HttpError, Settings};
use serde_json::json;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn take(&self) -> String {
        let mut buf = self.0.lock().unwrap();
        let text = String::from_utf8_lossy(&buf).into_owned();
        buf.clear();
        text
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn error_events(output: &str) -> usize {
    output
        .lines()
        .filter(|line| line.trim_start().starts_with("ERROR"))
        .count()
}

#[tokio::test]
async fn failures_are_logged_only_with_detailed_logs() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    config::reset();
    let outcome = safe_async(|| async { Err::<(), _>("disk full") }).await;
    assert!(outcome.is_failure());
    ErrorResponse::from_error(&BaseError::new("db down"));
    assert_eq!(captured.take(), "");

    config::configure(Settings::default().with_detailed_logs(true));

    let outcome = safe_async(|| async { Err::<(), _>("disk full") }).await;
    assert!(outcome.is_failure());
    let output = captured.take();
    assert_eq!(error_events(&output), 1);
    assert!(output.contains("\"name\": \"BaseError\""));
    assert!(output.contains("\"message\": \"error while calling the function ("));
    assert!(output.contains("\"message\": \"disk full\""));
    assert!(output.contains("\"stack\": "));

    let response = ErrorResponse::from_error(&HttpError::not_found(json!({"id": 7}), None));
    assert_eq!(response.status, 404);
    let output = captured.take();
    assert_eq!(error_events(&output), 1);
    assert!(output.contains("request failed"));
    assert!(output.contains("Not found"));

    config::reset();
}
