//! `safe_fetch`: run an HTTP call and classify its response.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BaseError, BoxError, Cause, FetchError, HttpError};
use crate::invoke::run_guarded;
use crate::outcome::Outcome;
use crate::status::StatusName;

/// What `safe_fetch` needs to know about a response.
///
/// Implemented for [`reqwest::Response`]; implement it for other clients
/// or for canned responses in tests.
pub trait ResponseDescriptor: Sized {
    /// Failure while reading or decoding the body.
    type Error: Into<BoxError>;

    /// Numeric status code.
    fn status(&self) -> u16;

    /// Identifies the request in error messages, usually the URL.
    fn identifier(&self) -> String;

    /// Whether the response counts as a success. Defaults to any 2xx status.
    fn is_success(&self) -> bool {
        (200..=299).contains(&self.status())
    }

    /// Decodes the body as JSON.
    fn json<T: DeserializeOwned>(self) -> impl Future<Output = Result<T, Self::Error>>;

    /// Reads the raw body.
    fn text(self) -> impl Future<Output = Result<String, Self::Error>>;
}

impl ResponseDescriptor for reqwest::Response {
    type Error = reqwest::Error;

    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    fn identifier(&self) -> String {
        self.url().to_string()
    }

    fn is_success(&self) -> bool {
        reqwest::Response::status(self).is_success()
    }

    async fn json<T: DeserializeOwned>(self) -> Result<T, Self::Error> {
        reqwest::Response::json::<T>(self).await
    }

    async fn text(self) -> Result<String, Self::Error> {
        reqwest::Response::text(self).await
    }
}

/// Runs an HTTP call once and classifies what came back.
///
/// - the call itself fails (network, DNS, TLS, ...): [`FetchError::Base`]
///   with the transport error as its cause;
/// - success status: the body decoded as `T`, or, if decoding fails,
///   [`FetchError::Base`] with the decoding error as its cause;
/// - registered non-success status: [`FetchError::Http`] carrying that
///   status and the error body (JSON when it parses, raw text otherwise);
/// - any other status: [`FetchError::Base`].
///
/// There is no retry and no timeout; configure those on the client.
///
/// # Example
///
/// ```rust,no_run
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use safecall::{safe_fetch, FetchError, Outcome};
///
/// let client = reqwest::Client::new();
/// let outcome: Outcome<serde_json::Value, FetchError> =
///     safe_fetch(|| client.get("https://example.com/api/users").send()).await;
///
/// match outcome {
///     Outcome::Success(users) => println!("{users}"),
///     Outcome::Failure(FetchError::Http(err)) => eprintln!("server said {}", err.status_name()),
///     Outcome::Failure(FetchError::Base(err)) => eprintln!("request failed: {err}"),
/// }
/// # }
/// ```
pub async fn safe_fetch<T, F, Fut, D, E>(operation: F) -> Outcome<T, FetchError>
where
    T: DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<D, E>>,
    D: ResponseDescriptor,
    E: Into<BoxError>,
{
    let operation_name = std::any::type_name::<F>();

    let response = match run_guarded(operation).await {
        Ok(Ok(response)) => response,
        Ok(Err(error)) => return unclassified(operation_name, Cause::error(error), None),
        Err(panic) => return unclassified(operation_name, panic, None),
    };

    if !response.is_success() {
        return Outcome::Failure(classify(response).await);
    }

    let url = response.identifier();
    match run_guarded(|| response.json::<T>()).await {
        Ok(Ok(payload)) => Outcome::Success(payload),
        Ok(Err(error)) => unclassified(operation_name, Cause::error(error), Some(url)),
        Err(panic) => unclassified(operation_name, panic, Some(url)),
    }
}

/// Transport and decoding failures. `decoded_url` is set once a response
/// was received.
fn unclassified<T>(
    operation_name: &str,
    cause: Cause,
    decoded_url: Option<String>,
) -> Outcome<T, FetchError> {
    let mut error = BaseError::new(format!("unable to fetch data from ({})", operation_name))
        .with_cause(cause)
        .with_context("operation", operation_name);

    error = match decoded_url {
        Some(url) => error.with_context("stage", "decode").with_context("url", url),
        None => error.with_context("stage", "transport"),
    };

    tracing::debug!("fetch failed before classification: {}", error);
    Outcome::Failure(error.into())
}

async fn classify<D: ResponseDescriptor>(response: D) -> FetchError {
    let status = response.status();
    let url = response.identifier();

    let Some(name) = StatusName::from_code(status) else {
        tracing::debug!(status, url = %url, "status code is not registered");
        return BaseError::new(format!(
            "unknown status code received from the server: {}",
            status
        ))
        .with_context("status", status)
        .with_context("url", url)
        .into();
    };

    tracing::debug!(status, url = %url, "classified response as {}", name);
    let body = read_error_body(response).await;
    HttpError::new(format!("error while fetching: {}", url), name, body)
        .with_context("url", url)
        .into()
}

async fn read_error_body<D: ResponseDescriptor>(response: D) -> Option<Value> {
    let text = run_guarded(|| response.text()).await.ok()?.ok()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)))
}
