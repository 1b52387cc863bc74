use anyhow::{bail, Context, Result};
use clap::Args;
use safecall::{safe_fetch, ErrorResponse, FetchError, Outcome};
use serde_json::{json, Value};
use url::Url;

use crate::output::{print_error_response_table, print_json, OutputFormat};

#[derive(Args)]
pub struct FetchArgs {
    /// Absolute http(s) URL to GET
    pub url: String,
}

pub async fn run(args: &FetchArgs, client: &reqwest::Client, format: &OutputFormat) -> Result<()> {
    let url = validate_url(&args.url)?;

    let outcome: Outcome<Value, FetchError> = safe_fetch(|| client.get(url).send()).await;

    let err = match outcome {
        Outcome::Success(payload) => {
            print_json(&payload);
            return Ok(());
        }
        Outcome::Failure(err) => err,
    };

    let response = ErrorResponse::from_error(&err);
    match format {
        OutputFormat::Table => {
            eprintln!("{}", err.to_pretty_string());
            print_error_response_table(&response);
        }
        OutputFormat::Json => print_json(&json!({
            "error": err.to_serializable(),
            "response": response,
        })),
    }

    bail!("request to {} failed: {}", args.url, err)
}

pub(crate) fn validate_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim()).with_context(|| format!("invalid URL '{}'", input))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported URL scheme '{}': expected http or https", other),
    }
}
