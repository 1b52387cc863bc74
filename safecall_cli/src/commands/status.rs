use anyhow::{anyhow, Result};
use clap::Args;
use safecall::StatusName;

use crate::output::{print_status_json, print_status_table, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Status code (e.g. 404) or name (e.g. NOT_FOUND, not-found); omit to list all
    pub status: Option<String>,
}

pub fn run(args: &StatusArgs, format: &OutputFormat) -> Result<()> {
    let entries = match &args.status {
        Some(query) => vec![lookup(query)?],
        None => StatusName::ALL.to_vec(),
    };

    match format {
        OutputFormat::Table => print_status_table(&entries),
        OutputFormat::Json => print_status_json(&entries),
    }

    Ok(())
}

pub(crate) fn lookup(query: &str) -> Result<StatusName> {
    if let Ok(code) = query.trim().parse::<u16>() {
        return StatusName::from_code(code)
            .ok_or_else(|| anyhow!("status code {} is not registered", code));
    }
    Ok(query.parse::<StatusName>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(lookup("404").unwrap(), StatusName::NotFound);
        assert_eq!(lookup(" 503 ").unwrap(), StatusName::ServiceUnavailable);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup("TOO_MANY_REQUESTS").unwrap(), StatusName::TooManyRequests);
        assert_eq!(lookup("bad-gateway").unwrap(), StatusName::BadGateway);
    }

    #[test]
    fn test_lookup_unregistered_code() {
        let err = lookup("418").unwrap_err();
        assert_eq!(err.to_string(), "status code 418 is not registered");
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup("NOT_A_STATUS").is_err());
    }

    #[test]
    fn test_run_lists_registry() {
        let args = StatusArgs { status: None };
        assert!(run(&args, &OutputFormat::Json).is_ok());
    }
}
