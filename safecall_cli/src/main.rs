mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use safecall::config::{self, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "safecall")]
#[command(about = "Call HTTP endpoints through safe_fetch and browse the status registry")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Log caught failures and include backtraces in rendered errors
    #[arg(long, global = true)]
    detailed_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a URL and print the decoded JSON or the classified failure
    Fetch(commands::fetch::FetchArgs),
    /// Look up one status by code or name, or list the whole registry
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safecall=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut settings = Settings::from_env();
    if cli.detailed_logs {
        settings = settings.with_detailed_logs(true);
    }
    config::configure(settings);

    match &cli.command {
        Commands::Fetch(args) => {
            let client = reqwest::Client::new();
            commands::fetch::run(args, &client, &format).await?
        }
        Commands::Status(args) => commands::status::run(args, &format)?,
    }

    Ok(())
}
