//! `deskform`: inspect metadata-driven forms from JSON fixtures

use anyhow::Context;
use clap::{Parser, Subcommand};
use desk_cli::{commands, fixture_context, ClientConfig};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deskform", version)]
#[command(about = "Inspect DocType forms: layout, defaults and validation")]
struct Cli {
    /// Fixture directory (doctype/<DocType>.json, <DocType>/<name>.json)
    #[arg(long, value_name = "DIR")]
    fixtures: PathBuf,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print sections and their fields
    Layout { doctype: String },

    /// Print the initial values as JSON
    Defaults {
        doctype: String,
        /// Start from this stored document
        #[arg(long, value_name = "NAME")]
        doc: Option<String>,
    },

    /// Validate a JSON object of field values
    Validate { doctype: String, file: PathBuf },
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = ClientConfig::load(cli.config.as_deref()).await?;
    let ctx = fixture_context(&cli.fixtures, &config);
    tracing::debug!(fixtures = %cli.fixtures.display(), "using fixture backend");

    match cli.command {
        Command::Layout { doctype } => {
            print!("{}", commands::layout(&ctx, &doctype).await?);
        }
        Command::Defaults { doctype, doc } => {
            let values = commands::defaults(&ctx, &doctype, doc.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        Command::Validate { doctype, file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let values: Map<String, Value> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON object", file.display()))?;

            if let Err(errors) = commands::validate(&ctx, &doctype, values).await? {
                print!("{}", commands::format_errors(&errors));
                return Ok(ExitCode::FAILURE);
            }
            println!("valid");
        }
    }
    Ok(ExitCode::SUCCESS)
}
