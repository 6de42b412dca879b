//! PolicyDesk console
//!
//! Manages customers, insurance plans and policies against the PolicyDesk
//! REST backend from a terminal.
//!
//! Usage:
//!   policydesk --api-base http://localhost:8080/api

use anyhow::{Context, Result};
use clap::Parser;
use policydesk_client::{ClientConfig, HttpBackend, API_BASE_ENV, TIMEOUT_ENV};
use policydesk_console::Console;
use policydesk_model::SchemaRegistry;
use policydesk_session::{ReferencePolicy, Session, SessionConfig};
use std::sync::Arc;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "policydesk")]
#[command(about = "Admin console for customers, plans and policies")]
struct Args {
    /// Base URL of the REST backend
    #[arg(long, env = API_BASE_ENV, default_value = "http://localhost:8080/api")]
    api_base: String,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV, default_value = "30")]
    timeout_secs: u64,

    /// Reference collections to refresh on every load (all, active)
    #[arg(long, default_value = "all")]
    references: ReferencePolicy,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let registry = SchemaRegistry::builtin();
    registry.check().context("Built-in schemas are inconsistent")?;

    let config = ClientConfig {
        base_url: args.api_base,
        timeout_secs: args.timeout_secs,
    };
    info!("Using backend at {}", config.base_url);
    let backend = HttpBackend::new(config).context("Failed to build HTTP client")?;

    let session = Session::new(
        registry,
        Arc::new(backend),
        SessionConfig {
            references: args.references,
        },
    );

    let mut console = Console::new(session, BufReader::new(stdin()), stdout());
    console.run().await
}
