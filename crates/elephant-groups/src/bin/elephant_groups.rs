//! elephant-groups CLI
//!
//! Computes minimal balanced groupings from the command line, or serves the
//! host message contract over stdin/stdout.
//!
//! # Commands
//!
//! - `solve <COUNT>...`: print one JSON response per count
//! - `serve`: read JSON-lines requests from stdin, write one JSON-line
//!   response per request to stdout
//!
//! Logs go to stderr so stdout only ever carries responses.
//!
//! Exit codes: 0 on success, 1 if any `solve` request failed or `serve` hit
//! an I/O error, 2 on invalid configuration.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use elephant_groups::config::{CoveragePolicy, GroupingConfig, SERVICE_MAX_GROUPS};
use elephant_groups::protocol::{encode_response, parse_request, respond, GroupingRequest};
use elephant_groups::worker::GroupingWorker;
use elephant_groups::GroupAssigner;

/// Minimal balanced group encodings
#[derive(Parser)]
#[command(name = "elephant-groups")]
#[command(version)]
#[command(about = "Split N items into the fewest balanced groups that tell them all apart")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Largest group count a request may need
    #[arg(long, global = true, default_value_t = SERVICE_MAX_GROUPS)]
    max_groups: u32,

    /// Leave items without an encoding ungrouped instead of failing
    #[arg(long, global = true)]
    truncate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute groupings for the given counts
    Solve {
        /// Item counts, any JSON number (invalid ones produce failure responses)
        #[arg(required = true, allow_negative_numbers = true)]
        counts: Vec<String>,

        /// Pretty-print responses
        #[arg(long)]
        pretty: bool,
    },
    /// Answer JSON-lines requests from stdin
    Serve,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let coverage = if cli.truncate {
        CoveragePolicy::Truncate
    } else {
        CoveragePolicy::Strict
    };
    let config = match GroupingConfig::builder()
        .max_groups(cli.max_groups)
        .coverage(coverage)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Solve { counts, pretty } => solve(config, &counts, pretty),
        Commands::Serve => match serve(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = ?err, "serve failed");
                ExitCode::FAILURE
            }
        },
    }
}

fn solve(config: GroupingConfig, counts: &[String], pretty: bool) -> ExitCode {
    let assigner = GroupAssigner::new(config);
    let mut failed = 0usize;

    for raw in counts {
        // Anything that is not JSON is passed on as a string and rejected by
        // the validator with the usual message.
        let value: serde_json::Value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
        let response = respond(&assigner, &GroupingRequest::new(value));
        if !response.is_success() {
            failed += 1;
        }

        let line = if pretty {
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| encode_response(&response))
        } else {
            encode_response(&response)
        };
        println!("{line}");
    }

    debug!(requests = counts.len(), failed, "solve finished");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn serve(config: GroupingConfig) -> anyhow::Result<()> {
    let worker = GroupingWorker::spawn(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served: u64 = 0;

    info!("serving requests from stdin");
    while let Some(line) = lines.next_line().await.context("reading request")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match parse_request(&line) {
            Ok(request) => worker.submit(request).await?,
            Err(failure) => failure,
        };

        let mut out = encode_response(&response);
        out.push('\n');
        stdout
            .write_all(out.as_bytes())
            .await
            .context("writing response")?;
        stdout.flush().await.context("flushing response")?;
        served += 1;
    }

    worker.shutdown().await?;
    info!(served, "stdin closed");
    Ok(())
}
