// crates/cert-relay-cli/src/main.rs
// ============================================================================
// Module: Cert Relay CLI Entry Point
// Description: Argument parsing and single-invocation execution.
// Purpose: Run one renewal invocation and emit the structured response.
// Dependencies: cert-relay-cli, clap, serde_json, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! One process, one invocation: parameters come from a JSON file or stdin,
//! overrides from an optional TOML file, and the structured response goes to
//! stdout. Logs go to stderr so stdout stays machine-readable. Ctrl-C during
//! the settle wait cancels verification without failing the invocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use cert_relay_cli::ConfigError;
use cert_relay_cli::InvocationParams;
use cert_relay_cli::ParamsError;
use cert_relay_cli::RelayConfig;
use cert_relay_cli::run_invocation;
use cert_relay_core::cancel_pair;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cert-relay", about = "Deploys a renewed certificate into a cluster ingress secret")]
struct Cli {
    /// Path to the JSON parameter file, or `-` to read stdin.
    #[arg(long, value_name = "FILE")]
    params: PathBuf,
    /// Path to an optional TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures before a structured response could be produced.
#[derive(Debug, Error)]
enum CliError {
    /// Parameter input could not be read.
    #[error("parameter input could not be read: {0}")]
    Io(String),
    /// Parameter decoding failed.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The response could not be encoded.
    #[error("response could not be encoded: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Initializes stderr logging from the environment filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Reads the raw parameter bytes from a file or stdin.
fn read_params(path: &Path) -> Result<Vec<u8>, CliError> {
    if path == Path::new("-") {
        let mut raw = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut raw)
            .map_err(|err| CliError::Io(err.to_string()))?;
        return Ok(raw);
    }
    std::fs::read(path).map_err(|err| CliError::Io(err.to_string()))
}

/// Executes one invocation and reports via exit code.
async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let raw = read_params(&cli.params)?;
    let params = InvocationParams::from_json(&raw)?;
    let config = match &cli.config {
        Some(path) => RelayConfig::load(path)?,
        None => RelayConfig::default(),
    };

    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let response = run_invocation(&params, &config, &signal).await;
    let rendered =
        serde_json::to_string(&response).map_err(|err| CliError::Encode(err.to_string()))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").map_err(|err| CliError::Io(err.to_string()))?;

    Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Process entry point.
#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, "invocation aborted before producing a response");
            ExitCode::FAILURE
        }
    }
}
