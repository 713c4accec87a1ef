//! # certverify CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certverify_cli::lookup::{run_lookup, LookupArgs};
use certverify_cli::register::{run_register, RegisterArgs};
use certverify_cli::shell::run_shell;
use certverify_cli::ConnectionArgs;

/// Verify and register certificates against a certificate ledger service.
#[derive(Parser, Debug)]
#[command(name = "certverify", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a certificate by ID and print its details.
    #[command(alias = "verify")]
    Lookup(LookupArgs),

    /// Register a new certificate.
    #[command(alias = "upload")]
    Register(RegisterArgs),

    /// Interactive session: configure the service, verify and register.
    Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match cli.connection.to_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "certverify starting");

    let result = match cli.command {
        Commands::Lookup(args) => run_lookup(&args, &config).await,
        Commands::Register(args) => run_register(&args, &config).await,
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_shell(&config, stdin, std::io::stdout()).await
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
