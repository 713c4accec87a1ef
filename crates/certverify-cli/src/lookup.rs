//! # Lookup Subcommand
//!
//! Verifies a single certificate by ID and prints the resolved card, or the
//! raw response body with `--json`.

use anyhow::Result;
use clap::Args;

use certverify_client::{CertificateClient, ClientConfig};

use crate::render::certificate_card;

/// Arguments for the `certverify lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Certificate ID, e.g. SUST-2020-0001.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the raw response JSON instead of the resolved card.
    #[arg(long)]
    pub json: bool,
}

/// Execute the lookup subcommand.
///
/// Exit code 0 when the certificate was found, 1 on any failure.
pub async fn run_lookup(args: &LookupArgs, config: &ClientConfig) -> Result<u8> {
    let client = CertificateClient::new(config)?;

    match client.lookup(&args.id).await {
        Ok(cert) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&cert.raw)?);
            } else {
                print!("{}", certificate_card(&cert.view));
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(1)
        }
    }
}
