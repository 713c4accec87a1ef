//! # certverify-cli -- Certificate Verification CLI
//!
//! Provides the `certverify` command-line interface over
//! [`certverify_client`].
//!
//! ## Subcommands
//!
//! - `certverify lookup <ID>`: verify a certificate and print its details.
//! - `certverify register --id .. --name ..`: register a new certificate.
//! - `certverify shell`: interactive session with a runtime-configurable
//!   base URL, bearer token and registration form.
//!
//! ```bash
//! certverify --api-base https://ledger.example.org lookup SUST-2020-0001
//! CERTVERIFY_API_TOKEN=... certverify register --id SUST-2020-0001 --name "Jane Doe"
//! ```

pub mod lookup;
pub mod register;
pub mod render;
pub mod shell;

use anyhow::{Context, Result};
use clap::Args;

use certverify_client::config::{API_BASE_VAR, API_TOKEN_VAR, TIMEOUT_VAR};
use certverify_client::ClientConfig;

/// Connection settings shared by every subcommand.
///
/// Each flag falls back to its `CERTVERIFY_*` environment variable.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Base URL of the certificate service.
    #[arg(long, global = true, value_name = "URL", env = API_BASE_VAR)]
    pub api_base: Option<String>,

    /// Bearer token sent with registration requests.
    #[arg(long, global = true, value_name = "TOKEN", env = API_TOKEN_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds. No timeout by default.
    #[arg(long, global = true, value_name = "SECS", env = TIMEOUT_VAR)]
    pub timeout: Option<String>,
}

impl ConnectionArgs {
    /// Client configuration from the resolved flags, with defaults for
    /// anything unset or blank.
    pub fn to_config(&self) -> Result<ClientConfig> {
        ClientConfig::from_vars(|name| match name {
            API_BASE_VAR => self.api_base.clone(),
            API_TOKEN_VAR => self.token.clone(),
            TIMEOUT_VAR => self.timeout.clone(),
            _ => None,
        })
        .context("invalid connection settings")
    }
}
