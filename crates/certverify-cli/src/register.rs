//! # Register Subcommand
//!
//! Registers a certificate from flags, a JSON payload file, or both (flags
//! override file values). The bearer token comes from the global `--token`
//! flag or `CERTVERIFY_API_TOKEN`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use certverify_client::{CertificateClient, ClientConfig};
use certverify_core::{CertificateForm, FormField};

/// Arguments for the `certverify register` subcommand.
#[derive(Args, Debug, Default)]
pub struct RegisterArgs {
    /// JSON payload with any of: id, name, organization, program, cgpa, issueDate.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Certificate ID (required unless given in --file).
    #[arg(long)]
    pub id: Option<String>,

    /// Holder name (required unless given in --file).
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub organization: Option<String>,

    #[arg(long)]
    pub program: Option<String>,

    #[arg(long)]
    pub cgpa: Option<String>,

    /// Issue date, e.g. 2020-09-15.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub issue_date: Option<String>,
}

impl RegisterArgs {
    /// Build the form: file contents first, then flag overrides.
    pub fn to_form(&self) -> Result<CertificateForm> {
        let mut form = match &self.file {
            Some(path) => read_payload(path)?,
            None => CertificateForm::default(),
        };
        let overrides = [
            (FormField::Id, &self.id),
            (FormField::Name, &self.name),
            (FormField::Organization, &self.organization),
            (FormField::Program, &self.program),
            (FormField::Cgpa, &self.cgpa),
            (FormField::IssueDate, &self.issue_date),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
        Ok(form)
    }
}

fn read_payload(path: &Path) -> Result<CertificateForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse certificate JSON: {}", path.display()))
}

/// Execute the register subcommand.
///
/// Exit code 0 when the service accepted the certificate, 1 otherwise.
pub async fn run_register(args: &RegisterArgs, config: &ClientConfig) -> Result<u8> {
    let form = args.to_form()?;
    let client = CertificateClient::new(config)?;
    let token = config.api_token.as_ref().map(|t| t.as_str());

    match client.register(&form, token).await {
        Ok(message) => {
            println!("{message}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(1)
        }
    }
}
