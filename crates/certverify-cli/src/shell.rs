//! # Interactive Shell
//!
//! Line-oriented front end over [`CertificateController`]. The session keeps
//! the base URL, bearer token, lookup input and registration form between
//! commands, so a failed registration can be corrected field by field and
//! resubmitted.
//!
//! ## Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `base [URL]` | show or change the API base URL |
//! | `token [TOKEN\|clear]` | show, set or clear the bearer token |
//! | `lookup [ID]` / `verify [ID]` | verify a certificate (last ID if omitted) |
//! | `set FIELD VALUE` | fill a registration field |
//! | `form` | show the registration form |
//! | `clear` | empty the registration form |
//! | `upload` / `register` | submit the registration form |
//! | `status` | show base, token and operation states |
//! | `example` | print a sample registration payload |
//! | `help` | list commands |
//! | `quit` / `exit` | leave the shell |

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use certverify_client::{CertificateController, ClientConfig};
use certverify_core::{FormField, SAMPLE_PAYLOAD};

use crate::render::{certificate_card, form_summary, state_summary};

const PROMPT: &str = "certverify> ";

const HELP: &str = "\
Commands:
  base [URL]              show or change the API base URL
  token [TOKEN|clear]     show, set or clear the bearer token
  lookup [ID]             verify a certificate (alias: verify)
  set FIELD VALUE         fill a registration field
                          (id, name, organization, program, cgpa, issueDate)
  form                    show the registration form
  clear                   empty the registration form
  upload                  submit the registration form (alias: register)
  status                  show session state
  example                 print a sample registration payload
  help                    show this help
  quit                    leave the shell (alias: exit)
";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    ShowBase,
    SetBase(String),
    ShowToken,
    SetToken(String),
    ClearToken,
    Lookup(Option<String>),
    Set(FormField, String),
    ShowForm,
    ClearForm,
    Upload,
    Status,
    Example,
    Quit,
}

/// Parse one input line. The argument of `lookup`, `set` and `token` is the
/// rest of the line, so values may contain spaces.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "help" | "?" => ShellCommand::Help,
        "base" if rest.is_empty() => ShellCommand::ShowBase,
        "base" => ShellCommand::SetBase(rest.to_string()),
        "token" if rest.is_empty() => ShellCommand::ShowToken,
        "token" if rest.eq_ignore_ascii_case("clear") => ShellCommand::ClearToken,
        "token" => ShellCommand::SetToken(rest.to_string()),
        "lookup" | "verify" if rest.is_empty() => ShellCommand::Lookup(None),
        "lookup" | "verify" => ShellCommand::Lookup(Some(rest.to_string())),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set FIELD VALUE".to_string());
            }
            let field = field.parse::<FormField>().map_err(|e| e.to_string())?;
            ShellCommand::Set(field, value.to_string())
        }
        "form" => ShellCommand::ShowForm,
        "clear" => ShellCommand::ClearForm,
        "upload" | "register" => ShellCommand::Upload,
        "status" => ShellCommand::Status,
        "example" => ShellCommand::Example,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (type 'help')")),
    };
    Ok(command)
}

/// Run the shell until `quit` or end of input.
///
/// Always returns exit code 0: individual command failures are reported
/// inline and the session continues.
pub async fn run_shell<R, W>(config: &ClientConfig, input: R, mut out: W) -> Result<u8>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let controller = CertificateController::new(config)?;
    let mut lines = input.lines();

    writeln!(out, "Certificate verification shell. API base: {}", controller.api_base())?;
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(&controller, command, &mut out).await?,
            Err(message) => writeln!(out, "error: {message}")?,
        }
    }

    tracing::debug!("shell session ended");
    Ok(0)
}

async fn execute<W: Write>(
    controller: &CertificateController,
    command: ShellCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        ShellCommand::Empty | ShellCommand::Quit => {}
        ShellCommand::Help => write!(out, "{HELP}")?,
        ShellCommand::ShowBase => writeln!(out, "API base: {}", controller.api_base())?,
        ShellCommand::SetBase(raw) => match controller.set_api_base(&raw) {
            Ok(base) => writeln!(out, "API base: {base}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        ShellCommand::ShowToken => {
            let shown = if controller.has_token() { "configured" } else { "not set" };
            writeln!(out, "token: {shown}")?;
        }
        ShellCommand::SetToken(token) => {
            controller.set_token(Some(token));
            writeln!(out, "token: configured")?;
        }
        ShellCommand::ClearToken => {
            controller.set_token(None);
            writeln!(out, "token: not set")?;
        }
        ShellCommand::Lookup(id) => {
            if let Some(id) = id {
                controller.set_lookup_input(id);
            }
            match controller.submit_lookup().await {
                Ok(cert) => write!(out, "{}", certificate_card(&cert.view))?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        ShellCommand::Set(field, value) => {
            controller.set_form_field(field, value);
        }
        ShellCommand::ShowForm => write!(out, "{}", form_summary(&controller.form()))?,
        ShellCommand::ClearForm => {
            controller.set_form(Default::default());
            writeln!(out, "form cleared")?;
        }
        ShellCommand::Upload => match controller.submit_registration().await {
            Ok(message) => writeln!(out, "{message}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        ShellCommand::Status => {
            writeln!(out, "API base:     {}", controller.api_base())?;
            let token = if controller.has_token() { "configured" } else { "not set" };
            writeln!(out, "token:        {token}")?;
            writeln!(out, "lookup:       {}", state_summary(&controller.lookup_state()))?;
            writeln!(
                out,
                "registration: {}",
                state_summary(&controller.registration_state())
            )?;
        }
        ShellCommand::Example => writeln!(out, "{SAMPLE_PAYLOAD}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_rest_of_line() {
        assert_eq!(parse_line("  "), Ok(ShellCommand::Empty));
        assert_eq!(parse_line("base"), Ok(ShellCommand::ShowBase));
        assert_eq!(
            parse_line("base http://ledger.local:4000/"),
            Ok(ShellCommand::SetBase("http://ledger.local:4000/".into()))
        );
        assert_eq!(
            parse_line("VERIFY  SUST 2020 0001 "),
            Ok(ShellCommand::Lookup(Some("SUST 2020 0001".into())))
        );
        assert_eq!(parse_line("lookup"), Ok(ShellCommand::Lookup(None)));
        assert_eq!(parse_line("token CLEAR"), Ok(ShellCommand::ClearToken));
        assert_eq!(parse_line("register"), Ok(ShellCommand::Upload));
        assert_eq!(parse_line("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn set_takes_field_and_multi_word_value() {
        assert_eq!(
            parse_line("set program BSc in CSE"),
            Ok(ShellCommand::Set(FormField::Program, "BSc in CSE".into()))
        );
        assert_eq!(
            parse_line("set issue-date"),
            Ok(ShellCommand::Set(FormField::IssueDate, String::new()))
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_line("dance").unwrap_err().contains("unknown command"));
        assert!(parse_line("set").unwrap_err().contains("usage"));
        assert!(parse_line("set grade A").unwrap_err().contains("unknown field"));
    }
}
