use crate::domain::{DispatchOutcome, Workspace, dispatch, finish_entry};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Tui,
    /// Dispatch one terminal command and print its output lines to stdout.
    Exec { line: String },
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing command after exec")]
    MissingExecCommand,
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(CliInvocation::PrintHelp);
    }
    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        return Ok(CliInvocation::PrintVersion);
    }

    let mut iter = args.iter().skip(1);
    let Some(subcommand) = iter.next() else {
        return Ok(CliInvocation::Tui);
    };

    match subcommand.as_str() {
        "exec" => {
            let rest = iter.cloned().collect::<Vec<_>>();
            if rest.is_empty() {
                return Err(CliParseError::MissingExecCommand);
            }
            Ok(CliInvocation::Exec {
                line: rest.join(" "),
            })
        }
        flag if flag.starts_with('-') => Err(CliParseError::UnknownFlag(flag.to_string())),
        other => Err(CliParseError::UnknownSubcommand(other.to_string())),
    }
}

#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// One-shot mode: slow handlers run inline, output lines print verbatim
/// (image-marker lines included, byte-for-byte).
pub fn run_exec(workspace: &mut Workspace, line: &str) -> Result<(), CliRunError> {
    let entry = match dispatch(workspace, line) {
        DispatchOutcome::Ignored | DispatchOutcome::Cleared => return Ok(()),
        DispatchOutcome::Entry { entry, .. } => entry,
        DispatchOutcome::InFlight { command, job } => finish_entry(&command, job.run()).0,
    };

    let mut out = io::stdout().lock();
    for raw in &entry.outputs {
        writeln!(out, "{raw}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn bare_invocation_starts_the_tui() {
        assert_eq!(
            parse_invocation(&args(&["wingterm"])).expect("parse"),
            CliInvocation::Tui
        );
    }

    #[test]
    fn exec_joins_the_remaining_arguments_into_one_line() {
        assert_eq!(
            parse_invocation(&args(&["wingterm", "exec", "todo", "add", "x"])).expect("parse"),
            CliInvocation::Exec {
                line: "todo add x".to_string()
            }
        );
    }

    #[test]
    fn exec_without_a_command_is_an_error() {
        assert!(matches!(
            parse_invocation(&args(&["wingterm", "exec"])),
            Err(CliParseError::MissingExecCommand)
        ));
    }

    #[test]
    fn help_and_version_flags_win_anywhere() {
        assert_eq!(
            parse_invocation(&args(&["wingterm", "exec", "--help"])).expect("parse"),
            CliInvocation::PrintHelp
        );
        assert_eq!(
            parse_invocation(&args(&["wingterm", "-V"])).expect("parse"),
            CliInvocation::PrintVersion
        );
    }

    #[test]
    fn unknown_input_is_rejected_with_a_typed_error() {
        assert!(matches!(
            parse_invocation(&args(&["wingterm", "serve"])),
            Err(CliParseError::UnknownSubcommand(_))
        ));
        assert!(matches!(
            parse_invocation(&args(&["wingterm", "--engine"])),
            Err(CliParseError::UnknownFlag(_))
        ));
    }
}
