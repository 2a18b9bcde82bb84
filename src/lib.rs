//! Core library entry for the `gvt` CLI.
//!
//! `gvt` keeps every state of a tracked file as a numbered, immutable
//! snapshot under `.gvt/` in the project root, and can put any snapshot
//! back into the working directory.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod repo;

use std::ffi::OsString;
use std::path::Path;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{GvtError, Result};
use crate::repo::Repository;

/// Run the CLI with the provided arguments and configuration.
///
/// When `config.record` is set, every filesystem interaction is recorded
/// to a cassette at that path, whether or not the command succeeds.
///
/// # Errors
///
/// Returns the command's error; the caller maps it to a message and status.
pub fn run<I, T>(config: &Config, args: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let ctx = match &config.record {
        Some(path) => ServiceContext::recording(path, &session_name(&args), &config.root),
        None => ServiceContext::live(),
    };

    let result = run_with_context(&ctx, &config.root, args);

    match ctx.finish() {
        Ok(Some(path)) => eprintln!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("{e}"),
    }
    result
}

/// Run the CLI against an explicit context and project root.
///
/// The subcommand name is matched case-insensitively.
///
/// # Errors
///
/// Returns [`GvtError::MissingCommand`] or [`GvtError::UnknownCommand`] for a
/// bad command line, otherwise the command's own error.
pub fn run_with_context<I, T>(ctx: &ServiceContext, root: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let invocation = cli::Invocation::split(&raw);
    let cli = match cli::Cli::try_parse_from(&invocation.head) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(err.render().to_string().trim_end().to_string());
        }
        Err(err) => return Err(rejected_command(ctx, root, &invocation, &err)),
    };
    let command = cli.command.ok_or(GvtError::MissingCommand)?;
    commands::dispatch(ctx, root, command, &invocation.operands)
}

/// Maps a clap rejection of the command token onto a gvt error.
///
/// Only a bad command token is an unknown command, and only once the root
/// is initialized.
fn rejected_command(
    ctx: &ServiceContext,
    root: &Path,
    invocation: &cli::Invocation,
    err: &clap::Error,
) -> GvtError {
    tracing::debug!(error = %err, "command line rejected");
    match err.kind() {
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument | ErrorKind::InvalidUtf8 => {
            if Repository::is_initialized(ctx, root) {
                GvtError::UnknownCommand { name: invocation.name.clone() }
            } else {
                GvtError::NotInitialized
            }
        }
        _ => GvtError::Usage { message: err.render().to_string().trim_end().to_string() },
    }
}

/// Installs the stderr tracing subscriber using `filter` as the directive.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn session_name(args: &[OsString]) -> String {
    args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{memory_context, root};

    #[test]
    fn run_initializes_then_reports_history() {
        let (ctx, _fs) = memory_context();
        let init = run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();
        assert_eq!(init, "Current directory initialized successfully.");
        let history = run_with_context(&ctx, root(), ["gvt", "history"]).unwrap();
        assert_eq!(history, "0: GVT initialized.");
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let (ctx, _fs) = memory_context();
        assert!(run_with_context(&ctx, root(), ["gvt", "INIT"]).is_ok());
        assert!(run_with_context(&ctx, root(), ["gvt", "Version"]).is_ok());
    }

    #[test]
    fn missing_command_is_reported() {
        let (ctx, _fs) = memory_context();
        let err = run_with_context(&ctx, root(), ["gvt"]).unwrap_err();
        assert!(matches!(err, GvtError::MissingCommand));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_command_needs_initialized_root() {
        let (ctx, _fs) = memory_context();
        let err = run_with_context(&ctx, root(), ["gvt", "Push"]).unwrap_err();
        assert!(matches!(err, GvtError::NotInitialized));

        run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();
        let err = run_with_context(&ctx, root(), ["gvt", "Push"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown command Push.");
    }

    #[test]
    fn commands_other_than_init_need_a_repository() {
        let (ctx, _fs) = memory_context();
        for command in ["add", "detach", "commit", "checkout", "history", "version"] {
            let err = run_with_context(&ctx, root(), ["gvt", command, "x"]).unwrap_err();
            assert_eq!(err.exit_code(), -2, "{command}");
        }
    }

    #[test]
    fn help_is_returned_as_output() {
        let (ctx, _fs) = memory_context();
        let help = run_with_context(&ctx, root(), ["gvt", "--help"]).unwrap();
        assert!(help.contains("checkout"));
    }

    #[test]
    fn help_flags_after_a_command_are_operands() {
        let (ctx, _fs) = memory_context();
        run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();

        for args in [["gvt", "checkout", "-h"], ["gvt", "checkout", "--help"], ["gvt", "version", "-h"]] {
            let err = run_with_context(&ctx, root(), args).unwrap_err();
            assert_eq!(err.exit_code(), 60, "{args:?}");
        }
        let history = run_with_context(&ctx, root(), ["gvt", "history", "-h"]).unwrap();
        assert_eq!(history, "0: GVT initialized.");
    }

    #[test]
    fn files_named_like_flags_are_tracked() {
        let (ctx, fs) = memory_context();
        run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();
        fs.put(&root().join("-h"), "h");
        fs.put(&root().join("--"), "sep");

        let help = run_with_context(&ctx, root(), ["gvt", "add", "-h"]).unwrap();
        let sep = run_with_context(&ctx, root(), ["gvt", "add", "--"]).unwrap();

        assert_eq!(help, "File added successfully. File: -h");
        assert_eq!(sep, "File added successfully. File: --");
    }

    #[test]
    fn separator_is_passed_through_to_message_parsing() {
        let (ctx, fs) = memory_context();
        run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();
        fs.put(&root().join("a.txt"), "A");
        fs.put(&root().join("b.txt"), "B");

        run_with_context(&ctx, root(), ["gvt", "add", "a.txt", "-m", "--", "x"]).unwrap();
        run_with_context(&ctx, root(), ["gvt", "add", "b.txt", "-m", "--"]).unwrap();

        let repo = Repository::open(&ctx, root(), crate::error::Operation::Version).unwrap();
        assert_eq!(repo.read_message(1).unwrap(), "File added successfully. File: a.txt");
        assert_eq!(repo.read_message(2).unwrap(), "--");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_operand_is_not_an_unknown_command() {
        use std::os::unix::ffi::OsStringExt;

        let (ctx, _fs) = memory_context();
        run_with_context(&ctx, root(), ["gvt", "init"]).unwrap();
        let args =
            vec![OsString::from("gvt"), OsString::from("add"), OsString::from_vec(vec![b'a', 0xff])];

        let err = run_with_context(&ctx, root(), args).unwrap_err();

        assert_eq!(err.exit_code(), 21);
        assert_eq!(err.to_string(), "File not found. File: a\u{fffd}");
    }
}
