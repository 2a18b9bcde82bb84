//! CLI argument definitions.
//!
//! clap only recognises the subcommand name. Everything after it is handed
//! to the command untouched, because tokens such as `-m`, `-last`, `-1`,
//! `-h`, and `--` are operands (message markers, version ids, or file
//! names) rather than flags.

use std::ffi::OsString;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gvt`.
#[derive(Debug, Parser)]
#[command(name = "gvt", version, about = "Keep numbered snapshots of a tracked file")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create the repository in the project root.
    Init,
    /// Start tracking a file: `add <file> [-m <message>]`.
    Add,
    /// Stop tracking a file: `detach <file> [-m <message>]`.
    Detach,
    /// Snapshot a tracked file's current content: `commit <file> [-m <message>]`.
    Commit,
    /// Restore the working directory to a version: `checkout <version>`.
    Checkout,
    /// List versions newest first: `history [-last <n>]`.
    History,
    /// Show one version's message: `version [<version>]`.
    Version,
}

/// A command line split into the part clap parses and the raw operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name and the command token, lowercased.
    pub head: Vec<OsString>,
    /// The command token as typed, for error messages.
    pub name: String,
    /// Tokens after the command, as typed.
    pub operands: Vec<String>,
}

impl Invocation {
    /// Splits `args` (program name first) after the command token.
    ///
    /// A command token starting with `-` is left as-is so top-level flags
    /// such as `--help` still reach clap. Operands that are not valid UTF-8
    /// are converted lossily.
    #[must_use]
    pub fn split(args: &[OsString]) -> Self {
        let mut head: Vec<OsString> = args.iter().take(2).cloned().collect();
        if let Some(command) = head.get_mut(1) {
            if let Some(name) = command.to_str().filter(|name| !name.starts_with('-')) {
                *command = OsString::from(name.to_lowercase());
            }
        }
        let name = args.get(1).map(|a| a.to_string_lossy().into_owned()).unwrap_or_default();
        let operands = args.iter().skip(2).map(|a| a.to_string_lossy().into_owned()).collect();
        Self { head, name, operands }
    }
}
