//! Error taxonomy and exit-code mapping.

use std::fmt;

use thiserror::Error;

/// Boxed error type returned across the filesystem port boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GvtError>;

/// The command an error was raised under.
///
/// Argument and I/O failures carry a distinct status code per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `gvt init`.
    Init,
    /// `gvt add`.
    Add,
    /// `gvt detach`.
    Detach,
    /// `gvt commit`.
    Commit,
    /// `gvt checkout`.
    Checkout,
    /// `gvt history`.
    History,
    /// `gvt version`.
    Version,
}

impl Operation {
    /// Lowercase verb used in user-facing messages.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Init => "initialize",
            Self::Add => "add",
            Self::Detach => "detach",
            Self::Commit => "commit",
            Self::Checkout => "checkout",
            Self::History => "list history",
            Self::Version => "inspect",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Every way a `gvt` invocation can fail.
#[derive(Debug, Error)]
pub enum GvtError {
    /// No subcommand was given.
    #[error("Please specify command.")]
    MissingCommand,

    /// The subcommand is not one gvt knows.
    #[error("Unknown command {name}.")]
    UnknownCommand {
        /// The token as typed by the user.
        name: String,
    },

    /// The command line was rejected for a reason other than its command name.
    #[error("{message}")]
    Usage {
        /// The parser's explanation.
        message: String,
    },

    /// The project root has no metadata directory yet.
    #[error("Current directory is not initialized. Please use \"init\" command to initialize.")]
    NotInitialized,

    /// `init` ran against an existing repository.
    #[error("Current directory is already initialized.")]
    AlreadyInitialized,

    /// A required file name was not supplied.
    #[error("Please specify file to {op}.")]
    MissingArgument {
        /// Command missing its argument.
        op: Operation,
    },

    /// The working-tree file named on the command line does not exist.
    #[error("File not found. File: {file}")]
    FileNotFound {
        /// Command that looked for the file.
        op: Operation,
        /// File name as given.
        file: String,
    },

    /// A version id argument is missing, malformed, or out of range.
    #[error("Invalid version number: {input}")]
    InvalidVersion {
        /// The offending argument (empty when none was given).
        input: String,
    },

    /// A pointer file holds something other than a non-negative integer.
    #[error("Corrupt repository state in {path}: {value:?} is not a version number")]
    CorruptState {
        /// Pointer file that failed to parse.
        path: String,
        /// Raw contents read.
        value: String,
    },

    /// The next version directory is already on disk.
    #[error("Version {id} already exists; repository metadata is inconsistent")]
    VersionAlreadyExists {
        /// Id that was about to be created.
        id: u64,
    },

    /// An underlying filesystem call failed.
    #[error("{}", io_message(*op, file.as_deref()))]
    Io {
        /// Command in progress.
        op: Operation,
        /// File the command was about, if any.
        file: Option<String>,
        /// What the engine was doing when the call failed.
        context: String,
        /// The port error.
        #[source]
        source: BoxError,
    },
}

fn io_message(op: Operation, file: Option<&str>) -> String {
    match (op, file) {
        (Operation::Add, Some(file)) => {
            format!("File cannot be added. See ERR for details. File: {file}")
        }
        (Operation::Detach | Operation::Commit, Some(file)) => {
            let past = if op == Operation::Detach { "detached" } else { "committed" };
            format!("File cannot be {past}, see ERR for details. File: {file}")
        }
        _ => "Underlying system problem. See ERR for details.".to_string(),
    }
}

impl GvtError {
    /// Wraps a port error raised while performing `context`.
    pub fn io(op: Operation, context: impl Into<String>, source: BoxError) -> Self {
        Self::Io { op, file: None, context: context.into(), source }
    }

    /// Re-tags an I/O failure with the command it happened under.
    #[must_use]
    pub fn during(self, op: Operation) -> Self {
        match self {
            Self::Io { file, context, source, .. } => Self::Io { op, file, context, source },
            other => other,
        }
    }

    /// Attaches the file name an I/O failure concerns.
    #[must_use]
    pub fn for_file(self, name: &str) -> Self {
        match self {
            Self::Io { op, context, source, .. } => {
                Self::Io { op, file: Some(name.to_string()), context, source }
            }
            other => other,
        }
    }

    /// Process status code for this failure.
    ///
    /// Negative codes are reduced modulo 256 by [`GvtError::process_status`].
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCommand | Self::UnknownCommand { .. } | Self::Usage { .. } => 1,
            Self::NotInitialized => -2,
            Self::CorruptState { .. } | Self::VersionAlreadyExists { .. } => -3,
            Self::AlreadyInitialized => 10,
            Self::MissingArgument { op } => match op {
                Operation::Add => 20,
                Operation::Detach => 30,
                Operation::Commit => 50,
                _ => 1,
            },
            Self::FileNotFound { op, .. } => match op {
                Operation::Commit => 51,
                _ => 21,
            },
            Self::InvalidVersion { .. } => 60,
            Self::Io { op, file, .. } => match (op, file) {
                (Operation::Add, Some(_)) => 22,
                (Operation::Detach, Some(_)) => 31,
                (Operation::Commit, Some(_)) => 52,
                _ => -3,
            },
        }
    }

    /// [`GvtError::exit_code`] as the byte the operating system reports.
    #[must_use]
    pub fn process_status(&self) -> u8 {
        u8::try_from(self.exit_code().rem_euclid(256)).unwrap_or(1)
    }
}
