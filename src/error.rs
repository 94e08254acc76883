//! Error types for the cleanscript CLI.

use std::path::PathBuf;

use cleanscript_compiler::CompileError;
use thiserror::Error;

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Main error type for the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading or writing a file failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::Config`]
    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The source file has lexical or syntax errors
    #[error("{}: {source}", path.display())]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },

    /// An external post-processor could not run or exited unsuccessfully
    #[error("Post-processor '{name}' failed: {message}")]
    PostProcess { name: String, message: String },

    /// Directory traversal failed
    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The file watcher could not be set up
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// The compile target does not exist
    #[error("No such file or directory: {}", .0.display())]
    TargetNotFound(PathBuf),

    /// `--stdout` was given for a directory target
    #[error("--stdout needs a single file target, got directory {}", .0.display())]
    StdoutNeedsFile(PathBuf),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
