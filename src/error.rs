//! Error handling for the Muddy application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// A single failed branch of a concurrent stage.
#[derive(Debug)]
pub struct BranchFailure {
    /// Name of the branch, e.g. the kind or the resource path
    pub branch: String,
    pub error: Error,
}

impl std::fmt::Display for BranchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.branch, self.error)
    }
}

fn summarize(failures: &[BranchFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Custom error types for Muddy operations.
///
/// This enum represents all possible errors that can occur within the Muddy application.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Invalid glob pattern: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Archive error: {0}.")]
    ZipError(#[from] zip::result::ZipError),

    #[error("No such directory '{project_dir}'.")]
    ProjectDirectoryNotFound { project_dir: String },

    #[error("No such file '{path}'.")]
    MissingMetadataError { path: String },

    #[error("Missing required directory 'src' in '{project_dir}'.")]
    MissingSourceDirectoryError { project_dir: String },

    /// Represents errors in the project metadata
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Failed to parse '{path}': {source}.")]
    DefinitionParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A definition violated the field schema of its kind
    #[error("Invalid {kind} '{name}': {message}.")]
    ValidationError { kind: &'static str, name: String, message: String },

    #[error("Module '{child}' already has a parent.")]
    ParentAlreadySetError { child: String },

    #[error("Child '{child}' is already present in '{parent}'.")]
    DuplicateChildError { parent: String, child: String },

    #[error("Module '{child}' cannot become a child of itself or of its descendants.")]
    CyclicChildError { child: String },

    /// One or more branches of a concurrent stage failed.
    /// Raised only after every branch has settled.
    #[error("{stage} failed in {} of {total} branches: {}", .failures.len(), summarize(.failures))]
    StageError { stage: String, total: usize, failures: Vec<BranchFailure> },
}

impl Error {
    /// Names of the failing branches when this is a [`Error::StageError`].
    pub fn failed_branches(&self) -> Vec<&str> {
        match self {
            Error::StageError { failures, .. } => {
                failures.iter().map(|f| f.branch.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
