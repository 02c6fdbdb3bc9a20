//! Unified error types for the solforge toolkit.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::compiler::Diagnostic;

/// All errors that can occur during solforge operations.
///
/// Import resolution failures are deliberately absent: they are reported to the
/// compiler as [`crate::resolver::ImportResolution::Error`] values, never raised.
#[derive(Error, Debug)]
pub enum ForgeError {
    // --- Configuration ---

    /// The configuration file (`solforge.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Storage ---

    /// The template (or another stored file) is missing or unreadable.
    #[error("failed to read {path}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Templates ---

    /// Rendering the template failed (bad syntax or an unknown variable).
    #[error("template rendering failed: {0}")]
    ContentEvaluation(String),

    // --- Compiler ---

    /// A required external tool (e.g., `solc`) is not installed.
    #[error("required tool '{name}' not found, install: {install}")]
    MissingTool { name: String, install: String },

    /// The compiler could not be started or exited abnormally.
    #[error("compiler invocation failed: {0}")]
    CompilerInvocation(String),

    /// The compiler returned something that is not a standard JSON output document.
    #[error("failed to decode compiler output")]
    OutputParse(#[source] serde_json::Error),

    /// The compiler reported one or more errors for the compilation unit.
    #[error("compilation failed with {} error(s): {}", .0.len(), first_message(.0))]
    CompilerDiagnostics(Vec<Diagnostic>),

    // --- Extraction ---

    /// The output document has no `contracts[source_file][contract]` entry.
    #[error("contract '{contract}' not found in compiler output for '{source_file}'")]
    ArtifactNotFound { source_file: String, contract: String },

    // --- Project ---

    /// Attempted to create a project in a directory that already exists.
    #[error("project directory already exists: {0}")]
    ProjectExists(PathBuf),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn first_message(diagnostics: &[Diagnostic]) -> &str {
    diagnostics
        .first()
        .map(|d| d.message.as_str())
        .unwrap_or("no message")
}

/// Stable, serializable tag for each failure class surfaced at the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Storage,
    ContentEvaluation,
    Compiler,
    CompilerDiagnostic,
    ArtifactNotFound,
    Internal,
}

impl ErrorKind {
    /// HTTP status code reported for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::CompilerDiagnostic => 422,
            Self::ArtifactNotFound => 404,
            Self::Compiler => 502,
            Self::Config | Self::Storage | Self::ContentEvaluation | Self::Internal => 500,
        }
    }
}

impl ForgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => ErrorKind::Config,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::ContentEvaluation(_) => ErrorKind::ContentEvaluation,
            Self::MissingTool { .. } | Self::CompilerInvocation(_) | Self::OutputParse(_) => {
                ErrorKind::Compiler
            }
            Self::CompilerDiagnostics(_) => ErrorKind::CompilerDiagnostic,
            Self::ArtifactNotFound { .. } => ErrorKind::ArtifactNotFound,
            Self::ProjectExists(_) | Self::Io(_) | Self::Other(_) => ErrorKind::Internal,
        }
    }
}

/// Alias for `Result<T, ForgeError>`.
pub type Result<T> = std::result::Result<T, ForgeError>;
