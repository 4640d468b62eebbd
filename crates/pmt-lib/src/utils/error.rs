// PMT Error Types
// Every Project Model failure funnels through PmtError before it is shown to the user

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project Model error
#[derive(Error, Debug)]
pub enum PmtError {
    /// Project is not registered or its folder is gone
    #[error("Project \"{name}\" not found.")]
    ProjectNotFound { name: String },

    /// Asset is not present in the project manifest
    #[error("Asset \"{name}\" not found.")]
    AssetNotFound { name: String },

    /// Asset exists but the requested DCC slot does not
    #[error("Asset \"{asset}\" has no {tool} file.")]
    SlotNotFound { asset: String, tool: String },

    /// File or folder handed in by the caller does not exist
    #[error("File not found: {path}")]
    PathNotFound { path: String },

    /// Name collision on create or rename
    #[error("{kind} \"{name}\" already exists.")]
    AlreadyExists { kind: &'static str, name: String },

    /// Blank or otherwise unusable user input
    #[error("{message}")]
    InvalidInput { message: String },

    /// Bundled template (empty Substance file, empty Unreal project) is missing
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// External DCC process exited with a failure code
    #[error("{tool} failed. Error: {stderr}")]
    ProcessFailed { tool: String, stderr: String },

    /// Filesystem failure, with what was being attempted
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be parsed or serialized
    #[error("Manifest error in {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Path config file could not be parsed
    #[error("Invalid path config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Base studio folder could not be created; the tool cannot run without it
    #[error("Cannot create studio base folder {path}: {source}")]
    BaseFolderUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for Project Model operations
pub type PmtResult<T> = Result<T, PmtError>;

/// Stable error codes for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmtErrorCode {
    NotFound,
    AlreadyExists,
    InvalidInput,
    TemplateNotFound,
    ProcessFailed,
    IoError,
    ManifestError,
    ConfigError,
    BaseFolderUnavailable,
}

impl PmtErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PmtErrorCode::NotFound => "PMT_NOT_FOUND",
            PmtErrorCode::AlreadyExists => "PMT_ALREADY_EXISTS",
            PmtErrorCode::InvalidInput => "PMT_INVALID_INPUT",
            PmtErrorCode::TemplateNotFound => "PMT_TEMPLATE_NOT_FOUND",
            PmtErrorCode::ProcessFailed => "PMT_PROCESS_FAILED",
            PmtErrorCode::IoError => "PMT_IO_ERROR",
            PmtErrorCode::ManifestError => "PMT_MANIFEST_ERROR",
            PmtErrorCode::ConfigError => "PMT_CONFIG_ERROR",
            PmtErrorCode::BaseFolderUnavailable => "PMT_BASE_FOLDER_UNAVAILABLE",
        }
    }
}

impl PmtError {
    pub fn code(&self) -> PmtErrorCode {
        match self {
            PmtError::ProjectNotFound { .. }
            | PmtError::AssetNotFound { .. }
            | PmtError::SlotNotFound { .. }
            | PmtError::PathNotFound { .. } => PmtErrorCode::NotFound,
            PmtError::AlreadyExists { .. } => PmtErrorCode::AlreadyExists,
            PmtError::InvalidInput { .. } => PmtErrorCode::InvalidInput,
            PmtError::TemplateNotFound { .. } => PmtErrorCode::TemplateNotFound,
            PmtError::ProcessFailed { .. } => PmtErrorCode::ProcessFailed,
            PmtError::Io { .. } => PmtErrorCode::IoError,
            PmtError::Manifest { .. } => PmtErrorCode::ManifestError,
            PmtError::Config { .. } => PmtErrorCode::ConfigError,
            PmtError::BaseFolderUnavailable { .. } => PmtErrorCode::BaseFolderUnavailable,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        PmtError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn template_missing(path: &Path) -> Self {
        PmtError::TemplateNotFound {
            path: path.display().to_string(),
        }
    }
}

impl From<PmtError> for String {
    fn from(err: PmtError) -> Self {
        err.to_string()
    }
}

/// Attach a human-readable context to `std::io` failures
pub trait IoContext<T> {
    fn io_context<F, S>(self, context: F) -> PmtResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F, S>(self, context: F) -> PmtResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| PmtError::Io {
            context: context().into(),
            source,
        })
    }
}
