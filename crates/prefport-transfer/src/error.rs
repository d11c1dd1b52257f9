//! Transfer error types.
//!
//! Errors keep their precise cause for logs, while [`TransferError::user_message`]
//! collapses them into the two outcomes a user ever sees: export failed or
//! import failed.

use std::path::PathBuf;

use prefport_model::ValueKind;
use thiserror::Error;

/// Why a single value envelope could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("value envelope is not an object")]
    NotAnObject,

    #[error("missing value type")]
    MissingType,

    #[error("unknown value type '{0}'")]
    UnknownType(String),

    #[error("missing value")]
    MissingValue,

    #[error("expected a {expected} value")]
    WrongShape { expected: ValueKind },

    #[error("value does not fit in a {kind}")]
    OutOfRange { kind: ValueKind },

    #[error("string_set member {index} is null")]
    NullMember { index: usize },

    #[error("string_set member {index} is not a string")]
    NonStringMember { index: usize },
}

/// Failure reported by a preference or prompt store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused to commit the new contents.
    #[error("store rejected the commit")]
    CommitRejected,

    /// File I/O error in a file-backed store.
    #[error("failed to {operation} store file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file-backed store holds data it cannot interpret.
    #[error("store file is corrupt: {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// A value cannot be represented by the store's format.
    #[error("value for '{key}' cannot be stored")]
    Unrepresentable { key: String },

    /// Any other collaborator failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Export or import failure.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Reading the current store contents failed during export.
    #[error("Failed to read current configuration")]
    StoreRead {
        #[source]
        source: StoreError,
    },

    /// The document could not be serialized.
    #[error("Failed to serialize configuration document")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// The byte sink is unavailable or a write failed.
    #[error("Failed to {operation} export target{}", target_suffix(.path))]
    Sink {
        operation: &'static str,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The byte source could not be read.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not JSON.
    #[error("Configuration document is not valid JSON")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// The JSON root is not an object.
    #[error("Configuration document root is not an object")]
    NotAnObject,

    /// Version or application identifier differ from this build.
    #[error("Configuration document metadata does not match (version {found_version:?}, appId {found_app_id:?})")]
    MetadataMismatch {
        found_version: Option<i64>,
        found_app_id: Option<String>,
    },

    /// The preferences object or the prompts array is absent or mistyped.
    #[error("Configuration document is missing the {section} section")]
    MissingSection { section: &'static str },

    /// A preference entry failed to decode.
    #[error("Invalid preference '{key}'")]
    InvalidPreference {
        key: String,
        #[source]
        source: DecodeError,
    },

    /// A prompt entry failed validation.
    #[error("Invalid prompt at index {index}: {reason}")]
    InvalidPrompt { index: usize, reason: &'static str },

    /// The pre-import snapshot could not be taken.
    #[error("Failed to snapshot current configuration")]
    Snapshot {
        #[source]
        source: StoreError,
    },

    /// Replacing a store failed after a successful parse. Rolled back.
    #[error("Failed to apply imported configuration")]
    Commit {
        #[source]
        source: StoreError,
    },
}

impl TransferError {
    /// Whether this error belongs to the import path.
    pub fn is_import_failure(&self) -> bool {
        !matches!(
            self,
            Self::StoreRead { .. } | Self::Serialization { .. } | Self::Sink { .. }
        )
    }

    /// Get a user-friendly message for this error.
    ///
    /// Import failures share one message; the cause stays in the logs.
    pub fn user_message(&self) -> String {
        if self.is_import_failure() {
            "Import failed. Your previous settings and prompts were kept.".to_string()
        } else {
            "Export failed. No configuration file was written.".to_string()
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Sink { .. } => {
                Some("Check that you have permission to write to this location.".into())
            }
            Self::Io { .. } => {
                Some("Check that the file exists and you have permission to read it.".into())
            }
            Self::Malformed { .. }
            | Self::NotAnObject
            | Self::MetadataMismatch { .. }
            | Self::MissingSection { .. }
            | Self::InvalidPreference { .. }
            | Self::InvalidPrompt { .. } => Some(
                "Make sure you selected a configuration file exported by this application."
                    .into(),
            ),
            Self::StoreRead { .. }
            | Self::Serialization { .. }
            | Self::Snapshot { .. }
            | Self::Commit { .. } => None,
        }
    }
}

fn target_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(": {}", p.display()))
        .unwrap_or_default()
}

/// Result type alias for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;
