//! FOLIO-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Top-level error type for the showcase.
///
/// The state machines themselves never fail; these cover the ambient layer
/// around them (config, content files, preferences, terminal runtime).
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("[FOLIO-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[FOLIO-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[FOLIO-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[FOLIO-2001] invalid content file {path}: {details}")]
    InvalidContent { path: PathBuf, details: String },

    #[error("[FOLIO-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[FOLIO-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[FOLIO-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[FOLIO-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl FolioError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "FOLIO-1001",
            Self::MissingConfig { .. } => "FOLIO-1002",
            Self::ConfigParse { .. } => "FOLIO-1003",
            Self::InvalidContent { .. } => "FOLIO-2001",
            Self::Serialization { .. } => "FOLIO-2101",
            Self::Io { .. } => "FOLIO-3002",
            Self::ChannelClosed { .. } => "FOLIO-3003",
            Self::Runtime { .. } => "FOLIO-3900",
        }
    }

    /// Whether the failure came from user-supplied input (config or content)
    /// rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::MissingConfig { .. }
                | Self::ConfigParse { .. }
                | Self::InvalidContent { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
