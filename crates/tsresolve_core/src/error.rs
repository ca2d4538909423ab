use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Failure to produce a configuration for the requested top-level file.
///
/// Errors met while following `extends` never surface through this type;
/// they are logged and the base is skipped.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is missing or unreadable.
    #[error("failed to read tsconfig '{path}': {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid even after comment and trailing comma removal,
    /// or a recognized option has the wrong JSON type.
    #[error("malformed tsconfig '{path}': {source}")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::ReadFailure { path, .. } | ConfigError::MalformedConfig { path, .. } => {
                path
            }
        }
    }
}
