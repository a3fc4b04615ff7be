use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a [`GameConfig`](crate::config::GameConfig).
///
/// The simulation itself never fails; running out of lives is a phase,
/// not an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
