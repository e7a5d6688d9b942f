use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the callout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("cannot read bind password file {path}: {source}")]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(source: toml::de::Error) -> Self {
        Self::Parse { source }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn password_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PasswordFile {
            path: path.into(),
            source,
        }
    }
}
