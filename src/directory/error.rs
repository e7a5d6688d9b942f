use std::fmt;

use thiserror::Error;

/// Step of the directory round-trip an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Bind,
    Search,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Connect => "connect",
            Stage::Bind => "bind",
            Stage::Search => "search",
        })
    }
}

/// Errors raised while talking to the directory service.
///
/// All variants are transient from the relay's point of view; the split only
/// exists for diagnostics. The bind DN is kept out of `Display`, since the
/// message ends up in the relay's logs; it shows in `Debug` only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("connection to {endpoint} failed: {reason}")]
    Connection { endpoint: String, reason: String },
    #[error("directory bind rejected: {reason}")]
    Auth { bind_dn: String, reason: String },
    #[error("directory timed out during {stage}")]
    Timeout { stage: Stage },
    #[error("search under {base} failed: {reason}")]
    Query { base: String, reason: String },
}

impl DirectoryError {
    pub(crate) fn connection(endpoint: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn auth(bind_dn: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Auth {
            bind_dn: bind_dn.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn timeout(stage: Stage) -> Self {
        Self::Timeout { stage }
    }

    pub(crate) fn query(base: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Query {
            base: base.into(),
            reason: reason.to_string(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Connection { .. } => Stage::Connect,
            Self::Auth { .. } => Stage::Bind,
            Self::Timeout { stage } => *stage,
            Self::Query { .. } => Stage::Search,
        }
    }
}
