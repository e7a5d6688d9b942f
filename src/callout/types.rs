use serde::Deserialize;

use crate::directory::DirectoryError;

/// Version string printed for `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const EXIT_ACCEPTED: i32 = 0;
pub const EXIT_ACCEPTED_REMOTE: i32 = 1;
pub const EXIT_REJECTED: i32 = 2;
pub const EXIT_TEMPORARY: i32 = 3;

pub const TOKEN_INVALID: &str = "invalid mailbox";
pub const TOKEN_TEMPORARY: &str = "temporary error";
pub const TOKEN_USAGE: &str = "error";

/// What the relay asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Version,
    Verify {
        address: String,
        /// trailing fields appended by the relay (sender, client IP, ...)
        context: Vec<String>,
    },
}

/// Result of the directory lookup for a well-formed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found { mailbox: String },
    NotFound,
    Failed(DirectoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted { mailbox: String },
    RejectedMalformed { address: String },
    RejectedUnknownMailbox { address: String },
    TemporaryFailure { reason: String },
    VersionQuery,
    UsageError { reason: String },
}

impl Verdict {
    /// Whether the relay should retry later rather than reject.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::TemporaryFailure { .. } | Self::UsageError { .. })
    }
}

/// Exit code used for an accepted recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptMode {
    /// exit 0: local mailbox
    #[default]
    Local,
    /// exit 1: valid address, relayed onwards
    Remote,
}

/// Exit code plus the lines written to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl Response {
    pub fn from_verdict(verdict: &Verdict, accept_mode: AcceptMode) -> Self {
        match verdict {
            Verdict::Accepted { mailbox } => Self::new(
                match accept_mode {
                    AcceptMode::Local => EXIT_ACCEPTED,
                    AcceptMode::Remote => EXIT_ACCEPTED_REMOTE,
                },
                ["", mailbox.as_str()],
            ),
            Verdict::RejectedMalformed { address }
            | Verdict::RejectedUnknownMailbox { address } => {
                let detail = format!("{TOKEN_INVALID}: {address}");
                Self::new(EXIT_REJECTED, [TOKEN_INVALID, detail.as_str()])
            }
            Verdict::TemporaryFailure { reason } => {
                Self::new(EXIT_TEMPORARY, [TOKEN_TEMPORARY, reason.as_str()])
            }
            Verdict::VersionQuery => Self::new(EXIT_ACCEPTED, [VERSION]),
            Verdict::UsageError { reason } => {
                Self::new(EXIT_TEMPORARY, [TOKEN_USAGE, reason.as_str()])
            }
        }
    }

    fn new<const N: usize>(exit_code: i32, lines: [&str; N]) -> Self {
        Self {
            exit_code,
            // une ligne de sortie ne doit jamais en devenir deux
            lines: lines.iter().map(|l| single_line(l)).collect(),
        }
    }

    /// Text for stdout: every line newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
