//! The verification callout: configuration, verdicts and the linear
//! syntax → domain → directory sequence that produces them.

mod error;
mod options;
mod types;
mod verify;

pub use error::ConfigError;
pub use options::VerifierConfig;
pub use types::{
    AcceptMode, EXIT_ACCEPTED, EXIT_ACCEPTED_REMOTE, EXIT_REJECTED, EXIT_TEMPORARY, Invocation,
    LookupOutcome, Response, TOKEN_INVALID, TOKEN_TEMPORARY, TOKEN_USAGE, VERSION, Verdict,
};
pub use verify::{AcceptedDomain, Callout, decide};
