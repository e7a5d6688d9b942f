#![forbid(unsafe_code)]
//! mailverify_lib — callout de vérification d'adresses destinataires (LDAP)
//!
//! A mail relay runs the callout once per recipient. The address is checked
//! for a separator and an accepted domain, then looked up in the directory
//! (user subtree first, public folders second). The verdict is reported as
//! an exit code plus two lines on stdout:
//!
//! | verdict | exit | first line |
//! |---|---|---|
//! | accepted | 0 | blank |
//! | malformed / foreign domain / unknown | 2 | `invalid mailbox` |
//! | directory error | 3 | `temporary error` |
//! | usage error | 3 | `error` |

pub mod address;
pub mod callout;
pub mod directory;

pub use address::{AddressError, CandidateAddress, DomainMatch, domain_matches, parse_address};
pub use callout::{
    AcceptMode, AcceptedDomain, Callout, ConfigError, Invocation, LookupOutcome, Response,
    Verdict, VerifierConfig, decide,
};
pub use directory::{
    DirectoryConnector, DirectoryEntry, DirectoryError, DirectorySession, DirectorySettings,
    LdapConnector, LdapFilter, TlsMode,
};
