//! Directory-service access for the callout.
//!
//! The callout only needs a handful of operations (connect, bind, subtree
//! search, unbind); they sit behind [`DirectoryConnector`] and
//! [`DirectorySession`] so the verification sequence can run against the
//! `ldap3` backend ([`LdapConnector`]) or a stub in tests.

mod error;
mod filter;
mod ldap;
mod types;

pub use error::{DirectoryError, Stage};
pub use filter::{DEFAULT_FOLDER_FILTER, DEFAULT_USER_FILTER, LdapFilter};
pub use ldap::{LdapConnector, LdapSession};
pub use types::{DirectoryEntry, DirectorySettings, TlsMode};

pub trait DirectoryConnector {
    type Session: DirectorySession;

    fn connect(&self, settings: &DirectorySettings) -> Result<Self::Session, DirectoryError>;
}

pub trait DirectorySession {
    fn bind(&mut self, dn: &str, password: &str) -> Result<(), DirectoryError>;

    /// Subtree search under `base`, returning only `attrs`.
    fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError>;

    fn unbind(&mut self) -> Result<(), DirectoryError>;
}
