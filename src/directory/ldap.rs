use std::time::Duration;

use ldap3::{LdapConn, LdapConnSettings, LdapError, Scope, SearchEntry};

use super::error::{DirectoryError, Stage};
use super::types::{DirectoryEntry, DirectorySettings, TlsMode};
use super::{DirectoryConnector, DirectorySession};

/// Opens real LDAP sessions through `ldap3`'s blocking API.
#[derive(Debug, Clone, Copy, Default)]
pub struct LdapConnector;

pub struct LdapSession {
    conn: LdapConn,
    timeout: Duration,
    endpoint: String,
}

impl DirectoryConnector for LdapConnector {
    type Session = LdapSession;

    fn connect(&self, settings: &DirectorySettings) -> Result<LdapSession, DirectoryError> {
        if settings.allow_invalid_certs && settings.tls != TlsMode::None {
            tracing::warn!(
                endpoint = %settings.endpoint(),
                "TLS certificate verification disabled for directory connection"
            );
        }
        if settings.tls == TlsMode::None {
            tracing::warn!(endpoint = %settings.endpoint(), "directory connection is not encrypted");
        }

        let conn_settings = LdapConnSettings::new()
            .set_conn_timeout(settings.timeout)
            .set_starttls(settings.tls == TlsMode::StartTls)
            .set_no_tls_verify(settings.allow_invalid_certs);

        let url = settings.url();
        tracing::debug!(%url, timeout = ?settings.timeout, "connecting to directory");
        let conn = LdapConn::with_settings(conn_settings, &url)
            .map_err(|err| classify(err, Stage::Connect, &settings.endpoint()))?;

        Ok(LdapSession {
            conn,
            timeout: settings.timeout,
            endpoint: settings.endpoint(),
        })
    }
}

impl DirectorySession for LdapSession {
    fn bind(&mut self, dn: &str, password: &str) -> Result<(), DirectoryError> {
        self.conn
            .with_timeout(self.timeout)
            .simple_bind(dn, password)
            .and_then(|res| res.success())
            .map_err(|err| classify(err, Stage::Bind, dn))?;
        Ok(())
    }

    fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let (entries, _res) = self
            .conn
            .with_timeout(self.timeout)
            .search(base, Scope::Subtree, filter, attrs.to_vec())
            .and_then(|rs| rs.success())
            .map_err(|err| classify(err, Stage::Search, base))?;

        // les références (referrals) ne sont jamais suivies
        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(|entry| DirectoryEntry {
                dn: entry.dn,
                attrs: entry.attrs,
            })
            .collect())
    }

    fn unbind(&mut self) -> Result<(), DirectoryError> {
        self.conn
            .unbind()
            .map_err(|err| DirectoryError::connection(self.endpoint.as_str(), err))
    }
}

/// Map an `ldap3` error onto the tagged union, given where it happened.
/// `subject` is the endpoint, bind DN or search base for the stage.
fn classify(err: LdapError, stage: Stage, subject: &str) -> DirectoryError {
    match (&err, stage) {
        (LdapError::Timeout { .. }, _) => DirectoryError::timeout(stage),
        (_, Stage::Connect) => DirectoryError::connection(subject, &err),
        (LdapError::LdapResult { .. }, Stage::Bind) => DirectoryError::auth(subject, &err),
        (LdapError::LdapResult { .. } | LdapError::FilterParsing { .. }, Stage::Search) => {
            DirectoryError::query(subject, &err)
        }
        (_, _) => DirectoryError::connection(subject, &err),
    }
}
