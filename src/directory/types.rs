use std::collections::HashMap;
use std::time::Duration;

/// Transport security for the directory connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// `ldaps://`, TLS from the first byte
    #[default]
    Ldaps,
    /// `ldap://` upgraded with StartTLS
    StartTls,
    /// plaintext `ldap://`, explicit opt-in only
    None,
}

/// Everything needed to open and authenticate one directory session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub allow_invalid_certs: bool,
    pub timeout: Duration,
}

impl DirectorySettings {
    pub fn url(&self) -> String {
        let scheme = match self.tls {
            TlsMode::Ldaps => "ldaps",
            TlsMode::StartTls | TlsMode::None => "ldap",
        };
        format!("{scheme}://{}", self.endpoint())
    }

    /// `host:port`, IPv6 literals bracketed.
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// One search result entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attrs: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attrs: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.entry(name.into()).or_default().push(value.into());
        self
    }

    /// First non-empty value of `name`. Attribute names compare
    /// case-insensitively, as LDAP servers echo them in their own case.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .flat_map(|(_, v)| v.iter())
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }
}
