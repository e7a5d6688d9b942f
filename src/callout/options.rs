use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::address::DomainMatch;
use crate::directory::{
    DEFAULT_FOLDER_FILTER, DEFAULT_USER_FILTER, DirectorySettings, LdapFilter, TlsMode,
};

use super::error::ConfigError;
use super::types::AcceptMode;

/// Callout configuration, read from a TOML file at process start.
///
/// There are no built-in credentials and no built-in directory: `host`,
/// `bind_dn`, the password, both search bases and `accepted_domain` must be
/// supplied. TLS defaults to LDAPS with certificate verification on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    pub host: String,
    /// 636 for `ldaps`, 389 otherwise
    #[serde(default)]
    pub port: Option<u16>,
    pub bind_dn: String,
    #[serde(default)]
    pub bind_password: Option<String>,
    #[serde(default)]
    pub bind_password_file: Option<PathBuf>,
    pub user_search_base: String,
    pub folder_search_base: String,
    pub accepted_domain: String,
    #[serde(default = "default_timeout_seconds")]
    pub network_timeout_seconds: u64,
    #[serde(default)]
    pub tls: TlsMode,
    #[serde(default)]
    pub allow_invalid_certs: bool,
    #[serde(default)]
    pub domain_match: DomainMatch,
    #[serde(default = "default_user_filter")]
    pub user_filter: String,
    #[serde(default = "default_folder_filter")]
    pub folder_filter: String,
    #[serde(default = "default_proxy_prefix")]
    pub proxy_prefix: String,
    #[serde(default = "default_mail_attribute")]
    pub mail_attribute: String,
    #[serde(default)]
    pub accept_mode: AcceptMode,
}

fn default_timeout_seconds() -> u64 {
    5
}

fn default_user_filter() -> String {
    DEFAULT_USER_FILTER.to_string()
}

fn default_folder_filter() -> String {
    DEFAULT_FOLDER_FILTER.to_string()
}

fn default_proxy_prefix() -> String {
    "smtp:".to_string()
}

fn default_mail_attribute() -> String {
    "mail".to_string()
}

impl VerifierConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::read(path, err))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("host", &self.host),
            ("bind_dn", &self.bind_dn),
            ("user_search_base", &self.user_search_base),
            ("folder_search_base", &self.folder_search_base),
            ("accepted_domain", &self.accepted_domain),
            ("mail_attribute", &self.mail_attribute),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        if self.port == Some(0) {
            return Err(ConfigError::invalid("port", "must be in 1..=65535"));
        }
        if self.network_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "network_timeout_seconds",
                "must be at least 1",
            ));
        }
        match (&self.bind_password, &self.bind_password_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    "bind_password",
                    "set either bind_password or bind_password_file, not both",
                ));
            }
            (None, None) => {
                return Err(ConfigError::invalid(
                    "bind_password",
                    "one of bind_password or bind_password_file is required",
                ));
            }
            _ => {}
        }
        self.user_filter()?;
        self.folder_filter()?;
        Ok(())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(match self.tls {
            TlsMode::Ldaps => 636,
            TlsMode::StartTls | TlsMode::None => 389,
        })
    }

    pub fn network_timeout(&self) -> Duration {
        Duration::from_secs(self.network_timeout_seconds)
    }

    pub fn directory_settings(&self) -> DirectorySettings {
        DirectorySettings {
            host: self.host.clone(),
            port: self.port(),
            tls: self.tls,
            allow_invalid_certs: self.allow_invalid_certs,
            timeout: self.network_timeout(),
        }
    }

    pub fn user_filter(&self) -> Result<LdapFilter, ConfigError> {
        LdapFilter::parse(&self.user_filter)
            .ok_or_else(|| ConfigError::invalid("user_filter", "missing '?' placeholder"))
    }

    pub fn folder_filter(&self) -> Result<LdapFilter, ConfigError> {
        LdapFilter::parse(&self.folder_filter)
            .ok_or_else(|| ConfigError::invalid("folder_filter", "missing '?' placeholder"))
    }

    /// Inline password, or the first line of `bind_password_file`.
    pub fn bind_password(&self) -> Result<String, ConfigError> {
        if let Some(password) = &self.bind_password {
            return Ok(password.clone());
        }
        match &self.bind_password_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|err| ConfigError::password_file(path, err))?;
                Ok(raw.lines().next().unwrap_or_default().to_string())
            }
            None => Err(ConfigError::invalid(
                "bind_password",
                "one of bind_password or bind_password_file is required",
            )),
        }
    }
}
