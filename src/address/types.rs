use thiserror::Error;

/// A recipient address as handed over by the relay, split at its separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAddress {
    pub original: String,
    pub local: String,
    pub domain: String,
}

/// How the domain part is compared with the accepted domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainMatch {
    /// byte-for-byte, as configured
    #[default]
    Exact,
    /// IDNA/ASCII-lowercased on both sides
    CaseInsensitive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("no '@' separator in {0:?}")]
    MissingSeparator(String),
    #[error("empty local part in {0:?}")]
    EmptyLocalPart(String),
}
