mod domain;
mod types;

pub use domain::domain_matches;
pub use types::{AddressError, CandidateAddress, DomainMatch};

/// Split a candidate address at its first `@`.
///
/// The input is kept as given: no trimming, no case folding. Only the
/// presence of the separator and a non-empty local part are checked, deeper
/// syntax is left to the directory lookup.
pub fn parse_address(input: &str) -> Result<CandidateAddress, AddressError> {
    let (local, domain) = input
        .split_once('@')
        .ok_or_else(|| AddressError::MissingSeparator(input.to_string()))?;

    if local.is_empty() {
        return Err(AddressError::EmptyLocalPart(input.to_string()));
    }

    Ok(CandidateAddress {
        original: input.to_string(),
        local: local.to_string(),
        domain: domain.to_string(),
    })
}
