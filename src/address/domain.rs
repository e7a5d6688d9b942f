use super::DomainMatch;

/// Compare a candidate domain with the accepted one.
pub fn domain_matches(candidate: &str, accepted: &str, mode: DomainMatch) -> bool {
    match mode {
        DomainMatch::Exact => candidate == accepted,
        DomainMatch::CaseInsensitive => {
            // un échec IDNA d'un côté ou de l'autre = pas de correspondance
            match (
                idna::domain_to_ascii(candidate),
                idna::domain_to_ascii(accepted),
            ) {
                (Ok(c), Ok(a)) => !c.is_empty() && c == a,
                _ => false,
            }
        }
    }
}
