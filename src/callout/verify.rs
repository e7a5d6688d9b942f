use crate::address::{CandidateAddress, DomainMatch, domain_matches, parse_address};
use crate::directory::{
    DirectoryConnector, DirectoryError, DirectorySession, DirectorySettings, LdapFilter,
};

use super::error::ConfigError;
use super::options::VerifierConfig;
use super::types::{AcceptMode, Invocation, LookupOutcome, Response, Verdict};

/// The domain recipients must belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedDomain {
    pub name: String,
    pub mode: DomainMatch,
}

impl AcceptedDomain {
    pub fn new(name: impl Into<String>, mode: DomainMatch) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

/// Turn an invocation into a verdict.
///
/// `lookup` is only called for a syntactically valid address in the
/// accepted domain, so version queries and malformed input never touch the
/// network.
pub fn decide<F>(invocation: &Invocation, domain: &AcceptedDomain, lookup: F) -> Verdict
where
    F: FnOnce(&CandidateAddress) -> LookupOutcome,
{
    let address = match invocation {
        Invocation::Version => return Verdict::VersionQuery,
        Invocation::Verify { address, .. } => address,
    };

    let candidate = match parse_address(address) {
        Ok(candidate) => candidate,
        Err(err) => {
            tracing::debug!(%err, "malformed address");
            return Verdict::RejectedMalformed {
                address: address.clone(),
            };
        }
    };

    if !domain_matches(&candidate.domain, &domain.name, domain.mode) {
        tracing::debug!(domain = %candidate.domain, accepted = %domain.name, "domain not accepted");
        return Verdict::RejectedMalformed {
            address: address.clone(),
        };
    }

    match lookup(&candidate) {
        LookupOutcome::Found { mailbox } => Verdict::Accepted { mailbox },
        LookupOutcome::NotFound => Verdict::RejectedUnknownMailbox {
            address: address.clone(),
        },
        LookupOutcome::Failed(err) => {
            tracing::warn!(stage = %err.stage(), detail = ?err, "directory lookup failed");
            Verdict::TemporaryFailure {
                reason: err.to_string(),
            }
        }
    }
}

/// A fully resolved callout: filters compiled, password read.
#[derive(Clone)]
pub struct Callout {
    domain: AcceptedDomain,
    settings: DirectorySettings,
    bind_dn: String,
    bind_password: String,
    user_search_base: String,
    folder_search_base: String,
    user_filter: LdapFilter,
    folder_filter: LdapFilter,
    proxy_prefix: String,
    mail_attribute: String,
    accept_mode: AcceptMode,
}

impl Callout {
    pub fn from_config(config: &VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            domain: AcceptedDomain::new(config.accepted_domain.clone(), config.domain_match),
            settings: config.directory_settings(),
            bind_dn: config.bind_dn.clone(),
            bind_password: config.bind_password()?,
            user_search_base: config.user_search_base.clone(),
            folder_search_base: config.folder_search_base.clone(),
            user_filter: config.user_filter()?,
            folder_filter: config.folder_filter()?,
            proxy_prefix: config.proxy_prefix.clone(),
            mail_attribute: config.mail_attribute.clone(),
            accept_mode: config.accept_mode,
        })
    }

    pub fn accept_mode(&self) -> AcceptMode {
        self.accept_mode
    }

    pub fn verify_address<C>(&self, address: &str, connector: &C) -> Verdict
    where
        C: DirectoryConnector,
    {
        self.run(
            &Invocation::Verify {
                address: address.to_string(),
                context: Vec::new(),
            },
            connector,
        )
    }

    pub fn run<C>(&self, invocation: &Invocation, connector: &C) -> Verdict
    where
        C: DirectoryConnector,
    {
        decide(invocation, &self.domain, |candidate| {
            match self.lookup(candidate, connector) {
                Ok(Some(mailbox)) => LookupOutcome::Found { mailbox },
                Ok(None) => LookupOutcome::NotFound,
                Err(err) => LookupOutcome::Failed(err),
            }
        })
    }

    pub fn respond<C>(&self, invocation: &Invocation, connector: &C) -> Response
    where
        C: DirectoryConnector,
    {
        Response::from_verdict(&self.run(invocation, connector), self.accept_mode)
    }

    fn lookup<C>(
        &self,
        candidate: &CandidateAddress,
        connector: &C,
    ) -> Result<Option<String>, DirectoryError>
    where
        C: DirectoryConnector,
    {
        let mut session = connector.connect(&self.settings)?;
        let result = self.search(&mut session, candidate);
        if let Err(err) = session.unbind() {
            tracing::warn!(%err, "directory unbind failed");
        }
        result
    }

    fn search<S>(
        &self,
        session: &mut S,
        candidate: &CandidateAddress,
    ) -> Result<Option<String>, DirectoryError>
    where
        S: DirectorySession,
    {
        session.bind(&self.bind_dn, &self.bind_password)?;

        let proxy_address = format!("{}{}", self.proxy_prefix, candidate.original);
        let attrs = [self.mail_attribute.as_str()];

        for (subtree, base, filter) in [
            ("users", &self.user_search_base, &self.user_filter),
            ("folders", &self.folder_search_base, &self.folder_filter),
        ] {
            let entries = session.search(base, &filter.build(&proxy_address), &attrs)?;
            tracing::debug!(subtree, base = %base, matches = entries.len(), "directory search");
            // exactement une entrée, sinon on passe au sous-arbre suivant
            if let [entry] = entries.as_slice() {
                let mailbox = entry
                    .first_value(&self.mail_attribute)
                    .unwrap_or(candidate.original.as_str());
                return Ok(Some(mailbox.to_string()));
            }
        }
        Ok(None)
    }
}
