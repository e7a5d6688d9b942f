use std::borrow::Cow;

pub const DEFAULT_USER_FILTER: &str =
    "(&(objectCategory=person)(!(userAccountControl:1.2.840.113556.1.4.803:=2))(proxyAddresses=?))";
pub const DEFAULT_FOLDER_FILTER: &str = "(&(objectClass=publicFolder)(proxyAddresses=?))";

/// A search filter template with `?` placeholders for the escaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapFilter {
    parts: Vec<String>,
}

impl LdapFilter {
    /// `None` when the template has no `?` placeholder.
    pub fn parse(template: &str) -> Option<Self> {
        let parts: Vec<String> = template.split('?').map(str::to_string).collect();
        if parts.len() >= 2 { Some(Self { parts }) } else { None }
    }

    pub fn build(&self, value: &str) -> String {
        let escaped: Cow<'_, str> = ldap3::ldap_escape(value);
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push_str(&escaped);
            }
            out.push_str(part);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_filter_embeds_proxy_address() {
        let f = LdapFilter::parse(DEFAULT_USER_FILTER).unwrap();
        assert_eq!(
            f.build("smtp:jane@domain.co.uk"),
            "(&(objectCategory=person)(!(userAccountControl:1.2.840.113556.1.4.803:=2))(proxyAddresses=smtp:jane@domain.co.uk))"
        );
    }

    #[test]
    fn escapes_filter_metacharacters() {
        let f = LdapFilter::parse("(mail=?)").unwrap();
        assert_eq!(f.build("a*)(uid=*"), "(mail=a\\2a\\29\\28uid=\\2a)");
    }

    #[test]
    fn repeats_every_placeholder() {
        let f = LdapFilter::parse("(|(mail=?)(proxyAddresses=?))").unwrap();
        assert_eq!(f.build("x"), "(|(mail=x)(proxyAddresses=x))");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(LdapFilter::parse("(objectClass=*)").is_none());
    }
}
