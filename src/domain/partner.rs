//! Partner credentials.

use std::fmt;

use subtle::ConstantTimeEq;

/// Shared secret of a partner. It is both the partner password and the
/// signing key, and is never decoded.
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerSecret(String);

/// A partner key paired with its shared secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerCredential {
    pub partner_key: String,
    pub secret: PartnerSecret,
}

impl PartnerSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Exact, constant-time comparison against a submitted password.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for PartnerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerSecret(****)")
    }
}

impl PartnerCredential {
    pub fn new(partner_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            partner_key: partner_key.into(),
            secret: PartnerSecret::new(secret),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_exact_password() {
        let secret = PartnerSecret::new("RkFLRVBBU1NXT1JENTc4");

        assert!(secret.matches("RkFLRVBBU1NXT1JENTc4"));
        assert!(!secret.matches("RkFLRVBBU1NXT1JENTc5"));
        assert!(!secret.matches("RkFLRVBBU1NXT1JENTc4 "));
        assert!(!secret.matches(""));
    }

    #[test]
    fn prefix_of_password_does_not_match() {
        let secret = PartnerSecret::new("RkFLRVBBU1NXT1JENTc4");

        assert!(!secret.matches("RkFLRVBBU1NXT1JENTc"));
        assert!(!secret.matches("R"));
        assert!(!PartnerSecret::new("").matches("R"));
        assert!(PartnerSecret::new("").matches(""));
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = PartnerCredential::new("FAKEPEOPLE", "RkFLRVBBU1NXT1JENTc4");
        let rendered = format!("{:?}", credential);

        assert!(rendered.contains("FAKEPEOPLE"));
        assert!(!rendered.contains("RkFLRVBBU1NXT1JENTc4"));
    }
}
