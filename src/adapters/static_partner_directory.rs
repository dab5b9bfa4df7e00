//! In-memory implementation of PartnerDirectory.

use std::collections::HashMap;

use crate::domain::{PartnerCredential, PartnerSecret};
use crate::ports::{DirectoryResult, PartnerDirectory};

/// Partners known to the reference deployment.
pub const REFERENCE_PARTNERS: &[(&str, &str)] = &[
    ("FAKEGOOGLE", "RkFLRVBBU1NXT1JEMTIzNA=="),
    ("FAKEPEOPLE", "RkFLRVBBU1NXT1JENTc4"),
];

/// Immutable partner table, built once at startup and shared by every request.
#[derive(Debug, Clone, Default)]
pub struct StaticPartnerDirectory {
    partners: HashMap<String, PartnerSecret>,
}

impl StaticPartnerDirectory {
    pub fn new(credentials: impl IntoIterator<Item = PartnerCredential>) -> Self {
        let partners = credentials
            .into_iter()
            .map(|credential| (credential.partner_key, credential.secret))
            .collect();

        Self { partners }
    }

    pub fn reference() -> Self {
        Self::new(reference_credentials())
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

impl PartnerDirectory for StaticPartnerDirectory {
    fn lookup(&self, partner_key: &str) -> DirectoryResult<Option<PartnerSecret>> {
        Ok(self.partners.get(partner_key).cloned())
    }

    fn partner_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

pub fn reference_credentials() -> Vec<PartnerCredential> {
    REFERENCE_PARTNERS
        .iter()
        .map(|(key, secret)| PartnerCredential::new(*key, *secret))
        .collect()
}
