//! Capabilities the validation pipeline depends on.
//! Implementations live in `adapters` so a real credential store or clock can
//! be swapped in without touching pipeline logic.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::PartnerSecret;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("partner directory unavailable: {0}")]
    Unavailable(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only lookup of partner key → shared secret.
pub trait PartnerDirectory: Send + Sync {
    /// `Ok(None)` means the partner is unknown.
    fn lookup(&self, partner_key: &str) -> DirectoryResult<Option<PartnerSecret>>;

    /// Number of partners known to the directory, when it can tell.
    fn partner_count(&self) -> Option<usize> {
        None
    }
}

/// Source of the server's notion of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
