//! Framework-agnostic domain types.

pub mod partner;
pub mod transaction;

pub use partner::{PartnerCredential, PartnerSecret};
pub use transaction::{LineItem, PricingResult, SubmitResponse, TransactionRequest};
