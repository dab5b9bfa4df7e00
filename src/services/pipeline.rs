//! Validation-and-pricing pipeline.
//!
//! Stages run in a fixed order and the first failure rejects the submission:
//! field presence, partner authentication, signature, freshness, item
//! reconciliation, then discount computation (which cannot fail).

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info};

use crate::domain::{PartnerSecret, PricingResult, TransactionRequest};
use crate::error::ValidationError;
use crate::ports::{Clock, PartnerDirectory, SystemClock};
use crate::services::{discount, freshness, reconciler, signature};
use crate::validation::validate_required_fields;

/// Stages that can reject a submission. Discount computation always succeeds,
/// so it has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FieldPresence,
    PartnerAuth,
    SignatureCheck,
    FreshnessCheck,
    ItemReconciliation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FieldPresence => "field_presence",
            Stage::PartnerAuth => "partner_auth",
            Stage::SignatureCheck => "signature_check",
            Stage::FreshnessCheck => "freshness_check",
            Stage::ItemReconciliation => "item_reconciliation",
        };
        f.write_str(name)
    }
}

/// A rejection together with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub stage: Stage,
    pub reason: ValidationError,
}

impl Rejection {
    pub fn new(stage: Stage, reason: ValidationError) -> Self {
        Self { stage, reason }
    }

    fn at(stage: Stage) -> impl FnOnce(ValidationError) -> Rejection {
        move |reason| Rejection::new(stage, reason)
    }
}

/// Stateless between calls; share one instance across all requests.
#[derive(Clone)]
pub struct ValidationPipeline {
    directory: Arc<dyn PartnerDirectory>,
    clock: Arc<dyn Clock>,
    freshness_window: Duration,
}

impl ValidationPipeline {
    pub fn new(directory: Arc<dyn PartnerDirectory>) -> Self {
        Self {
            directory,
            clock: Arc::new(SystemClock),
            freshness_window: freshness::default_window(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    pub fn directory(&self) -> &dyn PartnerDirectory {
        self.directory.as_ref()
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Runs every stage. Panics raised by a stage are contained here and
    /// reported as `InternalFault`.
    pub fn process(&self, request: &TransactionRequest) -> Result<PricingResult, ValidationError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run_stages(request))) {
            Ok(Ok(pricing)) => {
                info!(
                    partner_key = %request.partner_key,
                    partner_ref_no = %request.partner_ref_no,
                    total_amount = pricing.total_amount,
                    discount = pricing.discount_amount,
                    final_amount = pricing.final_amount,
                    "Transaction accepted"
                );
                Ok(pricing)
            }
            Ok(Err(rejection)) => {
                info!(
                    stage = %rejection.stage,
                    partner_key = %request.partner_key,
                    partner_ref_no = %request.partner_ref_no,
                    reason = %rejection.reason,
                    "Transaction rejected"
                );
                Err(rejection.reason)
            }
            Err(_) => {
                error!(
                    partner_key = %request.partner_key,
                    partner_ref_no = %request.partner_ref_no,
                    "Validation pipeline panicked"
                );
                Err(ValidationError::InternalFault)
            }
        }
    }

    /// Same as [`process`](Self::process) but without the panic guard and
    /// with the failing stage attached.
    pub fn run_stages(&self, request: &TransactionRequest) -> Result<PricingResult, Rejection> {
        validate_required_fields(request).map_err(Rejection::at(Stage::FieldPresence))?;

        let secret = self
            .authenticate(request)
            .map_err(Rejection::at(Stage::PartnerAuth))?;

        if !signature::verify(request, secret.expose()) {
            return Err(Rejection::new(
                Stage::SignatureCheck,
                ValidationError::AccessDenied,
            ));
        }

        if !freshness::is_fresh(&request.timestamp, self.clock.now(), self.freshness_window) {
            return Err(Rejection::new(Stage::FreshnessCheck, ValidationError::Expired));
        }

        if let Some(items) = request.items.as_deref().filter(|items| !items.is_empty()) {
            reconciler::reconcile(items, request.total_amount)
                .map_err(Rejection::at(Stage::ItemReconciliation))?;
        }

        Ok(discount::price(request.total_amount))
    }

    /// Unknown partner and wrong password are indistinguishable to the caller.
    fn authenticate(&self, request: &TransactionRequest) -> Result<PartnerSecret, ValidationError> {
        match self.directory.lookup(&request.partner_key) {
            Ok(Some(secret)) if secret.matches(&request.partner_password) => Ok(secret),
            Ok(_) => Err(ValidationError::AccessDenied),
            Err(err) => {
                error!(
                    partner_key = %request.partner_key,
                    error = %err,
                    "Partner directory lookup failed"
                );
                Err(ValidationError::InternalFault)
            }
        }
    }
}
