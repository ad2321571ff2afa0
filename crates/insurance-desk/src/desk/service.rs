use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::affiliate::{
    AffiliateLedger, CommissionCalculator, CommissionError, OfferCatalog, ReferralRejection,
    SeededVariants, VariantSource,
};
use crate::claims::{Claim, ClaimId, ClaimTransitionError};
use crate::partners::{PartnerDirectory, PartnerId};
use crate::policy::{AuditError, AuditTrigger, Policy, PolicyId};
use crate::records::{
    AuditCategory, AuditLog, AuditLogEntry, AuditStatus, Clock, IdGenerator, SequentialIds,
    SystemClock,
};

/// Desk shared between HTTP handlers. Each operation holds the lock for its whole duration.
pub type SharedDesk = Arc<Mutex<OperationsDesk>>;

/// Error raised by desk operations.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Commission(#[from] CommissionError),
    #[error(transparent)]
    InvalidClaimTransition(#[from] ClaimTransitionError),
    #[error("referral rejected: {0}")]
    ReferralRejected(#[from] ReferralRejection),
    #[error("policy {0} not found")]
    PolicyNotFound(PolicyId),
    #[error("claim {0} not found")]
    ClaimNotFound(ClaimId),
    #[error("partner {0} not found")]
    PartnerNotFound(PartnerId),
    #[error(
        "policy {policy_number} would have {sessions_remaining} sessions remaining, above the annual limit of {max_sessions_per_year}"
    )]
    SessionsExceedAnnualLimit {
        policy_number: String,
        sessions_remaining: u32,
        max_sessions_per_year: u32,
    },
}

impl DeskError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DeskError::PolicyNotFound(_)
                | DeskError::ClaimNotFound(_)
                | DeskError::PartnerNotFound(_)
        )
    }
}

/// Single owner of every in-memory collection: policies, claims, the audit log and the
/// affiliate ledger. Collaborators only hand in inputs and read back results.
pub struct OperationsDesk {
    pub(super) policies: Vec<Policy>,
    pub(super) claims: Vec<Claim>,
    pub(super) audit_log: AuditLog,
    pub(super) affiliates: AffiliateLedger,
    pub(super) partners: PartnerDirectory,
    pub(super) partner_notes: BTreeMap<PartnerId, String>,
    pub(super) calculator: CommissionCalculator,
    pub(super) trigger: AuditTrigger,
    pub(super) ids: Box<dyn IdGenerator>,
    pub(super) clock: Box<dyn Clock>,
    pub(super) variants: Box<dyn VariantSource>,
}

impl Default for OperationsDesk {
    fn default() -> Self {
        Self::new(PartnerDirectory::standard(), OfferCatalog::standard())
    }
}

impl OperationsDesk {
    pub fn new(partners: PartnerDirectory, offers: OfferCatalog) -> Self {
        Self {
            policies: Vec::new(),
            claims: Vec::new(),
            audit_log: AuditLog::new(),
            affiliates: AffiliateLedger::new(),
            partners,
            partner_notes: BTreeMap::new(),
            calculator: CommissionCalculator::new(offers),
            trigger: AuditTrigger::new(),
            ids: Box::new(SequentialIds::new()),
            clock: Box::new(SystemClock),
            variants: Box::new(SeededVariants::from_entropy()),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_variants(mut self, variants: impl VariantSource + 'static) -> Self {
        self.variants = Box::new(variants);
        self
    }

    pub fn into_shared(self) -> SharedDesk {
        Arc::new(Mutex::new(self))
    }

    /// Newest first.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn policy(&self, id: &PolicyId) -> Option<&Policy> {
        self.policies.iter().find(|policy| &policy.id == id)
    }

    /// Newest first.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn claim(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|claim| &claim.id == id)
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    pub fn affiliates(&self) -> &AffiliateLedger {
        &self.affiliates
    }

    pub fn partners(&self) -> &PartnerDirectory {
        &self.partners
    }

    /// Operator-written statement kept for a partner, if one was saved.
    pub fn partner_note(&self, id: &PartnerId) -> Option<&str> {
        self.partner_notes.get(id).map(String::as_str)
    }

    pub fn offers(&self) -> &OfferCatalog {
        self.calculator.catalog()
    }

    /// Log an operator or system action that has no dedicated desk operation.
    pub fn record_event(
        &mut self,
        action: &str,
        category: AuditCategory,
        details: impl Into<String>,
        status: AuditStatus,
    ) -> AuditLogEntry {
        let entry = AuditLogEntry::stamp(
            self.ids.as_mut(),
            self.clock.as_ref(),
            action,
            category,
            details,
            status,
        );
        self.audit_log.append(entry.clone());
        entry
    }

    /// Destroy the whole audit log at once.
    pub fn purge_audit_log(&mut self) -> usize {
        let purged = self.audit_log.purge();
        tracing::warn!(purged, "audit log purged");
        purged
    }
}
