//! Policy records and the auto-audit trigger that keeps their history honest.

pub mod domain;
mod trigger;

#[cfg(test)]
mod tests;

pub use domain::{
    FieldValue, NewPolicy, Policy, PolicyHistoryEntry, PolicyId, Relationship,
    VerificationStatus, WatchedField,
};
pub use trigger::{AuditError, AuditOutcome, AuditTrigger, AUTO_AUDIT_ACTION};
