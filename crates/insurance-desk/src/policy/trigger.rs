use super::domain::{Policy, PolicyHistoryEntry, PolicyId, WatchedField};
use crate::records::{AuditCategory, AuditLogEntry, AuditStatus, Clock, IdGenerator};

pub const AUTO_AUDIT_ACTION: &str = "Policy Auto-Audit";

/// Raised when the trigger is handed two unrelated records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    #[error("cannot audit policy {found} against a prior version of policy {expected}")]
    InvalidOperation { expected: PolicyId, found: PolicyId },
}

/// Result of auditing one policy update.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutcome {
    /// The new version with one history entry prepended per changed watched field.
    pub policy: Policy,
    /// Changed watched fields, in watch-list order.
    pub changed: Vec<WatchedField>,
    /// System-wide log entries for the caller to append, in watch-list order.
    pub log_entries: Vec<AuditLogEntry>,
}

impl AuditOutcome {
    pub fn is_silent(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Diff-and-log trigger run on every policy update.
///
/// Only the fields in [`WatchedField::ordered`] are compared; anything else may change
/// without leaving a trace. The trigger never owns the audit log: entries are handed back
/// to the caller, which decides where they are stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditTrigger;

impl AuditTrigger {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        previous: &Policy,
        mut updated: Policy,
        ids: &mut dyn IdGenerator,
        clock: &dyn Clock,
    ) -> Result<AuditOutcome, AuditError> {
        if previous.id != updated.id {
            return Err(AuditError::InvalidOperation {
                expected: previous.id.clone(),
                found: updated.id.clone(),
            });
        }

        let mut changed = Vec::new();
        let mut log_entries = Vec::new();

        for field in WatchedField::ordered() {
            let before = field.read(previous);
            let after = field.read(&updated);
            if before == after {
                continue;
            }

            updated.history.record(PolicyHistoryEntry {
                id: ids.next_id("trig"),
                timestamp: clock.now(),
                event: format!("Auto-Trigger: {} modified", field.name()),
                field: Some(field),
                old_value: Some(before),
                new_value: Some(after),
            });
            log_entries.push(AuditLogEntry::stamp(
                ids,
                clock,
                AUTO_AUDIT_ACTION,
                AuditCategory::Policy,
                format!(
                    "System trigger recorded {} change for {}",
                    field.name(),
                    updated.policy_number
                ),
                AuditStatus::Info,
            ));
            changed.push(field);
        }

        Ok(AuditOutcome {
            policy: updated,
            changed,
            log_entries,
        })
    }
}
