use tracing::{debug, info};

use super::service::{DeskError, OperationsDesk};
use crate::policy::{NewPolicy, Policy, PolicyHistoryEntry, PolicyId, VerificationStatus};
use crate::records::{AuditCategory, AuditStatus};

const PROVISIONED_EVENT: &str = "Policy Provisioned: Initial History Saved";

fn ensure_session_limit(
    policy_number: &str,
    sessions_remaining: u32,
    max_sessions_per_year: u32,
) -> Result<(), DeskError> {
    if sessions_remaining > max_sessions_per_year {
        return Err(DeskError::SessionsExceedAnnualLimit {
            policy_number: policy_number.to_string(),
            sessions_remaining,
            max_sessions_per_year,
        });
    }
    Ok(())
}

impl OperationsDesk {
    /// Link a new policy, seeding its history with a provisioning entry.
    pub fn link_policy(&mut self, intake: NewPolicy) -> Result<Policy, DeskError> {
        ensure_session_limit(
            &intake.policy_number,
            intake.sessions_remaining,
            intake.max_sessions_per_year,
        )?;

        let id = PolicyId(self.ids.next_id("pol"));
        let provisioned = PolicyHistoryEntry {
            id: self.ids.next_id("h"),
            timestamp: self.clock.now(),
            event: PROVISIONED_EVENT.to_string(),
            field: None,
            old_value: None,
            new_value: None,
        };
        let policy = intake.into_policy(id, provisioned);

        self.policies.insert(0, policy.clone());
        self.record_event(
            "New Policy Linked",
            AuditCategory::Policy,
            format!(
                "Linked policy {} for {}",
                policy.policy_number, policy.policy_holder_name
            ),
            AuditStatus::Success,
        );
        info!(policy = %policy.id, number = %policy.policy_number, "policy linked");
        Ok(policy)
    }

    /// Replace the stored version of `id` with `updated`, auditing watched-field changes.
    ///
    /// The stored history always carries over; whatever history `updated` brings is ignored.
    pub fn update_policy(
        &mut self,
        id: &PolicyId,
        mut updated: Policy,
    ) -> Result<Policy, DeskError> {
        let index = self
            .policies
            .iter()
            .position(|policy| &policy.id == id)
            .ok_or_else(|| DeskError::PolicyNotFound(id.clone()))?;

        ensure_session_limit(
            &updated.policy_number,
            updated.sessions_remaining,
            updated.max_sessions_per_year,
        )?;

        updated.history = self.policies[index].history.clone();
        let outcome = self.trigger.apply(
            &self.policies[index],
            updated,
            self.ids.as_mut(),
            self.clock.as_ref(),
        )?;

        if outcome.is_silent() {
            debug!(policy = %id, "policy updated without watched changes");
        } else {
            info!(policy = %id, changed = ?outcome.changed, "policy auto-audit recorded");
        }

        self.audit_log.append_all(outcome.log_entries);
        self.policies[index] = outcome.policy.clone();
        Ok(outcome.policy)
    }

    /// Record a benefits check and mark the matching policy verified, if one is linked.
    pub fn verify_benefits(&mut self, identifier: &str) -> Result<Option<Policy>, DeskError> {
        let identifier = identifier.trim();
        self.record_event(
            "Benefits Verified",
            AuditCategory::Verification,
            format!("Verified benefits for policy identifier: {identifier}"),
            AuditStatus::Success,
        );

        let Some(current) = self
            .policies
            .iter()
            .find(|policy| policy.matches_identifier(identifier))
            .cloned()
        else {
            debug!(identifier, "benefits verified for an unlinked policy");
            return Ok(None);
        };

        let id = current.id.clone();
        let mut updated = current;
        updated.verification_status = VerificationStatus::Verified;
        self.update_policy(&id, updated).map(Some)
    }

    /// Operator action: drop a policy's whole history at once.
    pub fn clear_policy_history(&mut self, id: &PolicyId) -> Result<usize, DeskError> {
        let policy = self
            .policies
            .iter_mut()
            .find(|policy| &policy.id == id)
            .ok_or_else(|| DeskError::PolicyNotFound(id.clone()))?;

        let cleared = policy.history.clear();
        let details = format!(
            "Cleared {cleared} history entries for {}",
            policy.policy_number
        );
        self.record_event(
            "Policy History Cleared",
            AuditCategory::Policy,
            details,
            AuditStatus::Warning,
        );
        Ok(cleared)
    }
}
