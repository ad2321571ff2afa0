use chrono::{NaiveDate, TimeZone, Utc};
use insurance_desk::policy::{
    AuditError, AuditTrigger, FieldValue, NewPolicy, Policy, Relationship, VerificationStatus,
    WatchedField,
};
use insurance_desk::records::{AuditCategory, AuditStatus, FixedClock, SequentialIds};
use insurance_desk::OperationsDesk;

fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    )
}

fn linked_policy() -> (OperationsDesk, Policy) {
    let mut desk = OperationsDesk::default()
        .with_ids(SequentialIds::new())
        .with_clock(clock());
    let policy = desk
        .link_policy(NewPolicy {
            patient_id: "u7".to_string(),
            insurance_company_id: "c2".to_string(),
            policy_number: "HDFC-4471".to_string(),
            member_id: None,
            group_number: Some("GRP-22".to_string()),
            policy_holder_name: "Kabir Rao".to_string(),
            relationship: Relationship::Spouse,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            end_date: None,
            verification_status: VerificationStatus::Pending,
            sessions_remaining: 20,
            max_sessions_per_year: 20,
            copay_amount: 750,
            coverage_percent: 75,
            deductible_amount: 2_500,
            deductible_remaining: 2_500,
            requires_pre_auth: true,
            pre_auth_obtained: false,
            pre_auth_number: None,
        })
        .expect("policy linked");
    (desk, policy)
}

#[test]
fn trigger_is_silent_for_unwatched_fields() {
    let (_, policy) = linked_policy();
    let mut ids = SequentialIds::resume_after(100);
    let mut updated = policy.clone();
    updated.pre_auth_obtained = true;
    updated.pre_auth_number = Some("PA-1".to_string());
    updated.coverage_percent = 90;

    let outcome = AuditTrigger::new()
        .apply(&policy, updated.clone(), &mut ids, &clock())
        .expect("same policy");

    assert!(outcome.is_silent());
    assert!(outcome.log_entries.is_empty());
    assert_eq!(outcome.policy, updated);
}

#[test]
fn trigger_reports_every_watched_change_in_watch_order() {
    let (_, policy) = linked_policy();
    let mut ids = SequentialIds::resume_after(100);
    let mut updated = policy.clone();
    updated.verification_status = VerificationStatus::Verified;
    updated.copay_amount = 900;
    updated.sessions_remaining = 19;

    let outcome = AuditTrigger::new()
        .apply(&policy, updated, &mut ids, &clock())
        .expect("same policy");

    assert_eq!(
        outcome.changed,
        vec![
            WatchedField::SessionsRemaining,
            WatchedField::CopayAmount,
            WatchedField::VerificationStatus,
        ]
    );
    let details: Vec<_> = outcome
        .log_entries
        .iter()
        .map(|entry| entry.details.as_str())
        .collect();
    assert_eq!(
        details,
        vec![
            "System trigger recorded sessions_remaining change for HDFC-4471",
            "System trigger recorded copay_amount change for HDFC-4471",
            "System trigger recorded verification_status change for HDFC-4471",
        ]
    );
    assert!(outcome.log_entries.iter().all(|entry| {
        entry.action == "Policy Auto-Audit"
            && entry.category == AuditCategory::Policy
            && entry.status == AuditStatus::Info
            && entry.timestamp == clock().0
    }));

    let history: Vec<_> = outcome.policy.history.iter().collect();
    assert_eq!(history.len(), 4);
    assert_eq!(history[2].field, Some(WatchedField::SessionsRemaining));
    assert_eq!(history[2].old_value, Some(FieldValue::Count(20)));
    assert_eq!(history[2].new_value, Some(FieldValue::Count(19)));
    assert_eq!(
        history[0].new_value,
        Some(FieldValue::Status(VerificationStatus::Verified))
    );
}

#[test]
fn trigger_refuses_to_compare_different_policies() {
    let (_, policy) = linked_policy();
    let mut ids = SequentialIds::new();
    let mut other = policy.clone();
    other.id = insurance_desk::policy::PolicyId("pol-elsewhere".to_string());

    let err = AuditTrigger::new()
        .apply(&policy, other, &mut ids, &clock())
        .expect_err("ids differ");

    assert_eq!(
        err,
        AuditError::InvalidOperation {
            expected: policy.id.clone(),
            found: insurance_desk::policy::PolicyId("pol-elsewhere".to_string()),
        }
    );
}

#[test]
fn desk_keeps_policy_history_and_audit_log_in_step() {
    let (mut desk, policy) = linked_policy();

    for remaining in [19, 18, 17] {
        let mut next = desk.policy(&policy.id).cloned().expect("policy present");
        next.sessions_remaining = remaining;
        desk.update_policy(&policy.id, next).expect("update applied");
    }

    let stored = desk.policy(&policy.id).expect("policy present");
    let auto_entries = desk
        .audit_log()
        .entries()
        .iter()
        .filter(|entry| entry.action == "Policy Auto-Audit")
        .count();
    assert_eq!(stored.history.len(), 4);
    assert_eq!(auto_entries, 3);
    assert_eq!(
        stored.history.latest().and_then(|entry| entry.new_value),
        Some(FieldValue::Count(17))
    );
    assert_eq!(desk.audit_log().by_category(AuditCategory::Policy).len(), 4);
}
