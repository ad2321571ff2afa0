use chrono::{NaiveDate, TimeZone, Utc};

use crate::policy::domain::{
    Policy, PolicyHistoryEntry, PolicyId, Relationship, VerificationStatus,
};
use crate::records::{FixedClock, Journal};

pub(super) fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 15, 0)
            .single()
            .expect("valid timestamp"),
    )
}

pub(super) fn policy() -> Policy {
    let mut history = Journal::new();
    history.record(PolicyHistoryEntry {
        id: "h-seed".to_string(),
        timestamp: clock().0,
        event: "Policy Provisioned: Initial History Saved".to_string(),
        field: None,
        old_value: None,
        new_value: None,
    });

    Policy {
        id: PolicyId("p1".to_string()),
        patient_id: "u1".to_string(),
        insurance_company_id: "c1".to_string(),
        policy_number: "BAJ-992211".to_string(),
        member_id: Some("MBR-101".to_string()),
        group_number: None,
        policy_holder_name: "Asha Menon".to_string(),
        relationship: Relationship::PolicyHolder,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        end_date: None,
        verification_status: VerificationStatus::Verified,
        sessions_remaining: 10,
        max_sessions_per_year: 12,
        copay_amount: 500,
        coverage_percent: 80,
        deductible_amount: 5000,
        deductible_remaining: 1200,
        requires_pre_auth: false,
        pre_auth_obtained: false,
        pre_auth_number: None,
        history,
    }
}
