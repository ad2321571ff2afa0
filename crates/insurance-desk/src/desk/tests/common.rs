use chrono::{NaiveDate, TimeZone, Utc};

use crate::affiliate::{AffiliateSegment, FixedVariant, ReferralRequest, Variant};
use crate::claims::NewClaim;
use crate::desk::OperationsDesk;
use crate::partners::PartnerId;
use crate::policy::{NewPolicy, Relationship, VerificationStatus};
use crate::records::{FixedClock, SequentialIds};

pub(super) fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 15, 0)
            .single()
            .expect("valid timestamp"),
    )
}

pub(super) fn desk() -> OperationsDesk {
    OperationsDesk::default()
        .with_ids(SequentialIds::new())
        .with_clock(clock())
        .with_variants(FixedVariant(Variant::B))
}

pub(super) fn new_policy() -> NewPolicy {
    NewPolicy {
        patient_id: "u1".to_string(),
        insurance_company_id: "c1".to_string(),
        policy_number: "BAJ-992211".to_string(),
        member_id: Some("MBR-101".to_string()),
        group_number: None,
        policy_holder_name: "Asha Menon".to_string(),
        relationship: Relationship::PolicyHolder,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        end_date: None,
        verification_status: VerificationStatus::Pending,
        sessions_remaining: 10,
        max_sessions_per_year: 12,
        copay_amount: 500,
        coverage_percent: 80,
        deductible_amount: 5000,
        deductible_remaining: 1200,
        requires_pre_auth: false,
        pre_auth_obtained: false,
        pre_auth_number: None,
    }
}

pub(super) fn new_claim() -> NewClaim {
    NewClaim {
        service_date: NaiveDate::from_ymd_opt(2025, 5, 28).expect("valid date"),
        diagnosis_code: "F41.1".to_string(),
        procedure_code: "90834".to_string(),
        billed_amount: 3_500,
        service_type: "psychotherapy".to_string(),
    }
}

pub(super) fn referral(
    partner: &str,
    segment: AffiliateSegment,
    policy_number: &str,
) -> ReferralRequest {
    ReferralRequest {
        partner_id: PartnerId(partner.to_string()),
        segment: segment.as_str().to_string(),
        policy_number: policy_number.to_string(),
        patient_email: "riya.k@example.com".to_string(),
    }
}
