use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Claim, ClaimId, ClaimStatus, NewClaim};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimTransitionError {
    #[error("claim {claim} cannot be appealed while {status}")]
    NotAppealable { claim: ClaimId, status: ClaimStatus },
}

/// Build a freshly filed claim; filing goes straight to carrier review.
pub fn file(
    id: ClaimId,
    session_id: String,
    claim_number: String,
    intake: NewClaim,
    today: NaiveDate,
) -> Claim {
    Claim {
        id,
        session_id,
        claim_number,
        external_claim_id: None,
        service_date: intake.service_date,
        service_type: intake.service_type,
        diagnosis_code: intake.diagnosis_code,
        procedure_code: intake.procedure_code,
        billed_amount: intake.billed_amount,
        approved_amount: None,
        copay_amount: None,
        insurance_payment: None,
        status: ClaimStatus::UnderReview,
        denial_reason: None,
        denial_code: None,
        submitted_at: Some(today),
        updated_at: today,
        appeal_filed: false,
        appeal_notes: None,
    }
}

pub fn appeal(
    claim: &Claim,
    notes: Option<String>,
    today: NaiveDate,
) -> Result<Claim, ClaimTransitionError> {
    if !claim.status.is_appealable() {
        return Err(ClaimTransitionError::NotAppealable {
            claim: claim.id.clone(),
            status: claim.status,
        });
    }

    let mut appealed = claim.clone();
    appealed.status = ClaimStatus::Appealed;
    appealed.appeal_filed = true;
    appealed.appeal_notes = notes.or_else(|| claim.appeal_notes.clone());
    appealed.updated_at = today;
    Ok(appealed)
}

/// Statement reconciled against carrier records; only the touch date moves.
pub fn verify_statement(claim: &Claim, today: NaiveDate) -> Claim {
    let mut verified = claim.clone();
    verified.updated_at = today;
    verified
}

/// Dashboard figures across the claim book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    pub total_paid: u64,
    pub total_pending: u64,
    pub open_claims: usize,
    pub by_status: BTreeMap<ClaimStatus, usize>,
}

pub fn summarize<'a, I>(claims: I) -> ClaimSummary
where
    I: IntoIterator<Item = &'a Claim>,
{
    claims
        .into_iter()
        .fold(ClaimSummary::default(), |mut summary, claim| {
            if claim.status == ClaimStatus::Paid {
                summary.total_paid += claim.insurance_payment.unwrap_or(0);
            }
            if claim.status.is_awaiting_payment() {
                summary.total_pending += claim.billed_amount;
            }
            if claim.status.is_open() {
                summary.open_claims += 1;
            }
            *summary.by_status.entry(claim.status).or_insert(0) += 1;
            summary
        })
}
