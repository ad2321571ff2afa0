use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{AffiliateDiscount, AffiliateSegment};
use super::commission::AffiliateTransaction;
use crate::partners::PartnerId;

/// Nominal value of one complimentary session when quoting customer savings.
pub const FREE_SESSION_VALUE: u64 = 1_500;

const FLAGGED_MARKERS: [&str; 2] = ["invalid", "fake"];

/// Referral submitted through a partner's benefit portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRequest {
    pub partner_id: PartnerId,
    /// Segment name as typed in the portal; parsed when the referral is verified.
    pub segment: String,
    pub policy_number: String,
    pub patient_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralRejection {
    #[error("policy number is required")]
    MissingPolicyNumber,
    #[error("policy {0} was not found with the carrier")]
    UnknownPolicy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferralStatus {
    Verified,
}

/// Proof that a referral passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateVerificationRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub segment: AffiliateSegment,
    pub policy_number: String,
    pub patient_email: String,
    pub status: ReferralStatus,
}

/// Everything produced by a successful referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralReceipt {
    pub record: AffiliateVerificationRecord,
    pub transaction: AffiliateTransaction,
    pub savings: u64,
    pub message: String,
}

/// Reject blank policy numbers and ones carrying a test marker.
pub fn screen_policy_number(raw: &str) -> Result<(), ReferralRejection> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ReferralRejection::MissingPolicyNumber);
    }
    if FLAGGED_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
    {
        return Err(ReferralRejection::UnknownPolicy(raw.trim().to_string()));
    }
    Ok(())
}

/// Direct discount plus the nominal value of any complimentary session.
pub fn customer_savings(offer: &AffiliateDiscount, discount_amount: u64) -> u64 {
    let bonus = if offer.free_sessions > 0 {
        FREE_SESSION_VALUE
    } else {
        0
    };
    discount_amount + bonus
}

pub(crate) fn welcome_message(patient_email: &str, offer: &AffiliateDiscount) -> String {
    let name = patient_email.split('@').next().unwrap_or(patient_email);
    if offer.free_sessions > 0 {
        format!(
            "Welcome, {name}! You qualify for {}% off + {} free session.",
            offer.discount_percent, offer.free_sessions
        )
    } else {
        format!(
            "Welcome, {name}! You qualify for {}% off.",
            offer.discount_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::OfferCatalog;

    #[test]
    fn screening_rejects_blank_and_flagged_numbers() {
        assert_eq!(
            screen_policy_number("   "),
            Err(ReferralRejection::MissingPolicyNumber)
        );
        assert_eq!(
            screen_policy_number(" FAKE-001 "),
            Err(ReferralRejection::UnknownPolicy("FAKE-001".to_string()))
        );
        assert!(screen_policy_number("pol-InValid-9").is_err());
        assert_eq!(screen_policy_number("BAJ-992211"), Ok(()));
    }

    #[test]
    fn savings_include_free_session_bonus() {
        let catalog = OfferCatalog::standard();
        let individual = catalog
            .offer(AffiliateSegment::Individual)
            .expect("individual offer");
        let hni = catalog.offer(AffiliateSegment::Hni).expect("hni offer");

        assert_eq!(customer_savings(individual, 3_000), 4_500);
        assert_eq!(customer_savings(hni, 5_000), 5_000);
    }

    #[test]
    fn welcome_message_uses_mailbox_name() {
        let catalog = OfferCatalog::standard();
        let individual = catalog
            .offer(AffiliateSegment::Individual)
            .expect("individual offer");
        assert_eq!(
            welcome_message("riya@example.com", individual),
            "Welcome, riya! You qualify for 20% off + 1 free session."
        );
    }
}
