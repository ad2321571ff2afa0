use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(pub String);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Draft,
    PendingSubmission,
    Submitted,
    UnderReview,
    Approved,
    PartiallyApproved,
    Denied,
    Appealed,
    Paid,
    Error,
}

impl ClaimStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingSubmission => "Pending Submission",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::PartiallyApproved => "Partially Approved",
            Self::Denied => "Denied",
            Self::Appealed => "Appealed",
            Self::Paid => "Paid",
            Self::Error => "Error",
        }
    }

    /// Only adverse adjudications can be appealed.
    pub const fn is_appealable(self) -> bool {
        matches!(self, Self::Denied | Self::PartiallyApproved)
    }

    /// Still needs attention from the desk.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Paid | Self::Denied)
    }

    /// Billed amount is expected to turn into a payment.
    pub const fn is_awaiting_payment(self) -> bool {
        matches!(self, Self::UnderReview | Self::Approved)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Electronic claim for a therapy session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub session_id: String,
    pub claim_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_claim_id: Option<String>,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub billed_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copay_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_payment: Option<u64>,
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<NaiveDate>,
    pub updated_at: NaiveDate,
    #[serde(default)]
    pub appeal_filed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appeal_notes: Option<String>,
}

/// Intake form for a new claim; the desk fills in identifiers and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub service_date: NaiveDate,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub billed_amount: u64,
    #[serde(default = "default_service_type")]
    pub service_type: String,
}

fn default_service_type() -> String {
    "psychotherapy".to_string()
}
