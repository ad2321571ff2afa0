use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::records::Journal;

/// Identifier wrapper for linked policies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub String);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
    Expired,
    Inactive,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
            Self::Expired => "expired",
            Self::Inactive => "inactive",
        }
    }
}

/// Relationship of the patient to the policy holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    #[serde(rename = "self")]
    PolicyHolder,
    Spouse,
    Parent,
    Child,
}

/// Policy attributes whose changes are financially or clinically material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchedField {
    SessionsRemaining,
    CopayAmount,
    VerificationStatus,
}

impl WatchedField {
    /// Fixed audit order. History entries for simultaneous changes follow it.
    pub const fn ordered() -> [Self; 3] {
        [
            Self::SessionsRemaining,
            Self::CopayAmount,
            Self::VerificationStatus,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SessionsRemaining => "sessions_remaining",
            Self::CopayAmount => "copay_amount",
            Self::VerificationStatus => "verification_status",
        }
    }

    pub fn read(self, policy: &Policy) -> FieldValue {
        match self {
            Self::SessionsRemaining => FieldValue::Count(policy.sessions_remaining),
            Self::CopayAmount => FieldValue::Amount(policy.copay_amount),
            Self::VerificationStatus => FieldValue::Status(policy.verification_status),
        }
    }
}

/// Value captured on either side of an audited change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Count(u32),
    Amount(u64),
    Status(VerificationStatus),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(value) => write!(f, "{value}"),
            FieldValue::Amount(value) => write!(f, "{value}"),
            FieldValue::Status(status) => f.write_str(status.label()),
        }
    }
}

/// Immutable history record attached to a single policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyHistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<WatchedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<FieldValue>,
}

/// Insurance coverage record linking a patient to a carrier plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub patient_id: String,
    pub insurance_company_id: String,
    pub policy_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<String>,
    pub policy_holder_name: String,
    pub relationship: Relationship,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub verification_status: VerificationStatus,
    pub sessions_remaining: u32,
    pub max_sessions_per_year: u32,
    pub copay_amount: u64,
    pub coverage_percent: u8,
    pub deductible_amount: u64,
    pub deductible_remaining: u64,
    pub requires_pre_auth: bool,
    pub pre_auth_obtained: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_auth_number: Option<String>,
    #[serde(default)]
    pub history: Journal<PolicyHistoryEntry>,
}

impl Policy {
    pub fn within_session_limit(&self) -> bool {
        self.sessions_remaining <= self.max_sessions_per_year
    }

    /// True when `identifier` names this policy by policy number or member id.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.policy_number == identifier || self.member_id.as_deref() == Some(identifier)
    }
}

/// Payload for linking a new policy; the desk assigns id and initial history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub patient_id: String,
    pub insurance_company_id: String,
    pub policy_number: String,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
    pub policy_holder_name: String,
    pub relationship: Relationship,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_verification_status")]
    pub verification_status: VerificationStatus,
    pub sessions_remaining: u32,
    pub max_sessions_per_year: u32,
    pub copay_amount: u64,
    pub coverage_percent: u8,
    pub deductible_amount: u64,
    pub deductible_remaining: u64,
    #[serde(default)]
    pub requires_pre_auth: bool,
    #[serde(default)]
    pub pre_auth_obtained: bool,
    #[serde(default)]
    pub pre_auth_number: Option<String>,
}

fn default_verification_status() -> VerificationStatus {
    VerificationStatus::Pending
}

impl NewPolicy {
    pub(crate) fn into_policy(self, id: PolicyId, provisioned: PolicyHistoryEntry) -> Policy {
        let mut history = Journal::new();
        history.record(provisioned);

        Policy {
            id,
            patient_id: self.patient_id,
            insurance_company_id: self.insurance_company_id,
            policy_number: self.policy_number,
            member_id: self.member_id,
            group_number: self.group_number,
            policy_holder_name: self.policy_holder_name,
            relationship: self.relationship,
            start_date: self.start_date,
            end_date: self.end_date,
            verification_status: self.verification_status,
            sessions_remaining: self.sessions_remaining,
            max_sessions_per_year: self.max_sessions_per_year,
            copay_amount: self.copay_amount,
            coverage_percent: self.coverage_percent,
            deductible_amount: self.deductible_amount,
            deductible_remaining: self.deductible_remaining,
            requires_pre_auth: self.requires_pre_auth,
            pre_auth_obtained: self.pre_auth_obtained,
            pre_auth_number: self.pre_auth_number,
            history,
        }
    }
}
