use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Claim;
use crate::partners::InsuranceCompany;

/// Reason assumed when a denied claim arrives without one.
pub const DEFAULT_DENIAL_REASON: &str = "Policy exclusion or mismatch";

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor transport failed: {0}")]
    Transport(String),
    #[error("advisor returned a malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Patient-facing explanation of a denial plus suggested appeal steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialExplanation {
    pub explanation: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl DenialExplanation {
    /// Parse the advisor's JSON answer. Blank text or a blank explanation yields `None`.
    pub fn from_json(text: &str) -> Result<Option<Self>, AdvisorError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let parsed: Self = serde_json::from_str(text)?;
        if parsed.explanation.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(parsed))
    }
}

/// Generative-text collaborator. Implementations return raw text; the JSON contract for
/// `explain_denial` is `{"explanation": string, "steps": [string]}`.
pub trait NarrativeAdvisor: Send + Sync {
    fn explain_denial(&self, reason: &str, claim: &Claim) -> Result<String, AdvisorError>;
    fn draft_appeal(&self, claim: &Claim, explanation: &str) -> Result<String, AdvisorError>;
    fn summarize_integration(&self, company_name: &str) -> Result<String, AdvisorError>;
}

/// Advisor answer, or a non-fatal marker that nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Advice<T> {
    Ready(T),
    Unavailable,
}

impl<T> Advice<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Advice::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Advice::Ready(value) => Some(value),
            Advice::Unavailable => None,
        }
    }
}

/// Wraps a [`NarrativeAdvisor`] so transport failures and empty answers never escape.
pub struct ClaimAdvisor<A> {
    advisor: Arc<A>,
}

impl<A> Clone for ClaimAdvisor<A> {
    fn clone(&self) -> Self {
        Self {
            advisor: Arc::clone(&self.advisor),
        }
    }
}

impl<A> ClaimAdvisor<A>
where
    A: NarrativeAdvisor,
{
    pub fn new(advisor: Arc<A>) -> Self {
        Self { advisor }
    }

    pub fn explain_denial(&self, claim: &Claim) -> Advice<DenialExplanation> {
        let reason = claim
            .denial_reason
            .as_deref()
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or(DEFAULT_DENIAL_REASON);

        let parsed = self
            .advisor
            .explain_denial(reason, claim)
            .and_then(|text| DenialExplanation::from_json(&text));

        match parsed {
            Ok(Some(explanation)) => Advice::Ready(explanation),
            Ok(None) => {
                warn!(claim = %claim.claim_number, "advisor returned no denial explanation");
                Advice::Unavailable
            }
            Err(err) => {
                warn!(claim = %claim.claim_number, error = %err, "denial explanation unavailable");
                Advice::Unavailable
            }
        }
    }

    pub fn draft_appeal(&self, claim: &Claim, explanation: &DenialExplanation) -> Advice<String> {
        let result = self.advisor.draft_appeal(claim, &explanation.explanation);
        non_empty(result, "appeal letter", &claim.claim_number)
    }

    pub fn summarize_integration(&self, company: &InsuranceCompany) -> Advice<String> {
        let result = self.advisor.summarize_integration(&company.name);
        non_empty(result, "integration summary", &company.name)
    }
}

fn non_empty(result: Result<String, AdvisorError>, what: &str, subject: &str) -> Advice<String> {
    match result {
        Ok(text) if !text.trim().is_empty() => Advice::Ready(text),
        Ok(_) => {
            warn!(subject, "advisor returned an empty {what}");
            Advice::Unavailable
        }
        Err(err) => {
            warn!(subject, error = %err, "{what} unavailable");
            Advice::Unavailable
        }
    }
}

/// Offline advisor returning canned answers; backs the CLI demo and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAdvisor {
    pub denial_json: Option<String>,
    pub appeal_letter: Option<String>,
    pub integration_summary: Option<String>,
}

impl ScriptedAdvisor {
    pub fn helpful() -> Self {
        let denial = DenialExplanation {
            explanation: "The carrier could not match the session to a covered mental health benefit."
                .to_string(),
            steps: vec![
                "Request the itemised denial letter from the carrier.".to_string(),
                "Confirm the ICD-10 F-code and CPT 90834 match the session notes.".to_string(),
                "File a written appeal citing continuity of care.".to_string(),
            ],
        };

        Self {
            denial_json: serde_json::to_string(&denial).ok(),
            appeal_letter: Some(
                "To the Appeals Department,\n\nWe request reconsideration of the denied therapy session \
                 on the grounds of medical necessity and continuity of care.\n"
                    .to_string(),
            ),
            integration_summary: Some(
                "Eligibility and claims exchange follow FHIR R4 resources with HL7 messaging; \
                 sandbox access is provisioned through the national digital health mission."
                    .to_string(),
            ),
        }
    }
}

impl NarrativeAdvisor for ScriptedAdvisor {
    fn explain_denial(&self, _reason: &str, _claim: &Claim) -> Result<String, AdvisorError> {
        self.denial_json
            .clone()
            .ok_or_else(|| AdvisorError::Transport("no scripted denial explanation".to_string()))
    }

    fn draft_appeal(&self, _claim: &Claim, _explanation: &str) -> Result<String, AdvisorError> {
        self.appeal_letter
            .clone()
            .ok_or_else(|| AdvisorError::Transport("no scripted appeal letter".to_string()))
    }

    fn summarize_integration(&self, _company_name: &str) -> Result<String, AdvisorError> {
        self.integration_summary
            .clone()
            .ok_or_else(|| AdvisorError::Transport("no scripted integration summary".to_string()))
    }
}
