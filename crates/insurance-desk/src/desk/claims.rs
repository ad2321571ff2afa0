use chrono::Datelike;
use tracing::info;

use super::service::{DeskError, OperationsDesk};
use crate::claims::{
    lifecycle, Advice, Claim, ClaimAdvisor, ClaimId, ClaimSummary, DenialExplanation,
    NarrativeAdvisor, NewClaim,
};
use crate::partners::PartnerId;
use crate::records::{AuditCategory, AuditStatus};

impl OperationsDesk {
    fn claim_index(&self, id: &ClaimId) -> Result<usize, DeskError> {
        self.claims
            .iter()
            .position(|claim| &claim.id == id)
            .ok_or_else(|| DeskError::ClaimNotFound(id.clone()))
    }

    pub fn file_claim(&mut self, intake: NewClaim) -> Claim {
        let today = self.clock.now().date_naive();
        let id = self.ids.next_id("clm");
        let sequence = id.trim_start_matches("clm-").to_string();
        let claim = lifecycle::file(
            ClaimId(id),
            self.ids.next_id("s"),
            format!("CLM-{}-{sequence}", today.year()),
            intake,
            today,
        );

        self.claims.insert(0, claim.clone());
        self.record_event(
            "New Claim Filed",
            AuditCategory::Claim,
            format!("Electronic submission for {}", claim.claim_number),
            AuditStatus::Success,
        );
        info!(claim = %claim.claim_number, billed = claim.billed_amount, "claim filed");
        claim
    }

    /// Store an adjudication update received for an existing claim.
    pub fn update_claim(&mut self, updated: Claim) -> Result<Claim, DeskError> {
        let index = self.claim_index(&updated.id)?;
        self.claims[index] = updated.clone();
        self.record_event(
            "Claim Updated",
            AuditCategory::Claim,
            format!("Adjudication update for claim {}", updated.claim_number),
            AuditStatus::Info,
        );
        Ok(updated)
    }

    pub fn submit_appeal(
        &mut self,
        id: &ClaimId,
        notes: Option<String>,
    ) -> Result<Claim, DeskError> {
        let index = self.claim_index(id)?;
        let today = self.clock.now().date_naive();
        let appealed = lifecycle::appeal(&self.claims[index], notes, today)?;

        self.claims[index] = appealed.clone();
        self.record_event(
            "Appeal Submitted",
            AuditCategory::Claim,
            format!("Electronic submission of appeal for {}", appealed.claim_number),
            AuditStatus::Success,
        );
        info!(claim = %appealed.claim_number, "appeal submitted");
        Ok(appealed)
    }

    pub fn verify_statement(&mut self, id: &ClaimId) -> Result<Claim, DeskError> {
        let index = self.claim_index(id)?;
        let today = self.clock.now().date_naive();
        let verified = lifecycle::verify_statement(&self.claims[index], today);

        self.claims[index] = verified.clone();
        self.record_event(
            "Statement Verified",
            AuditCategory::Claim,
            format!("Claim {} verified manually.", verified.claim_number),
            AuditStatus::Success,
        );
        Ok(verified)
    }

    pub fn claim_summary(&self) -> ClaimSummary {
        lifecycle::summarize(&self.claims)
    }

    pub fn explain_denial<A>(
        &mut self,
        id: &ClaimId,
        advisor: &ClaimAdvisor<A>,
    ) -> Result<Advice<DenialExplanation>, DeskError>
    where
        A: NarrativeAdvisor,
    {
        let index = self.claim_index(id)?;
        let claim = self.claims[index].clone();
        self.record_event(
            "AI Analysis",
            AuditCategory::Claim,
            format!("Deconstructing denial for claim {}", claim.claim_number),
            AuditStatus::Info,
        );
        Ok(advisor.explain_denial(&claim))
    }

    pub fn draft_appeal_letter<A>(
        &mut self,
        id: &ClaimId,
        explanation: &DenialExplanation,
        advisor: &ClaimAdvisor<A>,
    ) -> Result<Advice<String>, DeskError>
    where
        A: NarrativeAdvisor,
    {
        let index = self.claim_index(id)?;
        let claim = self.claims[index].clone();
        let letter = advisor.draft_appeal(&claim, explanation);
        if letter.is_ready() {
            self.record_event(
                "Appeal Synthesized",
                AuditCategory::Claim,
                format!("Generated formal appeal document for {}", claim.claim_number),
                AuditStatus::Success,
            );
        }
        Ok(letter)
    }

    pub fn research_partner<A>(
        &mut self,
        partner_id: &PartnerId,
        advisor: &ClaimAdvisor<A>,
    ) -> Result<Advice<String>, DeskError>
    where
        A: NarrativeAdvisor,
    {
        let partner = self
            .partners
            .get(partner_id)
            .cloned()
            .ok_or_else(|| DeskError::PartnerNotFound(partner_id.clone()))?;
        self.record_event(
            "Partner Research",
            AuditCategory::System,
            format!("Requested API specs for {}", partner.name),
            AuditStatus::Info,
        );
        Ok(advisor.summarize_integration(&partner))
    }
}
