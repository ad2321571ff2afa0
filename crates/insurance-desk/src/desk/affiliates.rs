use tracing::{info, warn};

use super::service::{DeskError, OperationsDesk};
use crate::affiliate::{
    customer_savings, screen_policy_number, welcome_message, AffiliateSegment,
    AffiliateStats, AffiliateVerificationRecord, ReferralReceipt, ReferralRequest,
    ReferralStatus, TransactionParty,
};
use crate::partners::PartnerId;

impl OperationsDesk {
    /// Verify a partner referral and book the resulting discounted transaction.
    pub fn verify_referral(
        &mut self,
        request: ReferralRequest,
    ) -> Result<ReferralReceipt, DeskError> {
        let partner = self
            .partners
            .get(&request.partner_id)
            .cloned()
            .ok_or_else(|| DeskError::PartnerNotFound(request.partner_id.clone()))?;

        if let Err(rejection) = screen_policy_number(&request.policy_number) {
            warn!(partner = %partner.id, %rejection, "referral rejected");
            return Err(rejection.into());
        }

        let segment: AffiliateSegment = request.segment.parse()?;
        let offer = self.calculator.catalog().offer(segment)?.clone();
        let transaction = self.calculator.transact(
            TransactionParty {
                partner_id: &partner.id,
                customer_email: &request.patient_email,
                segment,
            },
            partner.commission_tier,
            self.variants.as_mut(),
            self.ids.as_mut(),
            self.clock.as_ref(),
        )?;

        let record = AffiliateVerificationRecord {
            id: self.ids.next_id("vr"),
            timestamp: transaction.transaction_date,
            partner_id: partner.id.clone(),
            partner_name: partner.name.clone(),
            segment,
            policy_number: request.policy_number.trim().to_string(),
            patient_email: request.patient_email.clone(),
            status: ReferralStatus::Verified,
        };

        let savings = customer_savings(&offer, transaction.discount_amount);
        let message = format!(
            "{} You saved {savings} with your {} benefit!",
            welcome_message(&request.patient_email, &offer),
            partner.name
        );

        self.affiliates.record(record.clone(), transaction.clone());
        info!(
            partner = %partner.id,
            %segment,
            final_price = transaction.final_price,
            commission = transaction.commission_amount,
            variant = ?transaction.variant,
            "affiliate transaction recorded"
        );

        Ok(ReferralReceipt {
            record,
            transaction,
            savings,
            message,
        })
    }

    pub fn affiliate_stats(&self, partner: Option<&PartnerId>) -> AffiliateStats {
        self.affiliates.stats(partner)
    }
}
