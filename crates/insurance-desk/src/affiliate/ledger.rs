use serde::Serialize;

use super::commission::AffiliateTransaction;
use super::referral::AffiliateVerificationRecord;
use crate::partners::PartnerId;
use crate::records::Journal;

/// Aggregate revenue and commission across recorded transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AffiliateStats {
    pub transactions: usize,
    pub revenue: u64,
    pub commission: u64,
}

/// Append-only affiliate ledger: verification records and the transactions they produced.
#[derive(Debug, Clone, Default)]
pub struct AffiliateLedger {
    verifications: Journal<AffiliateVerificationRecord>,
    transactions: Journal<AffiliateTransaction>,
}

impl AffiliateLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        verification: AffiliateVerificationRecord,
        transaction: AffiliateTransaction,
    ) {
        self.verifications.record(verification);
        self.transactions.record(transaction);
    }

    pub fn verifications(&self) -> &Journal<AffiliateVerificationRecord> {
        &self.verifications
    }

    pub fn transactions(&self) -> &Journal<AffiliateTransaction> {
        &self.transactions
    }

    /// Totals for one partner, or for the whole network when `partner` is `None`.
    pub fn stats(&self, partner: Option<&PartnerId>) -> AffiliateStats {
        self.transactions
            .iter()
            .filter(|tx| partner.map_or(true, |id| &tx.partner_id == id))
            .fold(AffiliateStats::default(), |mut stats, tx| {
                stats.transactions += 1;
                stats.revenue += tx.final_price;
                stats.commission += tx.commission_amount;
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::{AffiliateSegment, ReferralStatus, Variant};
    use chrono::{TimeZone, Utc};

    fn entry(
        partner: &str,
        final_price: u64,
        commission_amount: u64,
    ) -> (AffiliateVerificationRecord, AffiliateTransaction) {
        let timestamp = Utc
            .with_ymd_and_hms(2025, 4, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let partner_id = PartnerId(partner.to_string());
        (
            AffiliateVerificationRecord {
                id: format!("vr-{partner}-{final_price}"),
                timestamp,
                partner_id: partner_id.clone(),
                partner_name: partner.to_uppercase(),
                segment: AffiliateSegment::Individual,
                policy_number: "POL-1".to_string(),
                patient_email: "member@example.com".to_string(),
                status: ReferralStatus::Verified,
            },
            AffiliateTransaction {
                id: format!("tx-{partner}-{final_price}"),
                partner_id,
                customer_email: "member@example.com".to_string(),
                segment: AffiliateSegment::Individual,
                original_price: final_price,
                discount_amount: 0,
                final_price,
                commission_percent: 10,
                commission_amount,
                transaction_date: timestamp,
                variant: Variant::A,
            },
        )
    }

    #[test]
    fn stats_filter_by_partner() {
        let mut ledger = AffiliateLedger::new();
        let entries = [
            entry("c1", 12_000, 1_800),
            entry("c9", 45_000, 8_100),
            entry("c1", 25, 3),
        ];
        for (record, tx) in entries {
            ledger.record(record, tx);
        }

        assert_eq!(
            ledger.stats(None),
            AffiliateStats {
                transactions: 3,
                revenue: 57_025,
                commission: 9_903,
            }
        );
        assert_eq!(
            ledger.stats(Some(&PartnerId("c1".to_string()))),
            AffiliateStats {
                transactions: 2,
                revenue: 12_025,
                commission: 1_803,
            }
        );
        assert_eq!(ledger.transactions().latest().map(|tx| tx.final_price), Some(25));
        assert_eq!(ledger.verifications().len(), 3);
    }
}
