use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{AffiliateDiscount, AffiliateSegment, OfferCatalog};
use super::variant::{Variant, VariantSource};
use crate::partners::PartnerId;
use crate::records::{Clock, IdGenerator};

/// Validation failures for commission input. Both indicate a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommissionError {
    #[error("commission tier {0} is outside the supported range 1-4")]
    InvalidTier(u8),
    #[error("unknown affiliate segment '{0}'")]
    InvalidSegment(String),
}

/// Partner classification level determining referral payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CommissionTier(u8);

impl CommissionTier {
    pub fn new(level: u8) -> Result<Self, CommissionError> {
        match level {
            1..=4 => Ok(Self(level)),
            other => Err(CommissionError::InvalidTier(other)),
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn percent(self) -> u8 {
        match self.0 {
            1 => 10,
            2 => 12,
            3 => 15,
            _ => 18,
        }
    }
}

impl TryFrom<u8> for CommissionTier {
    type Error = CommissionError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<CommissionTier> for u8 {
    fn from(tier: CommissionTier) -> Self {
        tier.0
    }
}

/// `amount × percent / 100`, rounded half-up to the nearest whole unit.
pub fn percent_of(amount: u64, percent: u8) -> u64 {
    let scaled = u128::from(amount) * u128::from(percent) + 50;
    u64::try_from(scaled / 100).unwrap_or(u64::MAX)
}

/// Money figures for a single referral, each step rounded on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionQuote {
    pub original_price: u64,
    pub discount_amount: u64,
    pub final_price: u64,
    pub commission_percent: u8,
    pub commission_amount: u64,
}

impl CommissionQuote {
    pub fn for_offer(offer: &AffiliateDiscount, tier: CommissionTier) -> Self {
        let original_price = offer.original_price;
        let discount_amount = percent_of(original_price, offer.discount_percent);
        let final_price = original_price.saturating_sub(discount_amount);
        let commission_percent = tier.percent();
        let commission_amount = percent_of(final_price, commission_percent);

        Self {
            original_price,
            discount_amount,
            final_price,
            commission_percent,
            commission_amount,
        }
    }
}

/// Ledger row produced once per verified referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateTransaction {
    pub id: String,
    pub partner_id: PartnerId,
    pub customer_email: String,
    pub segment: AffiliateSegment,
    pub original_price: u64,
    pub discount_amount: u64,
    pub final_price: u64,
    pub commission_percent: u8,
    pub commission_amount: u64,
    pub transaction_date: DateTime<Utc>,
    pub variant: Variant,
}

impl AffiliateTransaction {
    pub fn quote(&self) -> CommissionQuote {
        CommissionQuote {
            original_price: self.original_price,
            discount_amount: self.discount_amount,
            final_price: self.final_price,
            commission_percent: self.commission_percent,
            commission_amount: self.commission_amount,
        }
    }
}

/// Who was referred, by whom, into which segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParty<'a> {
    pub partner_id: &'a PartnerId,
    pub customer_email: &'a str,
    pub segment: AffiliateSegment,
}

/// Turns a segment offer and a partner tier into discount and commission figures.
#[derive(Debug, Clone)]
pub struct CommissionCalculator {
    catalog: OfferCatalog,
}

impl Default for CommissionCalculator {
    fn default() -> Self {
        Self::new(OfferCatalog::standard())
    }
}

impl CommissionCalculator {
    pub fn new(catalog: OfferCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &OfferCatalog {
        &self.catalog
    }

    pub fn quote(
        &self,
        segment: AffiliateSegment,
        tier: u8,
    ) -> Result<CommissionQuote, CommissionError> {
        let tier = CommissionTier::new(tier)?;
        let offer = self.catalog.offer(segment)?;
        Ok(CommissionQuote::for_offer(offer, tier))
    }

    /// Same as [`quote`](Self::quote) for a segment name that has not been parsed yet.
    pub fn quote_named(&self, segment: &str, tier: u8) -> Result<CommissionQuote, CommissionError> {
        let segment: AffiliateSegment = segment.parse()?;
        self.quote(segment, tier)
    }

    pub fn transact(
        &self,
        party: TransactionParty<'_>,
        tier: u8,
        variants: &mut dyn VariantSource,
        ids: &mut dyn IdGenerator,
        clock: &dyn Clock,
    ) -> Result<AffiliateTransaction, CommissionError> {
        let quote = self.quote(party.segment, tier)?;

        Ok(AffiliateTransaction {
            id: ids.next_id("tx"),
            partner_id: party.partner_id.clone(),
            customer_email: party.customer_email.to_string(),
            segment: party.segment,
            original_price: quote.original_price,
            discount_amount: quote.discount_amount,
            final_price: quote.final_price,
            commission_percent: quote.commission_percent,
            commission_amount: quote.commission_amount,
            transaction_date: clock.now(),
            variant: variants.next_variant(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::variant::FixedVariant;
    use crate::records::{FixedClock, SequentialIds};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn calculator() -> CommissionCalculator {
        CommissionCalculator::default()
    }

    #[test]
    fn tier_percentages_are_fixed() {
        let percents: Vec<_> = (1..=4)
            .map(|level| CommissionTier::new(level).expect("valid tier").percent())
            .collect();
        assert_eq!(percents, vec![10, 12, 15, 18]);
    }

    #[test]
    fn individual_tier_three_quote() {
        let quote = calculator()
            .quote(AffiliateSegment::Individual, 3)
            .expect("valid input");
        assert_eq!(quote.discount_amount, 3_000);
        assert_eq!(quote.final_price, 12_000);
        assert_eq!(quote.commission_percent, 15);
        assert_eq!(quote.commission_amount, 1_800);
    }

    #[test]
    fn hni_tier_four_quote() {
        let quote = calculator()
            .quote(AffiliateSegment::Hni, 4)
            .expect("valid input");
        assert_eq!(quote.discount_amount, 5_000);
        assert_eq!(quote.final_price, 45_000);
        assert_eq!(quote.commission_amount, 8_100);
    }

    #[test]
    fn half_units_round_up() {
        let quote = calculator()
            .quote(AffiliateSegment::Corporate, 1)
            .expect("valid input");
        // 30 × 15% = 4.5
        assert_eq!(quote.discount_amount, 5);
        assert_eq!(quote.final_price, 25);
        // 25 × 10% = 2.5
        assert_eq!(quote.commission_amount, 3);
    }

    #[test]
    fn percent_of_rounds_each_boundary() {
        assert_eq!(percent_of(30, 15), 5);
        assert_eq!(percent_of(29, 15), 4);
        assert_eq!(percent_of(25, 18), 5);
        assert_eq!(percent_of(0, 18), 0);
        assert_eq!(percent_of(u64::MAX, 100), u64::MAX);
    }

    #[test]
    fn out_of_range_tiers_are_rejected() {
        for tier in [0, 5] {
            assert_eq!(
                calculator().quote(AffiliateSegment::Individual, tier),
                Err(CommissionError::InvalidTier(tier))
            );
        }
    }

    #[test]
    fn unknown_segment_names_are_rejected() {
        assert_eq!(
            calculator().quote_named("franchise", 2),
            Err(CommissionError::InvalidSegment("franchise".to_string()))
        );
    }

    #[test]
    fn tier_deserialization_validates_range() {
        let tier: CommissionTier = serde_json::from_str("2").expect("tier parses");
        assert_eq!(tier.percent(), 12);
        assert!(serde_json::from_str::<CommissionTier>("7").is_err());
    }

    #[test]
    fn transact_stamps_forced_variant() {
        let partner = PartnerId("c9".to_string());
        let clock = FixedClock(
            Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        let party = TransactionParty {
            partner_id: &partner,
            customer_email: "riya@example.com",
            segment: AffiliateSegment::Hni,
        };

        let transaction = calculator()
            .transact(
                party,
                4,
                &mut FixedVariant(Variant::B),
                &mut SequentialIds::new(),
                &clock,
            )
            .expect("valid input");

        assert_eq!(transaction.id, "tx-000001");
        assert_eq!(transaction.variant, Variant::B);
        assert_eq!(transaction.transaction_date, clock.0);
        assert_eq!(transaction.quote().commission_amount, 8_100);
    }

    proptest! {
        #[test]
        fn quotes_are_pure(segment_index in 0usize..7, tier in 1u8..=4) {
            let segment = AffiliateSegment::ordered()[segment_index];
            let first = calculator().quote(segment, tier).expect("valid input");
            let second = calculator().quote(segment, tier).expect("valid input");
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.final_price + first.discount_amount, first.original_price);
            prop_assert!(first.commission_amount <= first.final_price);
        }

        #[test]
        fn percent_of_matches_half_up_definition(amount in 0u64..10_000_000, percent in 0u8..=100) {
            let exact_hundredths = amount * u64::from(percent);
            let rounded = percent_of(amount, percent);
            prop_assert!(rounded * 100 + 50 > exact_hundredths);
            prop_assert!(rounded * 100 <= exact_hundredths + 50);
        }
    }
}
