use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commission::{percent_of, CommissionError};

/// Affiliate-program customer category. Each segment carries its own offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffiliateSegment {
    Individual,
    Therapist,
    Corporate,
    Education,
    Healthcare,
    Defense,
    Hni,
}

impl AffiliateSegment {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Individual,
            Self::Therapist,
            Self::Corporate,
            Self::Education,
            Self::Healthcare,
            Self::Defense,
            Self::Hni,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Therapist => "therapist",
            Self::Corporate => "corporate",
            Self::Education => "education",
            Self::Healthcare => "healthcare",
            Self::Defense => "defense",
            Self::Hni => "hni",
        }
    }
}

impl fmt::Display for AffiliateSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AffiliateSegment {
    type Err = CommissionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|segment| segment.as_str() == normalized)
            .ok_or_else(|| CommissionError::InvalidSegment(raw.to_string()))
    }
}

/// Static discount offer attached to a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateDiscount {
    pub segment: AffiliateSegment,
    pub discount_percent: u8,
    pub free_sessions: u8,
    pub free_service: String,
    pub product: String,
    /// Whole currency units.
    pub original_price: u64,
    pub description: String,
}

impl AffiliateDiscount {
    pub fn discount_amount(&self) -> u64 {
        percent_of(self.original_price, self.discount_percent)
    }

    pub fn discounted_price(&self) -> u64 {
        self.original_price.saturating_sub(self.discount_amount())
    }
}

/// Reference data mapping every segment to its offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCatalog {
    offers: BTreeMap<AffiliateSegment, AffiliateDiscount>,
}

impl OfferCatalog {
    pub fn from_offers<I>(offers: I) -> Self
    where
        I: IntoIterator<Item = AffiliateDiscount>,
    {
        Self {
            offers: offers
                .into_iter()
                .map(|offer| (offer.segment, offer))
                .collect(),
        }
    }

    pub fn offer(&self, segment: AffiliateSegment) -> Result<&AffiliateDiscount, CommissionError> {
        self.offers
            .get(&segment)
            .ok_or_else(|| CommissionError::InvalidSegment(segment.as_str().to_string()))
    }

    /// Resolve a raw segment name, failing fast on anything unrecognised.
    pub fn lookup(&self, raw: &str) -> Result<&AffiliateDiscount, CommissionError> {
        let segment: AffiliateSegment = raw.parse()?;
        self.offer(segment)
    }

    pub fn offers(&self) -> impl Iterator<Item = &AffiliateDiscount> + '_ {
        self.offers.values()
    }

    /// Network-wide offers for the seven affiliate segments.
    pub fn standard() -> Self {
        Self::from_offers([
            offer(
                AffiliateSegment::Individual,
                20,
                1,
                15_000,
                "One complimentary therapy session",
                "10-session therapy package",
                "Prioritised mental wellness support for individuals.",
            ),
            offer(
                AffiliateSegment::Therapist,
                15,
                0,
                50_000,
                "One continuing-education credit course",
                "Annual practice management subscription",
                "Digital practice tooling for mental health professionals.",
            ),
            offer(
                AffiliateSegment::Corporate,
                15,
                0,
                30,
                "One group wellness session per year",
                "Corporate wellness program (per employee per month)",
                "Workforce-wide mental health benefits.",
            ),
            offer(
                AffiliateSegment::Education,
                20,
                0,
                15,
                "One campus mental health awareness day",
                "Campus mental health program (per student per month)",
                "Student wellness initiatives for educational institutions.",
            ),
            offer(
                AffiliateSegment::Healthcare,
                20,
                0,
                35,
                "One compassion-fatigue workshop per quarter",
                "Healthcare worker wellness program (per employee per month)",
                "Care for medical staff who care for others.",
            ),
            offer(
                AffiliateSegment::Defense,
                25,
                0,
                25,
                "One peer support group session per quarter",
                "Defense and police PTSD support (per person per month)",
                "Resilience and PTSD support for defense and police personnel.",
            ),
            offer(
                AffiliateSegment::Hni,
                10,
                0,
                50_000,
                "Wellness retreat voucher",
                "Premium tier: 10 sessions with senior therapists",
                "Concierge mental health services.",
            ),
        ])
    }
}

fn offer(
    segment: AffiliateSegment,
    discount_percent: u8,
    free_sessions: u8,
    original_price: u64,
    free_service: &str,
    product: &str,
    description: &str,
) -> AffiliateDiscount {
    AffiliateDiscount {
        segment,
        discount_percent,
        free_sessions,
        free_service: free_service.to_string(),
        product: product.to_string(),
        original_price,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_segment() {
        let catalog = OfferCatalog::standard();
        for segment in AffiliateSegment::ordered() {
            let offer = catalog.offer(segment).expect("offer present");
            assert_eq!(offer.segment, segment);
            assert!(offer.original_price > 0);
            assert!(offer.discount_percent <= 100);
        }
    }

    #[test]
    fn lookup_normalises_case_and_whitespace() {
        let catalog = OfferCatalog::standard();
        let offer = catalog.lookup("  HNI ").expect("hni offer");
        assert_eq!(offer.discount_percent, 10);
        assert_eq!(offer.discounted_price(), 45_000);
    }

    #[test]
    fn lookup_rejects_unknown_segment() {
        let catalog = OfferCatalog::standard();
        assert_eq!(
            catalog.lookup("retail"),
            Err(CommissionError::InvalidSegment("retail".to_string()))
        );
    }

    #[test]
    fn partial_catalog_reports_missing_offer() {
        let catalog = OfferCatalog::from_offers(
            OfferCatalog::standard()
                .offers()
                .filter(|offer| offer.segment != AffiliateSegment::Defense)
                .cloned()
                .collect::<Vec<_>>(),
        );
        assert_eq!(
            catalog.offer(AffiliateSegment::Defense),
            Err(CommissionError::InvalidSegment("defense".to_string()))
        );
    }
}
