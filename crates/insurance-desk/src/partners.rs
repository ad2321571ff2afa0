//! Directory of insurer partners and their referral commission tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(pub String);

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Carrier participating in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceCompany {
    pub id: PartnerId,
    pub name: String,
    pub code: String,
    pub mental_health_covered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sessions_per_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_copay_amount: Option<u64>,
    pub typical_coverage_percent: u8,
    pub avg_processing_days: u8,
    pub supports_realtime_verification: bool,
    /// Raw tier level; validated when a commission is computed.
    pub commission_tier: u8,
}

/// Free-text statement an operator keeps about a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerNote {
    pub partner_id: PartnerId,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerDirectory {
    partners: Vec<InsuranceCompany>,
}

impl PartnerDirectory {
    pub fn new(partners: Vec<InsuranceCompany>) -> Self {
        Self { partners }
    }

    pub fn get(&self, id: &PartnerId) -> Option<&InsuranceCompany> {
        self.partners.iter().find(|partner| &partner.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InsuranceCompany> + '_ {
        self.partners.iter()
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn standard() -> Self {
        Self::new(vec![
            partner("c1", "Bajaj Allianz General Insurance", "BAJAJ_ALLIANZ", 80, 500, 5, true, 3),
            partner("c2", "HDFC ERGO Health Insurance", "HDFC_ERGO", 75, 750, 4, true, 2),
            partner("c3", "Star Health Insurance", "STAR_HEALTH", 70, 900, 7, false, 1),
            partner("c4", "Aditya Birla Health Insurance", "ADITYA_BIRLA", 75, 700, 5, true, 2),
            partner("c5", "Niva Bupa Health Insurance", "NIVA_BUPA", 80, 500, 4, true, 3),
            partner("c6", "Care Health Insurance", "CARE_HEALTH", 80, 600, 6, true, 3),
            partner("c7", "ManipalCigna Health Insurance", "MANIPAL_CIGNA", 75, 650, 3, true, 2),
            partner("c8", "Galaxy Health Insurance", "GALAXY_HEALTH", 70, 800, 5, true, 1),
            partner("c9", "ICICI Lombard General Insurance", "ICICI_LOMBARD", 80, 550, 4, true, 4),
            partner("c10", "Narayana Health Insurance", "NARAYANA_HEALTH", 85, 400, 2, true, 4),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn partner(
    id: &str,
    name: &str,
    code: &str,
    typical_coverage_percent: u8,
    typical_copay_amount: u64,
    avg_processing_days: u8,
    supports_realtime_verification: bool,
    commission_tier: u8,
) -> InsuranceCompany {
    InsuranceCompany {
        id: PartnerId(id.to_string()),
        name: name.to_string(),
        code: code.to_string(),
        mental_health_covered: true,
        max_sessions_per_year: None,
        typical_copay_amount: Some(typical_copay_amount),
        typical_coverage_percent,
        avg_processing_days,
        supports_realtime_verification,
        commission_tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_directory_uses_valid_tiers() {
        let directory = PartnerDirectory::standard();
        assert_eq!(directory.len(), 10);
        assert!(directory
            .iter()
            .all(|partner| (1..=4).contains(&partner.commission_tier)));
    }

    #[test]
    fn get_finds_partner_by_id() {
        let directory = PartnerDirectory::standard();
        let partner = directory
            .get(&PartnerId("c9".to_string()))
            .expect("icici present");
        assert_eq!(partner.code, "ICICI_LOMBARD");
        assert_eq!(partner.commission_tier, 4);
        assert!(directory.get(&PartnerId("c99".to_string())).is_none());
    }
}
