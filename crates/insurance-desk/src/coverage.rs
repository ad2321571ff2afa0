//! Out-of-pocket estimate for a single therapy session.

use serde::{Deserialize, Serialize};

use crate::affiliate::percent_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostInputs {
    pub session_fee: u64,
    pub coverage_percent: u8,
    pub deductible: u64,
    pub deductible_met: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub remaining_deductible: u64,
    pub applied_to_deductible: u64,
    pub insurer_pays: u64,
    pub patient_pays: u64,
}

/// The deductible absorbs the fee first; coverage applies to what is left.
pub fn estimate(inputs: CostInputs) -> CostBreakdown {
    let coverage_percent = inputs.coverage_percent.min(100);
    let remaining_deductible = inputs.deductible.saturating_sub(inputs.deductible_met);
    let applied_to_deductible = inputs.session_fee.min(remaining_deductible);
    let after_deductible = inputs.session_fee - applied_to_deductible;
    let insurer_pays = percent_of(after_deductible, coverage_percent);

    CostBreakdown {
        remaining_deductible,
        applied_to_deductible,
        insurer_pays,
        patient_pays: inputs.session_fee - insurer_pays,
    }
}
