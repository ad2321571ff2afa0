//! Claim records, lifecycle transitions, dashboard summaries and the narrative
//! advisor used to explain denials and draft appeals.

pub mod advisor;
pub mod domain;
pub mod lifecycle;

pub use advisor::{
    Advice, AdvisorError, ClaimAdvisor, DenialExplanation, NarrativeAdvisor, ScriptedAdvisor,
    DEFAULT_DENIAL_REASON,
};
pub use domain::{Claim, ClaimId, ClaimStatus, NewClaim};
pub use lifecycle::{ClaimSummary, ClaimTransitionError};
