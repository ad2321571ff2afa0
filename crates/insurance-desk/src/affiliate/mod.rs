//! Affiliate referral program: segment offers, commission arithmetic, A/B variant
//! assignment, referral screening and the transaction ledger.

mod catalog;
mod commission;
mod ledger;
mod referral;
mod variant;

pub use catalog::{AffiliateDiscount, AffiliateSegment, OfferCatalog};
pub use commission::{
    percent_of, AffiliateTransaction, CommissionCalculator, CommissionError, CommissionQuote,
    CommissionTier, TransactionParty,
};
pub use ledger::{AffiliateLedger, AffiliateStats};
pub(crate) use referral::welcome_message;
pub use referral::{
    customer_savings, screen_policy_number, AffiliateVerificationRecord, ReferralReceipt,
    ReferralRejection, ReferralRequest, ReferralStatus, FREE_SESSION_VALUE,
};
pub use variant::{FixedVariant, SeededVariants, Variant, VariantSource};
