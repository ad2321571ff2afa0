//! Operations core for an insurance-backed therapy practice: policy auto-audit,
//! claim tracking and the affiliate referral program.

pub mod affiliate;
pub mod claims;
pub mod config;
pub mod coverage;
pub mod desk;
pub mod error;
pub mod partners;
pub mod policy;
pub mod records;
pub mod telemetry;

pub use desk::{desk_router, DeskError, OperationsDesk, SharedDesk};
pub use error::AppError;
