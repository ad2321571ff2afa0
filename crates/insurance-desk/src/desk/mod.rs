//! The operations desk: single owner of policies, claims, the audit log and the
//! affiliate ledger, plus the HTTP routes that expose it.

mod affiliates;
mod claims;
mod partners;
mod policies;
pub mod router;
mod service;

#[cfg(test)]
mod tests;

pub use router::desk_router;
pub use service::{DeskError, OperationsDesk, SharedDesk};
