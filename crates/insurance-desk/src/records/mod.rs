//! Shared record plumbing used by every workflow: newest-first journals, injectable
//! id and clock sources, and the process-wide audit log.

mod audit_log;
mod clock;
mod ids;
mod journal;

pub use audit_log::{AuditCategory, AuditLog, AuditLogEntry, AuditStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIds};
pub use journal::Journal;
