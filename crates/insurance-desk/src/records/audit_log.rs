use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::ids::IdGenerator;
use super::journal::Journal;

/// Closed set of areas an audit entry can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    Policy,
    Claim,
    Verification,
    System,
    Sync,
}

impl AuditCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Claim => "claim",
            Self::Verification => "verification",
            Self::System => "system",
            Self::Sync => "sync",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Info,
    Warning,
}

impl AuditStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Immutable, system-wide audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub category: AuditCategory,
    pub details: String,
    pub status: AuditStatus,
}

impl AuditLogEntry {
    /// Build an entry with an id and timestamp drawn from the supplied sources.
    pub fn stamp(
        ids: &mut dyn IdGenerator,
        clock: &dyn Clock,
        action: impl Into<String>,
        category: AuditCategory,
        details: impl Into<String>,
        status: AuditStatus,
    ) -> Self {
        Self {
            id: ids.next_id("audit"),
            timestamp: clock.now(),
            action: action.into(),
            category,
            details: details.into(),
            status,
        }
    }
}

/// Newest-first, append-only audit trail. The only removal is a full purge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLog {
    entries: Journal<AuditLogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: AuditLogEntry) {
        self.entries.record(entry);
    }

    /// Append entries in the order given, so the last one ends up newest.
    pub fn append_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = AuditLogEntry>,
    {
        for entry in entries {
            self.entries.record(entry);
        }
    }

    pub fn entries(&self) -> &Journal<AuditLogEntry> {
        &self.entries
    }

    pub fn by_category(&self, category: AuditCategory) -> Vec<&AuditLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destroy every entry at once and report how many were dropped.
    pub fn purge(&mut self) -> usize {
        self.entries.clear()
    }
}
