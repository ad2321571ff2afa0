/// Source of record identifiers, injected so tests can predict every id.
pub trait IdGenerator: Send {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter producing ids such as `audit-000001`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `issued` previously allocated ids.
    pub fn resume_after(issued: u64) -> Self {
        Self { issued }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.issued += 1;
        format!("{prefix}-{:06}", self.issued)
    }
}
