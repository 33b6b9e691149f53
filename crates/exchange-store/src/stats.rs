/// Ingestion statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub orders_accepted: u64,
    pub cancels_accepted: u64,
    pub fills_accepted: u64,
    /// Records whose id was already present in their stream
    pub duplicates: u64,
    /// Ids seen as both cancelled and filled
    pub terminal_conflicts: u64,
    /// Records that failed validation
    pub rejected: u64,
}

impl IngestStats {
    pub fn accepted(&self) -> u64 {
        self.orders_accepted + self.cancels_accepted + self.fills_accepted
    }
}

/// Lengths of the three streams. Streams only grow, so any append changes this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StreamVersions {
    pub orders: usize,
    pub cancels: usize,
    pub fills: usize,
}
