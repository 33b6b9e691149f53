use exchange_core::types::raw::RawEventLog;
use exchange_core::types::{CancelRecord, FillRecord, Order};
use exchange_core::{ExchangeError, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::stats::{IngestStats, StreamVersions};
use crate::stream::RecordStream;

/// Immutable copy of the three streams at one point in time
#[derive(Debug, Clone)]
pub struct ExchangeSnapshot {
    pub orders: Arc<Vec<Order>>,
    pub cancels: Arc<Vec<CancelRecord>>,
    pub fills: Arc<Vec<FillRecord>>,
}

impl ExchangeSnapshot {
    pub fn new(orders: Vec<Order>, cancels: Vec<CancelRecord>, fills: Vec<FillRecord>) -> Self {
        Self {
            orders: Arc::new(orders),
            cancels: Arc::new(cancels),
            fills: Arc::new(fills),
        }
    }

    pub fn versions(&self) -> StreamVersions {
        StreamVersions {
            orders: self.orders.len(),
            cancels: self.cancels.len(),
            fills: self.fills.len(),
        }
    }
}

/// Thread-safe in-memory store for the exchange event streams.
///
/// Appends hold the `stats` write lock across the terminal-state check and
/// the insert, so a cancel and a fill for the same id are serialized.
/// Readers only touch the streams.
#[derive(Debug)]
pub struct ExchangeStore {
    pub orders: Arc<RecordStream<Order>>,
    pub cancels: Arc<RecordStream<CancelRecord>>,
    pub fills: Arc<RecordStream<FillRecord>>,
    stats: RwLock<IngestStats>,
}

impl ExchangeStore {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RecordStream::new("order")),
            cancels: Arc::new(RecordStream::new("cancel")),
            fills: Arc::new(RecordStream::new("fill")),
            stats: RwLock::new(IngestStats::default()),
        }
    }

    /// Append a submitted order. Returns false for a duplicate id.
    pub fn add_order(&self, order: Order) -> bool {
        let id = order.id;
        let mut stats = self.stats.write();
        let inserted = self.orders.insert(order);
        if inserted {
            stats.orders_accepted += 1;
            debug!(order_id = %id, "Order stored");
        } else {
            stats.duplicates += 1;
        }
        inserted
    }

    /// Append a cancellation.
    ///
    /// A fill is authoritative over a cancel: cancelling an already filled
    /// order is rejected with `DuplicateTerminalState`.
    pub fn add_cancel(&self, cancel: CancelRecord) -> Result<bool> {
        let id = cancel.id;
        let mut stats = self.stats.write();
        if self.fills.contains(&id) {
            warn!(order_id = %id, "Cancel received for filled order, keeping fill");
            stats.terminal_conflicts += 1;
            return Err(ExchangeError::DuplicateTerminalState(id));
        }

        let inserted = self.cancels.insert(cancel);
        if inserted {
            stats.cancels_accepted += 1;
            debug!(order_id = %id, "Order cancelled");
        } else {
            stats.duplicates += 1;
        }
        Ok(inserted)
    }

    /// Append a fill. A fill for a cancelled order is kept and logged; the
    /// order stays out of the open set either way.
    pub fn add_fill(&self, fill: FillRecord) -> bool {
        let id = fill.id;
        let mut stats = self.stats.write();
        let conflicted = self.cancels.contains(&id);
        let inserted = self.fills.insert(fill);

        if inserted {
            stats.fills_accepted += 1;
            if conflicted {
                stats.terminal_conflicts += 1;
                warn!(order_id = %id, "Fill received for cancelled order, fill is authoritative");
            }
            debug!(order_id = %id, "Order filled");
        } else {
            stats.duplicates += 1;
        }
        inserted
    }

    /// Validate and append a raw event history. Invalid records are skipped.
    pub fn ingest(&self, log: RawEventLog) -> IngestStats {
        let before = self.stats();
        let mut rejected = 0u64;

        for raw in log.orders {
            match Order::try_from(raw) {
                Ok(order) => {
                    self.add_order(order);
                }
                Err(e) => {
                    warn!(error = %e, "Rejected order record");
                    rejected += 1;
                }
            }
        }

        for raw in log.fills {
            match FillRecord::try_from(raw) {
                Ok(fill) => {
                    self.add_fill(fill);
                }
                Err(e) => {
                    warn!(error = %e, "Rejected fill record");
                    rejected += 1;
                }
            }
        }

        // Fills first so that conflicting cancels are caught against the full fill set
        for raw in log.cancels {
            match CancelRecord::try_from(raw) {
                Ok(cancel) => {
                    if let Err(e) = self.add_cancel(cancel) {
                        debug!(error = %e, "Cancel skipped");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Rejected cancel record");
                    rejected += 1;
                }
            }
        }

        self.stats.write().rejected += rejected;
        let after = self.stats();
        let delta = IngestStats {
            orders_accepted: after.orders_accepted - before.orders_accepted,
            cancels_accepted: after.cancels_accepted - before.cancels_accepted,
            fills_accepted: after.fills_accepted - before.fills_accepted,
            duplicates: after.duplicates - before.duplicates,
            terminal_conflicts: after.terminal_conflicts - before.terminal_conflicts,
            rejected,
        };

        info!(
            orders = delta.orders_accepted,
            cancels = delta.cancels_accepted,
            fills = delta.fills_accepted,
            duplicates = delta.duplicates,
            conflicts = delta.terminal_conflicts,
            rejected = delta.rejected,
            "Event history ingested"
        );
        delta
    }

    /// Take a snapshot of all three streams
    pub fn snapshot(&self) -> ExchangeSnapshot {
        ExchangeSnapshot {
            orders: self.orders.snapshot(),
            cancels: self.cancels.snapshot(),
            fills: self.fills.snapshot(),
        }
    }

    pub fn versions(&self) -> StreamVersions {
        StreamVersions {
            orders: self.orders.len(),
            cancels: self.cancels.len(),
            fills: self.fills.len(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        *self.stats.read()
    }
}

impl Default for ExchangeStore {
    fn default() -> Self {
        Self::new()
    }
}
