use dashmap::DashMap;
use exchange_core::types::{CancelRecord, FillRecord, Order, OrderId};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Record addressed by the order it refers to
pub trait Keyed {
    fn key(&self) -> OrderId;
}

impl Keyed for Order {
    fn key(&self) -> OrderId {
        self.id
    }
}

impl Keyed for CancelRecord {
    fn key(&self) -> OrderId {
        self.id
    }
}

impl Keyed for FillRecord {
    fn key(&self) -> OrderId {
        self.id
    }
}

/// Append-only stream of records, at most one per order id.
///
/// Readers take cheap `Arc` snapshots; an append after a snapshot copies the
/// backing vector once so the snapshot never changes underneath its holder.
#[derive(Debug)]
pub struct RecordStream<T> {
    kind: &'static str,
    /// Records in arrival order
    records: RwLock<Arc<Vec<T>>>,
    /// Index: order id -> position in `records`
    index: DashMap<OrderId, usize>,
}

impl<T: Keyed + Clone> RecordStream<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            records: RwLock::new(Arc::new(Vec::new())),
            index: DashMap::new(),
        }
    }

    /// Append a record (idempotent on id, first record wins).
    /// Returns true if the record was appended, false if the id was already present.
    pub fn insert(&self, record: T) -> bool {
        let key = record.key();
        let mut records = self.records.write();

        if self.index.contains_key(&key) {
            debug!(
                kind = self.kind,
                order_id = %key,
                "Record already exists (duplicate), skipping insert"
            );
            return false;
        }

        let position = records.len();
        Arc::make_mut(&mut *records).push(record);
        self.index.insert(key, position);
        true
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains_key(id)
    }

    /// Get record by order id
    pub fn get(&self, id: &OrderId) -> Option<T> {
        let position = *self.index.get(id)?;
        self.records.read().get(position).cloned()
    }

    /// Immutable view of every record appended so far
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.records.read().clone()
    }

    /// Number of records; grows monotonically
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
