use alloy_primitives::Address;
use exchange_core::types::TradingPair;
use exchange_store::StreamVersions;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

use crate::counters;

/// Everything a view result depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub versions: StreamVersions,
    pub pair: TradingPair,
    /// `None` for views that do not depend on the account
    pub account: Option<Address>,
}

/// Single-entry memo for one view.
///
/// Holds the last result and the key it was computed for. A different key
/// (new records appended, pair or account changed) recomputes and replaces it.
#[derive(Debug)]
pub struct ViewMemo<V> {
    view: &'static str,
    slot: Mutex<Option<(ViewKey, Option<Arc<V>>)>>,
}

impl<V> ViewMemo<V> {
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            slot: Mutex::new(None),
        }
    }

    /// Return the memoized result for `key`, computing it on a miss.
    /// The computation runs without holding the lock.
    pub fn get_or_compute<F>(&self, key: ViewKey, compute: F) -> Option<Arc<V>>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some((cached_key, value)) = self.slot.lock().as_ref() {
            if *cached_key == key {
                counters::view_cache_hit(self.view);
                trace!(view = self.view, "View served from memo");
                return value.clone();
            }
        }

        let value = compute().map(Arc::new);
        counters::view_computed(self.view);
        trace!(view = self.view, versions = ?key.versions, "View recomputed");

        *self.slot.lock() = Some((key, value.clone()));
        value
    }

    /// Drop the memoized result
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.slot.lock().is_some()
    }
}
