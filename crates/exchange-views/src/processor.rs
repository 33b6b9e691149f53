use alloy_primitives::{Address, Log};
use alloy_sol_types::SolEvent;
use exchange_core::events::{Cancel, Order, Trade};
use exchange_core::Result;
use exchange_store::ExchangeStore;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::counters;
use crate::handlers::{OrderCancelledHandler, OrderFilledHandler, OrderPlacedHandler};

/// Event processor that routes exchange logs to the handlers feeding the store
pub struct EventProcessor {
    store: Arc<ExchangeStore>,
    /// Only logs emitted by this contract are processed, when set
    exchange: Option<Address>,

    order_placed: OrderPlacedHandler,
    order_cancelled: OrderCancelledHandler,
    order_filled: OrderFilledHandler,
}

impl EventProcessor {
    pub fn new(store: Arc<ExchangeStore>) -> Self {
        Self {
            store: store.clone(),
            exchange: None,
            order_placed: OrderPlacedHandler::new(store.clone()),
            order_cancelled: OrderCancelledHandler::new(store.clone()),
            order_filled: OrderFilledHandler::new(store),
        }
    }

    /// Restrict processing to logs from one exchange contract
    pub fn with_exchange(mut self, exchange: Address) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<ExchangeStore> {
        &self.store
    }

    /// Check if a log is from a contract we care about
    pub fn is_relevant_log(&self, log: &Log) -> bool {
        self.exchange.map_or(true, |exchange| log.address == exchange)
    }

    /// Process a single log. Returns true if it appended a record.
    pub fn process_log(&self, log: &Log) -> Result<bool> {
        if !self.is_relevant_log(log) {
            trace!(address = ?log.address, "Skipping log from unrelated contract");
            return Ok(false);
        }

        let topic0 = match log.topics().first() {
            Some(t) => *t,
            None => {
                trace!("Skipping log without topic0");
                return Ok(false);
            }
        };

        let (event, appended) = match topic0 {
            sig if sig == Order::SIGNATURE_HASH => ("Order", self.order_placed.handle(log)?),
            sig if sig == Cancel::SIGNATURE_HASH => ("Cancel", self.order_cancelled.handle(log)?),
            sig if sig == Trade::SIGNATURE_HASH => ("Trade", self.order_filled.handle(log)?),
            _ => {
                trace!(topic0 = ?topic0, "Skipping unknown event");
                return Ok(false);
            }
        };

        counters::events_processed(event);
        debug!(event, appended, "Processed exchange event");
        Ok(appended)
    }

    /// Process logs in order; failures are returned alongside their position
    /// and do not stop the batch.
    pub fn process_logs<'a, I>(&self, logs: I) -> Vec<(usize, exchange_core::ExchangeError)>
    where
        I: IntoIterator<Item = &'a Log>,
    {
        logs.into_iter()
            .enumerate()
            .filter_map(|(i, log)| self.process_log(log).err().map(|e| (i, e)))
            .collect()
    }
}
