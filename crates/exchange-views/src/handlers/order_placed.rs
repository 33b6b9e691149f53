use alloy_primitives::Log;
use alloy_sol_types::SolEvent;
use exchange_core::events;
use exchange_core::types::Order;
use exchange_core::{ExchangeError, Result};
use exchange_store::ExchangeStore;
use std::sync::Arc;
use tracing::debug;

pub struct OrderPlacedHandler {
    store: Arc<ExchangeStore>,
}

impl OrderPlacedHandler {
    pub fn new(store: Arc<ExchangeStore>) -> Self {
        Self { store }
    }

    /// Returns true if the order was new
    pub fn handle(&self, log: &Log) -> Result<bool> {
        let event = events::Order::decode_log(log)
            .map_err(|e| ExchangeError::EventDecode(e.to_string()))?;

        let order = Order::try_from(&event.data)?;

        debug!(
            order_id = %order.id,
            user = ?order.user,
            token_get = ?order.token_get,
            token_give = ?order.token_give,
            "Order placed"
        );

        Ok(self.store.add_order(order))
    }
}
