use exchange_core::types::{CancelRecord, FillRecord, Order, OrderId};
use std::collections::HashSet;
use tracing::warn;

/// Orders that are neither filled nor cancelled, in submission order.
///
/// Ids are compared as canonical [`OrderId`]s. An id present in both terminal
/// sets is logged; the order is closed either way and the fill is treated as
/// authoritative.
pub fn open_orders(
    all_orders: &[Order],
    filled_orders: &[FillRecord],
    cancelled_orders: &[CancelRecord],
) -> Vec<Order> {
    let filled: HashSet<OrderId> = filled_orders.iter().map(|f| f.id).collect();
    let cancelled: HashSet<OrderId> = cancelled_orders.iter().map(|c| c.id).collect();

    let conflicts = terminal_conflicts(&filled, &cancelled);
    if !conflicts.is_empty() {
        warn!(
            count = conflicts.len(),
            ids = ?conflicts,
            "Orders both filled and cancelled, treating as filled"
        );
    }

    all_orders
        .iter()
        .filter(|order| !filled.contains(&order.id) && !cancelled.contains(&order.id))
        .cloned()
        .collect()
}

/// Ids that appear in both the filled and the cancelled set, ascending
pub fn terminal_conflicts(filled: &HashSet<OrderId>, cancelled: &HashSet<OrderId>) -> Vec<OrderId> {
    let mut conflicts: Vec<OrderId> = filled.intersection(cancelled).copied().collect();
    conflicts.sort();
    conflicts
}
