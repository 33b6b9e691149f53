mod order_cancelled;
mod order_filled;
mod order_placed;

pub use order_cancelled::OrderCancelledHandler;
pub use order_filled::OrderFilledHandler;
pub use order_placed::OrderPlacedHandler;
