mod amount;
mod decorated;
mod fill;
mod order;
mod pair;
pub mod raw;

pub use amount::{from_decimal_units, to_decimal_units, TOKEN_DECIMALS};
pub use decorated::{DecoratedOrder, OrderSign, PriceColor};
pub use fill::FillRecord;
pub use order::{CancelRecord, Order, OrderId, OrderSide, TradeRecord, MAX_TIMESTAMP};
pub use pair::{ResolvedPair, TradingPair};
