//! Record builders shared by the unit tests

use alloy_primitives::{Address, U256};
use exchange_core::types::{
    from_decimal_units, CancelRecord, FillRecord, Order, OrderId, ResolvedPair, TradingPair,
};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const START: u64 = 1_700_000_000;

pub fn base() -> Address {
    Address::repeat_byte(0x01)
}

pub fn quote() -> Address {
    Address::repeat_byte(0x02)
}

pub fn other_token() -> Address {
    Address::repeat_byte(0x03)
}

pub fn alice() -> Address {
    Address::repeat_byte(0xaa)
}

pub fn bob() -> Address {
    Address::repeat_byte(0xbb)
}

pub fn pair() -> TradingPair {
    TradingPair::new(base(), quote())
}

pub fn resolved() -> ResolvedPair {
    ResolvedPair {
        base: base(),
        quote: quote(),
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn units(s: &str) -> U256 {
    from_decimal_units(dec(s)).unwrap()
}

/// Order giving the quote asset; priced `price` per unit given
pub fn buy(id: u64, price: &str, timestamp: u64) -> Order {
    Order {
        id: OrderId::from(id),
        user: alice(),
        token_get: base(),
        amount_get: units(price),
        token_give: quote(),
        amount_give: units("1"),
        timestamp,
    }
}

/// Order giving the base asset; priced `price` per unit received
pub fn sell(id: u64, price: &str, timestamp: u64) -> Order {
    Order {
        id: OrderId::from(id),
        user: alice(),
        token_get: quote(),
        amount_get: units("1"),
        token_give: base(),
        amount_give: units(price),
        timestamp,
    }
}

/// Fill of a buy order created by alice and taken by bob
pub fn fill(id: u64, price: &str, timestamp: u64) -> FillRecord {
    let order = buy(id, price, timestamp);
    FillRecord {
        id: order.id,
        user: bob(),
        creator: order.user,
        token_get: order.token_get,
        amount_get: order.amount_get,
        token_give: order.token_give,
        amount_give: order.amount_give,
        timestamp,
    }
}

pub fn cancel(id: u64, timestamp: u64) -> CancelRecord {
    CancelRecord {
        id: OrderId::from(id),
        user: alice(),
        timestamp,
    }
}
