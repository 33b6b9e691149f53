use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::{OrderSide, TradeRecord};

/// Display color token for a side or a price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceColor {
    #[serde(rename = "#25CE8F")]
    Green,
    #[serde(rename = "#F45353")]
    Red,
}

impl PriceColor {
    pub const fn for_side(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => PriceColor::Green,
            OrderSide::Sell => PriceColor::Red,
        }
    }
}

/// Sign shown next to a filled amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderSign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl OrderSign {
    pub const fn for_side(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => OrderSign::Plus,
            OrderSide::Sell => OrderSign::Minus,
        }
    }
}

impl fmt::Display for OrderSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSign::Plus => f.write_str("+"),
            OrderSign::Minus => f.write_str("-"),
        }
    }
}

/// An order or fill enriched with display fields for one trading pair.
///
/// The base fields (`token0_amount` through `formatted_timestamp`) come from
/// the first decoration pass; the optional fields are filled by the
/// view-specific second pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedOrder<R> {
    #[serde(flatten)]
    pub record: R,
    /// Base asset quantity
    pub token0_amount: Decimal,
    /// Quote asset quantity
    pub token1_amount: Decimal,
    /// Quote per base, 4 decimal places. `None` when the base amount is zero.
    pub token_price: Option<Decimal>,
    pub formatted_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type_class: Option<PriceColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fill_action: Option<OrderSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_sign: Option<OrderSign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_price_class: Option<PriceColor>,
}

impl<R: TradeRecord> DecoratedOrder<R> {
    pub fn is_degenerate(&self) -> bool {
        self.token_price.is_none()
    }

    pub fn timestamp(&self) -> u64 {
        self.record.timestamp()
    }
}
