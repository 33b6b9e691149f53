pub mod aggregate;
pub mod cache;
pub mod config;
pub mod counters;
pub mod decorate;
mod handlers;
pub mod pipeline;
pub mod processor;
pub mod reconcile;
pub mod views;

#[cfg(test)]
mod fixtures;

pub use aggregate::{OrderBook, PriceChart};
pub use config::PipelineConfig;
pub use decorate::decorate_order;
pub use handlers::{OrderCancelledHandler, OrderFilledHandler, OrderPlacedHandler};
pub use pipeline::ViewPipeline;
pub use processor::EventProcessor;
pub use reconcile::open_orders;
pub use views::{AccountEvent, ViewContext};
