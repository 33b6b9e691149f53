pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::ExchangeConfig;
pub use error::{ExchangeError, Result};
