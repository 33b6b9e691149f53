mod stats;
mod store;
mod stream;

pub use stats::{IngestStats, StreamVersions};
pub use store::{ExchangeSnapshot, ExchangeStore};
pub use stream::{Keyed, RecordStream};
