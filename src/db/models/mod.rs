pub mod record;

pub use record::{BatchReceipt, PersistedRecord, ScoredRecord};
