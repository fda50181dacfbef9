pub mod coordinator;
pub mod store;

pub use coordinator::{Coordinator, RunOutcome};
pub use store::RecordStore;
