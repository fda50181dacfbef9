use async_trait::async_trait;

use crate::{
    db::{BatchReceipt, Database, ScoredRecord},
    error::PipelineError,
};

/// Durable destination for scored batches.
///
/// `save` must be all-or-nothing: on error none of the batch may be visible
/// to later reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save(&self, records: &[ScoredRecord]) -> Result<BatchReceipt, PipelineError>;
}

#[async_trait]
impl RecordStore for Database {
    async fn save(&self, records: &[ScoredRecord]) -> Result<BatchReceipt, PipelineError> {
        self.insert_records(records)
            .await
            .map_err(PipelineError::store_unavailable)
    }
}
