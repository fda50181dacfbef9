use serde::Serialize;

use crate::{
    analysis::Analyzer,
    db::BatchReceipt,
    error::{FailureReason, PipelineError},
};

use super::store::RecordStore;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// What a caller learns from one `run`: either everything was stored, or
/// nothing was and the reason says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Success { count: usize, batch_id: String },
    Failure { reason: FailureReason, message: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    pub fn count(&self) -> Option<usize> {
        match self {
            RunOutcome::Success { count, .. } => Some(*count),
            RunOutcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            RunOutcome::Success { .. } => None,
            RunOutcome::Failure { reason, .. } => Some(*reason),
        }
    }
}

impl From<PipelineError> for RunOutcome {
    fn from(err: PipelineError) -> Self {
        RunOutcome::Failure {
            reason: err.reason(),
            message: err.to_string(),
        }
    }
}

impl From<Result<BatchReceipt, PipelineError>> for RunOutcome {
    fn from(result: Result<BatchReceipt, PipelineError>) -> Self {
        match result {
            Ok(receipt) => RunOutcome::Success {
                count: receipt.count,
                batch_id: receipt.batch_id,
            },
            Err(err) => err.into(),
        }
    }
}

/// Runs analysis and then stores the resulting batch.
///
/// Runs are not idempotent: the same arguments twice store two batches.
pub struct Coordinator<S> {
    analyzer: Analyzer,
    store: S,
}

impl<S: RecordStore> Coordinator<S> {
    pub fn new(analyzer: Analyzer, store: S) -> Self {
        Self { analyzer, store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// The store is only written when analysis succeeds.
    pub async fn try_run(
        &self,
        text: &str,
        split_size: i64,
    ) -> Result<BatchReceipt, PipelineError> {
        let records = self.analyzer.analyze(text, split_size)?;
        let receipt = self.store.save(&records).await?;

        log_info!(
            "Stored batch {} with {} records",
            receipt.batch_id,
            receipt.count
        );
        Ok(receipt)
    }

    pub async fn run(&self, text: &str, split_size: i64) -> RunOutcome {
        let result = self.try_run(text, split_size).await;

        if let Err(err) = &result {
            match err.reason() {
                FailureReason::StoreUnavailable => log_error!("Analysis run failed: {err}"),
                _ => log_warn!("Analysis run failed: {err}"),
            }
        }

        result.into()
    }
}
