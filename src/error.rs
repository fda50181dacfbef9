use serde::Serialize;

/// Failure kinds reported by the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    InvalidArgument,
    ScoringFailed,
    StoreUnavailable,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InvalidArgument => "InvalidArgument",
            FailureReason::ScoringFailed => "ScoringFailed",
            FailureReason::StoreUnavailable => "StoreUnavailable",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("scoring failed for chunk {position}: {reason}")]
    ScoringFailed { position: usize, reason: String },
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PipelineError {
    pub fn reason(&self) -> FailureReason {
        match self {
            PipelineError::InvalidArgument(_) => FailureReason::InvalidArgument,
            PipelineError::ScoringFailed { .. } => FailureReason::ScoringFailed,
            PipelineError::StoreUnavailable(_) => FailureReason::StoreUnavailable,
        }
    }

    /// Wraps a store-layer error, keeping the whole context chain in the message.
    pub fn store_unavailable(err: anyhow::Error) -> Self {
        PipelineError::StoreUnavailable(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_context_chain() {
        let err = anyhow::anyhow!("disk I/O error").context("failed to commit record batch");
        let wrapped = PipelineError::store_unavailable(err);

        assert_eq!(wrapped.reason(), FailureReason::StoreUnavailable);
        assert_eq!(
            wrapped.to_string(),
            "store unavailable: failed to commit record batch: disk I/O error"
        );
    }

    #[test]
    fn reasons_serialize_by_name() {
        let json = serde_json::to_string(&FailureReason::ScoringFailed).unwrap();
        assert_eq!(json, "\"ScoringFailed\"");
        assert_eq!(FailureReason::InvalidArgument.as_str(), "InvalidArgument");
    }
}
