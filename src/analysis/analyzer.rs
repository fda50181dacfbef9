use std::{sync::Arc, thread, time::Instant};

use crate::{
    analysis::chunker::{chunk_text, Chunk},
    db::models::ScoredRecord,
    error::PipelineError,
    scoring::Scorer,
};

const ENABLE_LOGS: bool = true;

use crate::{log_elapsed, log_info, log_warn};

/// Position of a slice's first chunk, paired with how its worker finished.
type SliceResult = (usize, thread::Result<Result<Vec<ScoredRecord>, PipelineError>>);

/// Chunks text and scores every chunk, keeping chunk order.
#[derive(Clone)]
pub struct Analyzer {
    scorer: Arc<dyn Scorer>,
    workers: usize,
}

impl Analyzer {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer, workers: 1 }
    }

    /// Scores chunks on up to `workers` threads. Values below 1 mean 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[cfg(test)]
    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    /// Returns one record per chunk, `records[i]` holding the text of chunk `i`.
    ///
    /// If any chunk fails to score the whole analysis fails and no records are
    /// returned.
    pub fn analyze(
        &self,
        text: &str,
        split_size: i64,
    ) -> Result<Vec<ScoredRecord>, PipelineError> {
        let chunks = chunk_text(text, split_size)?;
        let started = Instant::now();

        let result = if self.workers > 1 && chunks.len() > 1 {
            self.score_parallel(&chunks)
        } else {
            score_sequential(self.scorer.as_ref(), &chunks)
        };

        log_elapsed!("Sentiment analysis", started);

        match result {
            Ok(records) => {
                log_info!("Scored {} chunks (split_size={})", records.len(), split_size);
                Ok(records)
            }
            Err(err) => {
                log_warn!("Discarding analysis: {err}");
                Err(err)
            }
        }
    }

    /// Scores contiguous slices of `chunks` on scoped threads and stitches the
    /// slices back together in their original order.
    fn score_parallel(&self, chunks: &[Chunk]) -> Result<Vec<ScoredRecord>, PipelineError> {
        let per_worker = chunks.len().div_ceil(self.workers);
        let scorer = self.scorer.as_ref();

        let slice_results: Vec<SliceResult> = thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .chunks(per_worker)
                .map(|slice| {
                    let first_position = slice[0].position;
                    let handle = scope.spawn(move || score_sequential(scorer, slice));
                    (first_position, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(first_position, handle)| (first_position, handle.join()))
                .collect()
        });

        let mut records = Vec::with_capacity(chunks.len());
        for (first_position, joined) in slice_results {
            let slice_records = joined.map_err(|_| PipelineError::ScoringFailed {
                position: first_position,
                reason: "scoring worker panicked".to_string(),
            })??;
            records.extend(slice_records);
        }

        Ok(records)
    }
}

fn score_sequential(
    scorer: &dyn Scorer,
    chunks: &[Chunk],
) -> Result<Vec<ScoredRecord>, PipelineError> {
    chunks.iter().map(|chunk| score_chunk(scorer, chunk)).collect()
}

fn score_chunk(scorer: &dyn Scorer, chunk: &Chunk) -> Result<ScoredRecord, PipelineError> {
    let score = scorer
        .score(&chunk.text)
        .map_err(|err| PipelineError::ScoringFailed {
            position: chunk.position,
            reason: format!("{err:#}"),
        })?;

    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(PipelineError::ScoringFailed {
            position: chunk.position,
            reason: format!("score {score} is outside [-1, 1]"),
        });
    }

    Ok(ScoredRecord::new(chunk.text.clone(), score))
}
