pub mod lexicon;

pub use lexicon::LexiconScorer;

use anyhow::Result;

/// Produces a polarity score for a piece of text.
///
/// Scores fall in [-1.0, 1.0]: negative near -1, positive near +1, neutral or
/// mixed near 0. Identical input must always produce the same score.
pub trait Scorer: Send + Sync {
    fn score(&self, text: &str) -> Result<f64>;
}
