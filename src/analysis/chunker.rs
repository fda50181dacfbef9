use crate::error::PipelineError;

/// Split size used when a caller does not pick one.
pub const DEFAULT_SPLIT_SIZE: i64 = 100;

/// A run of consecutive words from the input, joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub position: usize,
}

impl Chunk {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Splits text into chunks of a fixed number of whitespace-separated words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordChunker {
    split_size: usize,
}

impl WordChunker {
    pub fn new(split_size: i64) -> Result<Self, PipelineError> {
        if split_size < 1 {
            return Err(PipelineError::InvalidArgument(format!(
                "split_size must be at least 1, got {split_size}"
            )));
        }

        let split_size = usize::try_from(split_size).map_err(|_| {
            PipelineError::InvalidArgument(format!(
                "split_size {split_size} does not fit in memory addressing"
            ))
        })?;

        Ok(Self { split_size })
    }

    #[cfg(test)]
    pub(crate) fn split_size(&self) -> usize {
        self.split_size
    }

    /// Every chunk holds exactly `split_size` words except the last, which
    /// holds the remainder. Text without words yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();

        words
            .chunks(self.split_size)
            .enumerate()
            .map(|(position, group)| Chunk {
                text: group.join(" "),
                position,
            })
            .collect()
    }
}

pub fn chunk_text(text: &str, split_size: i64) -> Result<Vec<Chunk>, PipelineError> {
    Ok(WordChunker::new(split_size)?.chunk(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureReason;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|chunk| chunk.text.as_str()).collect()
    }

    #[test]
    fn splits_sample_sentence_into_fives() {
        let chunks = chunk_text("I love X. It is great. It is easy and fast.", 5).unwrap();

        assert_eq!(
            texts(&chunks),
            vec!["I love X. It is", "great. It is easy and", "fast."]
        );
        let counts: Vec<usize> = chunks.iter().map(Chunk::word_count).collect();
        assert_eq!(counts, vec![5, 5, 1]);
        let positions: Vec<usize> = chunks.iter().map(|chunk| chunk.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn collapses_irregular_whitespace() {
        let chunks = chunk_text("  alpha\t\tbeta \n gamma   delta  ", 3).unwrap();
        assert_eq!(texts(&chunks), vec!["alpha beta gamma", "delta"]);
    }

    #[test]
    fn empty_and_blank_text_produce_no_chunks() {
        assert!(chunk_text("", 100).unwrap().is_empty());
        assert!(chunk_text(" \n\t ", 1).unwrap().is_empty());
    }

    #[test]
    fn split_size_larger_than_text_gives_one_chunk() {
        let chunks = chunk_text("just three words", DEFAULT_SPLIT_SIZE).unwrap();
        assert_eq!(texts(&chunks), vec!["just three words"]);
    }

    #[test]
    fn non_positive_split_sizes_are_rejected() {
        for split_size in [0, -1, i64::MIN] {
            let err = chunk_text("some words here", split_size).unwrap_err();
            assert_eq!(err.reason(), FailureReason::InvalidArgument);
        }
    }

    #[test]
    fn chunks_reproduce_the_word_sequence() {
        let text = "the quick brown fox jumps over the lazy dog while the cat sleeps soundly";
        let original: Vec<&str> = text.split_whitespace().collect();

        for split_size in 1..=original.len() as i64 + 2 {
            let chunker = WordChunker::new(split_size).unwrap();
            let chunks = chunker.chunk(text);

            let rejoined: Vec<&str> = chunks
                .iter()
                .flat_map(|chunk| chunk.text.split_whitespace())
                .collect();
            assert_eq!(rejoined, original, "split_size {split_size}");

            let (last, rest) = chunks.split_last().unwrap();
            assert!(rest.iter().all(|chunk| chunk.word_count() == chunker.split_size()));
            assert!((1..=chunker.split_size()).contains(&last.word_count()));
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "one two three four five six seven";
        assert_eq!(chunk_text(text, 2).unwrap(), chunk_text(text, 2).unwrap());
    }
}
