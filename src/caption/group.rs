use crate::foundation::core::TimeSpan;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::transcript::model::Word;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A run of consecutive words rendered together as one caption block.
pub struct Chunk {
    /// Position of the chunk in the run (0-based).
    pub index: usize,
    /// Transcript index of the first word in this chunk.
    pub first_word: usize,
    /// The words, in spoken order. Never empty.
    pub words: Vec<Word>,
}

impl Chunk {
    /// Start of the first word.
    pub fn start(&self) -> f64 {
        self.words.first().map_or(0.0, |w| w.start)
    }

    /// End of the last word.
    pub fn end(&self) -> f64 {
        self.words.last().map_or(0.0, |w| w.end)
    }

    /// From [`Chunk::start`] to the latest word end; an overlapping word can outlast the last one.
    pub fn span(&self) -> TimeSpan {
        let end = self.words.iter().map(|w| w.end).fold(self.end(), f64::max);
        TimeSpan::new(self.start(), end)
    }

    /// Transcript index of the word at `local` within this chunk.
    pub fn global_word_index(&self, local: usize) -> usize {
        self.first_word + local
    }

    /// Words joined with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split `words` into consecutive chunks of `size` words; the last chunk holds the remainder.
///
/// An empty input yields no chunks. `size == 0` is an [`CaptionError::InvalidConfiguration`].
pub fn group_words(words: &[Word], size: usize) -> CaptionResult<Vec<Chunk>> {
    if size == 0 {
        return Err(CaptionError::invalid_configuration(
            "number_of_words must be > 0",
        ));
    }
    Ok(words
        .chunks(size)
        .enumerate()
        .map(|(index, run)| Chunk {
            index,
            first_word: index * size,
            words: run.to_vec(),
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/caption/group.rs"]
mod tests;
