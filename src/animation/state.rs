//! Per-word animation state as a pure function of query time.
//!
//! A word moves `Inactive -> Ramping -> Steady -> Inactive` as `t` sweeps across
//! `[start, start + ramp)` and `[start + ramp, end)`. Nothing is carried between queries, so
//! frames may be evaluated in any order or in parallel.

use crate::caption::group::Chunk;
use crate::style::spec::StyleSpec;
use crate::transcript::model::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Where a word is in its animation at a given instant.
pub enum WordPhase {
    /// Outside the word's active interval.
    Inactive,
    /// Inside the zoom-in ramp.
    Ramping,
    /// Active at full size.
    Steady,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Visual state of one word at one instant.
pub struct WordState {
    /// Animation phase.
    pub phase: WordPhase,
    /// Scale factor; only meaningful when the word is active (1.0 otherwise).
    pub scale: f64,
    /// `true` for at most one word per chunk at any instant.
    pub is_highlighted: bool,
}

impl WordState {
    const INACTIVE: Self = Self {
        phase: WordPhase::Inactive,
        scale: 1.0,
        is_highlighted: false,
    };

    /// `true` unless the word is [`WordPhase::Inactive`].
    pub fn is_active(&self) -> bool {
        self.phase != WordPhase::Inactive
    }
}

/// Half-open activity test. A zero-length word is active only at its own instant.
pub fn is_word_active(t: f64, word: &Word) -> bool {
    if word.start == word.end {
        t == word.start
    } else {
        word.span().contains(t)
    }
}

/// Phase and scale of `word` at `t`, ignoring highlight.
pub fn word_phase(t: f64, word: &Word, spec: &StyleSpec) -> (WordPhase, f64) {
    if !is_word_active(t, word) {
        return (WordPhase::Inactive, 1.0);
    }
    if !spec.transition {
        return (WordPhase::Steady, 1.0);
    }
    let ramp = spec.zoom.ramp_fraction * (word.end - word.start);
    let into = t - word.start;
    if ramp > 0.0 && into < ramp {
        let scale = spec
            .zoom
            .ease
            .interpolate(spec.zoom.start_scale, 1.0, into / ramp);
        (WordPhase::Ramping, scale)
    } else {
        (WordPhase::Steady, 1.0)
    }
}

/// Local index of the word to highlight in `chunk` at `t`.
///
/// When overlapping words are both active, the later one wins. Returns `None` in gaps.
pub fn highlighted_word(t: f64, chunk: &Chunk) -> Option<usize> {
    chunk.words.iter().rposition(|w| is_word_active(t, w))
}

/// Visual state of word `word` (local index within `chunk`) at `query_time`.
///
/// An out-of-range index reports an inactive word.
pub fn render_state(query_time: f64, chunk: &Chunk, word: usize, spec: &StyleSpec) -> WordState {
    let Some(w) = chunk.words.get(word) else {
        return WordState::INACTIVE;
    };
    let (phase, scale) = word_phase(query_time, w, spec);
    if phase == WordPhase::Inactive {
        return WordState::INACTIVE;
    }
    WordState {
        phase,
        scale,
        is_highlighted: spec.highlight && highlighted_word(query_time, chunk) == Some(word),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
