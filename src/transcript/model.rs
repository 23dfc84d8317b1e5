use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::TimeSpan;
use crate::foundation::error::{CaptionError, CaptionResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One transcribed word with its spoken interval in seconds.
pub struct Word {
    /// Word text, already trimmed.
    pub text: String,
    /// Start of the word in seconds.
    pub start: f64,
    /// End of the word in seconds (`>= start`).
    pub end: f64,
}

impl Word {
    /// Build a word value. Validation happens when it joins a [`Transcript`].
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// The active interval `[start, end)`.
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Validated, ordered word-level transcription result.
///
/// Read-only once built: every downstream stage borrows it.
pub struct Transcript {
    words: Vec<Word>,
}

impl Transcript {
    /// Latest accepted timestamp in seconds (about 11.5 days).
    pub const MAX_TIMESTAMP_SECS: f64 = 1_000_000.0;

    /// Validate and wrap an ordered word sequence.
    ///
    /// Start times must be non-decreasing; a word may overlap the next one.
    pub fn new(words: Vec<Word>) -> CaptionResult<Self> {
        let mut prev_start = f64::NEG_INFINITY;
        for (i, w) in words.iter().enumerate() {
            if w.text.trim().is_empty() {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} has empty text"
                )));
            }
            if !w.start.is_finite() || !w.end.is_finite() {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{}') has non-finite timestamps",
                    w.text
                )));
            }
            if w.start < 0.0 {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{}') starts before 0",
                    w.text
                )));
            }
            if w.end > Self::MAX_TIMESTAMP_SECS {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{}') ends at {}s, past the {}s limit",
                    w.text,
                    w.end,
                    Self::MAX_TIMESTAMP_SECS
                )));
            }
            if w.start > w.end {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{}') has start {} > end {}",
                    w.text, w.start, w.end
                )));
            }
            if w.start < prev_start {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{}') starts at {} before the previous word ({prev_start})",
                    w.text, w.start
                )));
            }
            prev_start = w.start;
        }
        Ok(Self { words })
    }

    /// Build from `(text, start_seconds, end_seconds)` triples.
    pub fn from_triples<I, S>(triples: I) -> CaptionResult<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        Self::new(
            triples
                .into_iter()
                .map(|(text, start, end)| Word::new(text, start, end))
                .collect(),
        )
    }

    /// Parse a transcript JSON document.
    ///
    /// Accepts the Whisper result shape (`segments[].words[]` with `word`/`start`/`end`),
    /// `{"words": [...]}` and a bare list of `{text, start, end}`. Words are trimmed and blank
    /// entries dropped before validation.
    pub fn from_json_str(s: &str) -> CaptionResult<Self> {
        let file: TranscriptFile = serde_json::from_str(s)
            .map_err(|e| CaptionError::malformed_transcript(format!("parse transcript JSON: {e}")))?;
        Self::from_records(file.into_records())
    }

    /// Parse a transcript JSON file from disk (see [`Transcript::from_json_str`]).
    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CaptionError::malformed_transcript(format!(
                "open transcript JSON '{}': {e}",
                path.display()
            ))
        })?;
        let file: TranscriptFile = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            CaptionError::malformed_transcript(format!(
                "parse transcript JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_records(file.into_records())
    }

    fn from_records(records: Vec<WordRecord>) -> CaptionResult<Self> {
        let mut words = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        for (i, r) in records.into_iter().enumerate() {
            let text = r.text.trim();
            if text.is_empty() {
                skipped += 1;
                continue;
            }
            let (Some(start), Some(end)) = (r.start, r.end) else {
                return Err(CaptionError::malformed_transcript(format!(
                    "word {i} ('{text}') is missing a timestamp"
                )));
            };
            words.push(Word::new(text, start, end));
        }
        if skipped > 0 {
            tracing::debug!(skipped, "dropped blank transcript words");
        }
        Self::new(words)
    }

    /// The words in spoken order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when nothing was transcribed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Latest word end, or 0 for an empty transcript.
    pub fn end_secs(&self) -> f64 {
        self.words.iter().map(|w| w.end).fold(0.0, f64::max)
    }

    /// Serialize as `{"words": [...]}`, the form [`Transcript::from_json_str`] reads back.
    pub fn to_json_string(&self) -> CaptionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CaptionError::serde(e.to_string()))
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Whisper { segments: Vec<SegmentRecord> },
    Words { words: Vec<WordRecord> },
    List(Vec<WordRecord>),
}

impl TranscriptFile {
    fn into_records(self) -> Vec<WordRecord> {
        match self {
            Self::Whisper { segments } => segments.into_iter().flat_map(|s| s.words).collect(),
            Self::Words { words } | Self::List(words) => words,
        }
    }
}

#[derive(serde::Deserialize)]
struct SegmentRecord {
    #[serde(default)]
    words: Vec<WordRecord>,
}

#[derive(serde::Deserialize)]
struct WordRecord {
    #[serde(alias = "word")]
    text: String,
    #[serde(default)]
    start: Option<f64>,
    #[serde(default)]
    end: Option<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/model.rs"]
mod tests;
