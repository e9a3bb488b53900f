//! Reference segmenters
//!
//! Unicode-aware word/punctuation and sentence segmentation (UAX #29) plus a
//! regex-driven segmenter for custom token shapes.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::pipeline::errors::{BoxError, Result};
use crate::pipeline::traits::TextSegmenter;

/// Splits text on UAX #29 word boundaries, keeping punctuation as separate
/// units and dropping whitespace.
///
/// `"Testing the NLP pipeline."` → `["Testing", "the", "NLP", "pipeline", "."]`
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPunctSegmenter;

impl WordPunctSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Segment without allocating owned units.
    pub fn split<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split_word_bounds()
            .filter(|piece| !piece.trim().is_empty())
    }
}

impl TextSegmenter for WordPunctSegmenter {
    fn segment(&self, text: &str) -> std::result::Result<Vec<String>, BoxError> {
        Ok(self.split(text).map(String::from).collect())
    }
}

/// Treats each sentence (UAX #29 sentence boundaries) as one unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSegmenter;

impl TextSegmenter for SentenceSegmenter {
    fn segment(&self, text: &str) -> std::result::Result<Vec<String>, BoxError> {
        Ok(text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Regex-driven segmenter.
///
/// By default every match of the pattern is a unit. With
/// [`gaps`](Self::with_gaps) the pattern matches separators instead and the
/// text between matches becomes the units.
#[derive(Debug, Clone)]
pub struct RegexSegmenter {
    pattern: Regex,
    gaps: bool,
}

impl RegexSegmenter {
    /// Word characters only; punctuation is dropped.
    pub const DEFAULT_PATTERN: &'static str = r"\w+";

    /// Compile `pattern`. Invalid patterns are reported as `invalid_spec`.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            gaps: false,
        })
    }

    pub fn with_gaps(mut self, gaps: bool) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexSegmenter {
    fn default() -> Self {
        Self {
            pattern: Regex::new(Self::DEFAULT_PATTERN).expect("default pattern compiles"),
            gaps: false,
        }
    }
}

impl TextSegmenter for RegexSegmenter {
    fn segment(&self, text: &str) -> std::result::Result<Vec<String>, BoxError> {
        let units = if self.gaps {
            self.pattern
                .split(text)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        } else {
            self.pattern
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        };
        Ok(units)
    }
}
