//! Reference labelers
//!
//! A dictionary-backed unigram tagger, the trainer that builds its lexicon
//! from tagged sentences, and a constant labeler for tests and dry runs.

use rustc_hash::FxHashMap;

use crate::pipeline::errors::BoxError;
use crate::pipeline::traits::UnitLabeler;
use crate::types::Annotation;

/// Label given to units missing from a lexicon unless overridden.
pub const DEFAULT_LABEL: &str = "NN";

/// Labels every unit with the same label.
#[derive(Debug, Clone)]
pub struct ConstantTagger {
    label: String,
}

impl ConstantTagger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl UnitLabeler for ConstantTagger {
    fn label(&self, units: &[String]) -> Result<Vec<Annotation>, BoxError> {
        Ok(units
            .iter()
            .map(|u| (u.clone(), self.label.clone()))
            .collect())
    }
}

/// Dictionary lookup tagger: known units get their lexicon label, unseen
/// units get the default label.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: FxHashMap<String, String>,
    default_label: String,
}

impl LexiconTagger {
    pub fn new<I, K, V>(lexicon: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            lexicon: lexicon
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            default_label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Label for a single unit.
    pub fn lookup(&self, unit: &str) -> &str {
        self.lexicon
            .get(unit)
            .map(String::as_str)
            .unwrap_or(&self.default_label)
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl UnitLabeler for LexiconTagger {
    fn label(&self, units: &[String]) -> Result<Vec<Annotation>, BoxError> {
        Ok(units
            .iter()
            .map(|u| (u.clone(), self.lookup(u).to_string()))
            .collect())
    }
}

/// Builds a unigram lexicon from tagged sentences.
///
/// When a unit appears with several labels, the last one seen wins.
#[derive(Debug, Clone, Default)]
pub struct UnigramTrainer {
    lexicon: FxHashMap<String, String>,
}

impl UnigramTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every `(unit, label)` pair of every sentence to the lexicon.
    pub fn train<'c, C, S>(&mut self, corpus: C) -> &mut Self
    where
        C: IntoIterator<Item = S>,
        S: IntoIterator<Item = &'c (String, String)>,
    {
        for sentence in corpus {
            for (unit, label) in sentence {
                self.lexicon.insert(unit.clone(), label.clone());
            }
        }
        self
    }

    pub fn lexicon(&self) -> &FxHashMap<String, String> {
        &self.lexicon
    }

    /// Finish training and produce a tagger with [`DEFAULT_LABEL`] for
    /// unseen units.
    pub fn into_tagger(self) -> LexiconTagger {
        LexiconTagger {
            lexicon: self.lexicon,
            default_label: DEFAULT_LABEL.to_string(),
        }
    }
}
