//! Pipeline specification types.
//!
//! A [`PipelineSpec`] is the declarative (JSON) form of a stage sequence.
//! It is built from the reference capabilities in [`crate::nlp`]; ordering
//! and document checks are left to the controller's validator.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "stages": [
//!     { "type": "segmenter", "pattern": "\\w+" },
//!     { "type": "annotator", "lexicon": { "the": "DT" }, "default_label": "NN" },
//!     { "type": "analyzer", "root_label": "S" }
//!   ],
//!   "strict": false
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::nlp::analyzer::FlatAnalyzer;
use crate::nlp::tagger::{ConstantTagger, LexiconTagger, UnigramTrainer};
use crate::nlp::tokenizer::{RegexSegmenter, SentenceSegmenter, WordPunctSegmenter};
use crate::types::Annotation;

use super::errors::{PipelineError, Result};
use super::sequence::StageSequence;
use super::stage::{Stage, StageKind};

/// Only supported spec version.
pub const SPEC_VERSION: u32 = 1;

/// Top-level pipeline specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Stages in execution order.
    #[serde(default)]
    pub stages: Vec<StageSpec>,

    /// If `true`, unrecognized top-level fields are errors; if `false`,
    /// they are logged and ignored.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// One stage entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageSpec {
    /// Regex segmentation when `pattern` is set, sentence units when
    /// `sentences` is set, Unicode word/punctuation otherwise.
    Segmenter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        /// Pattern matches separators rather than units.
        #[serde(default)]
        gaps: bool,
        #[serde(default)]
        sentences: bool,
    },
    /// Constant `label`, or a lexicon tagger from `lexicon` and/or a tagged
    /// `corpus` (lexicon entries override trained ones).
    Annotator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lexicon: Option<BTreeMap<String, String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corpus: Option<Vec<Vec<Annotation>>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_label: Option<String>,
    },
    /// Flat analyzer under `root_label` (default `"S"`).
    Analyzer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root_label: Option<String>,
    },
}

impl StageSpec {
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Segmenter { .. } => StageKind::Segmenter,
            Self::Annotator { .. } => StageKind::Annotator,
            Self::Analyzer { .. } => StageKind::Analyzer,
        }
    }

    /// Instantiate the stage this entry describes.
    pub fn build(&self) -> Result<Stage> {
        match self {
            Self::Segmenter {
                pattern,
                gaps,
                sentences,
            } => match (pattern.as_deref(), *sentences) {
                (Some(_), true) => Err(invalid(
                    self.kind(),
                    "segmenter cannot set both 'pattern' and 'sentences'",
                )),
                (Some(pattern), false) => Ok(Stage::segmenter(
                    RegexSegmenter::new(pattern)?.with_gaps(*gaps),
                )),
                (None, true) => Ok(Stage::segmenter(SentenceSegmenter)),
                (None, false) => Ok(Stage::segmenter(WordPunctSegmenter::new())),
            },
            Self::Annotator {
                label,
                lexicon,
                corpus,
                default_label,
            } => {
                if let Some(label) = label {
                    if lexicon.is_some() || corpus.is_some() || default_label.is_some() {
                        return Err(invalid(
                            self.kind(),
                            "annotator 'label' cannot be combined with a lexicon or corpus",
                        ));
                    }
                    return Ok(Stage::annotator(ConstantTagger::new(label.clone())));
                }
                if lexicon.is_none() && corpus.is_none() {
                    return Err(invalid(
                        self.kind(),
                        "annotator needs one of 'label', 'lexicon' or 'corpus'",
                    ));
                }
                let mut trainer = UnigramTrainer::new();
                if let Some(corpus) = corpus {
                    trainer.train(corpus);
                }
                let entries = trainer
                    .lexicon()
                    .clone()
                    .into_iter()
                    .chain(lexicon.clone().unwrap_or_default());
                let mut tagger = LexiconTagger::new(entries);
                if let Some(default_label) = default_label {
                    tagger = tagger.with_default_label(default_label.clone());
                }
                Ok(Stage::annotator(tagger))
            }
            Self::Analyzer { root_label } => Ok(Stage::analyzer(match root_label {
                Some(label) => FlatAnalyzer::new(label.clone()),
                None => FlatAnalyzer::default(),
            })),
        }
    }
}

fn invalid(kind: StageKind, message: &str) -> PipelineError {
    PipelineError::invalid_spec(message).with_stage(kind)
}

impl PipelineSpec {
    /// Parse a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stage kinds in declared order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(StageSpec::kind).collect()
    }

    /// Unrecognized top-level field names, sorted.
    pub fn unknown_field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unknown_fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Version and strictness checks that do not need to build stages.
    pub fn check(&self) -> Result<()> {
        if self.v != SPEC_VERSION {
            return Err(PipelineError::invalid_spec(format!(
                "unsupported spec version {} (expected {SPEC_VERSION})",
                self.v
            )));
        }
        let unknown = self.unknown_field_names();
        if !unknown.is_empty() {
            if self.strict {
                return Err(PipelineError::invalid_spec(format!(
                    "unrecognized field(s): {}",
                    unknown.join(", ")
                ))
                .with_hint("Check spelling or remove these fields"));
            }
            #[cfg(feature = "tracing")]
            tracing::warn!(fields = ?unknown, "ignoring unrecognized pipeline spec fields");
        }
        Ok(())
    }

    /// Check the spec and instantiate every stage, in order.
    pub fn build(&self) -> Result<StageSequence> {
        self.check()?;
        let mut sequence = StageSequence::new();
        for stage in &self.stages {
            sequence.push(stage.build()?);
        }
        Ok(sequence)
    }
}
