//! Pipeline stages: the closed set of processing kinds.
//!
//! A [`Stage`] wraps exactly one capability and knows which [`Document`]
//! fields it reads and writes. The [`StageKind`] discriminant is what
//! validation inspects; it never looks at the wrapped capability.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::document::{Document, Structure};
use super::errors::{PipelineError, StageError};
use super::traits::{Analysis, AnalysisInput, StructureAnalyzer, TextSegmenter, UnitLabeler};

// ─── StageKind ──────────────────────────────────────────────────────────────

/// Kind of a stage, ordered by phase: segmentation, then annotation, then
/// analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Segmenter,
    Annotator,
    Analyzer,
}

impl StageKind {
    /// All kinds in phase order.
    pub const ALL: [StageKind; 3] = [Self::Segmenter, Self::Annotator, Self::Analyzer];

    /// Name used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Segmenter => "Segmenter",
            Self::Annotator => "Annotator",
            Self::Analyzer => "Analyzer",
        }
    }

    /// Position in the phase order (0-based).
    pub fn phase(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Stage ──────────────────────────────────────────────────────────────────

/// A unit of pipeline work owning one capability.
pub enum Stage {
    /// Writes `segments` from `raw_input`; clears `annotations` and `structure`.
    Segmenter(Box<dyn TextSegmenter>),
    /// Writes `annotations` from `segments`; clears `structure`.
    Annotator(Box<dyn UnitLabeler>),
    /// Writes `structure` from `annotations` (preferred) or `segments`.
    Analyzer(Box<dyn StructureAnalyzer>),
}

impl Stage {
    pub fn segmenter(capability: impl TextSegmenter + 'static) -> Self {
        Self::Segmenter(Box::new(capability))
    }

    pub fn annotator(capability: impl UnitLabeler + 'static) -> Self {
        Self::Annotator(Box::new(capability))
    }

    pub fn analyzer(capability: impl StructureAnalyzer + 'static) -> Self {
        Self::Analyzer(Box::new(capability))
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Self::Segmenter(_) => StageKind::Segmenter,
            Self::Annotator(_) => StageKind::Annotator,
            Self::Analyzer(_) => StageKind::Analyzer,
        }
    }

    /// Apply this stage to `doc` in place.
    ///
    /// Capability errors are returned as [`StageError::Capability`] without
    /// added context; the controller attributes them to this stage.
    pub fn process(&self, doc: &mut Document) -> Result<(), StageError> {
        match self {
            Self::Segmenter(segmenter) => {
                let segments = segmenter
                    .segment(doc.raw_input())
                    .map_err(StageError::Capability)?;
                doc.segments = segments;
                doc.annotations.clear();
                doc.structure = None;
            }
            Self::Annotator(labeler) => {
                if doc.segments.is_empty() {
                    return Err(PipelineError::empty_input(
                        StageKind::Annotator,
                        "Annotator cannot run because the document has no segments",
                    )
                    .into());
                }
                let annotations = labeler
                    .label(&doc.segments)
                    .map_err(StageError::Capability)?;
                doc.annotations = annotations;
                doc.structure = None;
            }
            Self::Analyzer(analyzer) => {
                let input = if !doc.annotations.is_empty() {
                    AnalysisInput::Labeled(&doc.annotations)
                } else if !doc.segments.is_empty() {
                    AnalysisInput::Units(&doc.segments)
                } else {
                    return Err(PipelineError::empty_input(
                        StageKind::Analyzer,
                        "Analyzer cannot run because the document has no segments or annotations",
                    )
                    .into());
                };
                let analysis = analyzer.analyze(input).map_err(StageError::Capability)?;
                doc.structure = Some(normalize(analysis)?);
            }
        }
        Ok(())
    }
}

/// Collapse an analyzer result into the stored form.
fn normalize(analysis: Analysis) -> Result<Structure, PipelineError> {
    match analysis {
        Analysis::None => Err(PipelineError::no_result(StageKind::Analyzer)),
        Analysis::One(tree) => Ok(Structure::Single(tree)),
        Analysis::Many(mut trees) => match trees.len() {
            0 => Err(PipelineError::no_result(StageKind::Analyzer)),
            1 => Ok(Structure::Single(trees.remove(0))),
            _ => Ok(Structure::Ambiguous(trees)),
        },
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stage").field(&self.kind()).finish()
    }
}
