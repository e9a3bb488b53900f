//! # textstages
//!
//! A validated, staged text-processing pipeline.
//!
//! Documents move through up to three phases: segmentation, annotation and
//! structural analysis. A [`PipelineController`] checks that a
//! [`StageSequence`] is legal for a document's starting state before running
//! anything, then applies each stage in order and reports any failure as a
//! single [`PipelineError`] naming the stage responsible.
//!
//! ## Quick start
//!
//! ```rust
//! use textstages::nlp::tagger::ConstantTagger;
//! use textstages::nlp::tokenizer::WordPunctSegmenter;
//! use textstages::{Document, PipelineController, Stage, StageSequence};
//!
//! let mut sequence = StageSequence::new();
//! sequence.push(Stage::segmenter(WordPunctSegmenter::new()));
//! sequence.push(Stage::annotator(ConstantTagger::new("DUMMY")));
//!
//! let controller = PipelineController::new(sequence);
//! let mut doc = Document::new("Testing the NLP pipeline.");
//! controller.run(&mut doc)?;
//!
//! assert_eq!(doc.segments, ["Testing", "the", "NLP", "pipeline", "."]);
//! # Ok::<(), textstages::PipelineError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): spans and events around validation and each stage
//! - `cli`: the `textstages` binary

pub mod nlp;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use pipeline::{
    Analysis, AnalysisInput, BoxError, Document, ErrorCode, PipelineController, PipelineError,
    PipelineSpec, Result, Stage, StageKind, StageSequence, Structure, StructureAnalyzer,
    TextSegmenter, UnitLabeler, Validator,
};
pub use types::{Annotation, Tree, TreeNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
