//! Pipeline controller: validates a stage sequence, then runs it.
//!
//! [`PipelineController::run`] checks the sequence against the document's
//! initial state with a [`Validator`], then applies each stage in order.
//! Any stage failure becomes a single [`PipelineError`]:
//!
//! - domain errors (empty input, no result, ...) pass through unchanged;
//! - capability errors are wrapped once as `stage_failed`, naming the stage.
//!
//! Execution halts at the first failure. Mutations made by earlier stages
//! stay on the document; nothing is rolled back.

use super::document::Document;
use super::errors::Result;
use super::observer::{NoopObserver, PipelineObserver, StageClock, StageReport};
use super::sequence::StageSequence;
use super::validation::{ValidationReport, Validator};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($index:expr, $kind:expr) => {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::info_span!("pipeline_stage", index = $index, stage = $kind.as_str()).entered();
    };
}

/// Owns a stage sequence and the validator applied before each run.
pub struct PipelineController {
    sequence: StageSequence,
    validator: Validator,
}

impl PipelineController {
    /// Controller with the default validation rules.
    pub fn new(sequence: StageSequence) -> Self {
        Self::with_validator(sequence, Validator::with_defaults())
    }

    pub fn with_validator(sequence: StageSequence, validator: Validator) -> Self {
        Self {
            sequence,
            validator,
        }
    }

    pub fn sequence(&self) -> &StageSequence {
        &self.sequence
    }

    /// Mutable access for adding or removing stages between runs.
    pub fn sequence_mut(&mut self) -> &mut StageSequence {
        &mut self.sequence
    }

    pub fn into_sequence(self) -> StageSequence {
        self.sequence
    }

    /// Check the sequence against `doc` without running anything.
    pub fn validate(&self, doc: &Document) -> Result<()> {
        self.validator.validate(&self.sequence, doc)
    }

    /// Every validation problem, not just the first.
    pub fn report(&self, doc: &Document) -> ValidationReport {
        self.validator.report(&self.sequence, doc)
    }

    /// Validate, then apply every stage to `doc` in order.
    ///
    /// Returns the same document on success.
    pub fn run<'d>(&self, doc: &'d mut Document) -> Result<&'d mut Document> {
        self.run_with_observer(doc, &mut NoopObserver)
    }

    /// Same as [`run`](Self::run), notifying `observer` at each stage
    /// boundary.
    pub fn run_with_observer<'d>(
        &self,
        doc: &'d mut Document,
        observer: &mut impl PipelineObserver,
    ) -> Result<&'d mut Document> {
        if let Err(err) = self.validate(doc) {
            #[cfg(feature = "tracing")]
            tracing::debug!(code = %err.code, "pipeline rejected: {}", err.message);
            return Err(err);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(stages = self.sequence.len(), "pipeline validated");
        observer.on_validated(self.sequence.len());

        for (index, stage) in self.sequence.iter().enumerate() {
            let kind = stage.kind();
            trace_stage!(index, kind);
            observer.on_stage_start(index, kind);

            let clock = StageClock::start();
            let outcome = stage.process(doc);
            let report = StageReport {
                index,
                kind,
                elapsed: clock.elapsed(),
                ok: outcome.is_ok(),
            };
            observer.on_stage_end(&report);

            if let Err(err) = outcome {
                let err = err.into_pipeline_error(kind);
                #[cfg(feature = "tracing")]
                tracing::warn!(code = %err.code, "{}", err.message);
                return Err(err);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                segments = doc.segments.len(),
                annotations = doc.annotations.len(),
                structure = doc.structure.is_some(),
                elapsed_us = report.elapsed.as_micros() as u64,
                "stage finished"
            );
        }

        observer.on_document(doc);
        Ok(doc)
    }
}

impl From<StageSequence> for PipelineController {
    fn from(sequence: StageSequence) -> Self {
        Self::new(sequence)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::nlp::tagger::ConstantTagger;
    use crate::nlp::tokenizer::WordPunctSegmenter;
    use crate::pipeline::error_code::ErrorCode;
    use crate::pipeline::errors::{BoxError, PipelineError};
    use crate::pipeline::observer::StageTimingObserver;
    use crate::pipeline::stage::{Stage, StageKind};
    use crate::pipeline::traits::{TextSegmenter, UnitLabeler};
    use crate::types::Annotation;

    /// Segmenter that counts calls and splits on whitespace.
    struct Counting(Rc<Cell<usize>>);

    impl TextSegmenter for Counting {
        fn segment(&self, text: &str) -> std::result::Result<Vec<String>, BoxError> {
            self.0.set(self.0.get() + 1);
            Ok(text.split_whitespace().map(String::from).collect())
        }
    }

    struct Crashing;

    impl TextSegmenter for Crashing {
        fn segment(&self, _text: &str) -> std::result::Result<Vec<String>, BoxError> {
            Err("Random crash".into())
        }
    }

    /// Labeler that fails with an already-diagnostic pipeline error.
    struct Descriptive;

    impl UnitLabeler for Descriptive {
        fn label(&self, _units: &[String]) -> std::result::Result<Vec<Annotation>, BoxError> {
            Err(Box::new(PipelineError::empty_input(
                StageKind::Annotator,
                "Already descriptive",
            )))
        }
    }

    fn controller(stages: Vec<Stage>) -> PipelineController {
        PipelineController::new(stages.into_iter().collect())
    }

    #[test]
    fn test_run_calls_each_stage_once() {
        let calls = Rc::new(Cell::new(0));
        let ctl = controller(vec![
            Stage::segmenter(Counting(Rc::clone(&calls))),
            Stage::annotator(ConstantTagger::new("DUMMY")),
        ]);
        let mut doc = Document::new("Test text");

        let result = ctl.run(&mut doc).unwrap();
        assert_eq!(result.segments, vec!["Test", "text"]);
        assert_eq!(calls.get(), 1);
        assert_eq!(doc.annotations.len(), 2);
    }

    #[test]
    fn test_validation_failure_leaves_document_untouched() {
        let calls = Rc::new(Cell::new(0));
        let ctl = controller(vec![
            Stage::annotator(ConstantTagger::new("X")),
            Stage::segmenter(Counting(Rc::clone(&calls))),
        ]);
        let mut doc = Document::new("Test text").with_segments(["tokens"]);
        let before = doc.clone();

        let err = ctl.run(&mut doc).unwrap_err();
        assert_eq!(err.code, ErrorCode::Ordering);
        assert_eq!(doc, before);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_run_wraps_generic_error() {
        let ctl = controller(vec![Stage::segmenter(Crashing)]);
        let err = ctl.run(&mut Document::new("x")).unwrap_err();
        assert_eq!(err.code, ErrorCode::StageFailed);
        assert_eq!(err.stage, Some(StageKind::Segmenter));
        assert!(err.to_string().contains("Error in Segmenter: Random crash"));
    }

    #[test]
    fn test_run_propagates_pipeline_error() {
        let ctl = controller(vec![
            Stage::segmenter(WordPunctSegmenter::new()),
            Stage::annotator(Descriptive),
        ]);
        let err = ctl.run(&mut Document::new("some words")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyInput);
        assert_eq!(err.message, "Already descriptive");
    }

    #[test]
    fn test_runtime_empty_segments_fail_next_stage() {
        // Validation passes; the segmenter yields nothing at runtime.
        let ctl = controller(vec![
            Stage::segmenter(WordPunctSegmenter::new()),
            Stage::annotator(ConstantTagger::new("X")),
        ]);
        let mut doc = Document::new("   ");
        assert!(ctl.validate(&doc).is_ok());

        let err = ctl.run(&mut doc).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyInput);
        assert_eq!(err.stage, Some(StageKind::Annotator));
    }

    #[test]
    fn test_failure_keeps_earlier_mutations() {
        let ctl = controller(vec![
            Stage::segmenter(WordPunctSegmenter::new()),
            Stage::annotator(Descriptive),
        ]);
        let mut doc = Document::new("kept words");
        assert!(ctl.run(&mut doc).is_err());
        assert_eq!(doc.segments, vec!["kept", "words"]);
    }

    #[test]
    fn test_observer_sees_each_stage() {
        let ctl = controller(vec![
            Stage::segmenter(WordPunctSegmenter::new()),
            Stage::annotator(Descriptive),
        ]);
        let mut obs = StageTimingObserver::new();
        let _ = ctl.run_with_observer(&mut Document::new("a b"), &mut obs);

        let kinds: Vec<_> = obs.reports().iter().map(|r| (r.index, r.kind, r.ok)).collect();
        assert_eq!(
            kinds,
            vec![(0, StageKind::Segmenter, true), (1, StageKind::Annotator, false)]
        );
    }

    #[test]
    fn test_sequence_edit_between_runs() {
        let mut ctl = controller(vec![Stage::segmenter(WordPunctSegmenter::new())]);
        let tagger = ctl
            .sequence_mut()
            .push(Stage::annotator(ConstantTagger::new("X")));
        let mut doc = Document::new("one two");
        ctl.run(&mut doc).unwrap();
        assert_eq!(doc.annotations.len(), 2);

        ctl.sequence_mut().remove(&tagger).unwrap();
        let mut doc = Document::new("one two");
        ctl.run(&mut doc).unwrap();
        assert!(doc.annotations.is_empty());
        assert_eq!(ctl.sequence().len(), 1);
    }
}
