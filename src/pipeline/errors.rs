//! Pipeline error types for validation and runtime failures.
//!
//! Every failure that leaves this crate is a [`PipelineError`]: a stable
//! [`ErrorCode`] for programmatic matching, the [`StageKind`] responsible
//! (when one is), a human-readable `message`, and an optional `hint`.
//!
//! Stages themselves return [`StageError`], which keeps capability errors
//! unwrapped until the controller converts them at its execution boundary.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error_code::ErrorCode;
use super::stage::StageKind;

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error type produced by capabilities (segmenters, labelers, analyzers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ─── PipelineError ──────────────────────────────────────────────────────────

/// A validation or execution failure.
///
/// # Display format
///
/// ```text
/// [ordering] Segmenter must come before Annotator in the pipeline
/// ```
///
/// # JSON format
///
/// ```json
/// {
///   "code": "stage_failed",
///   "stage": "analyzer",
///   "message": "Error in Analyzer: grammar has no start symbol"
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct PipelineError {
    /// Stable error code for programmatic matching.
    pub code: ErrorCode,

    /// The stage kind responsible for the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageKind>,

    /// For ordering errors, the kind the responsible stage must precede.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts_with: Option<StageKind>,

    /// Human-readable description of the problem.
    pub message: String,

    /// Optional suggestion for how to fix the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineError {
    /// Create a new error with no stage attribution.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            stage: None,
            conflicts_with: None,
            message: message.into(),
            hint: None,
        }
    }

    /// Attribute the error to a stage kind.
    pub fn with_stage(mut self, kind: StageKind) -> Self {
        self.stage = Some(kind);
        self
    }

    /// Attach a hint suggesting how to fix the problem.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn empty_pipeline() -> Self {
        Self::new(
            ErrorCode::EmptyPipeline,
            "Pipeline is empty and has no stages to execute",
        )
        .with_hint("Add at least one stage before running")
    }

    pub fn duplicate_stage(kind: StageKind) -> Self {
        Self::new(
            ErrorCode::DuplicateStage,
            format!("Pipeline contains multiple {kind} stages, which is not supported"),
        )
        .with_stage(kind)
    }

    /// `before` must run before `after` but was placed after it.
    pub fn ordering(before: StageKind, after: StageKind) -> Self {
        let mut err = Self::new(
            ErrorCode::Ordering,
            format!("{before} must come before {after} in the pipeline"),
        )
        .with_stage(before);
        err.conflicts_with = Some(after);
        err
    }

    pub fn missing_input(kind: StageKind, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingInput, message).with_stage(kind)
    }

    pub fn empty_input(kind: StageKind, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmptyInput, message).with_stage(kind)
    }

    pub fn no_result(kind: StageKind) -> Self {
        Self::new(
            ErrorCode::NoResult,
            format!("{kind} did not produce any structural result for the given input"),
        )
        .with_stage(kind)
    }

    /// Wrap a foreign capability error. The original message is kept verbatim.
    pub fn stage_failed(kind: StageKind, source: impl Display) -> Self {
        Self::new(ErrorCode::StageFailed, format!("Error in {kind}: {source}")).with_stage(kind)
    }

    pub fn not_found(kind: StageKind) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("{kind} stage is not part of this sequence"),
        )
        .with_stage(kind)
    }

    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSpec, message)
    }

    /// Returns `true` if the error came from static validation.
    pub fn is_validation(&self) -> bool {
        self.code.is_validation()
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_spec(err.to_string())
    }
}

impl From<regex::Error> for PipelineError {
    fn from(err: regex::Error) -> Self {
        Self::invalid_spec(format!("invalid segmentation pattern: {err}"))
            .with_stage(StageKind::Segmenter)
    }
}

// ─── StageError ─────────────────────────────────────────────────────────────

/// Failure returned by [`Stage::process`](super::stage::Stage::process).
///
/// Domain errors are already diagnostic; capability errors still need the
/// stage context the controller adds.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("{0}")]
    Capability(BoxError),
}

impl StageError {
    /// Convert into the single caller-facing error type.
    ///
    /// A capability that already returned a boxed [`PipelineError`] is
    /// unboxed rather than wrapped a second time.
    pub fn into_pipeline_error(self, kind: StageKind) -> PipelineError {
        match self {
            Self::Pipeline(err) => err,
            Self::Capability(err) => match err.downcast::<PipelineError>() {
                Ok(domain) => *domain,
                Err(foreign) => PipelineError::stage_failed(kind, foreign),
            },
        }
    }
}
