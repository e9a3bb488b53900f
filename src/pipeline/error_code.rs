//! Stable error codes shared by validation and execution failures.
//!
//! Codes serialize as `snake_case` strings and never change once published,
//! so callers can match on them instead of parsing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant carried by every [`PipelineError`](super::errors::PipelineError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The stage sequence has no stages.
    EmptyPipeline,
    /// Two stages of the same kind appear in one sequence.
    DuplicateStage,
    /// A later-phase stage is placed before an earlier-phase stage.
    Ordering,
    /// The document lacks the data the first consuming stage needs.
    MissingInput,
    /// A stage found its input field empty at execution time.
    EmptyInput,
    /// An analyzer produced no structural result.
    NoResult,
    /// A capability failed with a foreign error.
    StageFailed,
    /// A stage handle was not present in the sequence.
    NotFound,
    /// A pipeline spec could not be parsed or built.
    InvalidSpec,
}

impl ErrorCode {
    /// The wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPipeline => "empty_pipeline",
            Self::DuplicateStage => "duplicate_stage",
            Self::Ordering => "ordering",
            Self::MissingInput => "missing_input",
            Self::EmptyInput => "empty_input",
            Self::NoResult => "no_result",
            Self::StageFailed => "stage_failed",
            Self::NotFound => "not_found",
            Self::InvalidSpec => "invalid_spec",
        }
    }

    /// Returns `true` for codes raised by static validation, before any
    /// stage has touched the document.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyPipeline | Self::DuplicateStage | Self::Ordering | Self::MissingInput
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde() {
        for code in [
            ErrorCode::EmptyPipeline,
            ErrorCode::DuplicateStage,
            ErrorCode::Ordering,
            ErrorCode::MissingInput,
            ErrorCode::EmptyInput,
            ErrorCode::NoResult,
            ErrorCode::StageFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidSpec,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{code}\""));
        }
    }

    #[test]
    fn test_is_validation() {
        assert!(ErrorCode::Ordering.is_validation());
        assert!(ErrorCode::MissingInput.is_validation());
        assert!(!ErrorCode::EmptyInput.is_validation());
        assert!(!ErrorCode::StageFailed.is_validation());
    }
}
