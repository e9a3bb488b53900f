//! Pipeline model, validation, and execution.
//!
//! ## Submodules
//!
//! - [`document`]: the record stages read from and write to
//! - [`traits`]: capability traits wrapped by stages
//! - [`stage`]: the closed set of stage kinds
//! - [`sequence`]: ordered stage list with removal by identity
//! - [`validation`]: static checks before anything runs
//! - [`controller`]: validation plus in-order execution
//! - [`observer`]: stage-boundary hooks for logging and profiling
//! - [`spec`]: declarative JSON form of a stage sequence

pub mod controller;
pub mod document;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod sequence;
pub mod spec;
pub mod stage;
pub mod traits;
pub mod validation;

pub use controller::PipelineController;
pub use document::{Document, Structure};
pub use error_code::ErrorCode;
pub use errors::{BoxError, PipelineError, Result, StageError};
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use sequence::StageSequence;
pub use spec::{PipelineSpec, StageSpec};
pub use stage::{Stage, StageKind};
pub use traits::{Analysis, AnalysisInput, StructureAnalyzer, TextSegmenter, UnitLabeler};
pub use validation::{ValidationContext, ValidationReport, ValidationRule, Validator};
