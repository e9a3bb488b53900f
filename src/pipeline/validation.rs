//! Static validation of a stage sequence against a document's initial state.
//!
//! The [`Validator`] runs its [`ValidationRule`]s in registration order.
//! [`Validator::validate`] stops at the first rule that reports a problem and
//! returns that rule's first error; [`Validator::report`] runs every rule and
//! collects all findings so users can see every problem at once.
//!
//! Validation never executes a stage. A segmenter that yields zero segments at
//! runtime is only caught when the next stage runs.
//!
//! # Default rule order
//!
//! 1. `non_empty`: the sequence has at least one stage
//! 2. `unique_kinds`: at most one stage of each kind
//! 3. `phase_order`: segmenter before annotator before analyzer
//! 4. `first_stage_input`: the document satisfies the first stage
//! 5. `missing_segmenter`: without a segmenter, the document must already
//!    carry what annotator/analyzer need

use super::document::Document;
use super::errors::{PipelineError, Result};
use super::sequence::StageSequence;
use super::stage::StageKind;

// ─── Context ────────────────────────────────────────────────────────────────

/// What rules get to look at: stage kinds in order plus the document.
pub struct ValidationContext<'a> {
    kinds: Vec<StageKind>,
    first_index: [Option<usize>; 3],
    doc: &'a Document,
}

impl<'a> ValidationContext<'a> {
    pub fn new(sequence: &StageSequence, doc: &'a Document) -> Self {
        let kinds = sequence.kinds();
        let mut first_index = [None; 3];
        for (i, kind) in kinds.iter().enumerate() {
            first_index[kind.phase()].get_or_insert(i);
        }
        Self {
            kinds,
            first_index,
            doc,
        }
    }

    /// Stage kinds in execution order.
    pub fn kinds(&self) -> &[StageKind] {
        &self.kinds
    }

    /// Index of the first stage of `kind`, if present.
    pub fn first_index(&self, kind: StageKind) -> Option<usize> {
        self.first_index[kind.phase()]
    }

    pub fn contains(&self, kind: StageKind) -> bool {
        self.first_index(kind).is_some()
    }

    pub fn first_kind(&self) -> Option<StageKind> {
        self.kinds.first().copied()
    }

    pub fn doc(&self) -> &Document {
        self.doc
    }

    /// Whether the document's initial state can feed a stage of `kind`
    /// without an earlier stage in this sequence.
    fn has_input_for(&self, kind: StageKind) -> bool {
        match kind {
            StageKind::Segmenter => true,
            StageKind::Annotator => !self.doc.segments.is_empty(),
            StageKind::Analyzer => self.doc.has_analysis_input(),
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Every problem found by a full validation pass, in rule order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<PipelineError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PipelineError> {
        self.errors.iter()
    }

    /// The error [`Validator::validate`] would return.
    pub fn first(&self) -> Option<&PipelineError> {
        self.errors.first()
    }

    pub fn into_result(self) -> Result<()> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// One validation rule. Rules are stateless.
pub trait ValidationRule {
    /// Short, stable identifier (e.g. `"phase_order"`).
    fn name(&self) -> &str;

    /// Inspect the context and return any findings, most important first.
    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Ordered set of validation rules.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// An engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// An engine loaded with the default rule set, in checking order.
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(NonEmptyRule));
        validator.add_rule(Box::new(UniqueKindsRule));
        validator.add_rule(Box::new(PhaseOrderRule));
        validator.add_rule(Box::new(FirstStageInputRule));
        validator.add_rule(Box::new(MissingSegmenterRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Return the first violation, or `Ok(())` if the sequence may run.
    pub fn validate(&self, sequence: &StageSequence, doc: &Document) -> Result<()> {
        let ctx = ValidationContext::new(sequence, doc);
        for rule in &self.rules {
            if let Some(err) = rule.check(&ctx).into_iter().next() {
                return Err(err);
            }
        }
        Ok(())
    }

    /// Run every rule and collect all violations.
    pub fn report(&self, sequence: &StageSequence, doc: &Document) -> ValidationReport {
        let ctx = ValidationContext::new(sequence, doc);
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.errors.extend(rule.check(&ctx));
        }
        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Sequence must not be empty ──────────────────────────────────────────

struct NonEmptyRule;

impl ValidationRule for NonEmptyRule {
    fn name(&self) -> &str {
        "non_empty"
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError> {
        if ctx.kinds().is_empty() {
            vec![PipelineError::empty_pipeline()]
        } else {
            vec![]
        }
    }
}

// ─── 2. At most one stage per kind ──────────────────────────────────────────

/// Reports each duplicated kind once, ordered by where its second occurrence
/// sits in the sequence.
struct UniqueKindsRule;

impl ValidationRule for UniqueKindsRule {
    fn name(&self) -> &str {
        "unique_kinds"
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError> {
        let mut seen = [0usize; 3];
        let mut out = Vec::new();
        for kind in ctx.kinds() {
            let count = &mut seen[kind.phase()];
            *count += 1;
            if *count == 2 {
                out.push(
                    PipelineError::duplicate_stage(*kind)
                        .with_hint(format!("Remove all but one {kind} stage")),
                );
            }
        }
        out
    }
}

// ─── 3. Segmenter → Annotator → Analyzer ────────────────────────────────────

struct PhaseOrderRule;

impl PhaseOrderRule {
    const PAIRS: [(StageKind, StageKind); 3] = [
        (StageKind::Segmenter, StageKind::Annotator),
        (StageKind::Segmenter, StageKind::Analyzer),
        (StageKind::Annotator, StageKind::Analyzer),
    ];
}

impl ValidationRule for PhaseOrderRule {
    fn name(&self) -> &str {
        "phase_order"
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError> {
        Self::PAIRS
            .iter()
            .filter_map(|&(before, after)| {
                match (ctx.first_index(before), ctx.first_index(after)) {
                    (Some(b), Some(a)) if b > a => Some(PipelineError::ordering(before, after)),
                    _ => None,
                }
            })
            .collect()
    }
}

// ─── 4. The document must feed the first stage ──────────────────────────────

struct FirstStageInputRule;

impl ValidationRule for FirstStageInputRule {
    fn name(&self) -> &str {
        "first_stage_input"
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError> {
        let kind = match ctx.first_kind() {
            Some(kind) if !ctx.has_input_for(kind) => kind,
            _ => return vec![],
        };
        let err = match kind {
            StageKind::Annotator => PipelineError::missing_input(
                kind,
                "Pipeline starts with Annotator, but the document has no segments to annotate",
            )
            .with_hint("Add a Segmenter first, or construct the document with segments"),
            StageKind::Analyzer => PipelineError::missing_input(
                kind,
                "Pipeline starts with Analyzer, but the document has no segments or annotations to analyze",
            )
            .with_hint("Add a Segmenter first, or construct the document with segments or annotations"),
            StageKind::Segmenter => return vec![],
        };
        vec![err]
    }
}

// ─── 5. No segmenter: the document must already be segmented ────────────────

/// Skips the first stage's kind: [`FirstStageInputRule`] already covers it
/// under the same condition, so a report never lists it twice.
struct MissingSegmenterRule;

impl ValidationRule for MissingSegmenterRule {
    fn name(&self) -> &str {
        "missing_segmenter"
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<PipelineError> {
        if ctx.contains(StageKind::Segmenter) {
            return vec![];
        }
        let mut out = Vec::new();
        for kind in [StageKind::Annotator, StageKind::Analyzer] {
            if !ctx.contains(kind) || ctx.has_input_for(kind) || ctx.first_kind() == Some(kind) {
                continue;
            }
            let message = match kind {
                StageKind::Annotator => {
                    "No Segmenter in pipeline, but an Annotator is present and the document has no segments"
                }
                _ => {
                    "No Segmenter in pipeline, but an Analyzer is present and the document has no segments or annotations"
                }
            };
            out.push(
                PipelineError::missing_input(kind, message)
                    .with_hint("Add a Segmenter at the start of the pipeline"),
            );
        }
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
