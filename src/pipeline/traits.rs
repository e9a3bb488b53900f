//! Capability traits wrapped by pipeline stages.
//!
//! Each trait is one processing boundary with a single method. The pipeline
//! treats implementations as opaque: it only relies on the contracts below.
//! Reference implementations live in [`crate::nlp`].

use crate::types::{Annotation, Tree};

use super::errors::BoxError;

// ============================================================================
// TextSegmenter: raw text to units
// ============================================================================

/// Splits raw text into an ordered sequence of units (tokens).
///
/// # Contract
///
/// - **Input**: the document's raw text.
/// - **Output**: units in text order. An empty result is not an error here;
///   downstream stages report it.
pub trait TextSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, BoxError>;
}

// ============================================================================
// UnitLabeler: units to (unit, label) pairs
// ============================================================================

/// Assigns a label to every unit (e.g. a part-of-speech tag).
///
/// # Contract
///
/// - **Input**: a non-empty slice of units (the stage checks emptiness).
/// - **Output**: one `(unit, label)` pair per unit, in input order.
pub trait UnitLabeler {
    fn label(&self, units: &[String]) -> Result<Vec<Annotation>, BoxError>;
}

// ============================================================================
// StructureAnalyzer: units or labelled units to trees
// ============================================================================

/// What an analyzer is given: labelled units when annotation has run,
/// plain units otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisInput<'a> {
    Units(&'a [String]),
    Labeled(&'a [Annotation]),
}

impl AnalysisInput<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Units(units) => units.len(),
            Self::Labeled(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bare units, with labels dropped.
    pub fn units(&self) -> impl Iterator<Item = &str> + '_ {
        let (units, pairs): (&[String], &[Annotation]) = match *self {
            Self::Units(units) => (units, &[]),
            Self::Labeled(pairs) => (&[], pairs),
        };
        units
            .iter()
            .map(String::as_str)
            .chain(pairs.iter().map(|(u, _)| u.as_str()))
    }
}

/// Raw result of an analyzer before the stage normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The analyzer found no structure.
    None,
    /// A single analysis.
    One(Tree),
    /// Zero or more candidate analyses.
    Many(Vec<Tree>),
}

/// Derives a structural result from units or labelled units.
///
/// # Contract
///
/// - **Input**: a non-empty [`AnalysisInput`] (the stage checks emptiness).
/// - **Output**: an [`Analysis`]; `None` and empty `Many` are reported by the
///   stage as "no result".
pub trait StructureAnalyzer {
    fn analyze(&self, input: AnalysisInput<'_>) -> Result<Analysis, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_input_units() {
        let units = vec!["a".to_string(), "b".to_string()];
        let input = AnalysisInput::Units(&units);
        assert_eq!(input.len(), 2);
        assert_eq!(input.units().collect::<Vec<_>>(), vec!["a", "b"]);

        let pairs = vec![("c".to_string(), "X".to_string())];
        let input = AnalysisInput::Labeled(&pairs);
        assert_eq!(input.units().collect::<Vec<_>>(), vec!["c"]);

        assert!(AnalysisInput::Units(&[]).is_empty());
    }
}
