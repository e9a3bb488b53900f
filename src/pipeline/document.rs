//! The document record that stages read from and write to.

use serde::{Deserialize, Serialize};

use crate::types::{Annotation, Tree};

/// Structural result stored by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    /// Exactly one analysis.
    Single(Tree),
    /// Several candidate analyses, in the order the analyzer produced them.
    Ambiguous(Vec<Tree>),
}

impl Structure {
    /// All candidate trees, in order.
    pub fn trees(&self) -> &[Tree] {
        match self {
            Self::Single(tree) => std::slice::from_ref(tree),
            Self::Ambiguous(trees) => trees,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// A text being processed by the pipeline.
///
/// Holds the raw input plus the fields derived from it. Later fields depend
/// on earlier ones: recomputing `segments` invalidates `annotations` and
/// `structure`; recomputing `annotations` invalidates `structure`. Stages
/// enforce this, the document itself only holds data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    raw_input: String,
    /// Units produced by segmentation.
    pub segments: Vec<String>,
    /// `(unit, label)` pairs produced by annotation.
    pub annotations: Vec<Annotation>,
    /// Analysis result, absent until an analyzer has run.
    pub structure: Option<Structure>,
}

impl Document {
    /// Create a document with only its raw input set.
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            ..Self::default()
        }
    }

    /// Pre-populate segments, for runs that resume after segmentation.
    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Pre-populate annotations, for runs that resume after annotation.
    pub fn with_annotations<I, U, L>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = (U, L)>,
        U: Into<String>,
        L: Into<String>,
    {
        self.annotations = annotations
            .into_iter()
            .map(|(u, l)| (u.into(), l.into()))
            .collect();
        self
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// `true` if an analyzer has input to work from.
    pub fn has_analysis_input(&self) -> bool {
        !self.segments.is_empty() || !self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_unprocessed() {
        let doc = Document::new("Test text");
        assert_eq!(doc.raw_input(), "Test text");
        assert!(doc.segments.is_empty());
        assert!(doc.annotations.is_empty());
        assert!(doc.structure.is_none());
        assert!(!doc.has_analysis_input());
    }

    #[test]
    fn test_prepopulated_document() {
        let doc = Document::new("")
            .with_segments(["a", "b"])
            .with_annotations([("a", "X")]);
        assert_eq!(doc.segments, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(doc.annotations, vec![("a".to_string(), "X".to_string())]);
        assert!(doc.has_analysis_input());
    }

    #[test]
    fn test_structure_trees() {
        let one = Structure::Single(Tree::new("S", vec![]));
        assert_eq!(one.trees().len(), 1);
        assert!(!one.is_ambiguous());

        let many = Structure::Ambiguous(vec![Tree::new("A", vec![]), Tree::new("B", vec![])]);
        assert_eq!(many.trees()[1].label, "B");
        assert!(many.is_ambiguous());
    }
}
