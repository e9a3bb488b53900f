//! Reference analyzer: a single flat tree over the input.

use crate::pipeline::errors::BoxError;
use crate::pipeline::traits::{Analysis, AnalysisInput, StructureAnalyzer};
use crate::types::{Tree, TreeNode};

/// Wraps all units under one root.
///
/// Plain units become leaves: `(S the dog)`. Labelled units become
/// preterminals: `(S (DT the) (NN dog))`. Empty input yields no result.
#[derive(Debug, Clone)]
pub struct FlatAnalyzer {
    root_label: String,
}

impl FlatAnalyzer {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }
}

impl Default for FlatAnalyzer {
    fn default() -> Self {
        Self::new("S")
    }
}

impl StructureAnalyzer for FlatAnalyzer {
    fn analyze(&self, input: AnalysisInput<'_>) -> Result<Analysis, BoxError> {
        if input.is_empty() {
            return Ok(Analysis::None);
        }
        let children = match input {
            AnalysisInput::Units(units) => units.iter().cloned().map(TreeNode::Leaf).collect(),
            AnalysisInput::Labeled(pairs) => pairs
                .iter()
                .map(|(unit, label)| Tree::preterminal(label.clone(), unit.clone()).into())
                .collect(),
        };
        Ok(Analysis::One(Tree::new(self.root_label.clone(), children)))
    }
}
