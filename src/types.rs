//! Core data types shared by stages and capabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unit paired with its label, e.g. `("dog", "NN")`.
pub type Annotation = (String, String);

/// A labelled tree produced by an analyzer.
///
/// Displays in bracketed notation: `(S (DT the) (NN dog))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub label: String,
    pub children: Vec<TreeNode>,
}

/// A child of a [`Tree`]: either a terminal unit or a nested subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(String),
    Tree(Tree),
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// A preterminal: one label over one unit.
    pub fn preterminal(label: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(label, vec![TreeNode::Leaf(unit.into())])
    }

    /// Terminal units in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                TreeNode::Leaf(unit) => out.push(unit),
                TreeNode::Tree(sub) => sub.collect_leaves(out),
            }
        }
    }

    /// Number of labelled levels on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| match c {
                TreeNode::Leaf(_) => 0,
                TreeNode::Tree(sub) => sub.height(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl From<Tree> for TreeNode {
    fn from(tree: Tree) -> Self {
        TreeNode::Tree(tree)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        for child in &self.children {
            match child {
                TreeNode::Leaf(unit) => write!(f, " {unit}")?,
                TreeNode::Tree(sub) => write!(f, " {sub}")?,
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new(
            "S",
            vec![
                Tree::preterminal("DT", "the").into(),
                Tree::preterminal("NN", "dog").into(),
            ],
        )
    }

    #[test]
    fn test_tree_display() {
        assert_eq!(sample().to_string(), "(S (DT the) (NN dog))");
    }

    #[test]
    fn test_tree_leaves_and_height() {
        let tree = sample();
        assert_eq!(tree.leaves(), vec!["the", "dog"]);
        assert_eq!(tree.height(), 2);
        assert_eq!(Tree::new("S", vec![]).height(), 1);
    }

    #[test]
    fn test_tree_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["label"], "S");
        assert_eq!(value["children"][0]["label"], "DT");
        assert_eq!(value["children"][0]["children"][0], "the");
    }
}
