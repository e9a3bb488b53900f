//! Ordered, user-assembled list of stages.
//!
//! Stages are held behind [`Rc`] so callers can keep a handle to a stage they
//! added and later remove that exact instance. Removal compares handles with
//! [`Rc::ptr_eq`]; two distinct stages of the same kind are never confused.

use std::ops::Index;
use std::rc::Rc;

use super::errors::{PipelineError, Result};
use super::stage::{Stage, StageKind};

/// Insertion-ordered stage list. Insertion order is execution order.
#[derive(Debug, Clone, Default)]
pub struct StageSequence {
    stages: Vec<Rc<Stage>>,
}

impl StageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage and return its handle.
    pub fn push(&mut self, stage: Stage) -> Rc<Stage> {
        let handle = Rc::new(stage);
        self.stages.push(Rc::clone(&handle));
        handle
    }

    /// Append an existing handle. The same handle may be added more than
    /// once; validation rejects that before execution.
    pub fn add(&mut self, stage: Rc<Stage>) {
        self.stages.push(stage);
    }

    /// Remove the first occurrence of `stage` (by identity).
    pub fn remove(&mut self, stage: &Rc<Stage>) -> Result<Rc<Stage>> {
        match self.stages.iter().position(|s| Rc::ptr_eq(s, stage)) {
            Some(idx) => Ok(self.stages.remove(idx)),
            None => Err(PipelineError::not_found(stage.kind())),
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Stage>> {
        self.stages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<Stage>> {
        self.stages.iter()
    }

    /// Stage kinds in execution order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|s| s.kind()).collect()
    }
}

impl Index<usize> for StageSequence {
    type Output = Rc<Stage>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.stages[index]
    }
}

impl<'a> IntoIterator for &'a StageSequence {
    type Item = &'a Rc<Stage>;
    type IntoIter = std::slice::Iter<'a, Rc<Stage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

impl FromIterator<Rc<Stage>> for StageSequence {
    fn from_iter<I: IntoIterator<Item = Rc<Stage>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Stage> for StageSequence {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().map(Rc::new).collect(),
        }
    }
}
