//! Natural Language Processing components
//!
//! Reference capabilities for each stage kind: segmenters, labelers and a
//! flat analyzer.

pub mod analyzer;
pub mod tagger;
pub mod tokenizer;
