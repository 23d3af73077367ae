//! Merge planning
//!
//! - `strategy`: snapshot comparison producing a merge plan
//! - `conflict`: conflict markers for paths that cannot be reconciled

pub mod conflict;
pub mod strategy;
