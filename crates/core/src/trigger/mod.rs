//! Recompute trigger.
//!
//! Turns a batch of accounting line changes into the set of projects whose
//! figures must be recomputed. Executing the recompute is left to the
//! persistence layer.

pub mod service;
pub mod types;

pub use service::RecomputeTrigger;
pub use types::{ChangeKind, LineChange, LineField};
