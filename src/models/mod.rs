//! Core data models for the draft tracker.

mod draft;
mod ids;
mod match_record;
mod stats;

pub use draft::*;
pub use ids::*;
pub use match_record::*;
pub use stats::*;
