//! # Draft Tracker
//!
//! Match recording and draft analytics for an esports team.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, drafts, derived statistics)
//! - **entry**: Validation of new matches before they are stored
//! - **calculate**: Hero impact, head-to-head and summary computation
//! - **storage**: Local JSONL match store
//! - **agents**: AI collaborator interfaces (chat parsing, draft advice)
//! - **ingest**: Chat-to-match pipeline
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod agents;
pub mod api;
pub mod calculate;
pub mod config;
pub mod entry;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;
