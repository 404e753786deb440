//! Chat ingestion pipeline.
//!
//! Runs a chat extractor, validates what it found through the normal entry
//! step, and records the result.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::agents::{execute_with_retry, Agent, AgentError, ChatExtractionInput, MatchCandidate};
use crate::entry::EntryError;
use crate::models::Match;
use crate::storage::{MatchStore, StorageError};

/// Errors from a chat ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Extraction failed: {0}")]
    Agent(#[from] AgentError),

    #[error("Extracted match rejected: {0}")]
    Entry(#[from] EntryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Extract a match from `text` and store it.
///
/// Nothing is stored unless the candidate passes entry validation.
pub async fn ingest_chat<A, S>(
    extractor: &A,
    store: &S,
    text: &str,
    today: NaiveDate,
) -> Result<Match, IngestError>
where
    A: Agent<Input = ChatExtractionInput, Output = MatchCandidate>,
    S: MatchStore + ?Sized,
{
    info!("Ingesting chat message via {}", extractor.name());

    let candidate = execute_with_retry(extractor, ChatExtractionInput::new(text, today)).await?;

    let record = candidate
        .into_new_match()
        .and_then(|entry| entry.into_match(today))
        .map_err(|e| {
            warn!("Rejected extracted match: {}", e);
            e
        })?;

    store.append(record.clone())?;
    Ok(record)
}
