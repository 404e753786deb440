//! AI-assisted data entry.
//!
//! Two collaborators sit outside the analytics core: a chat parser that turns
//! free text into a match candidate, and a draft advisor that writes prose
//! about a sample of recent matches. Both run against an [`backend::AiBackend`]
//! supplied by the caller and implement the `Agent` trait.

pub mod backend;
pub mod chat_parser;
pub mod draft_advisor;

pub use chat_parser::{ChatExtractionInput, ChatParserAgent, MatchCandidate};
pub use draft_advisor::{AdviceInput, DraftAdvice, DraftAdvisorAgent};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during agent execution.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("AI refused to extract (content unclear): {0}")]
    ExtractionRefused(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl AgentError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AgentError::BackendUnavailable(_) | AgentError::Timeout(_) | AgentError::RateLimited(_)
        )
    }
}

/// Retry policy for agents.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 500,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        Duration::from_millis((self.initial_delay_ms as f64 * factor) as u64)
    }
}

/// Core trait for all AI agents.
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Clone + Send + 'static;
    type Output;

    /// Agent identifier for logging.
    fn name(&self) -> &'static str;

    /// Execute the agent's task.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;

    /// Retry policy for this agent.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}

/// Run `agent`, retrying transient failures per its retry policy.
pub async fn execute_with_retry<A: Agent>(
    agent: &A,
    input: A::Input,
) -> Result<A::Output, AgentError> {
    let policy = agent.retry_policy();
    let mut attempt = 0;

    loop {
        match agent.execute(input.clone()).await {
            Ok(output) => return Ok(output),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = match &e {
                    AgentError::RateLimited(secs) => Duration::from_secs(*secs),
                    _ => policy.delay(attempt),
                };
                warn!(
                    "{} failed ({}), retry {}/{} in {:?}",
                    agent.name(),
                    e,
                    attempt,
                    policy.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Flaky {
        failures: u32,
        calls: AtomicU32,
        error: fn() -> AgentError,
    }

    #[async_trait]
    impl Agent for Flaky {
        type Input = ();
        type Output = u32;

        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn execute(&self, _input: ()) -> Result<u32, AgentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err((self.error)())
            } else {
                Ok(call)
            }
        }

        fn retry_policy(&self) -> RetryPolicy {
            RetryPolicy {
                max_retries: 2,
                initial_delay_ms: 1,
                backoff_multiplier: 1.0,
            }
        }
    }

    fn flaky(failures: u32, error: fn() -> AgentError) -> Flaky {
        Flaky {
            failures,
            calls: AtomicU32::new(0),
            error,
        }
    }

    #[test]
    fn test_retry_delay_backoff() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay_ms: 100,
            backoff_multiplier: 2.0,
        };
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_transient_errors() {
        assert!(AgentError::Timeout(5).is_transient());
        assert!(AgentError::BackendUnavailable("down".into()).is_transient());
        assert!(!AgentError::ResponseParseError("bad".into()).is_transient());
        assert!(!AgentError::ExtractionRefused("unclear".into()).is_transient());
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let agent = flaky(2, || AgentError::BackendUnavailable("down".into()));
        assert_eq!(execute_with_retry(&agent, ()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_policy() {
        let agent = flaky(5, || AgentError::Timeout(1));
        let err = execute_with_retry(&agent, ()).await.unwrap_err();

        assert!(matches!(err, AgentError::Timeout(1)));
        assert_eq!(agent.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let agent = flaky(1, || AgentError::ResponseParseError("bad".into()));
        assert!(execute_with_retry(&agent, ()).await.is_err());
        assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    }
}
