//! Draft Advisor Agent.
//!
//! Writes strategy advice from the newest recorded matches.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};
use crate::models::{Draft, Match};

/// Input for the Draft Advisor agent: a bounded sample of recent matches.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceInput {
    pub sample: Vec<Match>,
}

impl AdviceInput {
    /// Take the first `sample_size` matches of a newest-first list.
    pub fn from_recent(matches: &[Match], sample_size: usize) -> Self {
        Self {
            sample: matches.iter().take(sample_size).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }

    /// One line per match, as handed to the model.
    pub fn summary_lines(&self) -> Vec<String> {
        self.sample
            .iter()
            .map(|m| {
                format!(
                    "Match vs {}: own picks ({}), opponent picks ({}). Result: {}",
                    m.opponent,
                    join_picks(&m.own_heroes),
                    join_picks(&m.opp_heroes),
                    m.winner.tag()
                )
            })
            .collect()
    }
}

fn join_picks(draft: &Draft) -> String {
    draft.heroes().collect::<Vec<_>>().join(", ")
}

/// Prose advice from the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftAdvice {
    pub text: String,
}

/// Draft Advisor agent implementation.
pub struct DraftAdvisorAgent {
    backend: Arc<dyn AiBackend>,
    team_name: String,
}

impl DraftAdvisorAgent {
    pub fn new(backend: Arc<dyn AiBackend>, team_name: impl Into<String>) -> Self {
        Self {
            backend,
            team_name: team_name.into(),
        }
    }

    fn build_prompt(&self, input: &AdviceInput) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(ADVISOR_SYSTEM_PROMPT.replace("{team}", &self.team_name)),
            ChatMessage::user(format!(
                "Recent matches:\n{}",
                input.summary_lines().join("\n")
            )),
        ]
    }
}

const ADVISOR_SYSTEM_PROMPT: &str = r#"You are a Mobile Legends draft analyst working for {team}.

From the recent matches provided, give insight on:
1. Which of our heroes are most successful (high win rate)
2. Which opponent heroes are the biggest threats
3. A recommended composition for the next match
4. The most effective ban strategy

Answer concisely and professionally."#;

#[async_trait]
impl Agent for DraftAdvisorAgent {
    type Input = AdviceInput;
    type Output = DraftAdvice;

    fn name(&self) -> &'static str {
        "draft_advisor"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        if input.is_empty() {
            return Err(AgentError::ExtractionRefused(
                "no matches to analyse".to_string(),
            ));
        }

        info!("Requesting draft advice for {} matches", input.sample.len());

        let request = ChatRequest::new(self.build_prompt(&input)).with_temperature(0.7);
        let response = self.backend.chat(request).await?;
        debug!("Advice from {}: {} chars", response.model, response.content.len());

        let text = response.content.trim().to_string();
        if text.is_empty() {
            return Err(AgentError::ResponseParseError("empty advice".to_string()));
        }

        Ok(DraftAdvice { text })
    }
}
