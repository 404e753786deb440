//! Chat Parser Agent.
//!
//! Extracts a match from a free-form chat message, e.g. a result posted in a
//! team group chat.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::backend::{strip_code_fence, AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};
use crate::entry::{EntryError, NewMatch, DATE_FORMAT};
use crate::models::{Draft, Side};

/// Input for the Chat Parser agent.
#[derive(Debug, Clone)]
pub struct ChatExtractionInput {
    /// Raw chat text
    pub text: String,

    /// Used when the text names no date
    pub today: NaiveDate,
}

impl ChatExtractionInput {
    pub fn new(text: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            text: text.into(),
            today,
        }
    }
}

/// Best-effort match extracted from text. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    #[serde(default)]
    pub opponent: Option<String>,

    /// Winner tag as written by the model ("RRQ", "Opp", ...)
    #[serde(default)]
    pub winner: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(rename = "rrqHeroes", default)]
    pub own_heroes: Option<Draft>,

    #[serde(rename = "oppHeroes", default)]
    pub opp_heroes: Option<Draft>,

    #[serde(rename = "rrqBans", default)]
    pub own_bans: Option<Vec<String>>,

    #[serde(rename = "oppBans", default)]
    pub opp_bans: Option<Vec<String>>,
}

impl MatchCandidate {
    /// True when the model found nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == MatchCandidate::default()
    }

    /// Convert into an entry for validation.
    ///
    /// Only the winner is required here; everything else is checked by
    /// [`NewMatch::into_match`].
    pub fn into_new_match(self) -> Result<NewMatch, EntryError> {
        let winner: Side = self
            .winner
            .as_deref()
            .and_then(|w| w.parse().ok())
            .ok_or(EntryError::MissingWinner)?;

        Ok(NewMatch {
            date: self.date,
            opponent: self.opponent.unwrap_or_default(),
            own_heroes: self.own_heroes.unwrap_or_default(),
            opp_heroes: self.opp_heroes.unwrap_or_default(),
            own_bans: self.own_bans.unwrap_or_default(),
            opp_bans: self.opp_bans.unwrap_or_default(),
            winner,
        })
    }
}

/// Chat Parser agent implementation.
pub struct ChatParserAgent {
    backend: Arc<dyn AiBackend>,
    team_name: String,
}

impl ChatParserAgent {
    pub fn new(backend: Arc<dyn AiBackend>, team_name: impl Into<String>) -> Self {
        Self {
            backend,
            team_name: team_name.into(),
        }
    }

    fn build_prompt(&self, input: &ChatExtractionInput) -> Vec<ChatMessage> {
        let system = CHAT_PARSER_SYSTEM_PROMPT.replace("{team}", &self.team_name);
        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!(
                "Today is {}. If the chat names no date, use today.\n\nChat:\n{}",
                input.today.format(DATE_FORMAT),
                input.text
            )),
        ]
    }

    fn parse_response(&self, response: &str) -> Result<MatchCandidate, AgentError> {
        let body = strip_code_fence(response);
        if body.is_empty() || body == "null" {
            return Err(AgentError::ExtractionRefused(
                "no match found in text".to_string(),
            ));
        }

        let candidate: MatchCandidate = serde_json::from_str(body)
            .map_err(|e| AgentError::ResponseParseError(format!("Invalid JSON: {}", e)))?;

        if candidate.is_empty() {
            return Err(AgentError::ExtractionRefused(
                "no match found in text".to_string(),
            ));
        }
        Ok(candidate)
    }
}

const CHAT_PARSER_SYSTEM_PROMPT: &str = r#"You extract Mobile Legends match results from team chat messages.
The own team is {team}.

Return JSON in this exact format:
{
  "opponent": "ONIC",
  "winner": "RRQ",
  "date": "2025-01-31",
  "rrqHeroes": {"Goldlane": "", "Explaner": "", "Jungler": "", "Midlane": "", "Roamer": ""},
  "oppHeroes": {"Goldlane": "", "Explaner": "", "Jungler": "", "Midlane": "", "Roamer": ""},
  "rrqBans": [],
  "oppBans": []
}

Rules:
- "rrqHeroes" and "rrqBans" are always {team}'s draft
- "winner" must be "RRQ" when {team} won, "Opp" otherwise
- "date" uses YYYY-MM-DD
- Use the common spelling of each hero name
- Leave a role empty rather than guessing
- Return null if the text does not describe a match"#;

#[async_trait]
impl Agent for ChatParserAgent {
    type Input = ChatExtractionInput;
    type Output = MatchCandidate;

    fn name(&self) -> &'static str {
        "chat_parser"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        info!("Parsing {} chars of chat via {}", input.text.len(), self.backend.name());

        let request = ChatRequest::new(self.build_prompt(&input))
            .with_json_mode()
            .with_temperature(0.0);

        let response = self.backend.chat(request).await?;
        debug!("AI response: {}", response.content);

        let candidate = self.parse_response(&response.content)?;
        if candidate.winner.is_none() {
            warn!("Extracted match has no winner");
        }

        Ok(candidate)
    }
}
