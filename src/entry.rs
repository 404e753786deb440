//! Match entry validation.
//!
//! Turns user- or AI-supplied drafts into persisted [`Match`] records. This is
//! the only place draft completeness is checked; the analytics never
//! re-validate what the store returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Draft, Match, MatchId, Role, Side};

/// Ban slots available to each side during entry.
pub const MAX_BANS_PER_SIDE: usize = 5;

/// Date format accepted and stored for matches.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a new match is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Opponent team name is required")]
    MissingOpponent,

    #[error("Incomplete {side} draft, missing: {roles:?}")]
    IncompleteDraft { side: Side, roles: Vec<Role> },

    #[error("Too many {side} bans: {count} (max 5)")]
    TooManyBans { side: Side, count: usize },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Match winner is missing")]
    MissingWinner,
}

/// A match as submitted for recording, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    /// Defaults to today when absent
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub opponent: String,

    #[serde(rename = "rrqHeroes", alias = "own_heroes", default)]
    pub own_heroes: Draft,

    #[serde(rename = "oppHeroes", alias = "opp_heroes", default)]
    pub opp_heroes: Draft,

    #[serde(rename = "rrqBans", alias = "own_bans", default)]
    pub own_bans: Vec<String>,

    #[serde(rename = "oppBans", alias = "opp_bans", default)]
    pub opp_bans: Vec<String>,

    pub winner: Side,
}

fn clean_bans(bans: Vec<String>, side: Side) -> Result<Vec<String>, EntryError> {
    let cleaned: Vec<String> = bans
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect();

    if cleaned.len() > MAX_BANS_PER_SIDE {
        return Err(EntryError::TooManyBans {
            side,
            count: cleaned.len(),
        });
    }
    Ok(cleaned)
}

fn clean_draft(draft: Draft, side: Side) -> Result<Draft, EntryError> {
    let roles = draft.missing_roles();
    if !roles.is_empty() {
        return Err(EntryError::IncompleteDraft { side, roles });
    }

    let mut cleaned = Draft::default();
    for (role, hero) in draft.iter() {
        cleaned.set(role, hero.trim());
    }
    Ok(cleaned)
}

impl NewMatch {
    /// Validate and assign a fresh id.
    ///
    /// Trims names, drops blank bans, and fills in `today` when no date was
    /// supplied.
    pub fn into_match(self, today: NaiveDate) -> Result<Match, EntryError> {
        let opponent = self.opponent.trim().to_string();
        if opponent.is_empty() {
            return Err(EntryError::MissingOpponent);
        }

        let own_heroes = clean_draft(self.own_heroes, Side::Own)?;
        let opp_heroes = clean_draft(self.opp_heroes, Side::Opponent)?;
        let own_bans = clean_bans(self.own_bans, Side::Own)?;
        let opp_bans = clean_bans(self.opp_bans, Side::Opponent)?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| EntryError::InvalidDate(raw.to_string()))?,
        };

        let id = MatchId::generate();
        debug!("Accepted match {} vs {} on {}", id, opponent, date);

        Ok(Match::new(
            id,
            date.format(DATE_FORMAT).to_string(),
            opponent,
            own_heroes,
            opp_heroes,
            self.winner,
        )
        .with_bans(own_bans, opp_bans))
    }
}
