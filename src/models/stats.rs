//! Derived statistics models.
//!
//! Everything here is recomputed from the full match list on each query and
//! never persisted.

use serde::{Deserialize, Serialize};

use super::Side;

/// Per-hero draft statistics for one side.
///
/// All rates are percentages (0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroStats {
    /// Hero name as entered (trimmed)
    pub hero: String,

    /// Times picked by the side
    pub pick: u32,

    /// Times banned by the side
    pub ban: u32,

    /// Picks that ended in a win for the side
    pub win: u32,

    /// pick / total matches
    pub pick_rate: f64,

    /// ban / total matches
    pub ban_rate: f64,

    /// pick_rate + ban_rate
    pub presence: f64,

    /// win / pick, zero when never picked
    pub win_rate: f64,

    /// presence * win_rate / 100
    pub impact: f64,
}

impl HeroStats {
    /// Create a HeroStats with calculated rate fields.
    pub fn new(hero: String, pick: u32, ban: u32, win: u32, total_matches: usize) -> Self {
        let (pick_rate, ban_rate) = if total_matches > 0 {
            let total = total_matches as f64;
            (
                pick as f64 / total * 100.0,
                ban as f64 / total * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let presence = pick_rate + ban_rate;

        let win_rate = if pick > 0 {
            win as f64 / pick as f64 * 100.0
        } else {
            0.0
        };

        let impact = presence * win_rate / 100.0;

        Self {
            hero,
            pick,
            ban,
            win,
            pick_rate,
            ban_rate,
            presence,
            win_rate,
            impact,
        }
    }
}

/// A head-to-head draft combination shared by one or more matches.
///
/// The pick and ban lists are copied from the first match seen with this
/// fingerprint; later matches only bump the counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub picks: Vec<String>,
    pub bans: Vec<String>,
    pub opp_picks: Vec<String>,
    pub opp_bans: Vec<String>,

    /// Matches in the group
    pub total: u32,

    /// Matches the own side won
    pub wins: u32,

    /// wins / total, as a percentage
    pub win_rate: f64,
}

impl Combination {
    /// Lower-cased picks and bans of one side.
    pub fn pool(&self, side: Side) -> Vec<String> {
        let (picks, bans) = match side {
            Side::Own => (&self.picks, &self.bans),
            Side::Opponent => (&self.opp_picks, &self.opp_bans),
        };
        picks
            .iter()
            .chain(bans.iter())
            .map(|hero| hero.to_lowercase())
            .collect()
    }
}

/// Overall team record across all matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,

    /// wins / total, as a percentage
    pub win_rate: f64,

    /// Distinct heroes the own team has picked
    pub unique_heroes: u32,

    /// Distinct opponents (case-insensitive)
    pub unique_teams: u32,

    /// Longest run of consecutive wins, in play order
    pub max_win_streak: u32,
}
