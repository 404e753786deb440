//! Recorded match model.

use serde::{Deserialize, Serialize};

use super::{Draft, MatchId, Side};

/// A single recorded match: both drafts, both ban lists and the result.
///
/// Field names on disk follow the legacy dashboard format (`rrqHeroes`,
/// `oppBans`, ...) so existing exports load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier, assigned at creation
    pub id: MatchId,

    /// Calendar date (YYYY-MM-DD)
    pub date: String,

    /// Opponent team name as entered
    pub opponent: String,

    /// Own team picks by role
    #[serde(rename = "rrqHeroes")]
    pub own_heroes: Draft,

    /// Opponent picks by role
    #[serde(rename = "oppHeroes")]
    pub opp_heroes: Draft,

    /// Own team bans
    #[serde(rename = "rrqBans", default)]
    pub own_bans: Vec<String>,

    /// Opponent bans
    #[serde(rename = "oppBans", default)]
    pub opp_bans: Vec<String>,

    /// Winning side
    pub winner: Side,
}

/// Borrowed view of one side of a match.
///
/// Lets the aggregation code run a single routine for either team by
/// selecting which draft and ban list it reads.
#[derive(Debug, Clone, Copy)]
pub struct SideView<'a> {
    pub picks: &'a Draft,
    pub bans: &'a [String],
    pub won: bool,
}

impl Match {
    /// Create a match with no bans.
    pub fn new(
        id: MatchId,
        date: impl Into<String>,
        opponent: impl Into<String>,
        own_heroes: Draft,
        opp_heroes: Draft,
        winner: Side,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            opponent: opponent.into(),
            own_heroes,
            opp_heroes,
            own_bans: Vec::new(),
            opp_bans: Vec::new(),
            winner,
        }
    }

    /// Builder method to set both ban lists.
    pub fn with_bans(mut self, own_bans: Vec<String>, opp_bans: Vec<String>) -> Self {
        self.own_bans = own_bans;
        self.opp_bans = opp_bans;
        self
    }

    pub fn won_by(&self, side: Side) -> bool {
        self.winner == side
    }

    /// Picks, bans and result as seen from `side`.
    pub fn view(&self, side: Side) -> SideView<'_> {
        let (picks, bans) = match side {
            Side::Own => (&self.own_heroes, self.own_bans.as_slice()),
            Side::Opponent => (&self.opp_heroes, self.opp_bans.as_slice()),
        };
        SideView {
            picks,
            bans,
            won: self.won_by(side),
        }
    }
}
