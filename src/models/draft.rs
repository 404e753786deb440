//! Draft building blocks: roles, sides and the per-role pick sheet.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five fixed lane roles of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goldlane,
    Explaner,
    Jungler,
    Midlane,
    Roamer,
}

impl Role {
    /// All roles in draft-sheet order.
    pub const ALL: [Role; 5] = [
        Role::Goldlane,
        Role::Explaner,
        Role::Jungler,
        Role::Midlane,
        Role::Roamer,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Goldlane => write!(f, "Goldlane"),
            Role::Explaner => write!(f, "Explaner"),
            Role::Jungler => write!(f, "Jungler"),
            Role::Midlane => write!(f, "Midlane"),
            Role::Roamer => write!(f, "Roamer"),
        }
    }
}

/// One side of a match.
///
/// On disk the winner is stored with the legacy tags `"RRQ"` (own team) and
/// `"Opp"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "RRQ", alias = "own")]
    Own,
    #[serde(rename = "Opp", alias = "opponent")]
    Opponent,
}

impl Side {
    /// Stored winner tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Side::Own => "RRQ",
            Side::Opponent => "Opp",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Own => write!(f, "own"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "own" | "rrq" | "us" => Ok(Side::Own),
            "opp" | "opponent" | "enemy" => Ok(Side::Opponent),
            other => Err(format!(
                "unknown side '{}', expected 'own' or 'opponent'",
                other
            )),
        }
    }
}

/// Hero picked for each role by one side.
///
/// Every role is always present; an unfilled slot is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Draft {
    #[serde(default)]
    pub goldlane: String,
    #[serde(default)]
    pub explaner: String,
    #[serde(default)]
    pub jungler: String,
    #[serde(default)]
    pub midlane: String,
    #[serde(default)]
    pub roamer: String,
}

impl Draft {
    /// Build a draft from heroes listed in [`Role::ALL`] order.
    pub fn from_heroes(heroes: [&str; 5]) -> Self {
        let [goldlane, explaner, jungler, midlane, roamer] = heroes;
        Self {
            goldlane: goldlane.to_string(),
            explaner: explaner.to_string(),
            jungler: jungler.to_string(),
            midlane: midlane.to_string(),
            roamer: roamer.to_string(),
        }
    }

    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Goldlane => &self.goldlane,
            Role::Explaner => &self.explaner,
            Role::Jungler => &self.jungler,
            Role::Midlane => &self.midlane,
            Role::Roamer => &self.roamer,
        }
    }

    pub fn set(&mut self, role: Role, hero: impl Into<String>) {
        let slot = match role {
            Role::Goldlane => &mut self.goldlane,
            Role::Explaner => &mut self.explaner,
            Role::Jungler => &mut self.jungler,
            Role::Midlane => &mut self.midlane,
            Role::Roamer => &mut self.roamer,
        };
        *slot = hero.into();
    }

    /// (role, hero) pairs in role order, including empty slots.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Raw hero values in role order, including empty slots.
    pub fn heroes(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, hero)| hero)
    }

    /// Roles whose slot is blank after trimming.
    pub fn missing_roles(&self) -> Vec<Role> {
        self.iter()
            .filter(|(_, hero)| hero.trim().is_empty())
            .map(|(role, _)| role)
            .collect()
    }
}
