//! Statistics calculation engine.
//!
//! Computes derived metrics from the recorded matches:
//! - Per-hero pick/ban/win rates and impact, per side
//! - Head-to-head draft combinations and their filter
//! - Overall team record
//! - Free-text match search
//!
//! Every function here is pure and total: blank hero names are skipped and
//! zero denominators give a rate of zero.

mod head_to_head;
mod hero_stats;
mod match_search;
mod summary;

pub use head_to_head::{compute_combinations, filter_combinations, parse_query};
pub use hero_stats::{compute_hero_stats, search_heroes};
pub use match_search::search_matches;
pub use summary::compute_summary;

/// `part / whole` as a percentage, zero when `whole` is zero.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Draft, Match, MatchId, Side};

    /// Build a match from picks in role order and ban lists.
    pub fn match_with(
        id: &str,
        date: &str,
        own: [&str; 5],
        own_bans: &[&str],
        opp: [&str; 5],
        opp_bans: &[&str],
        winner: Side,
    ) -> Match {
        Match::new(
            MatchId::from(id),
            date,
            "ONIC",
            Draft::from_heroes(own),
            Draft::from_heroes(opp),
            winner,
        )
        .with_bans(
            own_bans.iter().map(|s| s.to_string()).collect(),
            opp_bans.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub const OWN: [&str; 5] = ["Layla", "Paquito", "Ling", "Lunox", "Angela"];
    pub const OPP: [&str; 5] = ["Moskov", "Yu Zhong", "Fanny", "Valentina", "Tigreal"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(0, 5), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert!((percentage(1, 3) - 33.333).abs() < 0.01);
    }
}
