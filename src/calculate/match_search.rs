//! Free-text match filter for the match list.

use crate::models::Match;

/// Keep matches whose opponent or any picked hero contains `query`,
/// ignoring case. Bans are not searched; a blank query keeps everything.
pub fn search_matches(matches: &[Match], query: &str) -> Vec<Match> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return matches.to_vec();
    }

    matches
        .iter()
        .filter(|m| {
            m.opponent.to_lowercase().contains(&needle)
                || m
                    .own_heroes
                    .heroes()
                    .chain(m.opp_heroes.heroes())
                    .any(|hero| hero.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
