use std::collections::HashSet;

use crate::models::{Match, Side, TeamSummary};

use super::percentage;

/// Overall record for the own team, or `None` when nothing is recorded.
///
/// `matches` is expected newest-first (the store order); the win streak is
/// measured walking it oldest-first.
pub fn compute_summary(matches: &[Match]) -> Option<TeamSummary> {
    if matches.is_empty() {
        return None;
    }

    let total = matches.len() as u32;
    let wins = matches.iter().filter(|m| m.won_by(Side::Own)).count() as u32;

    let unique_heroes: HashSet<&str> = matches
        .iter()
        .flat_map(|m| m.own_heroes.heroes())
        .map(str::trim)
        .filter(|hero| !hero.is_empty())
        .collect();

    let unique_teams: HashSet<String> = matches
        .iter()
        .map(|m| m.opponent.trim().to_uppercase())
        .collect();

    let mut current = 0u32;
    let mut max_win_streak = 0u32;
    for m in matches.iter().rev() {
        if m.won_by(Side::Own) {
            current += 1;
            max_win_streak = max_win_streak.max(current);
        } else {
            current = 0;
        }
    }

    Some(TeamSummary {
        total,
        wins,
        losses: total - wins,
        win_rate: percentage(wins, total),
        unique_heroes: unique_heroes.len() as u32,
        unique_teams: unique_teams.len() as u32,
        max_win_streak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{match_with, OPP, OWN};

    #[test]
    fn test_empty_has_no_summary() {
        assert!(compute_summary(&[]).is_none());
    }

    #[test]
    fn test_summary_counts() {
        let alt = ["Layla", "Paquito", "Fredrinn", "Lunox", "Angela"];
        let mut matches = vec![
            match_with("1", "2025-01-04", OWN, &[], OPP, &[], Side::Own),
            match_with("2", "2025-01-03", alt, &[], OPP, &[], Side::Own),
            match_with("3", "2025-01-02", OWN, &[], OPP, &[], Side::Opponent),
            match_with("4", "2025-01-01", OWN, &[], OPP, &[], Side::Own),
        ];
        matches[1].opponent = "onic ".to_string();
        matches[2].opponent = "EVOS".to_string();

        let summary = compute_summary(&matches).unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.wins, 3);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.win_rate, 75.0);
        assert_eq!(summary.unique_heroes, 6);
        assert_eq!(summary.unique_teams, 2);
        assert_eq!(summary.max_win_streak, 2);
    }

    #[test]
    fn test_win_streak_walks_oldest_first() {
        // newest first: W L W W W  -> chronological: W W W L W
        let results = [Side::Own, Side::Opponent, Side::Own, Side::Own, Side::Own];
        let matches: Vec<Match> = results
            .iter()
            .enumerate()
            .map(|(i, winner)| {
                match_with(&i.to_string(), &format!("2025-01-{:02}", 10 - i), OWN, &[], OPP, &[], *winner)
            })
            .collect();

        let summary = compute_summary(&matches).unwrap();
        assert_eq!(summary.max_win_streak, 3);
    }

    #[test]
    fn test_all_losses() {
        let matches = vec![
            match_with("1", "2025-01-02", OWN, &[], OPP, &[], Side::Opponent),
            match_with("2", "2025-01-01", OWN, &[], OPP, &[], Side::Opponent),
        ];

        let summary = compute_summary(&matches).unwrap();
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.max_win_streak, 0);
        assert_eq!(summary.losses, 2);
    }
}
