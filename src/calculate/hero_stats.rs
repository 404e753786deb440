use std::collections::HashMap;

use crate::models::{HeroStats, Match, Side};

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    pick: u32,
    ban: u32,
    win: u32,
}

/// Hero counters keyed by trimmed name, kept in first-seen order so the
/// final stable sort is deterministic for a given input order.
#[derive(Default)]
struct HeroTally<'a> {
    index: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, Counts)>,
}

impl<'a> HeroTally<'a> {
    /// Counter for `raw`, or `None` when the name is blank.
    fn entry(&mut self, raw: &'a str) -> Option<&mut Counts> {
        let hero = raw.trim();
        if hero.is_empty() {
            return None;
        }

        let counts = &mut self.counts;
        let idx = *self.index.entry(hero).or_insert_with(|| {
            counts.push((hero, Counts::default()));
            counts.len() - 1
        });

        Some(&mut self.counts[idx].1)
    }

    fn into_stats(self, total_matches: usize) -> Vec<HeroStats> {
        self.counts
            .into_iter()
            .map(|(hero, c)| HeroStats::new(hero.to_string(), c.pick, c.ban, c.win, total_matches))
            .collect()
    }
}

/// Per-hero statistics for one side, highest impact first.
///
/// Every hero that appears in a pick or ban slot of `side` gets exactly one
/// entry. Names are matched after trimming only, so `"Ling"` and `"ling"`
/// are separate heroes. Ties in impact keep first-seen order.
pub fn compute_hero_stats(matches: &[Match], side: Side) -> Vec<HeroStats> {
    let total = matches.len();
    if total == 0 {
        return Vec::new();
    }

    let mut tally = HeroTally::default();

    for m in matches {
        let view = m.view(side);

        for hero in view.picks.heroes() {
            if let Some(counts) = tally.entry(hero) {
                counts.pick += 1;
                if view.won {
                    counts.win += 1;
                }
            }
        }

        for hero in view.bans {
            if let Some(counts) = tally.entry(hero) {
                counts.ban += 1;
            }
        }
    }

    let mut stats = tally.into_stats(total);
    stats.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    stats
}

/// Keep heroes whose name contains `query`, ignoring case.
pub fn search_heroes(stats: &[HeroStats], query: &str) -> Vec<HeroStats> {
    let needle = query.trim().to_lowercase();
    stats
        .iter()
        .filter(|s| s.hero.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{match_with, OPP, OWN};
    use pretty_assertions::assert_eq;

    fn find<'a>(stats: &'a [HeroStats], hero: &str) -> &'a HeroStats {
        stats
            .iter()
            .find(|s| s.hero == hero)
            .unwrap_or_else(|| panic!("missing hero {}", hero))
    }

    #[test]
    fn test_single_loss_own_side() {
        let matches = vec![match_with("1", "2025-01-01", OWN, &[], OPP, &[], Side::Opponent)];

        let stats = compute_hero_stats(&matches, Side::Own);

        assert_eq!(stats.len(), 5);
        for hero in OWN {
            let s = find(&stats, hero);
            assert_eq!(s.pick, 1);
            assert_eq!(s.win, 0);
            assert_eq!(s.win_rate, 0.0);
            assert_eq!(s.pick_rate, 100.0);
        }
    }

    #[test]
    fn test_pick_and_ban_rates_combine_into_impact() {
        let other = ["Brody", "Terizla", "Baxia", "Pharsa", "Khufra"];
        let matches = vec![
            match_with("1", "2025-01-03", OWN, &[], OPP, &[], Side::Own),
            match_with("2", "2025-01-02", other, &["Ling"], OPP, &[], Side::Opponent),
            match_with("3", "2025-01-01", other, &["Ling"], OPP, &[], Side::Own),
        ];

        let stats = compute_hero_stats(&matches, Side::Own);
        let ling = find(&stats, "Ling");

        assert_eq!((ling.pick, ling.ban, ling.win), (1, 2, 1));
        assert!((ling.pick_rate - 33.33).abs() < 0.01);
        assert!((ling.ban_rate - 66.67).abs() < 0.01);
        assert!((ling.presence - 100.0).abs() < 1e-9);
        assert_eq!(ling.win_rate, 100.0);
        assert!((ling.impact - 100.0).abs() < 1e-9);
        assert_eq!(stats[0].hero, "Ling");
    }

    #[test]
    fn test_empty_input_yields_no_stats() {
        assert!(compute_hero_stats(&[], Side::Own).is_empty());
        assert!(compute_hero_stats(&[], Side::Opponent).is_empty());
    }

    #[test]
    fn test_every_hero_appears_exactly_once() {
        let matches = vec![
            match_with("1", "2025-01-02", OWN, &["Joy", "Nolan"], OPP, &["Ling"], Side::Own),
            match_with("2", "2025-01-01", OWN, &["Joy"], OPP, &[], Side::Opponent),
        ];

        let stats = compute_hero_stats(&matches, Side::Own);
        let mut names: Vec<&str> = stats.iter().map(|s| s.hero.as_str()).collect();
        names.sort();

        let mut expected: Vec<&str> = OWN.to_vec();
        expected.extend(["Joy", "Nolan"]);
        expected.sort();

        assert_eq!(names, expected);
    }

    #[test]
    fn test_rates_stay_in_bounds() {
        let matches = vec![
            match_with("1", "2025-01-03", OWN, &["Joy"], OPP, &["Ling"], Side::Own),
            match_with("2", "2025-01-02", OPP, &["Joy"], OWN, &[], Side::Opponent),
            match_with("3", "2025-01-01", OWN, &[], OPP, &["Joy"], Side::Own),
        ];

        for side in [Side::Own, Side::Opponent] {
            for s in compute_hero_stats(&matches, side) {
                for rate in [s.pick_rate, s.ban_rate, s.win_rate] {
                    assert!((0.0..=100.0).contains(&rate), "{:?}", s);
                }
                assert_eq!(s.presence, s.pick_rate + s.ban_rate);
                if s.pick == 0 {
                    assert_eq!(s.win_rate, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_opponent_side_counts_opponent_wins() {
        let matches = vec![
            match_with("1", "2025-01-02", OWN, &[], OPP, &["Joy"], Side::Opponent),
            match_with("2", "2025-01-01", OWN, &[], OPP, &[], Side::Own),
        ];

        let stats = compute_hero_stats(&matches, Side::Opponent);
        let fanny = find(&stats, "Fanny");
        assert_eq!((fanny.pick, fanny.win), (2, 1));
        assert_eq!(fanny.win_rate, 50.0);

        let joy = find(&stats, "Joy");
        assert_eq!((joy.pick, joy.ban, joy.win), (0, 1, 0));
        assert!(stats.iter().all(|s| s.hero != "Ling"));
    }

    #[test]
    fn test_names_are_trimmed_but_case_sensitive() {
        let matches = vec![
            match_with("1", "2025-01-02", [" Ling ", "Paquito", "ling", "Lunox", "Angela"], &["  "], OPP, &[], Side::Own),
            match_with("2", "2025-01-01", ["Ling", "Paquito", "", "Lunox", "Angela"], &[""], OPP, &[], Side::Own),
        ];

        let stats = compute_hero_stats(&matches, Side::Own);

        assert_eq!(find(&stats, "Ling").pick, 2);
        assert_eq!(find(&stats, "ling").pick, 1);
        assert!(stats.iter().all(|s| !s.hero.trim().is_empty()));
        assert_eq!(stats.len(), 5);
    }

    #[test]
    fn test_sorted_by_impact_with_stable_ties() {
        let matches = vec![
            match_with("1", "2025-01-02", OWN, &[], OPP, &[], Side::Own),
            match_with("2", "2025-01-01", ["Layla", "Paquito", "Ling", "Lunox", "Mathilda"], &[], OPP, &[], Side::Opponent),
        ];

        let stats = compute_hero_stats(&matches, Side::Own);
        let order: Vec<&str> = stats.iter().map(|s| s.hero.as_str()).collect();

        // Layla/Paquito/Ling/Lunox: presence 100, win 50 -> impact 50
        // Angela: presence 50, win 100 -> impact 50
        // Mathilda: presence 50, win 0 -> impact 0
        assert_eq!(
            order,
            vec!["Layla", "Paquito", "Ling", "Lunox", "Angela", "Mathilda"]
        );
    }

    #[test]
    fn test_search_heroes_is_case_insensitive_substring() {
        let matches = vec![match_with("1", "2025-01-01", OWN, &["Lylia"], OPP, &[], Side::Own)];
        let stats = compute_hero_stats(&matches, Side::Own);

        let found: Vec<String> = search_heroes(&stats, "LA")
            .into_iter()
            .map(|s| s.hero)
            .collect();
        assert_eq!(found, vec!["Layla", "Angela"]);

        assert_eq!(search_heroes(&stats, "").len(), stats.len());
        assert!(search_heroes(&stats, "valentina").is_empty());
    }
}
