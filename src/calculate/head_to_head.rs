use std::collections::HashMap;

use crate::models::{Combination, Match, Side};

use super::percentage;

/// Draft fingerprint: own picks, own bans, opponent picks, opponent bans,
/// each sorted so role order and ban order don't matter.
type ComboKey = (Vec<String>, Vec<String>, Vec<String>, Vec<String>);

fn sorted<'a>(heroes: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = heroes.map(str::to_string).collect();
    out.sort();
    out
}

fn combination_key(m: &Match) -> ComboKey {
    (
        sorted(m.own_heroes.heroes()),
        sorted(m.own_bans.iter().map(String::as_str)),
        sorted(m.opp_heroes.heroes()),
        sorted(m.opp_bans.iter().map(String::as_str)),
    )
}

/// Group matches by identical draft fingerprint, most frequent first.
///
/// Hero names are compared exactly (case-sensitive, untrimmed). Groups with
/// the same count keep the order in which they were first seen.
pub fn compute_combinations(matches: &[Match]) -> Vec<Combination> {
    let mut index: HashMap<ComboKey, usize> = HashMap::new();
    let mut groups: Vec<Combination> = Vec::new();

    for m in matches {
        let key = combination_key(m);
        let idx = match index.get(&key) {
            Some(&idx) => idx,
            None => {
                groups.push(Combination {
                    picks: m.own_heroes.heroes().map(str::to_string).collect(),
                    bans: m.own_bans.clone(),
                    opp_picks: m.opp_heroes.heroes().map(str::to_string).collect(),
                    opp_bans: m.opp_bans.clone(),
                    total: 0,
                    wins: 0,
                    win_rate: 0.0,
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        group.total += 1;
        if m.won_by(Side::Own) {
            group.wins += 1;
        }
    }

    for group in &mut groups {
        group.win_rate = percentage(group.wins, group.total);
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

/// Split a comma-separated query into lower-cased, non-empty tokens.
pub fn parse_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every token must be a substring of at least one pool entry.
fn pool_contains_all(pool: &[String], tokens: &[String]) -> bool {
    tokens
        .iter()
        .all(|token| pool.iter().any(|hero| hero.contains(token.as_str())))
}

/// Keep combinations whose own pool matches `own_query` and whose opponent
/// pool matches `opp_query`.
///
/// A pool is the side's picks plus bans. Queries are comma-separated; each
/// token must appear, case-insensitively, inside some hero name of the pool.
/// An empty query matches everything.
pub fn filter_combinations(
    combinations: &[Combination],
    own_query: &str,
    opp_query: &str,
) -> Vec<Combination> {
    let own_tokens = parse_query(own_query);
    let opp_tokens = parse_query(opp_query);

    combinations
        .iter()
        .filter(|c| {
            pool_contains_all(&c.pool(Side::Own), &own_tokens)
                && pool_contains_all(&c.pool(Side::Opponent), &opp_tokens)
        })
        .cloned()
        .collect()
}
