//! Group standings: derived from finished fixtures, never stored.

use crate::models::{Group, GroupStanding, TeamId};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Rank the teams of a group.
///
/// Only finished fixtures count. Ordering is wins, then point difference, then points
/// scored, all descending; remaining ties keep group placement order.
pub fn calculate_group_standings(group: &Group) -> Vec<GroupStanding> {
    let mut standings: Vec<GroupStanding> =
        group.teams.iter().map(|&t| GroupStanding::new(t)).collect();
    let position: HashMap<TeamId, usize> = group
        .teams
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, i))
        .collect();

    for m in group.matches.iter().filter(|m| m.finished) {
        if let Some(&a) = position.get(&m.team_a) {
            standings[a].record(m.score_a, m.score_b);
        }
        if let Some(&b) = position.get(&m.team_b) {
            standings[b].record(m.score_b, m.score_a);
        }
    }

    standings.sort_by_key(|s| (Reverse(s.won), Reverse(s.point_diff), Reverse(s.points_for)));
    standings
}

/// Top-ranked team of a group, if it has any teams.
pub fn group_winner(group: &Group) -> Option<TeamId> {
    calculate_group_standings(group).first().map(|s| s.team)
}
