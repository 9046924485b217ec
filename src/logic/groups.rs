//! Group partitioning and round-robin fixtures.

use crate::models::{Group, GroupMatch, Team, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Default upper bound on teams per group.
pub const DEFAULT_MAX_PER_GROUP: usize = 3;

/// Sequential letter label: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn group_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Every unordered pair of teams plays once, in placement order.
pub fn round_robin(teams: &[TeamId]) -> Vec<GroupMatch> {
    let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, &a) in teams.iter().enumerate() {
        for &b in &teams[i + 1..] {
            matches.push(GroupMatch::new(a, b));
        }
    }
    matches
}

/// Split teams into groups of at most `max_per_group` and generate their fixtures.
///
/// 1. Shuffle the teams.
/// 2. Chunk by `max_per_group`, except 4 remaining teams with a max of 3 split 2 and 2.
/// 3. If the last group holds a single team, move the last team of the previous group
///    to the front of it, provided the previous group keeps at least 2.
/// 4. Round-robin fixtures per group.
pub fn generate_groups<R: Rng + ?Sized>(
    teams: &[Team],
    max_per_group: usize,
    rng: &mut R,
) -> Vec<Group> {
    if teams.is_empty() {
        return Vec::new();
    }
    let max_per_group = max_per_group.max(1);

    let mut remaining: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    remaining.shuffle(rng);

    let mut chunks: Vec<Vec<TeamId>> = Vec::new();
    while !remaining.is_empty() {
        let take = if remaining.len() == 4 && max_per_group == 3 {
            2
        } else {
            max_per_group.min(remaining.len())
        };
        chunks.push(remaining.drain(..take).collect());
    }

    let count = chunks.len();
    if count > 1 && chunks[count - 1].len() == 1 && chunks[count - 2].len() > 2 {
        if let Some(moved) = chunks[count - 2].pop() {
            chunks[count - 1].insert(0, moved);
        }
    }

    let groups: Vec<Group> = chunks
        .into_iter()
        .enumerate()
        .map(|(i, teams)| {
            let id = group_label(i);
            Group {
                name: format!("Group {}", id),
                id,
                matches: round_robin(&teams),
                teams,
            }
        })
        .collect();

    log::debug!(
        "partitioned {} team(s) into {} group(s)",
        teams.len(),
        groups.len()
    );
    groups
}
