//! Pairing: turn two category name lists into two-person teams.

use crate::models::{Category, Participant, Team};
use rand::seq::SliceRandom;
use rand::Rng;

fn clean(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pair names into teams.
///
/// 1. Shuffle each category independently.
/// 2. Pop one name from each list into a cross-category team until one list runs out.
/// 3. Pool the leftovers of both lists and pair them two at a time, category ignored.
/// 4. A single name still left becomes a solo team.
///
/// Imposes no minimum: 0 or 1 names give 0 or 1 teams, which callers must reject.
pub fn generate_teams<R: Rng + ?Sized>(
    category_a: &[String],
    category_b: &[String],
    rng: &mut R,
) -> Vec<Team> {
    let mut list_a = clean(category_a);
    let mut list_b = clean(category_b);
    list_a.shuffle(rng);
    list_b.shuffle(rng);

    let mut teams = Vec::with_capacity((list_a.len() + list_b.len() + 1) / 2);

    while !list_a.is_empty() && !list_b.is_empty() {
        if let (Some(a), Some(b)) = (list_a.pop(), list_b.pop()) {
            teams.push(Team::pair(
                Participant::new(a, Category::A),
                Participant::new(b, Category::B),
            ));
        }
    }

    let mut leftovers = list_a;
    leftovers.append(&mut list_b);

    while leftovers.len() >= 2 {
        if let (Some(first), Some(second)) = (leftovers.pop(), leftovers.pop()) {
            teams.push(Team::pair(
                Participant::new(first, Category::Unspecified),
                Participant::new(second, Category::Unspecified),
            ));
        }
    }

    if let Some(last) = leftovers.pop() {
        teams.push(Team::solo(Participant::new(last, Category::Unspecified)));
    }

    log::debug!("paired {} team(s)", teams.len());
    teams
}
