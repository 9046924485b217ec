//! Single-elimination bracket: construction and winner propagation.

use crate::models::{Match, Side, Slot, TeamId};
use std::iter;

/// Number of first-round positions needed for `seeds` entrants (next power of two).
pub fn bracket_size(seeds: usize) -> usize {
    seeds.max(1).next_power_of_two()
}

/// What a decided (or dead) match hands to the next round.
fn carried(m: &Match) -> Slot {
    match m.winner {
        Some(team) => Slot::Team(team),
        None if m.is_walkover() => Slot::Bye,
        None => Slot::Pending,
    }
}

/// Build the full bracket for the given seeds, in seed order (no reseeding).
///
/// Seeds are padded with byes up to the bracket size and paired (0,1), (2,3), ...
/// Each later round pairs consecutive matches of the previous one. A team facing a bye
/// advances immediately, in any round; a bye-vs-bye match forwards a bye.
///
/// Fewer than 2 seeds gives an empty bracket.
pub fn generate_bracket(seeds: &[TeamId]) -> Vec<Match> {
    if seeds.len() < 2 {
        return Vec::new();
    }
    let size = bracket_size(seeds.len());
    let slots: Vec<Slot> = seeds
        .iter()
        .map(|&t| Slot::Team(t))
        .chain(iter::repeat(Slot::Bye))
        .take(size)
        .collect();

    let mut matches: Vec<Match> = Vec::with_capacity(size - 1);
    let mut previous: Vec<usize> = Vec::with_capacity(size / 2);

    for (i, pair) in slots.chunks_exact(2).enumerate() {
        let mut m = Match::new(0, i, pair[0], pair[1]);
        m.winner = m.bye_winner();
        previous.push(matches.len());
        matches.push(m);
    }

    let mut round = 1;
    while previous.len() > 1 {
        let mut current = Vec::with_capacity(previous.len() / 2);
        for (i, pair) in previous.chunks_exact(2).enumerate() {
            let (feeder_a, feeder_b) = (pair[0], pair[1]);
            let mut m = Match::new(
                round,
                i,
                carried(&matches[feeder_a]),
                carried(&matches[feeder_b]),
            );
            m.winner = m.bye_winner();
            matches[feeder_a].next_match_id = Some(m.id);
            matches[feeder_b].next_match_id = Some(m.id);
            current.push(matches.len());
            matches.push(m);
        }
        previous = current;
        round += 1;
    }

    log::debug!(
        "built bracket of size {} for {} seed(s): {} match(es) over {} round(s)",
        size,
        seeds.len(),
        matches.len(),
        round
    );
    matches
}

/// Push the winner of `matches[from]` into the following match.
///
/// The feeding match's index parity picks the side (even -> A, odd -> B) and the slot
/// is overwritten. If that leaves an undecided match with a team facing a bye, the team
/// advances and propagation continues. Returns the champion when the final gets decided.
pub(crate) fn propagate_winner(matches: &mut [Match], from: usize) -> Option<TeamId> {
    let mut current = from;
    loop {
        let m = &matches[current];
        let winner = m.winner?;
        let index = m.index;
        let Some(next_id) = m.next_match_id else {
            return Some(winner);
        };
        let next = matches.iter().position(|n| n.id == next_id)?;

        let target = &mut matches[next];
        *target.slot_mut(Side::fed_by(index)) = Slot::Team(winner);
        if target.winner.is_some() {
            return None;
        }
        match target.bye_winner() {
            Some(team) => {
                log::debug!("round {} match {}: advancing over bye", target.round, target.index);
                target.winner = Some(team);
                current = next;
            }
            None => return None,
        }
    }
}
