//! Group stage: start, score recording and completion.

use crate::logic::groups::generate_groups;
use crate::logic::knockout::launch_knockout;
use crate::logic::standings::group_winner;
use crate::models::{GroupMatchId, Stage, TeamId, Tournament, TournamentError};
use rand::Rng;

/// Partition the teams into round-robin groups (Teams -> Groups).
pub fn start_group_stage<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    max_per_group: usize,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.stage != Stage::Teams {
        return Err(TournamentError::InvalidState);
    }
    if max_per_group < 2 {
        return Err(TournamentError::InvalidGroupSize(max_per_group));
    }
    tournament.groups = generate_groups(&tournament.teams, max_per_group, rng);
    tournament.stage = Stage::Groups;
    log::info!(
        "tournament {}: group stage with {} group(s), {} match(es)",
        tournament.id,
        tournament.groups.len(),
        tournament.unfinished_group_matches()
    );
    Ok(())
}

/// Record the score of a group fixture. Repeatable; later stages are not affected.
pub fn update_group_match(
    tournament: &mut Tournament,
    group_id: &str,
    match_id: GroupMatchId,
    score_a: u32,
    score_b: u32,
    finished: bool,
) -> Result<(), TournamentError> {
    if !matches!(
        tournament.stage,
        Stage::Groups | Stage::Tournament | Stage::Champion
    ) {
        return Err(TournamentError::InvalidState);
    }
    let group = tournament
        .get_group_mut(group_id)
        .ok_or_else(|| TournamentError::GroupNotFound(group_id.to_owned()))?;
    let m = group
        .get_match_mut(match_id)
        .ok_or(TournamentError::GroupMatchNotFound(match_id))?;
    m.score_a = score_a;
    m.score_b = score_b;
    m.finished = finished;
    Ok(())
}

/// Close the group stage (Groups -> Tournament, or Champion when only one group exists).
///
/// Every fixture must be finished. Each group's top-ranked team becomes a seed, in
/// group order.
pub fn finish_group_stage(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.stage != Stage::Groups {
        return Err(TournamentError::InvalidState);
    }
    let unfinished = tournament.unfinished_group_matches();
    if unfinished > 0 {
        return Err(TournamentError::IncompleteGroupStage { unfinished });
    }

    let winners = group_winners(tournament);
    match winners.as_slice() {
        [] => Err(TournamentError::InvalidState),
        [only] => {
            tournament.matches.clear();
            tournament.champion = Some(*only);
            tournament.stage = Stage::Champion;
            log::info!(
                "tournament {}: single group, champion {}",
                tournament.id,
                tournament.team_name(*only)
            );
            Ok(())
        }
        _ => launch_knockout(tournament, &winners),
    }
}

/// Current top team of every non-empty group, in group order.
pub fn group_winners(tournament: &Tournament) -> Vec<TeamId> {
    tournament.groups.iter().filter_map(group_winner).collect()
}
