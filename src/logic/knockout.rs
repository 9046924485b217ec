//! Knockout stage: bracket start and winner declaration.

use crate::logic::bracket::{generate_bracket, propagate_winner};
use crate::models::{MatchId, Side, Slot, Stage, TeamId, Tournament, TournamentError};

/// Build the bracket from the given seeds and enter the Tournament stage.
pub(crate) fn launch_knockout(
    tournament: &mut Tournament,
    seeds: &[TeamId],
) -> Result<(), TournamentError> {
    if seeds.len() < 2 {
        return Err(TournamentError::NotEnoughTeams {
            produced: seeds.len(),
        });
    }
    tournament.matches = generate_bracket(seeds);
    tournament.champion = None;
    tournament.stage = Stage::Tournament;
    log::info!(
        "tournament {}: knockout with {} seed(s), {} match(es)",
        tournament.id,
        seeds.len(),
        tournament.matches.len()
    );
    Ok(())
}

/// Skip the group stage and seed every team into the bracket (Teams -> Tournament).
pub fn start_knockout(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.stage != Stage::Teams {
        return Err(TournamentError::InvalidState);
    }
    let seeds: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    launch_knockout(tournament, &seeds)
}

/// Declare the team on `side` the winner of a knockout match.
///
/// Rejected when the match is already decided or the side holds no team. The winner is
/// written into the next match; deciding the final crowns the champion.
pub fn declare_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    side: Side,
) -> Result<(), TournamentError> {
    if tournament.stage != Stage::Tournament {
        return Err(TournamentError::InvalidState);
    }
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let m = &mut tournament.matches[idx];
    if m.winner.is_some() {
        return Err(TournamentError::MatchAlreadyDecided(match_id));
    }
    let Slot::Team(winner) = m.slot(side) else {
        return Err(TournamentError::EmptySlot(match_id));
    };
    m.winner = Some(winner);
    log::info!(
        "tournament {}: round {} match {} won by {}",
        tournament.id,
        tournament.matches[idx].round,
        tournament.matches[idx].index,
        tournament.team_name(winner)
    );

    if let Some(champion) = propagate_winner(&mut tournament.matches, idx) {
        tournament.champion = Some(champion);
        tournament.stage = Stage::Champion;
        log::info!(
            "tournament {}: champion {}",
            tournament.id,
            tournament.team_name(champion)
        );
    }
    Ok(())
}

/// Same as [`declare_winner`], naming the winning team instead of its side.
pub fn declare_winner_team(
    tournament: &mut Tournament,
    match_id: MatchId,
    team: TeamId,
) -> Result<(), TournamentError> {
    let side = tournament
        .knockout_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?
        .side_of(team)
        .ok_or(TournamentError::TeamNotInMatch(team))?;
    declare_winner(tournament, match_id, side)
}
