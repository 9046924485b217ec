//! Setup phase: team creation, stepping back, and full reset.

use crate::logic::pairing::generate_teams;
use crate::models::{Stage, Tournament, TournamentError};
use rand::Rng;

/// Pair the registered names into teams (Input -> Teams). Allowed again in Teams to re-roll.
///
/// Rejected, with the tournament unchanged, when fewer than 2 names are supplied or
/// pairing yields fewer than 2 teams.
pub fn create_teams<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    category_a: &[String],
    category_b: &[String],
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !matches!(tournament.stage, Stage::Input | Stage::Teams) {
        return Err(TournamentError::InvalidState);
    }
    let supplied = category_a
        .iter()
        .chain(category_b)
        .filter(|n| !n.trim().is_empty())
        .count();
    if supplied < 2 {
        return Err(TournamentError::NotEnoughParticipants { supplied });
    }

    let teams = generate_teams(category_a, category_b, rng);
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams {
            produced: teams.len(),
        });
    }

    tournament.clear();
    tournament.teams = teams;
    tournament.stage = Stage::Teams;
    log::info!(
        "tournament {}: {} participant(s) paired into {} team(s)",
        tournament.id,
        supplied,
        tournament.teams.len()
    );
    Ok(())
}

/// Go back one step: Teams -> Input (teams discarded), Groups -> Teams (groups discarded).
pub fn step_back(tournament: &mut Tournament) -> Result<(), TournamentError> {
    match tournament.stage {
        Stage::Teams => tournament.clear(),
        Stage::Groups => {
            tournament.groups.clear();
            tournament.stage = Stage::Teams;
        }
        _ => return Err(TournamentError::InvalidState),
    }
    log::info!("tournament {}: back to {:?}", tournament.id, tournament.stage);
    Ok(())
}

/// Clear all teams, groups and matches and return to Input. Needs explicit confirmation.
pub fn reset_all(tournament: &mut Tournament, confirmed: bool) -> Result<(), TournamentError> {
    if !confirmed {
        return Err(TournamentError::ResetNotConfirmed);
    }
    tournament.clear();
    log::info!("tournament {}: reset", tournament.id);
    Ok(())
}
