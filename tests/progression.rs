//! Integration tests for stage transitions, score updates and winner declaration.

use mixed_doubles_cup::{
    calculate_group_standings, create_teams, declare_winner, declare_winner_team,
    finish_group_stage, reset_all, start_group_stage, start_knockout, step_back,
    update_group_match, Match, Side, Slot, Stage, TeamId, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

/// Tournament in the Teams stage with `n` mixed teams.
fn tournament_with_teams(n: usize) -> Tournament {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(n as u64);
    create_teams(&mut t, &names("a", n), &names("b", n), &mut rng).unwrap();
    t
}

fn at(t: &Tournament, round: usize, index: usize) -> Match {
    t.matches
        .iter()
        .find(|m| m.round == round && m.index == index)
        .cloned()
        .unwrap()
}

fn finish_all_groups(t: &mut Tournament) {
    let fixtures: Vec<(String, Uuid)> = t
        .groups
        .iter()
        .flat_map(|g| g.matches.iter().map(move |m| (g.id.clone(), m.id)))
        .collect();
    for (i, (group_id, match_id)) in fixtures.into_iter().enumerate() {
        let score_b = 10 + i as u32;
        update_group_match(t, &group_id, match_id, 21, score_b, true).unwrap();
    }
}

#[test]
fn create_teams_rejects_too_few_names() {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        create_teams(&mut t, &names("a", 1), &[], &mut rng),
        Err(TournamentError::NotEnoughParticipants { supplied: 1 })
    );
    assert_eq!(t.stage, Stage::Input);
}

#[test]
fn create_teams_rejects_single_team() {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(2);
    assert_eq!(
        create_teams(&mut t, &names("a", 1), &names("b", 1), &mut rng),
        Err(TournamentError::NotEnoughTeams { produced: 1 })
    );
    assert_eq!(t.stage, Stage::Input);
    assert!(t.teams.is_empty());
}

#[test]
fn create_teams_moves_to_teams_and_can_reroll() {
    let mut t = tournament_with_teams(3);
    assert_eq!(t.stage, Stage::Teams);
    assert_eq!(t.teams.len(), 3);

    let mut rng = StdRng::seed_from_u64(3);
    create_teams(&mut t, &names("x", 2), &names("y", 2), &mut rng).unwrap();
    assert_eq!(t.stage, Stage::Teams);
    assert_eq!(t.teams.len(), 2);
    assert!(t.teams.iter().all(|team| team.name.starts_with('x')));
}

#[test]
fn direct_knockout_propagates_winners_by_parity() {
    let mut t = tournament_with_teams(4);
    start_knockout(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Tournament);
    assert_eq!(t.matches.len(), 3);
    assert!(t.groups.is_empty());

    let first = at(&t, 0, 0);
    let second = at(&t, 0, 1);
    declare_winner(&mut t, first.id, Side::B).unwrap();
    declare_winner(&mut t, second.id, Side::A).unwrap();

    let final_match = at(&t, 1, 0);
    assert_eq!(final_match.team_a, first.team_b);
    assert_eq!(final_match.team_b, second.team_a);
    assert_eq!(t.stage, Stage::Tournament);
    assert!(t.champion.is_none());

    declare_winner(&mut t, final_match.id, Side::A).unwrap();
    assert_eq!(t.stage, Stage::Champion);
    assert_eq!(t.champion, first.team_b.team());
    assert_eq!(t.champion_team().map(|c| c.id), first.team_b.team());
}

#[test]
fn declaring_twice_is_rejected_without_change() {
    let mut t = tournament_with_teams(4);
    start_knockout(&mut t).unwrap();
    let first = at(&t, 0, 0);
    declare_winner(&mut t, first.id, Side::A).unwrap();
    let before = t.matches.clone();

    assert_eq!(
        declare_winner(&mut t, first.id, Side::B),
        Err(TournamentError::MatchAlreadyDecided(first.id))
    );
    assert_eq!(t.matches, before);
}

#[test]
fn declaring_an_empty_slot_is_rejected() {
    let mut t = tournament_with_teams(4);
    start_knockout(&mut t).unwrap();
    let final_match = at(&t, 1, 0);
    let before = t.matches.clone();
    assert_eq!(
        declare_winner(&mut t, final_match.id, Side::A),
        Err(TournamentError::EmptySlot(final_match.id))
    );
    assert_eq!(t.matches, before);
}

#[test]
fn declaring_by_team_checks_membership() {
    let mut t = tournament_with_teams(4);
    start_knockout(&mut t).unwrap();
    let first = at(&t, 0, 0);
    let outsider = at(&t, 0, 1).team_a.team().unwrap();
    assert_eq!(
        declare_winner_team(&mut t, first.id, outsider),
        Err(TournamentError::TeamNotInMatch(outsider))
    );

    let winner = first.team_b.team().unwrap();
    declare_winner_team(&mut t, first.id, winner).unwrap();
    assert_eq!(at(&t, 1, 0).team_a, Slot::Team(winner));

    let unknown = Uuid::new_v4();
    assert_eq!(
        declare_winner(&mut t, unknown, Side::A),
        Err(TournamentError::MatchNotFound(unknown))
    );
}

#[test]
fn winner_opposite_a_bye_keeps_advancing() {
    let mut t = tournament_with_teams(6);
    start_knockout(&mut t).unwrap();
    assert_eq!(t.matches.len(), 7);

    let third = at(&t, 0, 2);
    declare_winner(&mut t, third.id, Side::A).unwrap();
    let winner = third.team_a.team().unwrap();

    let waiting = at(&t, 1, 1);
    assert_eq!((waiting.team_a, waiting.team_b), (Slot::Team(winner), Slot::Bye));
    assert_eq!(waiting.winner, Some(winner));
    assert_eq!(at(&t, 2, 0).team_b, Slot::Team(winner));
    assert_eq!(t.stage, Stage::Tournament);
}

#[test]
fn five_team_bracket_can_be_played_to_a_champion() {
    let mut t = tournament_with_teams(5);
    start_knockout(&mut t).unwrap();
    let bye_team = at(&t, 0, 2).team_a.team().unwrap();

    for (round, index, side) in [(0, 0, Side::A), (0, 1, Side::A), (1, 0, Side::B)] {
        let id = at(&t, round, index).id;
        declare_winner(&mut t, id, side).unwrap();
    }
    let final_match = at(&t, 2, 0);
    assert_eq!(final_match.team_b, Slot::Team(bye_team));

    declare_winner(&mut t, final_match.id, Side::B).unwrap();
    assert_eq!(t.stage, Stage::Champion);
    assert_eq!(t.champion, Some(bye_team));
}

#[test]
fn group_stage_requires_every_match_finished() {
    let mut t = tournament_with_teams(4);
    let mut rng = StdRng::seed_from_u64(4);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    assert_eq!(t.stage, Stage::Groups);
    assert_eq!(t.groups.len(), 2);

    assert_eq!(
        finish_group_stage(&mut t),
        Err(TournamentError::IncompleteGroupStage { unfinished: 2 })
    );
    assert_eq!(t.stage, Stage::Groups);
    assert!(t.matches.is_empty());
}

#[test]
fn group_winners_seed_the_bracket() {
    let mut t = tournament_with_teams(4);
    let mut rng = StdRng::seed_from_u64(5);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    finish_all_groups(&mut t);

    let winners: Vec<TeamId> = t
        .groups
        .iter()
        .map(|g| calculate_group_standings(g)[0].team)
        .collect();
    assert_eq!(winners[0], t.groups[0].matches[0].team_a);

    finish_group_stage(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Tournament);
    assert_eq!(t.matches.len(), 1);
    let final_match = &t.matches[0];
    assert_eq!(final_match.team_a, Slot::Team(winners[0]));
    assert_eq!(final_match.team_b, Slot::Team(winners[1]));

    let final_id = final_match.id;
    declare_winner(&mut t, final_id, Side::B).unwrap();
    assert_eq!(t.champion, Some(winners[1]));
    assert_eq!(t.stage, Stage::Champion);
}

#[test]
fn single_group_crowns_its_leader_directly() {
    let mut t = tournament_with_teams(3);
    let mut rng = StdRng::seed_from_u64(6);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    assert_eq!(t.groups.len(), 1);
    assert_eq!(t.groups[0].matches.len(), 3);
    finish_all_groups(&mut t);

    let leader = calculate_group_standings(&t.groups[0])[0].team;
    finish_group_stage(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Champion);
    assert_eq!(t.champion, Some(leader));
    assert!(t.matches.is_empty());
}

#[test]
fn score_updates_do_not_touch_the_bracket() {
    let mut t = tournament_with_teams(4);
    let mut rng = StdRng::seed_from_u64(7);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    finish_all_groups(&mut t);
    finish_group_stage(&mut t).unwrap();
    let bracket = t.matches.clone();

    let group_id = t.groups[0].id.clone();
    let match_id = t.groups[0].matches[0].id;
    update_group_match(&mut t, &group_id, match_id, 0, 21, true).unwrap();
    assert_eq!(t.groups[0].matches[0].score_b, 21);
    assert_eq!(t.matches, bracket);
}

#[test]
fn score_updates_validate_targets() {
    let mut t = tournament_with_teams(4);
    let unknown = Uuid::new_v4();
    assert_eq!(
        update_group_match(&mut t, "A", unknown, 1, 2, true),
        Err(TournamentError::InvalidState)
    );

    let mut rng = StdRng::seed_from_u64(8);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    assert_eq!(
        update_group_match(&mut t, "Z", unknown, 1, 2, true),
        Err(TournamentError::GroupNotFound("Z".to_string()))
    );
    assert_eq!(
        update_group_match(&mut t, "A", unknown, 1, 2, true),
        Err(TournamentError::GroupMatchNotFound(unknown))
    );

    let match_id = t.groups[0].matches[0].id;
    update_group_match(&mut t, "A", match_id, 11, 7, true).unwrap();
    update_group_match(&mut t, "A", match_id, 5, 21, true).unwrap();
    let m = &t.groups[0].matches[0];
    assert_eq!((m.score_a, m.score_b, m.finished), (5, 21, true));
}

#[test]
fn stage_guards_reject_out_of_order_calls() {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(start_knockout(&mut t), Err(TournamentError::InvalidState));
    assert_eq!(
        start_group_stage(&mut t, 3, &mut rng),
        Err(TournamentError::InvalidState)
    );
    assert_eq!(finish_group_stage(&mut t), Err(TournamentError::InvalidState));

    let mut t = tournament_with_teams(4);
    assert_eq!(
        start_group_stage(&mut t, 1, &mut rng),
        Err(TournamentError::InvalidGroupSize(1))
    );
    assert_eq!(finish_group_stage(&mut t), Err(TournamentError::InvalidState));
    start_knockout(&mut t).unwrap();
    assert_eq!(start_knockout(&mut t), Err(TournamentError::InvalidState));
    assert_eq!(
        create_teams(&mut t, &names("a", 2), &names("b", 2), &mut rng),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn step_back_unwinds_one_stage() {
    let mut t = tournament_with_teams(4);
    let mut rng = StdRng::seed_from_u64(10);
    start_group_stage(&mut t, 3, &mut rng).unwrap();

    step_back(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Teams);
    assert!(t.groups.is_empty());
    assert_eq!(t.teams.len(), 4);

    step_back(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Input);
    assert!(t.teams.is_empty());

    assert_eq!(step_back(&mut t), Err(TournamentError::InvalidState));
}

#[test]
fn reset_needs_confirmation_and_clears_everything() {
    let mut t = tournament_with_teams(4);
    let id = t.id;
    start_knockout(&mut t).unwrap();
    let first = at(&t, 0, 0);
    declare_winner(&mut t, first.id, Side::A).unwrap();

    assert_eq!(reset_all(&mut t, false), Err(TournamentError::ResetNotConfirmed));
    assert_eq!(t.stage, Stage::Tournament);
    assert_eq!(t.matches.len(), 3);

    reset_all(&mut t, true).unwrap();
    assert_eq!(t.stage, Stage::Input);
    assert!(t.teams.is_empty());
    assert!(t.groups.is_empty());
    assert!(t.matches.is_empty());
    assert!(t.champion.is_none());
    assert_eq!(t.id, id);
}

#[test]
fn unfinishing_a_fixture_drops_it_from_standings_and_reopens_the_stage() {
    let mut t = tournament_with_teams(4);
    let mut rng = StdRng::seed_from_u64(11);
    start_group_stage(&mut t, 3, &mut rng).unwrap();
    finish_all_groups(&mut t);

    let group_id = t.groups[0].id.clone();
    let match_id = t.groups[0].matches[0].id;
    update_group_match(&mut t, &group_id, match_id, 21, 10, false).unwrap();

    assert!(!t.groups[0].matches[0].finished);
    assert!(calculate_group_standings(&t.groups[0])
        .iter()
        .all(|s| s.played == 0 && s.won == 0 && s.points_for == 0));
    assert_eq!(
        finish_group_stage(&mut t),
        Err(TournamentError::IncompleteGroupStage { unfinished: 1 })
    );
    assert_eq!(t.stage, Stage::Groups);

    update_group_match(&mut t, &group_id, match_id, 21, 10, true).unwrap();
    finish_group_stage(&mut t).unwrap();
    assert_eq!(t.stage, Stage::Tournament);
}
