//! Mixed doubles tournament organizer: library with models and business logic.

pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    bracket_size, calculate_group_standings, create_teams, declare_winner, declare_winner_team,
    finish_group_stage, generate_bracket, generate_groups, generate_teams, group_label,
    group_winner, group_winners, reset_all, round_robin, start_group_stage, start_knockout,
    step_back, update_group_match, DEFAULT_MAX_PER_GROUP,
};
pub use models::{
    Category, Group, GroupId, GroupMatch, GroupMatchId, GroupStanding, Match, MatchId,
    Participant, ParticipantId, Side, Slot, Stage, Team, TeamId, Tournament, TournamentError,
    TournamentId,
};
pub use roster::{parse_name_list, parse_roster_csv, Roster};
