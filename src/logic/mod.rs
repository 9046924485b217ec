//! Tournament business logic: pairing, groups, standings, bracket, and stage transitions.

mod bracket;
mod group_stage;
mod groups;
mod knockout;
mod pairing;
mod setup;
mod standings;

pub use bracket::{bracket_size, generate_bracket};
pub use group_stage::{finish_group_stage, group_winners, start_group_stage, update_group_match};
pub use groups::{generate_groups, group_label, round_robin, DEFAULT_MAX_PER_GROUP};
pub use knockout::{declare_winner, declare_winner_team, start_knockout};
pub use pairing::generate_teams;
pub use setup::{create_teams, reset_all, step_back};
pub use standings::{calculate_group_standings, group_winner};
