//! Data structures for the tournament: participants, teams, groups, bracket and tournament state.

mod bracket;
mod group;
mod participant;
mod tournament;

pub use bracket::{Match, MatchId, Side, Slot};
pub use group::{Group, GroupId, GroupMatch, GroupMatchId, GroupStanding};
pub use participant::{Category, Participant, ParticipantId, Team, TeamId};
pub use tournament::{Stage, Tournament, TournamentError, TournamentId};
