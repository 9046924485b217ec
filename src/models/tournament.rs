//! Tournament and Stage.

use crate::models::bracket::{Match, MatchId};
use crate::models::group::{Group, GroupId, GroupMatchId};
use crate::models::participant::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 names were supplied.
    NotEnoughParticipants { supplied: usize },
    /// Pairing produced fewer than 2 teams.
    NotEnoughTeams { produced: usize },
    /// Tournament is not in a stage that allows this action.
    InvalidState,
    /// Groups must allow at least 2 teams.
    InvalidGroupSize(usize),
    GroupNotFound(GroupId),
    GroupMatchNotFound(GroupMatchId),
    MatchNotFound(MatchId),
    /// The match already has a winner.
    MatchAlreadyDecided(MatchId),
    /// The chosen side holds no team yet (bye or waiting for a winner).
    EmptySlot(MatchId),
    TeamNotInMatch(TeamId),
    /// Some group fixtures have no final score.
    IncompleteGroupStage { unfinished: usize },
    /// Reset requested without confirmation.
    ResetNotConfirmed,
    /// Roster could not be read.
    Roster(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughParticipants { supplied } => {
                write!(f, "Need at least 2 participants (got {})", supplied)
            }
            TournamentError::NotEnoughTeams { produced } => {
                write!(f, "Need at least 2 teams (pairing produced {})", produced)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::InvalidGroupSize(size) => {
                write!(f, "Groups must hold at least 2 teams (got {})", size)
            }
            TournamentError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            TournamentError::GroupMatchNotFound(_) => write!(f, "Group match not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchAlreadyDecided(_) => write!(f, "Match already has a winner"),
            TournamentError::EmptySlot(_) => write!(f, "No team in that slot yet"),
            TournamentError::TeamNotInMatch(_) => write!(f, "Team does not play in this match"),
            TournamentError::IncompleteGroupStage { unfinished } => {
                write!(f, "{} group match(es) still unfinished", unfinished)
            }
            TournamentError::ResetNotConfirmed => write!(f, "Reset must be confirmed"),
            TournamentError::Roster(msg) => write!(f, "Invalid roster: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<csv::Error> for TournamentError {
    fn from(err: csv::Error) -> Self {
        TournamentError::Roster(err.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting names; nothing generated.
    #[default]
    Input,
    /// Teams paired; choose group stage or direct knockout.
    Teams,
    /// Round-robin groups being played.
    Groups,
    /// Knockout bracket being played.
    Tournament,
    /// Champion decided.
    Champion,
}

/// Full tournament state: the single source of truth for teams, groups and bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
    pub teams: Vec<Team>,
    /// Empty unless a group stage was played.
    pub groups: Vec<Group>,
    /// Knockout bracket, all rounds, round 0 first.
    pub matches: Vec<Match>,
    pub champion: Option<TeamId>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create an empty tournament in the Input stage.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            stage: Stage::Input,
            teams: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            champion: None,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Display name of a team, or "?" for an unknown id.
    pub fn team_name(&self, id: TeamId) -> &str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or("?")
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn get_group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn knockout_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Knockout matches grouped by round, first round first.
    pub fn rounds(&self) -> Vec<Vec<&Match>> {
        let round_count = self.matches.iter().map(|m| m.round + 1).max().unwrap_or(0);
        let mut rounds: Vec<Vec<&Match>> = vec![Vec::new(); round_count];
        for m in &self.matches {
            rounds[m.round].push(m);
        }
        for round in &mut rounds {
            round.sort_by_key(|m| m.index);
        }
        rounds
    }

    pub fn champion_team(&self) -> Option<&Team> {
        self.champion.and_then(|id| self.team(id))
    }

    /// Total group fixtures still waiting for a final score.
    pub fn unfinished_group_matches(&self) -> usize {
        self.groups.iter().map(Group::unfinished_matches).sum()
    }

    /// Drop everything generated and go back to Input. Keeps the id and creation time.
    pub(crate) fn clear(&mut self) {
        self.stage = Stage::Input;
        self.teams.clear();
        self.groups.clear();
        self.matches.clear();
        self.champion = None;
    }
}
