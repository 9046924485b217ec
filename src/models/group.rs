//! Group stage: groups, round-robin fixtures and derived standings.

use crate::models::participant::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Letter label of a group ("A", "B", ...).
pub type GroupId = String;

/// Unique identifier for a group fixture.
pub type GroupMatchId = Uuid;

/// One round-robin fixture between two distinct teams of the same group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupMatch {
    pub id: GroupMatchId,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub score_a: u32,
    pub score_b: u32,
    pub finished: bool,
}

impl GroupMatch {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a,
            team_b,
            score_a: 0,
            score_b: 0,
            finished: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Display name, e.g. "Group A".
    pub name: String,
    /// Teams in placement order (2 or 3 for a well-formed group).
    pub teams: Vec<TeamId>,
    pub matches: Vec<GroupMatch>,
}

impl Group {
    pub fn unfinished_matches(&self) -> usize {
        self.matches.iter().filter(|m| !m.finished).count()
    }

    pub fn get_match_mut(&mut self, id: GroupMatchId) -> Option<&mut GroupMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}

/// Derived standing of one team within a group. Recomputed on demand, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team: TeamId,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_diff: i64,
}

impl GroupStanding {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            ..Self::default()
        }
    }

    /// Account for one finished fixture from this team's point of view.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.points_for = self.points_for.saturating_add(u64::from(scored));
        self.points_against = self.points_against.saturating_add(u64::from(conceded));
        let diff = i128::from(self.points_for) - i128::from(self.points_against);
        self.point_diff = diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        if scored > conceded {
            self.won = self.won.saturating_add(1);
        } else if scored < conceded {
            self.lost = self.lost.saturating_add(1);
        }
    }
}
