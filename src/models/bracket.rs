//! Knockout match, bracket slots and match sides.

use crate::models::participant::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a knockout match.
pub type MatchId = Uuid;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// Side of the next match fed by the match at `match_index`: even feeds A, odd feeds B.
    pub fn fed_by(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Content of one side of a knockout match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum Slot {
    Team(TeamId),
    /// Nobody will ever arrive here.
    Bye,
    /// Waiting for the winner of the feeding match.
    #[default]
    Pending,
}

impl Slot {
    pub fn team(&self) -> Option<TeamId> {
        match self {
            Slot::Team(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

/// A single-elimination match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 0 = first round, increasing toward the final.
    pub round: usize,
    /// Position within the round.
    pub index: usize,
    pub team_a: Slot,
    pub team_b: Slot,
    /// None until decided (or auto-advanced over a bye).
    pub winner: Option<TeamId>,
    /// None for the final.
    pub next_match_id: Option<MatchId>,
}

impl Match {
    pub fn new(round: usize, index: usize, team_a: Slot, team_b: Slot) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            index,
            team_a,
            team_b,
            winner: None,
            next_match_id: None,
        }
    }

    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    /// Side the given team occupies, if any.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.team_a == Slot::Team(team) {
            Some(Side::A)
        } else if self.team_b == Slot::Team(team) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn is_final(&self) -> bool {
        self.next_match_id.is_none()
    }

    /// Both sides are byes: nobody plays and nobody advances.
    pub fn is_walkover(&self) -> bool {
        self.team_a.is_bye() && self.team_b.is_bye()
    }

    /// The team that advances without playing, when exactly one side is a team facing a bye.
    pub fn bye_winner(&self) -> Option<TeamId> {
        match (self.team_a, self.team_b) {
            (Slot::Team(id), Slot::Bye) | (Slot::Bye, Slot::Team(id)) => Some(id),
            _ => None,
        }
    }
}
