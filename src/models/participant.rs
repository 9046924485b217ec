//! Participant and Team data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant.
pub type ParticipantId = Uuid;

/// Unique identifier for a team (used in fixtures, bracket slots and lookups).
pub type TeamId = Uuid;

/// Which registration list a participant came from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    A,
    B,
    /// Overflow pairing: the category plays no role for this member.
    Unspecified,
}

/// A registered participant. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub category: Category,
}

impl Participant {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
        }
    }
}

/// A team of one or two participants. Created once by pairing, never mutated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// 1 member for a solo team, otherwise 2.
    pub members: Vec<Participant>,
    /// "Ann & Bob", or "Ann (Solo)".
    pub name: String,
}

impl Team {
    pub fn pair(first: Participant, second: Participant) -> Self {
        let name = format!("{} & {}", first.name, second.name);
        Self {
            id: Uuid::new_v4(),
            members: vec![first, second],
            name,
        }
    }

    pub fn solo(member: Participant) -> Self {
        let name = format!("{} (Solo)", member.name);
        Self {
            id: Uuid::new_v4(),
            members: vec![member],
            name,
        }
    }

    pub fn is_solo(&self) -> bool {
        self.members.len() == 1
    }
}
