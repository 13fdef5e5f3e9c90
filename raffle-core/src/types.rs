use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person eligible to win prizes in a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A prize tier with a fixed number of winner slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: Uuid,
    pub name: String,
    pub count: u32,
}

impl Prize {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            count,
        }
    }
}

/// A participant/prize pairing produced by a draw session.
///
/// Winners are append-only: once recorded, a pairing never changes, and a
/// participant appears in at most one pairing per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub participant: Participant,
    pub prize: Prize,
}
