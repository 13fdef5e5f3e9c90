use crate::types::{Participant, Prize};
use crate::{RaffleError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-memory store for the configured participants and prizes.
///
/// The roster is mutable only before a draw starts; `DrawSession::start`
/// takes owned clones of both lists, so edits made here never reach a
/// session already in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
    prizes: Vec<Prize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn add_participant(&mut self, name: impl Into<String>) -> &Participant {
        self.participants.push(Participant::new(name));
        self.participants.last().unwrap()
    }

    pub fn rename_participant(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RaffleError::ParticipantNotFound(id))?;
        participant.name = name.into();
        Ok(())
    }

    pub fn remove_participant(&mut self, id: Uuid) -> Result<()> {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        if self.participants.len() == before {
            return Err(RaffleError::ParticipantNotFound(id));
        }
        Ok(())
    }

    /// Replace the whole roster with `n` placeholder-named participants.
    pub fn bulk_generate(&mut self, n: usize) {
        self.participants = (1..=n)
            .map(|i| Participant::new(format!("Participant {}", i)))
            .collect();
        tracing::info!("roster replaced with {} generated participants", n);
    }

    pub fn add_prize(&mut self, name: impl Into<String>, count: u32) -> &Prize {
        self.prizes.push(Prize::new(name, count));
        self.prizes.last().unwrap()
    }

    pub fn rename_prize(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        let prize = self.prize_mut(id)?;
        prize.name = name.into();
        Ok(())
    }

    pub fn set_prize_count(&mut self, id: Uuid, count: u32) -> Result<()> {
        let prize = self.prize_mut(id)?;
        prize.count = count;
        Ok(())
    }

    pub fn remove_prize(&mut self, id: Uuid) -> Result<()> {
        let before = self.prizes.len();
        self.prizes.retain(|p| p.id != id);
        if self.prizes.len() == before {
            return Err(RaffleError::PrizeNotFound(id));
        }
        Ok(())
    }

    fn prize_mut(&mut self, id: Uuid) -> Result<&mut Prize> {
        self.prizes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RaffleError::PrizeNotFound(id))
    }
}
