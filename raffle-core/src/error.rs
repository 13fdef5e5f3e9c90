use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, RaffleError>;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("No participants in the roster")]
    EmptyRoster,

    #[error("No prizes configured")]
    NoPrizes,

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(Uuid),

    #[error("Prize not found: {0}")]
    PrizeNotFound(Uuid),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RaffleError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
