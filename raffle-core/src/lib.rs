//! raffle-core - engine for sequential prize draws
//!
//! This library holds the roster configuration store and the draw-session
//! state machine that assigns winners to prizes without replacement across a
//! whole session. Presentation layers (the `raffle` CLI here) only configure
//! a roster, start a session, and render its observable state.

pub mod error;
pub mod roster;
pub mod session;
pub mod store;
pub mod types;

pub use error::{RaffleError, Result};
pub use roster::Roster;
pub use session::{DrawSession, DrawTiming, Phase, SessionView};
pub use store::RosterFile;
pub use types::{Participant, Prize, Winner};
