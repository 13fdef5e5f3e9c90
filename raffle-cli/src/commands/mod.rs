mod draw;
mod participant;
mod prize;

pub use draw::{handle_draw_command, DrawArgs};
pub use participant::{handle_participant_command, ParticipantCommands};
pub use prize::{handle_prize_command, PrizeCommands};
