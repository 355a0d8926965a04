//! Application handlers.
//!
//! Command handlers that orchestrate the dialogue pipeline over the ports.

mod process_turn;
mod start_session;
mod turn_locks;

pub use process_turn::{
    ProcessTurnCommand, ProcessTurnConfig, ProcessTurnError, ProcessTurnHandler, ProcessTurnResult,
};
pub use start_session::{
    StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult,
};
pub use turn_locks::{TurnGuard, TurnLocks};
