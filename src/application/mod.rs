//! Application layer - Commands and Handlers.
//!
//! Coordinates the pure dialogue pipeline with the session store, schema
//! resolver, text generator and the informational providers.

pub mod handlers;

pub use handlers::{
    ProcessTurnCommand, ProcessTurnConfig, ProcessTurnError, ProcessTurnHandler, ProcessTurnResult,
    StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult, TurnLocks,
};
