//! Rules engine and turn scheduler for the Warren maze-chase simulator.
//!
//! Two layers live here:
//!
//! - [`rules`] — the authoritative state machine: legality, action
//!   application, eating, collisions, scoring, and termination. Pure
//!   snapshot-in/snapshot-out; it knows nothing about agents or time.
//! - [`Game`] — the turn loop: solicits actions from agents in rotation
//!   under time budgets, polices agent failures, advances the snapshot
//!   through the rules, and records the move history for replay.
//!
//! Agent calls can be bounded by a deadline ([`timebox`]): the call runs
//! on a worker thread holding that agent's lock, and a missed deadline
//! abandons the call — its result is never applied to the authoritative
//! state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod game;
pub mod rules;
pub mod timebox;

pub use config::{ConfigError, CrashPolicy, ScheduleConfig};
pub use game::{Game, GameOutcome, GameResult, GameStatus};
pub use rules::ClassicRules;
pub use timebox::CallOutcome;
