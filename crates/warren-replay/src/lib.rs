//! Deterministic replay and verification for Warren games.
//!
//! A finished game reduces to a [`GameRecord`]: the originating layout
//! text plus the ordered `(agent_index, action)` pairs the scheduler
//! applied. Re-running the rules engine over that record from the same
//! initial snapshot must reproduce the identical final score, terminal
//! flags, and structural hash — [`verify`] checks exactly that and
//! reports the first divergence.
//!
//! Records are in-memory values; serializing them to disk is a hosting
//! concern, not a replay concern.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod record;
pub mod replay;

pub use error::ReplayError;
pub use record::{GameRecord, ReplaySummary};
pub use replay::{replay, replay_observed, verify};
