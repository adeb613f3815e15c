//! Copy-on-write game snapshots and external contracts for Warren.
//!
//! The central type is [`GameState`], one immutable instant of the whole
//! game world. Transitions never mutate a published snapshot: the rules
//! engine builds a successor with [`GameState::successor_base`], edits it
//! while it is still privately owned, and publishes the finished value.
//! Unchanged substructures (the layout, the food grid until a pellet is
//! eaten) are shared behind `Arc`, so holding generations of snapshots —
//! as search and learning agents do — stays cheap.
//!
//! The crate also defines the two contracts the engine calls out through:
//! [`Agent`] (decision-makers) and [`GameDisplay`] (renderers).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod agent_state;
pub mod configuration;
pub mod state;

pub use agent::{Agent, GameDisplay};
pub use agent_state::AgentState;
pub use configuration::Configuration;
pub use state::{GameState, GameStateData};
