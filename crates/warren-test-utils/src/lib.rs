//! Reusable agent and display fixtures for testing Warren.
//!
//! Scheduler and replay tests all need the same cast: agents that follow
//! a script, stall past a deadline, fail, or panic on cue, plus a no-op
//! display. They live here so every crate tests against identical
//! behavior.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;
pub mod layouts;

pub use fixtures::{
    BlockingAgent, FailingAgent, FailingHook, NullDisplay, PanickingAgent, ProbeAgent,
    RandomAdversary, ScriptedAgent,
};
