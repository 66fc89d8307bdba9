//! The orchestrator and the action layer that drives it.

pub mod actions;
pub mod orchestrator;
