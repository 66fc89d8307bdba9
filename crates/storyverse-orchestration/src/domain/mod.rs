//! Orchestration value types.

pub mod failure;
pub mod outcome;
pub mod policy;
