//! Built-in collaborators that work without any generative backend.

pub mod navigator;
pub mod storyteller;
