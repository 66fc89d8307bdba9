//! Matching primitives and resolution value types.

pub mod extractor;
pub mod matcher;
pub mod mentions;
pub mod model;
pub mod normalize;
