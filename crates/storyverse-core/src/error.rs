//! Domain error types.

use thiserror::Error;

/// Top-level error raised by catalog stores and downstream collaborators.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// A downstream collaborator (neighbor suggestion, narrative synthesis)
    /// failed.
    #[error("{service} failed: {message}")]
    Collaborator {
        /// The collaborator that failed.
        service: &'static str,
        /// Internal failure detail. Never shown to untrusted callers.
        message: String,
    },
}
