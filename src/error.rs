//! Error definitions for response handling.

use thiserror::Error;

/// Errors that can occur while building or sending a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Status code was non-numeric or outside 100..=599.
    #[error("Invalid HTTP response code: {0}")]
    InvalidStatusCode(String),

    /// Writing to the output transport failed.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// A stored header cannot be represented on the platform response.
    #[error("Invalid header: {name}")]
    InvalidHeader { name: String },

    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for response operations.
pub type ResponseResult<T> = Result<T, ResponseError>;
