//! AddressMatch Error Types
//!
//! Centralized error handling for the library and both binaries.

use thiserror::Error;

/// Shown to the user when either address is blank.
pub const BLANK_ADDRESS_MESSAGE: &str = "Please enter both addresses to compare.";

/// Shown to the user for any oracle failure, whatever the cause.
pub const VERIFICATION_FAILED_MESSAGE: &str =
    "Failed to communicate with the verification service.";

/// Central error type for AddressMatch
#[derive(Error, Debug)]
pub enum AddrError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Failed to communicate with the verification service.")]
    VerificationFailed,

    #[error("A verification is already in flight")]
    Busy,

    #[error("Broadcast error: {0}")]
    Broadcast(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AddrError {
    /// The blank-input validation failure
    pub fn blank_address() -> Self {
        AddrError::Validation(BLANK_ADDRESS_MESSAGE.to_string())
    }
}

/// Result type alias for AddressMatch operations
pub type AddrResult<T> = Result<T, AddrError>;
