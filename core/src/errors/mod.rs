//! Domain-specific error types.
//!
//! Verification has no error type: it answers with a plain `bool`. Only
//! issuing a code can fail.

use thiserror::Error;

/// Failures of `OtpService::send_otp`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Identifier must not be empty")]
    EmptyIdentifier,

    #[error("Failed to store one-time code: {message}")]
    Storage { message: String },

    /// Delivery failed after the code was committed to the store.
    /// `entry_retained` tells whether the code can still be verified.
    #[error("Failed to deliver one-time code: {message}")]
    Delivery {
        message: String,
        entry_retained: bool,
    },
}

impl SendError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            SendError::EmptyIdentifier => "EMPTY_IDENTIFIER",
            SendError::Storage { .. } => "OTP_STORAGE_FAILED",
            SendError::Delivery { .. } => "OTP_DELIVERY_FAILED",
        }
    }
}

pub type SendResult<T> = Result<T, SendError>;
