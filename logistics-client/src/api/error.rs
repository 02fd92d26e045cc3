//! Remote API error types.

use crate::domain::DomainError;

/// Errors from the remote planner API.
///
/// `Transport` means no response reached the client; `Server` means a
/// response arrived carrying an application-level failure. Views render
/// [`ApiError::user_message`] for either.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("no response received from server: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status or `success: false` envelope
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Request payload failed client-side validation; nothing was sent
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// Response decoded but broke a domain invariant (e.g. a broken route)
    #[error("server returned inconsistent data: {0}")]
    Contract(DomainError),

    /// Client could not be constructed
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ApiError {
    /// Message suitable for showing next to a list or form.
    ///
    /// Server failures show the server's own message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Transport(_) => "No response received from server".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status reported by the server, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
