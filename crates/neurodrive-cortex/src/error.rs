// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Cortex client

/// Result type alias using CortexError
pub type Result<T> = std::result::Result<T, CortexError>;

/// Error types for the Cortex client
#[derive(Debug, thiserror::Error)]
pub enum CortexError {
    /// Rejected before any connection is made
    #[error("Empty profile name. The profile name cannot be empty.")]
    EmptyProfileName,

    /// WebSocket or TLS setup failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service closed the WebSocket
    #[error("Connection closed by the Cortex service")]
    ConnectionClosed,

    /// Writing a request failed
    #[error("Unable to send request: {0}")]
    SendFailed(String),

    /// Reading from the socket failed
    #[error("Unable to receive: {0}")]
    ReceiveFailed(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON that is not a Cortex message
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// A request was built before the session had what it needs
    #[error("Session not ready: {0}")]
    NotReady(String),

    /// The handshake could not complete
    #[error("Session failed: {0}")]
    SessionFailed(String),
}

impl CortexError {
    /// Check if the error ends the connection (as opposed to one bad message)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CortexError::ConnectionFailed(_)
                | CortexError::ConnectionClosed
                | CortexError::SendFailed(_)
                | CortexError::ReceiveFailed(_)
                | CortexError::SessionFailed(_)
        )
    }
}
