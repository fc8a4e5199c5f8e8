// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for motion drivers

/// Result type alias using MotionError
pub type Result<T> = std::result::Result<T, MotionError>;

#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    /// Opening the rosbridge WebSocket failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The rosbridge server closed the socket
    #[error("Connection closed by rosbridge")]
    ConnectionClosed,

    /// Writing a frame failed
    #[error("Unable to send: {0}")]
    SendFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
