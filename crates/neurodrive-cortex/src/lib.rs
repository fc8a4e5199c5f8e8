// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neurodrive-cortex
//!
//! Client for the Emotiv Cortex service: JSON-RPC wire types, the session
//! handshake sequencer, a listener interface with one method per event kind,
//! and the live mental-command session that feeds samples to a handler.
//!
//! ```rust,no_run
//! use std::sync::atomic::AtomicBool;
//! use std::time::Duration;
//! use neurodrive_cortex::{
//!     ConnectionOptions, CortexClient, CortexConnection, CortexSession, LiveSession,
//!     MentalCommandHandler, MentalCommandSample, SessionCredentials, SessionInit,
//! };
//!
//! struct Print;
//! impl MentalCommandHandler for Print {
//!     type Error = std::convert::Infallible;
//!     fn handle_sample(&mut self, sample: &MentalCommandSample) -> Result<(), Self::Error> {
//!         println!("{} {}", sample.action, sample.power);
//!         Ok(())
//!     }
//! }
//!
//! let connection = CortexConnection::connect(&ConnectionOptions {
//!     url: "wss://localhost:6868".to_string(),
//!     accept_invalid_certs: true,
//!     read_timeout: Duration::from_millis(200),
//! })?;
//! let session = CortexSession::new(SessionInit {
//!     credentials: SessionCredentials {
//!         client_id: "id".into(),
//!         client_secret: "secret".into(),
//!         license: None,
//!         debit: 10,
//!     },
//!     wanted_headset: None,
//!     wanted_profile: "alice".into(),
//! });
//! let mut live = LiveSession::new("alice", vec![7, 7, 5, 5], Print)?;
//! CortexClient::new(connection, session).run(&mut live, &AtomicBool::new(false))?;
//! # Ok::<(), neurodrive_cortex::CortexError>(())
//! ```

pub mod client;
pub mod codes;
pub mod data;
mod error;
pub mod listener;
pub mod live;
pub mod rpc;
pub mod session;
pub mod transport;

pub use client::CortexClient;
pub use data::{MentalCommandSample, ProfileAction, SensitivityReply};
pub use error::{CortexError, Result};
pub use listener::{dispatch, CortexListener, Requests};
pub use live::{LiveSession, MentalCommandHandler, MENTAL_COMMAND_STREAM};
pub use rpc::{IncomingMessage, Method, RpcErrorObject, RpcRequest};
pub use session::{
    CortexEvent, CortexSession, SessionAction, SessionCredentials, SessionInit, SessionPhase,
};
pub use transport::{ConnectionOptions, CortexConnection, CortexTransport};
