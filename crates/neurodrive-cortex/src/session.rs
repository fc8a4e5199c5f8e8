//! Runtime-agnostic Cortex session sequencer.
//!
//! Pure, deterministic orchestration of the Cortex handshake:
//! request access, authorize, find and connect a headset, create a session.
//! Once the session is active it builds the profile, mental-command and
//! subscription requests and turns their results into [`CortexEvent`]s.
//!
//! Design constraints:
//! - No sleeps, no threads, no I/O
//! - The driver feeds every decoded [`IncomingMessage`] to [`CortexSession::handle`]
//!   and executes the returned [`SessionAction`]s in order

use crate::codes;
use crate::data::{
    CurrentProfile, HeadsetInfo, HeadsetStatus, MentalCommandSample, ProfileAction, ProfileInfo,
    SensitivityReply, SetupProfileReply, SubscribeReply,
};
use crate::error::{CortexError, Result};
use crate::rpc::{IncomingMessage, Method, RpcErrorObject, RpcRequest, StreamRecord};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// `None` uses the license attached to the account
    pub license: Option<String>,
    pub debit: u32,
}

#[derive(Debug, Clone)]
pub struct SessionInit {
    pub credentials: SessionCredentials,
    /// `None` picks the first headset the service reports
    pub wanted_headset: Option<String>,
    pub wanted_profile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    RequestingAccess,
    /// The user has not yet approved this application in the Emotiv Launcher
    AwaitingAccessGrant,
    Authorizing,
    QueryingHeadsets,
    /// Waiting for the service to finish a headset scan
    AwaitingHeadsetScan,
    ConnectingHeadset,
    CreatingSession,
    Active,
    Closed,
    Failed,
}

/// Notifications for the application layer, one variant per event kind
#[derive(Debug, Clone, PartialEq)]
pub enum CortexEvent {
    CreateSessionDone {
        session_id: String,
    },
    QueryProfileDone {
        profiles: Vec<String>,
    },
    LoadUnloadProfileDone {
        is_loaded: bool,
    },
    SaveProfileDone {
        profile: String,
    },
    NewComData(MentalCommandSample),
    ActiveActionsDone {
        actions: Vec<String>,
    },
    SensitivityDone(SensitivityReply),
    SubscribeDone(SubscribeReply),
    InformError {
        method: Option<Method>,
        error: RpcErrorObject,
    },
    Warning {
        code: i64,
        message: Value,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Send(RpcRequest),
    Emit(CortexEvent),
}

#[derive(Debug, Clone)]
pub struct CortexSession {
    init: SessionInit,
    phase: SessionPhase,
    next_request_id: u64,
    pending: HashMap<u64, Method>,
    cortex_token: Option<String>,
    headset_id: Option<String>,
    session_id: Option<String>,
    last_error: Option<String>,
    headset_scanned: bool,
}

impl CortexSession {
    pub fn new(init: SessionInit) -> Self {
        Self {
            init,
            phase: SessionPhase::Idle,
            next_request_id: 1,
            pending: HashMap::new(),
            cortex_token: None,
            headset_id: None,
            session_id: None,
            last_error: None,
            headset_scanned: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn cortex_token(&self) -> Option<&str> {
        self.cortex_token.as_deref()
    }

    pub fn headset_id(&self) -> Option<&str> {
        self.headset_id.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn wanted_profile(&self) -> &str {
        &self.init.wanted_profile
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of requests sent and not yet answered
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Begin the handshake. Returns the initial actions.
    pub fn start(&mut self) -> Vec<SessionAction> {
        self.pending.clear();
        self.cortex_token = None;
        self.headset_id = None;
        self.session_id = None;
        self.last_error = None;
        self.headset_scanned = false;
        self.phase = SessionPhase::RequestingAccess;

        let params = json!({
            "clientId": self.init.credentials.client_id,
            "clientSecret": self.init.credentials.client_secret,
        });
        vec![SessionAction::Send(self.request(Method::RequestAccess, params))]
    }

    /// Advance the session with one message from the service.
    pub fn handle(&mut self, message: IncomingMessage) -> Vec<SessionAction> {
        match message {
            IncomingMessage::Response { id, result } => match self.pending.remove(&id) {
                Some(method) => self.on_response(method, result),
                None => {
                    debug!("[CORTEX] Ignoring response to unknown request id {}", id);
                    Vec::new()
                }
            },
            IncomingMessage::Error { id, error } => {
                let method = id.and_then(|id| self.pending.remove(&id));
                self.on_error(method, error)
            }
            IncomingMessage::Warning { code, message } => self.on_warning(code, message),
            IncomingMessage::Stream(record) => self.on_stream(record),
        }
    }

    fn on_response(&mut self, method: Method, result: Value) -> Vec<SessionAction> {
        match method {
            Method::RequestAccess => {
                let granted = result
                    .get("accessGranted")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if granted {
                    vec![SessionAction::Send(self.authorize_request())]
                } else {
                    let message = result.get("message").and_then(Value::as_str).unwrap_or("");
                    warn!(
                        "[CORTEX] Access not granted yet, approve the application in the Emotiv Launcher: {}",
                        message
                    );
                    self.phase = SessionPhase::AwaitingAccessGrant;
                    Vec::new()
                }
            }
            Method::Authorize => match result.get("cortexToken").and_then(Value::as_str) {
                Some(token) => {
                    info!("[CORTEX] Authorized");
                    self.cortex_token = Some(token.to_string());
                    vec![SessionAction::Send(self.query_headsets_request())]
                }
                None => {
                    self.fail("authorize result without cortexToken");
                    Vec::new()
                }
            },
            Method::QueryHeadsets => match serde_json::from_value::<Vec<HeadsetInfo>>(result) {
                Ok(headsets) => self.on_headsets(headsets),
                Err(e) => {
                    self.fail(&format!("unreadable headset list: {e}"));
                    Vec::new()
                }
            },
            Method::ControlDevice => {
                let command = result.get("command").and_then(Value::as_str).unwrap_or("");
                debug!("[CORTEX] controlDevice {} done: {}", command, result);
                match command {
                    "connect" => self.phase = SessionPhase::ConnectingHeadset,
                    "refresh" => self.phase = SessionPhase::AwaitingHeadsetScan,
                    _ => {}
                }
                Vec::new()
            }
            Method::CreateSession => match result.get("id").and_then(Value::as_str) {
                Some(session_id) => {
                    info!("[CORTEX] Session {} created", session_id);
                    self.session_id = Some(session_id.to_string());
                    self.phase = SessionPhase::Active;
                    vec![SessionAction::Emit(CortexEvent::CreateSessionDone {
                        session_id: session_id.to_string(),
                    })]
                }
                None => {
                    self.fail("createSession result without id");
                    Vec::new()
                }
            },
            Method::QueryProfile => {
                let profiles = serde_json::from_value::<Vec<ProfileInfo>>(result)
                    .map(|list| list.into_iter().map(|p| p.name).collect())
                    .unwrap_or_else(|e| {
                        warn!("[CORTEX] Unreadable profile list: {}", e);
                        Vec::new()
                    });
                vec![SessionAction::Emit(CortexEvent::QueryProfileDone { profiles })]
            }
            Method::GetCurrentProfile => match serde_json::from_value::<CurrentProfile>(result) {
                Ok(current) => self.on_current_profile(current),
                Err(e) => {
                    warn!("[CORTEX] Unreadable current profile: {}", e);
                    Vec::new()
                }
            },
            Method::SetupProfile => match serde_json::from_value::<SetupProfileReply>(result) {
                Ok(reply) => self.on_setup_profile(reply),
                Err(e) => {
                    warn!("[CORTEX] Unreadable setupProfile result: {}", e);
                    Vec::new()
                }
            },
            Method::MentalCommandActiveAction => {
                let actions = serde_json::from_value::<Vec<String>>(result).unwrap_or_else(|e| {
                    warn!("[CORTEX] Unreadable active action list: {}", e);
                    Vec::new()
                });
                vec![SessionAction::Emit(CortexEvent::ActiveActionsDone { actions })]
            }
            Method::MentalCommandActionSensitivity => {
                vec![SessionAction::Emit(CortexEvent::SensitivityDone(
                    SensitivityReply::from_result(result),
                ))]
            }
            Method::Subscribe => {
                let reply = serde_json::from_value::<SubscribeReply>(result).unwrap_or_else(|e| {
                    warn!("[CORTEX] Unreadable subscribe result: {}", e);
                    SubscribeReply::default()
                });
                for failure in &reply.failure {
                    warn!(
                        "[CORTEX] Subscribing {} failed ({}): {}",
                        failure.stream_name, failure.code, failure.message
                    );
                }
                vec![SessionAction::Emit(CortexEvent::SubscribeDone(reply))]
            }
        }
    }

    fn on_headsets(&mut self, headsets: Vec<HeadsetInfo>) -> Vec<SessionAction> {
        let selected = match &self.init.wanted_headset {
            Some(wanted) => headsets.iter().find(|h| &h.id == wanted),
            None => headsets.first(),
        };

        let Some(headset) = selected else {
            return self.refresh_headsets("no headset found after scan");
        };

        let headset_id = headset.id.clone();
        debug!("[CORTEX] Headset {} is {:?}", headset_id, headset.status);
        self.headset_id = Some(headset_id.clone());

        match headset.status {
            HeadsetStatus::Connected => {
                self.phase = SessionPhase::CreatingSession;
                let params = json!({
                    "cortexToken": self.cortex_token,
                    "headset": headset_id,
                    "status": "active",
                });
                vec![SessionAction::Send(self.request(Method::CreateSession, params))]
            }
            HeadsetStatus::Discovered => {
                self.phase = SessionPhase::ConnectingHeadset;
                let params = json!({"command": "connect", "headset": headset_id});
                vec![SessionAction::Send(self.request(Method::ControlDevice, params))]
            }
            HeadsetStatus::Connecting => {
                // HEADSET_CONNECTED re-queries
                self.phase = SessionPhase::ConnectingHeadset;
                Vec::new()
            }
            HeadsetStatus::Unknown => self.refresh_headsets("headset still unusable after scan"),
        }
    }

    /// One scan per handshake; a second miss fails the session.
    fn refresh_headsets(&mut self, failure: &str) -> Vec<SessionAction> {
        if self.headset_scanned {
            self.fail(failure);
            return Vec::new();
        }
        info!("[CORTEX] No matching headset yet, refreshing the headset list");
        self.headset_scanned = true;
        self.phase = SessionPhase::AwaitingHeadsetScan;
        let params = json!({"command": "refresh"});
        vec![SessionAction::Send(self.request(Method::ControlDevice, params))]
    }

    fn on_current_profile(&mut self, current: CurrentProfile) -> Vec<SessionAction> {
        let wanted = self.init.wanted_profile.clone();
        match current.name {
            None => {
                debug!("[CORTEX] No profile loaded, loading {}", wanted);
                self.setup_profile(&wanted, ProfileAction::Load)
                    .map(|r| vec![SessionAction::Send(r)])
                    .unwrap_or_else(|e| self.not_ready(e))
            }
            Some(name) if name != wanted => {
                warn!(
                    "[CORTEX] Profile {} is loaded for headset {}",
                    name,
                    self.headset_id.as_deref().unwrap_or("?")
                );
                Vec::new()
            }
            Some(_) if current.loaded_by_this_app => {
                vec![SessionAction::Emit(CortexEvent::LoadUnloadProfileDone {
                    is_loaded: true,
                })]
            }
            Some(name) => self
                .setup_profile(&name, ProfileAction::Unload)
                .map(|r| vec![SessionAction::Send(r)])
                .unwrap_or_else(|e| self.not_ready(e)),
        }
    }

    fn on_setup_profile(&mut self, reply: SetupProfileReply) -> Vec<SessionAction> {
        match reply.action {
            ProfileAction::Create => {
                if reply.name == self.init.wanted_profile {
                    let name = reply.name;
                    self.setup_profile(&name, ProfileAction::Load)
                        .map(|r| vec![SessionAction::Send(r)])
                        .unwrap_or_else(|e| self.not_ready(e))
                } else {
                    Vec::new()
                }
            }
            ProfileAction::Load => vec![SessionAction::Emit(CortexEvent::LoadUnloadProfileDone {
                is_loaded: true,
            })],
            ProfileAction::Unload => {
                vec![SessionAction::Emit(CortexEvent::LoadUnloadProfileDone {
                    is_loaded: false,
                })]
            }
            ProfileAction::Save => vec![SessionAction::Emit(CortexEvent::SaveProfileDone {
                profile: reply.name,
            })],
        }
    }

    fn on_error(&mut self, method: Option<Method>, error: RpcErrorObject) -> Vec<SessionAction> {
        let handshake = matches!(
            method,
            Some(
                Method::RequestAccess
                    | Method::Authorize
                    | Method::QueryHeadsets
                    | Method::ControlDevice
                    | Method::CreateSession
            )
        );
        if handshake && self.phase != SessionPhase::Active {
            self.fail(&format!(
                "{:?} failed ({}): {}",
                method, error.code, error.message
            ));
        }
        vec![SessionAction::Emit(CortexEvent::InformError { method, error })]
    }

    fn on_warning(&mut self, code: i64, message: Value) -> Vec<SessionAction> {
        debug!("[CORTEX] Warning {}: {}", code, message);
        let mut actions = Vec::new();

        match code {
            codes::ACCESS_RIGHT_GRANTED if self.phase == SessionPhase::AwaitingAccessGrant => {
                actions.push(SessionAction::Send(self.authorize_request()));
            }
            codes::ACCESS_RIGHT_REJECTED if self.phase == SessionPhase::AwaitingAccessGrant => {
                self.fail("access right rejected by the user");
            }
            codes::HEADSET_CONNECTED | codes::HEADSET_SCANNING_FINISHED
                if matches!(
                    self.phase,
                    SessionPhase::ConnectingHeadset | SessionPhase::AwaitingHeadsetScan
                ) =>
            {
                actions.push(SessionAction::Send(self.query_headsets_request()));
            }
            codes::HEADSET_CANNOT_CONNECT_TIMEOUT if self.phase == SessionPhase::ConnectingHeadset => {
                self.fail("headset could not connect before the service timed out");
            }
            codes::CORTEX_CLOSE_SESSION if self.phase == SessionPhase::Active => {
                info!("[CORTEX] Session closed by the service");
                self.phase = SessionPhase::Closed;
            }
            _ => {}
        }

        actions.push(SessionAction::Emit(CortexEvent::Warning { code, message }));
        actions
    }

    fn on_stream(&mut self, record: StreamRecord) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Active {
            return Vec::new();
        }
        match record.mental_command() {
            Some(sample) => vec![SessionAction::Emit(CortexEvent::NewComData(sample))],
            None => {
                debug!("[CORTEX] Ignoring stream record {:?}", record.streams.keys());
                Vec::new()
            }
        }
    }

    fn fail(&mut self, msg: &str) {
        warn!("[CORTEX] Session failed: {}", msg);
        self.phase = SessionPhase::Failed;
        self.last_error = Some(msg.to_string());
    }

    fn not_ready(&mut self, err: CortexError) -> Vec<SessionAction> {
        warn!("[CORTEX] {}", err);
        Vec::new()
    }

    fn request(&mut self, method: Method, params: Value) -> RpcRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.insert(id, method);
        RpcRequest::new(id, method, params)
    }

    fn authorize_request(&mut self) -> RpcRequest {
        self.phase = SessionPhase::Authorizing;
        let credentials = &self.init.credentials;
        let mut params = json!({
            "clientId": credentials.client_id,
            "clientSecret": credentials.client_secret,
            "debit": credentials.debit,
        });
        if let Some(license) = &credentials.license {
            params["license"] = json!(license);
        }
        self.request(Method::Authorize, params)
    }

    fn query_headsets_request(&mut self) -> RpcRequest {
        self.phase = SessionPhase::QueryingHeadsets;
        let params = match &self.init.wanted_headset {
            Some(id) => json!({"id": id}),
            None => json!({}),
        };
        self.request(Method::QueryHeadsets, params)
    }

    fn token(&self) -> Result<String> {
        self.cortex_token
            .clone()
            .ok_or_else(|| CortexError::NotReady("not authorized".to_string()))
    }

    fn headset(&self) -> Result<String> {
        self.headset_id
            .clone()
            .ok_or_else(|| CortexError::NotReady("no headset selected".to_string()))
    }

    pub fn query_profile(&mut self) -> Result<RpcRequest> {
        let params = json!({"cortexToken": self.token()?});
        Ok(self.request(Method::QueryProfile, params))
    }

    pub fn get_current_profile(&mut self) -> Result<RpcRequest> {
        let params = json!({"cortexToken": self.token()?, "headset": self.headset()?});
        Ok(self.request(Method::GetCurrentProfile, params))
    }

    pub fn setup_profile(&mut self, profile: &str, action: ProfileAction) -> Result<RpcRequest> {
        let params = json!({
            "cortexToken": self.token()?,
            "headset": self.headset()?,
            "profile": profile,
            "status": action,
        });
        Ok(self.request(Method::SetupProfile, params))
    }

    pub fn get_active_actions(&mut self, profile: &str) -> Result<RpcRequest> {
        let params = json!({
            "cortexToken": self.token()?,
            "profile": profile,
            "status": "get",
        });
        Ok(self.request(Method::MentalCommandActiveAction, params))
    }

    pub fn get_sensitivity(&mut self, profile: &str) -> Result<RpcRequest> {
        let params = json!({
            "cortexToken": self.token()?,
            "profile": profile,
            "status": "get",
        });
        Ok(self.request(Method::MentalCommandActionSensitivity, params))
    }

    pub fn set_sensitivity(&mut self, profile: &str, values: &[u32]) -> Result<RpcRequest> {
        let params = json!({
            "cortexToken": self.token()?,
            "profile": profile,
            "session": self.session_id,
            "status": "set",
            "values": values,
        });
        Ok(self.request(Method::MentalCommandActionSensitivity, params))
    }

    pub fn subscribe(&mut self, streams: &[&str]) -> Result<RpcRequest> {
        let session = self
            .session_id
            .clone()
            .ok_or_else(|| CortexError::NotReady("no active session".to_string()))?;
        let params = json!({
            "cortexToken": self.token()?,
            "session": session,
            "streams": streams,
        });
        Ok(self.request(Method::Subscribe, params))
    }

    pub fn disconnect_headset(&mut self) -> Result<RpcRequest> {
        let params = json!({"command": "disconnect", "headset": self.headset()?});
        Ok(self.request(Method::ControlDevice, params))
    }
}
