//! Event listener interface for Cortex sessions.
//!
//! One method per [`CortexEvent`] kind. Handlers queue follow-up requests on
//! the [`Requests`] handle; the driver sends them once the handler returns.

use crate::data::{MentalCommandSample, ProfileAction, SensitivityReply, SubscribeReply};
use crate::error::Result;
use crate::rpc::{Method, RpcErrorObject, RpcRequest};
use crate::session::{CortexEvent, CortexSession};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Request queue handed to listener methods
pub struct Requests<'a> {
    session: &'a mut CortexSession,
    outbox: Vec<RpcRequest>,
}

impl<'a> Requests<'a> {
    pub fn new(session: &'a mut CortexSession) -> Self {
        Self {
            session,
            outbox: Vec::new(),
        }
    }

    pub fn session(&self) -> &CortexSession {
        self.session
    }

    pub fn into_outbox(self) -> Vec<RpcRequest> {
        self.outbox
    }

    pub fn query_profile(&mut self) -> Result<()> {
        let request = self.session.query_profile()?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn get_current_profile(&mut self) -> Result<()> {
        let request = self.session.get_current_profile()?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn setup_profile(&mut self, profile: &str, action: ProfileAction) -> Result<()> {
        let request = self.session.setup_profile(profile, action)?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn get_active_actions(&mut self, profile: &str) -> Result<()> {
        let request = self.session.get_active_actions(profile)?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn get_sensitivity(&mut self, profile: &str) -> Result<()> {
        let request = self.session.get_sensitivity(profile)?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn set_sensitivity(&mut self, profile: &str, values: &[u32]) -> Result<()> {
        let request = self.session.set_sensitivity(profile, values)?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn subscribe(&mut self, streams: &[&str]) -> Result<()> {
        let request = self.session.subscribe(streams)?;
        self.outbox.push(request);
        Ok(())
    }

    pub fn disconnect_headset(&mut self) -> Result<()> {
        let request = self.session.disconnect_headset()?;
        self.outbox.push(request);
        Ok(())
    }
}

/// Observer of a Cortex session. Defaults only log.
pub trait CortexListener {
    fn on_create_session_done(&mut self, session_id: &str, _requests: &mut Requests<'_>) {
        info!("[CORTEX] on_create_session_done: {}", session_id);
    }

    fn on_query_profile_done(&mut self, profiles: &[String], _requests: &mut Requests<'_>) {
        info!("[CORTEX] on_query_profile_done: {:?}", profiles);
    }

    fn on_load_unload_profile_done(&mut self, is_loaded: bool, _requests: &mut Requests<'_>) {
        info!("[CORTEX] on_load_unload_profile_done: {}", is_loaded);
    }

    fn on_save_profile_done(&mut self, profile: &str, _requests: &mut Requests<'_>) {
        info!("[CORTEX] Save profile {} successfully", profile);
    }

    fn on_new_com_data(&mut self, sample: &MentalCommandSample, _requests: &mut Requests<'_>) {
        debug!("[CORTEX] {:?}", sample);
    }

    fn on_get_mc_active_action_done(&mut self, actions: &[String], _requests: &mut Requests<'_>) {
        info!("[CORTEX] on_get_mc_active_action_done: {:?}", actions);
    }

    fn on_mc_action_sensitivity_done(
        &mut self,
        reply: &SensitivityReply,
        _requests: &mut Requests<'_>,
    ) {
        info!("[CORTEX] on_mc_action_sensitivity_done: {:?}", reply);
    }

    fn on_subscribe_done(&mut self, reply: &SubscribeReply, _requests: &mut Requests<'_>) {
        let streams: Vec<&str> = reply.success.iter().map(|s| s.stream_name.as_str()).collect();
        info!("[CORTEX] Subscribed to {:?}", streams);
    }

    fn on_inform_error(
        &mut self,
        method: Option<Method>,
        error: &RpcErrorObject,
        _requests: &mut Requests<'_>,
    ) {
        warn!("[CORTEX] {:?} error {}: {}", method, error.code, error.message);
    }

    fn on_warning(&mut self, code: i64, message: &Value, _requests: &mut Requests<'_>) {
        debug!("[CORTEX] warning {}: {}", code, message);
    }
}

/// Route one event to the matching listener method
pub fn dispatch<L: CortexListener + ?Sized>(
    listener: &mut L,
    event: &CortexEvent,
    requests: &mut Requests<'_>,
) {
    match event {
        CortexEvent::CreateSessionDone { session_id } => {
            listener.on_create_session_done(session_id, requests)
        }
        CortexEvent::QueryProfileDone { profiles } => {
            listener.on_query_profile_done(profiles, requests)
        }
        CortexEvent::LoadUnloadProfileDone { is_loaded } => {
            listener.on_load_unload_profile_done(*is_loaded, requests)
        }
        CortexEvent::SaveProfileDone { profile } => listener.on_save_profile_done(profile, requests),
        CortexEvent::NewComData(sample) => listener.on_new_com_data(sample, requests),
        CortexEvent::ActiveActionsDone { actions } => {
            listener.on_get_mc_active_action_done(actions, requests)
        }
        CortexEvent::SensitivityDone(reply) => {
            listener.on_mc_action_sensitivity_done(reply, requests)
        }
        CortexEvent::SubscribeDone(reply) => listener.on_subscribe_done(reply, requests),
        CortexEvent::InformError { method, error } => {
            listener.on_inform_error(*method, error, requests)
        }
        CortexEvent::Warning { code, message } => listener.on_warning(*code, message, requests),
    }
}
