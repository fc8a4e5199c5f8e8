//! Live mental-command session.
//!
//! Drives a trained profile from a fresh session to a live `com` stream:
//! query profile → load (or create then load) → active actions →
//! sensitivity get/set → save → subscribe. Every sample then goes to a
//! [`MentalCommandHandler`].

use crate::codes::ERR_PROFILE_ACCESS_DENIED;
use crate::data::{MentalCommandSample, ProfileAction, SensitivityReply};
use crate::error::{CortexError, Result};
use crate::listener::{CortexListener, Requests};
use crate::rpc::{Method, RpcErrorObject};
use std::fmt::Display;
use tracing::{error, info, warn};

/// Stream carrying mental-command samples
pub const MENTAL_COMMAND_STREAM: &str = "com";

/// Consumer of live mental-command samples
pub trait MentalCommandHandler {
    type Error: Display;

    fn handle_sample(&mut self, sample: &MentalCommandSample) -> std::result::Result<(), Self::Error>;
}

pub struct LiveSession<H> {
    profile_name: String,
    sensitivity: Vec<u32>,
    profiles: Vec<String>,
    handler: H,
}

impl<H> LiveSession<H> {
    /// # Errors
    ///
    /// `CortexError::EmptyProfileName` if `profile_name` is empty
    pub fn new(profile_name: impl Into<String>, sensitivity: Vec<u32>, handler: H) -> Result<Self> {
        let profile_name = profile_name.into();
        if profile_name.is_empty() {
            return Err(CortexError::EmptyProfileName);
        }
        Ok(Self {
            profile_name,
            sensitivity,
            profiles: Vec::new(),
            handler,
        })
    }

    /// Empty once the service reports the profile unloaded
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Profiles reported by the last `queryProfile`
    pub fn known_profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

fn queued(result: Result<()>, what: &str) {
    if let Err(e) = result {
        warn!("[LIVE] Could not request {}: {}", what, e);
    }
}

impl<H: MentalCommandHandler> CortexListener for LiveSession<H> {
    fn on_create_session_done(&mut self, session_id: &str, requests: &mut Requests<'_>) {
        info!("[LIVE] on_create_session_done: {}", session_id);
        queued(requests.query_profile(), "profile list");
    }

    fn on_query_profile_done(&mut self, profiles: &[String], requests: &mut Requests<'_>) {
        info!("[LIVE] on_query_profile_done: {:?}", profiles);
        self.profiles = profiles.to_vec();
        if self.profiles.contains(&self.profile_name) {
            queued(requests.get_current_profile(), "current profile");
        } else {
            queued(
                requests.setup_profile(&self.profile_name, ProfileAction::Create),
                "profile creation",
            );
        }
    }

    fn on_load_unload_profile_done(&mut self, is_loaded: bool, requests: &mut Requests<'_>) {
        info!("[LIVE] on_load_unload_profile_done: {}", is_loaded);
        if is_loaded {
            queued(
                requests.get_active_actions(&self.profile_name),
                "active actions",
            );
        } else {
            info!("[LIVE] The profile {} is unloaded", self.profile_name);
            self.profile_name.clear();
        }
    }

    fn on_save_profile_done(&mut self, _profile: &str, requests: &mut Requests<'_>) {
        info!("[LIVE] Save profile {} successfully", self.profile_name);
        queued(
            requests.subscribe(&[MENTAL_COMMAND_STREAM]),
            "mental command subscription",
        );
    }

    fn on_new_com_data(&mut self, sample: &MentalCommandSample, _requests: &mut Requests<'_>) {
        if let Err(e) = self.handler.handle_sample(sample) {
            error!("[LIVE] Handling {:?} failed: {}", sample, e);
        }
    }

    fn on_get_mc_active_action_done(&mut self, actions: &[String], requests: &mut Requests<'_>) {
        info!("[LIVE] on_get_mc_active_action_done: {:?}", actions);
        queued(requests.get_sensitivity(&self.profile_name), "sensitivity");
    }

    fn on_mc_action_sensitivity_done(
        &mut self,
        reply: &SensitivityReply,
        requests: &mut Requests<'_>,
    ) {
        info!("[LIVE] on_mc_action_sensitivity_done: {:?}", reply);
        match reply {
            SensitivityReply::Values(_) => queued(
                requests.set_sensitivity(&self.profile_name, &self.sensitivity),
                "sensitivity update",
            ),
            SensitivityReply::Applied(_) => queued(
                requests.setup_profile(&self.profile_name, ProfileAction::Save),
                "profile save",
            ),
        }
    }

    fn on_inform_error(
        &mut self,
        method: Option<Method>,
        error: &RpcErrorObject,
        requests: &mut Requests<'_>,
    ) {
        warn!("[LIVE] {:?} error {}: {}", method, error.code, error.message);

        if error.code == ERR_PROFILE_ACCESS_DENIED {
            warn!(
                "[LIVE] Get error {}. Disconnect headset to fix this issue for next use.",
                error.message
            );
            queued(requests.disconnect_headset(), "headset disconnect");
        }
    }
}
