//! Typed views of Cortex request results and stream payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One classified mental-command sample from the `com` stream.
///
/// `power` is the classifier's normalized strength in `[0, 1]`; it is not
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalCommandSample {
    pub action: String,
    pub power: f64,
    pub time: f64,
}

impl MentalCommandSample {
    pub fn new(action: impl Into<String>, power: f64, time: f64) -> Self {
        Self {
            action: action.into(),
            power,
            time,
        }
    }

    /// Decode a `com` payload of the form `["<action>", <power>]`
    pub fn from_com(payload: &Value, time: f64) -> Option<Self> {
        let values = payload.as_array()?;
        let action = values.first()?.as_str()?;
        let power = values.get(1)?.as_f64()?;
        Some(Self::new(action, power, time))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadsetStatus {
    Discovered,
    Connecting,
    Connected,
    #[serde(other)]
    Unknown,
}

/// Entry of a `queryHeadsets` result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeadsetInfo {
    pub id: String,
    pub status: HeadsetStatus,
}

/// Entry of a `queryProfile` result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
}

/// Result of `getCurrentProfile`; `name` is null when nothing is loaded
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentProfile {
    pub name: Option<String>,
    #[serde(default)]
    pub loaded_by_this_app: bool,
}

/// `setupProfile` status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileAction {
    Create,
    Load,
    Unload,
    Save,
}

/// Result of `setupProfile`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetupProfileReply {
    pub action: ProfileAction,
    #[serde(default)]
    pub name: String,
}

/// Result of `mentalCommandActionSensitivity`.
///
/// A `get` returns the list of values; a `set` returns an acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityReply {
    Values(Vec<u32>),
    Applied(Value),
}

impl SensitivityReply {
    pub fn from_result(result: Value) -> Self {
        match result {
            Value::Array(_) => match serde_json::from_value::<Vec<u32>>(result.clone()) {
                Ok(values) => SensitivityReply::Values(values),
                Err(_) => SensitivityReply::Applied(result),
            },
            other => SensitivityReply::Applied(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSubscription {
    pub stream_name: String,
    #[serde(default)]
    pub cols: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFailure {
    pub stream_name: String,
    pub code: i64,
    pub message: String,
}

/// Result of `subscribe`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubscribeReply {
    #[serde(default)]
    pub success: Vec<StreamSubscription>,
    #[serde(default)]
    pub failure: Vec<StreamFailure>,
}
