//! JSON-RPC 2.0 framing used by the Cortex service.
//!
//! Outgoing requests carry a per-connection id. Incoming text frames are one
//! of: a response to a request, an error for a request, an unsolicited
//! warning, or a record from a subscribed data stream.

use crate::data::MentalCommandSample;
use crate::error::{CortexError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cortex API methods used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    RequestAccess,
    Authorize,
    QueryHeadsets,
    ControlDevice,
    CreateSession,
    QueryProfile,
    GetCurrentProfile,
    SetupProfile,
    MentalCommandActiveAction,
    MentalCommandActionSensitivity,
    Subscribe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: Method,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: u64, method: Method, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Error object of a failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Record from a subscribed stream, e.g. `{"com": ["push", 0.85], "sid": "..", "time": 1647525819.02}`
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    pub sid: String,
    pub time: f64,
    /// Stream name to payload, without `sid` and `time`
    pub streams: Map<String, Value>,
}

impl StreamRecord {
    /// Decode the mental-command (`com`) payload, if present
    pub fn mental_command(&self) -> Option<MentalCommandSample> {
        self.streams
            .get("com")
            .and_then(|payload| MentalCommandSample::from_com(payload, self.time))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    Response { id: u64, result: Value },
    Error { id: Option<u64>, error: RpcErrorObject },
    Warning { code: i64, message: Value },
    Stream(StreamRecord),
}

impl IncomingMessage {
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut obj) = value else {
            return Err(CortexError::MalformedMessage(format!(
                "expected a JSON object, got: {}",
                text
            )));
        };

        let id = obj.get("id").and_then(Value::as_u64);

        if let Some(error) = obj.remove("error") {
            let error: RpcErrorObject = serde_json::from_value(error)?;
            return Ok(IncomingMessage::Error { id, error });
        }

        if let Some(result) = obj.remove("result") {
            let id = id.ok_or_else(|| {
                CortexError::MalformedMessage("response without a numeric id".to_string())
            })?;
            return Ok(IncomingMessage::Response { id, result });
        }

        if let Some(warning) = obj.remove("warning") {
            let code = warning
                .get("code")
                .and_then(Value::as_i64)
                .ok_or_else(|| CortexError::MalformedMessage("warning without a code".to_string()))?;
            let message = warning.get("message").cloned().unwrap_or(Value::Null);
            return Ok(IncomingMessage::Warning { code, message });
        }

        if let Some(sid) = obj.remove("sid") {
            let sid = sid.as_str().unwrap_or_default().to_string();
            let time = obj.remove("time").and_then(|t| t.as_f64()).unwrap_or(0.0);
            return Ok(IncomingMessage::Stream(StreamRecord {
                sid,
                time,
                streams: obj,
            }));
        }

        Err(CortexError::MalformedMessage(format!(
            "unrecognized message: {}",
            text
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_camel_case_method() {
        let request = RpcRequest::new(
            7,
            Method::MentalCommandActionSensitivity,
            json!({"status": "get"}),
        );
        let value: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "mentalCommandActionSensitivity",
                "params": {"status": "get"}
            })
        );
    }

    #[test]
    fn parses_response() {
        let msg = IncomingMessage::parse(r#"{"id":3,"jsonrpc":"2.0","result":{"cortexToken":"abc"}}"#)
            .unwrap();
        assert_eq!(
            msg,
            IncomingMessage::Response {
                id: 3,
                result: json!({"cortexToken": "abc"})
            }
        );
    }

    #[test]
    fn parses_error() {
        let msg = IncomingMessage::parse(
            r#"{"id":9,"jsonrpc":"2.0","error":{"code":-32046,"message":"Profile access denied."}}"#,
        )
        .unwrap();
        let IncomingMessage::Error { id, error } = msg else {
            panic!("expected error");
        };
        assert_eq!(id, Some(9));
        assert_eq!(error.code, crate::codes::ERR_PROFILE_ACCESS_DENIED);
    }

    #[test]
    fn parses_warning() {
        let msg = IncomingMessage::parse(
            r#"{"warning":{"code":104,"message":{"headsetId":"INSIGHT-1","behavior":"Headset connected."}}}"#,
        )
        .unwrap();
        assert!(matches!(msg, IncomingMessage::Warning { code: 104, .. }));
    }

    #[test]
    fn parses_com_stream_record() {
        let msg =
            IncomingMessage::parse(r#"{"com":["push",0.85],"sid":"s-1","time":1647525819.0223}"#)
                .unwrap();
        let IncomingMessage::Stream(record) = msg else {
            panic!("expected stream record");
        };
        let sample = record.mental_command().unwrap();
        assert_eq!(sample.action, "push");
        assert_eq!(sample.power, 0.85);
        assert_eq!(sample.time, 1647525819.0223);
    }

    #[test]
    fn non_com_stream_has_no_sample() {
        let msg = IncomingMessage::parse(r#"{"fac":["neutral","smile",0.3],"sid":"s-1","time":1.0}"#)
            .unwrap();
        let IncomingMessage::Stream(record) = msg else {
            panic!("expected stream record");
        };
        assert!(record.mental_command().is_none());
    }

    #[test]
    fn rejects_unrecognized_shapes() {
        assert!(matches!(
            IncomingMessage::parse("[1, 2]"),
            Err(CortexError::MalformedMessage(_))
        ));
        assert!(matches!(
            IncomingMessage::parse(r#"{"hello":"world"}"#),
            Err(CortexError::MalformedMessage(_))
        ));
        assert!(matches!(
            IncomingMessage::parse("not json"),
            Err(CortexError::Json(_))
        ));
    }
}
