//! rosbridge v2 publishing over WebSocket.
//!
//! Topics are advertised once with their message type, then every message
//! is sent as a `publish` operation carrying the message as JSON.

use std::collections::HashSet;
use std::net::TcpStream;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::drive::{Twist, WheelVelocities};
use crate::error::{MotionError, Result};
use crate::sink::{TwistPublisher, WheelDriver};

pub const TWIST_TYPE: &str = "geometry_msgs/Twist";
pub const FLOAT64_TYPE: &str = "std_msgs/Float64";

/// Outgoing text frames
pub trait TextSink {
    fn send_text(&mut self, text: String) -> Result<()>;
}

/// Plain WebSocket to a rosbridge server
pub struct RosbridgeSocket {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl RosbridgeSocket {
    pub fn connect(url: &str) -> Result<Self> {
        let (socket, _response) =
            tungstenite::connect(url).map_err(|e| MotionError::ConnectionFailed(format!("{}: {}", url, e)))?;
        info!("[ROSBRIDGE] Connected to {}", url);
        Ok(Self { socket })
    }
}

impl TextSink for RosbridgeSocket {
    fn send_text(&mut self, text: String) -> Result<()> {
        match self.socket.send(Message::Text(text)) {
            Ok(()) => Ok(()),
            Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                Err(MotionError::ConnectionClosed)
            }
            Err(e) => Err(MotionError::SendFailed(e.to_string())),
        }
    }
}

pub struct RosbridgeClient<S> {
    sink: S,
    advertised: HashSet<String>,
}

impl<S: TextSink> RosbridgeClient<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            advertised: HashSet::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Announce `topic` with `msg_type`. Repeated calls are no-ops.
    pub fn advertise(&mut self, topic: &str, msg_type: &str) -> Result<()> {
        if self.advertised.contains(topic) {
            return Ok(());
        }
        let op = json!({"op": "advertise", "topic": topic, "type": msg_type});
        self.sink.send_text(op.to_string())?;
        debug!("[ROSBRIDGE] Advertised {} as {}", topic, msg_type);
        self.advertised.insert(topic.to_string());
        Ok(())
    }

    pub fn publish<M: Serialize>(&mut self, topic: &str, msg: &M) -> Result<()> {
        let op = json!({"op": "publish", "topic": topic, "msg": msg});
        self.sink.send_text(serde_json::to_string(&op)?)
    }
}

/// `geometry_msgs/Twist` publisher on one topic
pub struct RosbridgeTwistPublisher<S> {
    client: RosbridgeClient<S>,
    topic: String,
}

impl<S: TextSink> RosbridgeTwistPublisher<S> {
    pub fn new(mut client: RosbridgeClient<S>, topic: impl Into<String>) -> Result<Self> {
        let topic = topic.into();
        client.advertise(&topic, TWIST_TYPE)?;
        Ok(Self { client, topic })
    }

    pub fn client(&self) -> &RosbridgeClient<S> {
        &self.client
    }
}

impl<S: TextSink> TwistPublisher for RosbridgeTwistPublisher<S> {
    fn publish_twist(&mut self, twist: &Twist) -> Result<()> {
        self.client.publish(&self.topic, twist)
    }
}

#[derive(Serialize)]
struct Float64 {
    data: f64,
}

/// Wheel velocities as `std_msgs/Float64` on one topic per wheel
pub struct RosbridgeWheelDriver<S> {
    client: RosbridgeClient<S>,
    left_topic: String,
    right_topic: String,
}

impl<S: TextSink> RosbridgeWheelDriver<S> {
    pub fn new(
        mut client: RosbridgeClient<S>,
        left_topic: impl Into<String>,
        right_topic: impl Into<String>,
    ) -> Result<Self> {
        let left_topic = left_topic.into();
        let right_topic = right_topic.into();
        client.advertise(&left_topic, FLOAT64_TYPE)?;
        client.advertise(&right_topic, FLOAT64_TYPE)?;
        Ok(Self {
            client,
            left_topic,
            right_topic,
        })
    }

    pub fn client(&self) -> &RosbridgeClient<S> {
        &self.client
    }
}

impl<S: TextSink> WheelDriver for RosbridgeWheelDriver<S> {
    fn set_wheel_velocities(&mut self, velocities: WheelVelocities) -> Result<()> {
        self.client.publish(
            &self.left_topic,
            &Float64 {
                data: velocities.left,
            },
        )?;
        self.client.publish(
            &self.right_topic,
            &Float64 {
                data: velocities.right,
            },
        )
    }
}
