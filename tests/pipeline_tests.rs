//! End-to-end: scripted Cortex service → live session → pilot → rosbridge frames

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use neurodrive::cortex::{CortexTransport, Method, RpcRequest, SessionCredentials, SessionInit};
use neurodrive::motion::{Pacer, PulsePlan, RosbridgeClient, RosbridgeTwistPublisher, RosbridgeWheelDriver, TextSink};
use neurodrive::prelude::*;
use serde_json::{json, Value};

/// Answers the handshake and profile chain, then streams `com` readings
struct ScriptedCortex {
    com: Vec<(&'static str, f64)>,
    inbox: VecDeque<String>,
    shutdown: Arc<AtomicBool>,
}

impl ScriptedCortex {
    fn new(com: Vec<(&'static str, f64)>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            com,
            inbox: VecDeque::new(),
            shutdown,
        }
    }
}

impl CortexTransport for ScriptedCortex {
    fn send(&mut self, request: &RpcRequest) -> neurodrive::cortex::Result<()> {
        let params = &request.params;
        let result = match request.method {
            Method::RequestAccess => json!({"accessGranted": true}),
            Method::Authorize => json!({"cortexToken": "tok"}),
            Method::QueryHeadsets => json!([{"id": "INSIGHT-1", "status": "connected"}]),
            Method::CreateSession => json!({"id": "sess-1"}),
            Method::QueryProfile => json!([{"name": "alice"}]),
            Method::GetCurrentProfile => json!({"name": "alice", "loadedByThisApp": true}),
            Method::SetupProfile => json!({"action": params["status"], "name": params["profile"]}),
            Method::MentalCommandActiveAction => json!(["neutral", "left"]),
            Method::MentalCommandActionSensitivity if params["status"] == "get" => json!([5, 5]),
            Method::MentalCommandActionSensitivity => json!({"status": "set"}),
            Method::Subscribe => json!({"success": [{"streamName": "com"}], "failure": []}),
            Method::ControlDevice => json!({"command": params["command"]}),
        };
        self.inbox
            .push_back(json!({"id": request.id, "result": result}).to_string());
        if request.method == Method::Subscribe {
            for (i, (action, power)) in self.com.iter().enumerate() {
                self.inbox.push_back(
                    json!({"com": [action, power], "sid": "sess-1", "time": i as f64}).to_string(),
                );
            }
        }
        Ok(())
    }

    fn receive(&mut self) -> neurodrive::cortex::Result<Option<String>> {
        let next = self.inbox.pop_front();
        if next.is_none() {
            self.shutdown.store(true, Ordering::SeqCst);
        }
        Ok(next)
    }

    fn close(&mut self) -> neurodrive::cortex::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct Frames(Vec<Value>);

impl TextSink for Frames {
    fn send_text(&mut self, text: String) -> neurodrive::motion::Result<()> {
        self.0.push(serde_json::from_str(&text)?);
        Ok(())
    }
}

#[derive(Default)]
struct NoWait(u32);

impl Pacer for NoWait {
    fn pause(&mut self, _interval: Duration) {
        self.0 += 1;
    }
}

fn session() -> CortexSession {
    CortexSession::new(SessionInit {
        credentials: SessionCredentials {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            license: None,
            debit: 10,
        },
        wanted_headset: None,
        wanted_profile: "alice".to_string(),
    })
}

fn published(frames: &[Value]) -> Vec<&Value> {
    frames.iter().filter(|f| f["op"] == "publish").collect()
}

#[test]
fn ground_robot_turns_left_then_moves_forward() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let cortex = ScriptedCortex::new(
        vec![
            ("left", 0.2),
            ("left", 0.5),
            ("left", 0.8),
            ("neutral", 0.0),
            ("push", 0.1),
            ("push", 0.2),
            ("neutral", 0.0),
        ],
        shutdown.clone(),
    );
    let publisher = RosbridgeTwistPublisher::new(RosbridgeClient::new(Frames::default()), "cmd_vel").unwrap();
    let pilot = GroundRobotPilot::with_pacer(
        PeakThresholdSelector::default(),
        TwistProfile::default(),
        PulsePlan::default(),
        publisher,
        NoWait::default(),
    );
    let mut live = LiveSession::new("alice", vec![7, 7, 5, 5], pilot).unwrap();

    CortexClient::new(cortex, session())
        .run(&mut live, &shutdown)
        .unwrap();

    let pilot = live.handler();
    let frames = &pilot.publisher().client().sink().0;
    assert_eq!(frames[0]["op"], "advertise");
    let twists = published(frames);
    assert_eq!(twists.len(), 31);
    assert!(twists[..30].iter().all(|f| f["msg"]["angular"]["z"] == 1.0));
    assert_eq!(twists[30]["msg"]["angular"]["z"], 0.0);
    assert_eq!(twists[30]["msg"]["linear"]["x"], 0.2);
    assert_eq!(pilot.pacer().0, 31);
    assert_eq!(pilot.commands_sent(), 2);
}

#[test]
fn simulated_robot_follows_labels() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let cortex = ScriptedCortex::new(
        vec![("neutral", 0.3), ("left", 0.4), ("left", 0.95), ("push", 0.5)],
        shutdown.clone(),
    );
    let driver = RosbridgeWheelDriver::new(
        RosbridgeClient::new(Frames::default()),
        "/e_puck/left_wheel_motor/set_velocity",
        "/e_puck/right_wheel_motor/set_velocity",
    )
    .unwrap();
    let pilot = SimulatedRobotPilot::new(
        LabelMotionMapper::default(),
        WheelProfile::default(),
        driver,
    )
    .unwrap();
    let mut live = LiveSession::new("alice", vec![7, 7, 5, 5], pilot).unwrap();

    CortexClient::new(cortex, session())
        .run(&mut live, &shutdown)
        .unwrap();

    let frames = &live.handler().driver().client().sink().0;
    let speeds: Vec<f64> = published(frames)
        .iter()
        .filter_map(|f| f["msg"]["data"].as_f64())
        .collect();
    // Initial stop, then (left, right) per mapped command
    assert_eq!(
        speeds,
        vec![0.0, 0.0, 3.0, 3.0, -3.0, 3.0, 3.0, -3.0]
    );
}
