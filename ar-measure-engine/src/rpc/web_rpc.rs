use crate::measurement::{HitTargetTracker, HitTestResult, PolygonMeasurement, TargetPose};
use crate::tools::tool_manager::{
    CommandSource, FrameHitResults, MeasureCommand, MeasureCommandEvent, MeasureSet,
    MeasurementChanged, SessionEndedEvent,
};
use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last flush.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses queued since the last flush.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }

    /// Queue response for transmission to the host.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage RPC layer.
///
/// Incoming messages are handled in `MeasureSet::Platform` so their hit
/// results and commands are applied in the same frame. Outgoing traffic is
/// flushed in `PostUpdate` after every measurement change was observed.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(MeasureSet::Platform),
            )
            .add_systems(
                Update,
                (notify_session_changes, notify_measurement_changes)
                    .chain()
                    .in_set(MeasureSet::Present),
            )
            .add_systems(PostUpdate, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap filter before queuing; full parsing happens in the ECS.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available; RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership moves to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw JSON text received from the host.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Engine-side effect of an RPC method.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcAction {
    FrameHits(Vec<HitTestResult>),
    SessionEnded,
    Command(MeasureCommand),
    QueryMeasurement,
}

#[derive(Deserialize)]
struct WireHit {
    position: [f64; 3],
    #[serde(default)]
    orientation: Option<[f64; 4]>,
}

#[derive(Deserialize)]
struct FrameHitParams {
    #[serde(default)]
    hits: Vec<WireHit>,
}

impl WireHit {
    fn into_hit(self) -> Result<HitTestResult, RpcError> {
        let position = DVec3::from_array(self.position);
        if !position.is_finite() {
            return Err(RpcError::invalid_params("Hit position must be finite"));
        }

        let orientation = match self.orientation {
            Some(raw) => {
                let quat = DQuat::from_array(raw);
                if !quat.is_finite() || quat.length_squared() == 0.0 {
                    return Err(RpcError::invalid_params(
                        "Hit orientation must be a finite non-zero quaternion",
                    ));
                }
                quat.normalize()
            }
            None => DQuat::IDENTITY,
        };

        Ok(HitTestResult::new(TargetPose::new(position, orientation)))
    }
}

const FRAME_HIT_RESULTS: &str = "frame_hit_results";

/// Map a request to its engine action, validating parameters.
pub fn parse_rpc_action(request: &RpcRequest) -> Result<RpcAction, RpcError> {
    match request.method.as_str() {
        FRAME_HIT_RESULTS => {
            let params = if request.params.is_null() {
                FrameHitParams { hits: Vec::new() }
            } else {
                serde_json::from_value::<FrameHitParams>(request.params.clone()).map_err(|_| {
                    RpcError::invalid_params(
                        "Expected 'hits' as [{ position: [x,y,z], orientation?: [x,y,z,w] }]",
                    )
                })?
            };

            let hits = params
                .hits
                .into_iter()
                .map(WireHit::into_hit)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RpcAction::FrameHits(hits))
        }
        "session_ended" => Ok(RpcAction::SessionEnded),
        "get_measurement" => Ok(RpcAction::QueryMeasurement),
        method => MeasureCommand::from_string(method)
            .map(RpcAction::Command)
            .ok_or_else(|| RpcError::method_not_found(method)),
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    measurement: Res<PolygonMeasurement>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut frame_hits: EventWriter<FrameHitResults>,
    mut session_events: EventWriter<SessionEndedEvent>,
    mut command_events: EventWriter<MeasureCommandEvent>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                continue;
            }
        };

        let result = parse_rpc_action(&request).map(|action| match action {
            RpcAction::FrameHits(hits) => {
                let count = hits.len();
                frame_hits.write(FrameHitResults { hits });
                serde_json::json!({ "success": true, "hits": count })
            }
            RpcAction::SessionEnded => {
                session_events.write(SessionEndedEvent);
                serde_json::json!({ "success": true })
            }
            RpcAction::Command(command) => {
                command_events.write(MeasureCommandEvent {
                    command,
                    source: CommandSource::Rpc,
                });
                info!("Measure command dispatched via RPC: {}", command.as_str());
                serde_json::json!({ "success": true, "command": command.as_str() })
            }
            // Reflects the state before this frame's commands are applied.
            RpcAction::QueryMeasurement => measurement.snapshot().to_json(),
        });

        if let Err(error) = &result {
            warn!("RPC {} failed: {}", request.method, error.message);

            // A rejected hit frame still counts as this frame's delivery: no surface.
            if request.method == FRAME_HIT_RESULTS {
                frame_hits.write(FrameHitResults::default());
            }
        }

        // Notifications (no ID) are applied but never answered.
        if let Some(id) = request.id {
            rpc_interface.queue_response(create_response(id, result));
        }
    }
}

/// Push the recomputed measurement to the host after every change.
fn notify_measurement_changes(
    mut events: EventReader<MeasurementChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for MeasurementChanged(snapshot) in events.read() {
        rpc_interface.send_notification("measurement_updated", snapshot.to_json());
    }
}

/// Report the tracker state once a session end has been applied.
fn notify_session_changes(
    mut events: EventReader<SessionEndedEvent>,
    tracker: Res<HitTargetTracker>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if events.read().count() == 0 {
        return;
    }
    rpc_interface.send_notification(
        "session_state_changed",
        serde_json::json!({
            "active": tracker.is_session_active(),
            "has_target": tracker.has_target(),
        }),
    );
}

fn create_response(id: serde_json::Value, result: Result<serde_json::Value, RpcError>) -> RpcResponse {
    match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    if rpc_interface.outgoing_notifications.is_empty()
        && rpc_interface.outgoing_responses.is_empty()
    {
        return;
    }

    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            trace!("RPC out: {}", json);
        }
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
