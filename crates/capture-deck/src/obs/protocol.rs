//! obs-websocket v5 message shapes.
//!
//! Only the handful of opcodes, requests and output events the control panel
//! needs are modelled. Everything else is left as raw JSON and ignored.

use capture_deck_core::{
    CaptureEvent, CoreResult, DeckError, OutputState, RecordTransitionEvent, RecordingStatus,
    ReplaySavedEvent, ReplayStatus,
};

use std::panic::Location;

use base64::{Engine, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

pub(crate) const OP_HELLO: u8 = 0;
pub(crate) const OP_IDENTIFY: u8 = 1;
pub(crate) const OP_IDENTIFIED: u8 = 2;
pub(crate) const OP_EVENT: u8 = 5;
pub(crate) const OP_REQUEST: u8 = 6;
pub(crate) const OP_REQUEST_RESPONSE: u8 = 7;

pub(crate) const RPC_VERSION: u32 = 1;

/// Subscribe to nothing; used by the request connection.
pub(crate) const EVENT_SUBSCRIPTION_NONE: u32 = 0;
/// The `Outputs` event category.
pub(crate) const EVENT_SUBSCRIPTION_OUTPUTS: u32 = 1 << 6;

/// Outer frame of every message.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub(crate) op: u8,
    #[serde(default)]
    pub(crate) d: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Hello {
    #[serde(default)]
    pub(crate) obs_web_socket_version: Option<String>,
    pub(crate) rpc_version: u32,
    #[serde(default)]
    pub(crate) authentication: Option<AuthChallenge>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthChallenge {
    pub(crate) challenge: String,
    pub(crate) salt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestStatus {
    pub(crate) result: bool,
    pub(crate) code: i64,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestResponse {
    pub(crate) request_type: String,
    pub(crate) request_id: String,
    pub(crate) request_status: RequestStatus,
    #[serde(default)]
    pub(crate) response_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordStatusData {
    output_active: bool,
    output_paused: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputActiveData {
    output_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload {
    event_type: String,
    #[serde(default)]
    event_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordStateChangedData {
    output_active: bool,
    output_state: String,
    #[serde(default)]
    output_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayBufferSavedData {
    saved_replay_path: String,
}

/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub(crate) fn auth_string(password: &str, challenge: &AuthChallenge) -> String {
    let secret = STANDARD.encode(Sha256::digest(format!("{}{}", password, challenge.salt)));
    STANDARD.encode(Sha256::digest(format!("{}{}", secret, challenge.challenge)))
}

pub(crate) fn identify_message(authentication: Option<String>, event_subscriptions: u32) -> String {
    let mut d = json!({
        "rpcVersion": RPC_VERSION,
        "eventSubscriptions": event_subscriptions,
    });

    if let Some(auth) = authentication {
        d["authentication"] = Value::String(auth);
    }

    json!({ "op": OP_IDENTIFY, "d": d }).to_string()
}

pub(crate) fn request_message(request_type: &str, request_id: &str) -> String {
    json!({
        "op": OP_REQUEST,
        "d": {
            "requestType": request_type,
            "requestId": request_id,
            "requestData": {},
        }
    })
    .to_string()
}

#[track_caller]
pub(crate) fn parse_envelope(text: &str) -> CoreResult<Envelope> {
    serde_json::from_str(text).map_err(|e| DeckError::MalformedResponse {
        reason: format!("Invalid message frame: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn parse_data<T: for<'de> Deserialize<'de>>(d: &Value, what: &str) -> CoreResult<T> {
    T::deserialize(d).map_err(|e| DeckError::MalformedResponse {
        reason: format!("Invalid {}: {}", what, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Maps a failed request status to `CommandRejected`.
#[track_caller]
pub(crate) fn check_status(response: &RequestResponse) -> CoreResult<()> {
    if response.request_status.result {
        return Ok(());
    }

    Err(DeckError::CommandRejected {
        request: response.request_type.clone(),
        code: response.request_status.code,
        comment: response.request_status.comment.clone(),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn record_status(data: Option<&Value>) -> CoreResult<RecordingStatus> {
    let data: RecordStatusData = parse_data(data.unwrap_or(&Value::Null), "record status")?;
    Ok(RecordingStatus {
        active: data.output_active,
        paused: data.output_paused,
    })
}

#[track_caller]
pub(crate) fn replay_status(data: Option<&Value>) -> CoreResult<ReplayStatus> {
    let data: OutputActiveData = parse_data(data.unwrap_or(&Value::Null), "replay status")?;
    Ok(ReplayStatus {
        active: data.output_active,
    })
}

/// Decodes the `d` of an event frame.
///
/// Returns `Ok(None)` for event types the controller does not consume.
#[track_caller]
pub(crate) fn decode_event(d: &Value) -> CoreResult<Option<CaptureEvent>> {
    let payload: EventPayload = malformed_event(EventPayload::deserialize(d), "event frame")?;

    let event = match payload.event_type.as_str() {
        "RecordStateChanged" => {
            let data: RecordStateChangedData = malformed_event(
                RecordStateChangedData::deserialize(&payload.event_data),
                "RecordStateChanged",
            )?;
            let state: OutputState = data.output_state.parse()?;
            CaptureEvent::RecordStateChanged(RecordTransitionEvent {
                active: data.output_active,
                output_path: data.output_path.filter(|p| !p.is_empty()),
                state,
            })
        }
        "ReplayBufferStateChanged" => {
            let data: OutputActiveData = malformed_event(
                OutputActiveData::deserialize(&payload.event_data),
                "ReplayBufferStateChanged",
            )?;
            CaptureEvent::ReplayStateChanged(ReplayStatus {
                active: data.output_active,
            })
        }
        "ReplayBufferSaved" => {
            let data: ReplayBufferSavedData = malformed_event(
                ReplayBufferSavedData::deserialize(&payload.event_data),
                "ReplayBufferSaved",
            )?;
            CaptureEvent::ReplaySaved(ReplaySavedEvent {
                saved_path: data.saved_replay_path,
            })
        }
        _ => return Ok(None),
    };

    Ok(Some(event))
}

#[track_caller]
fn malformed_event<T>(result: Result<T, serde_json::Error>, what: &str) -> CoreResult<T> {
    result.map_err(|e| DeckError::MalformedPushEvent {
        reason: format!("Invalid {}: {}", what, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
