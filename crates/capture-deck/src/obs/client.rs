//! Synchronous request client for the capture server.

use crate::{
    config::ObsConfig,
    obs::{
        connection::ObsConnection,
        protocol::{
            EVENT_SUBSCRIPTION_NONE, OP_REQUEST_RESPONSE, RequestResponse, check_status,
            parse_data, record_status, replay_status, request_message,
        },
    },
};

use capture_deck_core::{CommandDispatcher, CoreResult, RecordingStatus, ReplayStatus};

use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request/response client. Subscribes to no events, so every frame it
/// reads is a reply.
pub struct ObsClient {
    connection: ObsConnection,
}

impl ObsClient {
    /// Opens the request session and applies the configured read timeout.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn connect(config: &ObsConfig) -> CoreResult<Self> {
        let mut connection = ObsConnection::open(config, EVENT_SUBSCRIPTION_NONE)?;
        connection.set_read_timeout(Some(config.request_timeout()))?;

        Ok(Self { connection })
    }

    /// Sends one request and waits for the reply carrying its id.
    #[instrument(skip(self))]
    fn request(&mut self, request_type: &str) -> CoreResult<Option<Value>> {
        let request_id = Uuid::new_v4().to_string();
        self.connection
            .send_text(request_message(request_type, &request_id))?;

        loop {
            let envelope = self.connection.read_envelope()?;

            if envelope.op != OP_REQUEST_RESPONSE {
                debug!(op = envelope.op, "Skipping non-response frame");
                continue;
            }

            let response: RequestResponse = parse_data(&envelope.d, "RequestResponse")?;

            if response.request_id != request_id {
                warn!(
                    expected = %request_id,
                    received = %response.request_id,
                    "Discarding reply to an earlier request"
                );
                continue;
            }

            check_status(&response)?;
            debug!(request_type, "Request succeeded");

            return Ok(response.response_data);
        }
    }

    fn command(&mut self, request_type: &str) -> CoreResult<()> {
        self.request(request_type).map(|_| ())
    }
}

impl CommandDispatcher for ObsClient {
    fn start_record(&mut self) -> CoreResult<()> {
        self.command("StartRecord")
    }

    fn stop_record(&mut self) -> CoreResult<()> {
        self.command("StopRecord")
    }

    fn toggle_pause(&mut self) -> CoreResult<()> {
        self.command("ToggleRecordPause")
    }

    fn start_replay(&mut self) -> CoreResult<()> {
        self.command("StartReplayBuffer")
    }

    fn stop_replay(&mut self) -> CoreResult<()> {
        self.command("StopReplayBuffer")
    }

    fn save_replay(&mut self) -> CoreResult<()> {
        self.command("SaveReplayBuffer")
    }

    fn get_record_status(&mut self) -> CoreResult<RecordingStatus> {
        let data = self.request("GetRecordStatus")?;
        record_status(data.as_ref())
    }

    fn get_replay_status(&mut self) -> CoreResult<ReplayStatus> {
        let data = self.request("GetReplayBufferStatus")?;
        replay_status(data.as_ref())
    }
}
