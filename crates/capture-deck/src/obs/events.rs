//! Push-event listener for the capture server.

use crate::{
    config::ObsConfig,
    obs::{
        connection::ObsConnection,
        protocol::{EVENT_SUBSCRIPTION_OUTPUTS, OP_EVENT, decode_event},
    },
};

use capture_deck_core::{CaptureEvent, CoreResult, DeckError};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Second session subscribed to output events only.
pub struct EventListener {
    connection: ObsConnection,
}

impl EventListener {
    /// Opens the event session. Connect this before seeding status so no
    /// transition falls between the seed and the subscription.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn connect(config: &ObsConfig) -> CoreResult<Self> {
        let connection = ObsConnection::open(config, EVENT_SUBSCRIPTION_OUTPUTS)?;
        Ok(Self { connection })
    }

    /// Blocks reading events and forwards each decoded one to `event_tx`.
    ///
    /// Runs until the socket fails or the receiving side is dropped.
    /// Malformed events are logged and dropped.
    #[instrument(skip_all)]
    pub fn forward(mut self, event_tx: mpsc::Sender<CaptureEvent>) {
        loop {
            match self.next_event() {
                Ok(Some(event)) => {
                    if event_tx.blocking_send(event).is_err() {
                        debug!("Event receiver dropped, listener stopping");
                        return;
                    }
                }
                Ok(None) => {}
                Err(
                    e @ (DeckError::MalformedPushEvent { .. }
                    | DeckError::MalformedResponse { .. }),
                ) => {
                    warn!(error = ?e, "Dropping malformed push event");
                }
                Err(e) => {
                    info!(error = ?e, "Capture server event stream ended");
                    return;
                }
            }
        }
    }

    fn next_event(&mut self) -> CoreResult<Option<CaptureEvent>> {
        let envelope = self.connection.read_envelope()?;

        if envelope.op != OP_EVENT {
            debug!(op = envelope.op, "Ignoring non-event frame");
            return Ok(None);
        }

        decode_event(&envelope.d)
    }
}
