//! One authenticated obs-websocket session.

use crate::{
    config::ObsConfig,
    obs::protocol::{
        AuthChallenge, Envelope, Hello, OP_HELLO, OP_IDENTIFIED, auth_string, identify_message,
        parse_data, parse_envelope,
    },
};

use capture_deck_core::{CoreResult, DeckError};

use std::{net::TcpStream, panic::Location, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tungstenite::{Message, WebSocket, stream::MaybeTlsStream};

/// Identified websocket session with a fixed event subscription mask.
pub(crate) struct ObsConnection {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl ObsConnection {
    /// Connects, answers the authentication challenge and identifies.
    ///
    /// # Errors
    ///
    /// `ConnectionUnavailable` if the socket cannot be opened, the server
    /// closes it, or it demands a password none was configured for.
    #[track_caller]
    #[instrument(skip(config), fields(url = %config.url()))]
    pub(crate) fn open(config: &ObsConfig, event_subscriptions: u32) -> CoreResult<Self> {
        let (socket, _response) =
            tungstenite::connect(config.url()).map_err(|e| DeckError::ConnectionUnavailable {
                reason: format!("Failed to connect to {}: {}", config.url(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut connection = Self { socket };

        let hello = connection.expect_op(OP_HELLO)?;
        let hello: Hello = parse_data(&hello.d, "Hello")?;
        debug!(
            server_version = ?hello.obs_web_socket_version,
            rpc_version = hello.rpc_version,
            "Hello received"
        );

        let authentication = match hello.authentication {
            Some(challenge) => Some(Self::answer(config, &challenge)?),
            None => None,
        };

        connection.send_text(identify_message(authentication, event_subscriptions))?;
        connection.expect_op(OP_IDENTIFIED)?;

        info!(event_subscriptions, "Capture server session identified");

        Ok(connection)
    }

    /// Bounds how long a blocking read may wait.
    #[track_caller]
    pub(crate) fn set_read_timeout(&mut self, timeout: Option<Duration>) -> CoreResult<()> {
        if let MaybeTlsStream::Plain(stream) = self.socket.get_mut() {
            stream
                .set_read_timeout(timeout)
                .map_err(|e| DeckError::ConnectionUnavailable {
                    reason: format!("Failed to set read timeout: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        Ok(())
    }

    #[track_caller]
    pub(crate) fn send_text(&mut self, text: String) -> CoreResult<()> {
        self.socket
            .send(Message::Text(text))
            .map_err(|e| DeckError::ConnectionUnavailable {
                reason: format!("Failed to send message: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Blocks for the next text frame. Pings are answered by tungstenite.
    #[track_caller]
    pub(crate) fn read_envelope(&mut self) -> CoreResult<Envelope> {
        loop {
            let message = self
                .socket
                .read()
                .map_err(|e| DeckError::ConnectionUnavailable {
                    reason: format!("Failed to read message: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            match message {
                Message::Text(text) => return parse_envelope(&text),
                Message::Close(frame) => {
                    return Err(DeckError::ConnectionUnavailable {
                        reason: format!("Server closed the connection: {:?}", frame),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                _ => continue,
            }
        }
    }

    #[track_caller]
    fn expect_op(&mut self, op: u8) -> CoreResult<Envelope> {
        let envelope = self.read_envelope()?;

        if envelope.op != op {
            return Err(DeckError::ConnectionUnavailable {
                reason: format!("Expected opcode {} during handshake, got {}", op, envelope.op),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(envelope)
    }

    #[track_caller]
    fn answer(config: &ObsConfig, challenge: &AuthChallenge) -> CoreResult<String> {
        let password = config
            .resolved_password()
            .ok_or_else(|| DeckError::ConnectionUnavailable {
                reason: "Server requires a password but none is configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(auth_string(&password, challenge))
    }
}
