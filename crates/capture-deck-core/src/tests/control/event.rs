use crate::{DeckError, OutputState, RecordIndicator, RecordingStatus, ReplayIndicator, ReplayStatus};

/// WHAT: Every documented output state string parses
/// WHY: Record transitions carry the state as a wire string
#[test]
#[allow(clippy::unwrap_used)]
fn given_known_state_strings_when_parsing_then_variants() {
    // Given: The six wire strings
    let cases = [
        ("OBS_WEBSOCKET_OUTPUT_STARTING", OutputState::Starting),
        ("OBS_WEBSOCKET_OUTPUT_STARTED", OutputState::Started),
        ("OBS_WEBSOCKET_OUTPUT_STOPPING", OutputState::Stopping),
        ("OBS_WEBSOCKET_OUTPUT_STOPPED", OutputState::Stopped),
        ("OBS_WEBSOCKET_OUTPUT_PAUSED", OutputState::Paused),
        ("OBS_WEBSOCKET_OUTPUT_RESUMED", OutputState::Resumed),
    ];

    for (wire, expected) in cases {
        // When: Parsing
        let parsed: OutputState = wire.parse().unwrap();

        // Then: Matching variant
        assert_eq!(parsed, expected);
    }
}

/// WHAT: Unknown state strings are rejected as malformed
/// WHY: A bad event is dropped instead of corrupting the indicators
#[test]
#[allow(clippy::panic)]
fn given_unknown_state_string_when_parsing_then_malformed_push_event() {
    // Given: A state the server never sends
    let wire = "OBS_WEBSOCKET_OUTPUT_RECONNECTING";

    // When: Parsing
    let result = wire.parse::<OutputState>();

    // Then: MalformedPushEvent naming the input
    match result {
        Err(DeckError::MalformedPushEvent { reason, .. }) => assert!(reason.contains(wire)),
        other => panic!("expected MalformedPushEvent, got {other:?}"),
    }
}

/// WHAT: Status maps to the three record colours with paused taking priority
/// WHY: The server reports paused recordings as active too
#[test]
fn given_record_status_when_mapping_then_paused_over_active() {
    // Given/When/Then: Each status maps to one indicator
    assert_eq!(
        RecordIndicator::from_status(RecordingStatus {
            active: false,
            paused: false
        }),
        RecordIndicator::Off
    );
    assert_eq!(
        RecordIndicator::from_status(RecordingStatus {
            active: true,
            paused: false
        }),
        RecordIndicator::Recording
    );
    assert_eq!(
        RecordIndicator::from_status(RecordingStatus {
            active: true,
            paused: true
        }),
        RecordIndicator::Paused
    );
    assert_eq!(
        ReplayIndicator::from_status(ReplayStatus { active: true }),
        ReplayIndicator::Active
    );
}
