use crate::{
    CaptureEvent, DeckError, Indicators, OutputState, RecordIndicator, RecordTransitionEvent,
    RecordingStateMachine, RecordingStatus, ReplayIndicator, ReplaySavedEvent, ReplayStatus,
    tests::support::{Call, FakeServer, RecordingNotifier},
};

fn record_event(state: OutputState, output_path: Option<&str>) -> CaptureEvent {
    CaptureEvent::RecordStateChanged(RecordTransitionEvent {
        active: matches!(state, OutputState::Started | OutputState::Resumed),
        output_path: output_path.map(str::to_string),
        state,
    })
}

fn status(active: bool, paused: bool) -> RecordingStatus {
    RecordingStatus { active, paused }
}

/// WHAT: Startup seeds both axes from one status query each
/// WHY: The panel must reflect outputs that were already running
#[test]
#[allow(clippy::unwrap_used)]
fn given_running_outputs_when_connecting_then_indicators_seeded() {
    // Given: Server paused mid-recording with the replay buffer running
    let server = FakeServer::with_status(status(true, true), ReplayStatus { active: true });

    // When: Connecting
    let machine = RecordingStateMachine::connect(server.clone(), RecordingNotifier::default())
        .unwrap();

    // Then: Paused + Active, from exactly two queries
    assert_eq!(
        machine.indicators(),
        Indicators {
            record: RecordIndicator::Paused,
            replay: ReplayIndicator::Active,
        }
    );
    assert_eq!(server.calls(), vec![Call::GetRecordStatus, Call::GetReplayStatus]);
}

/// WHAT: Unreachable server fails the startup seed
/// WHY: Launch aborts with a diagnostic instead of showing a stale panel
#[test]
fn given_unreachable_server_when_connecting_then_connection_unavailable() {
    // Given: A server that refuses connections
    let server = FakeServer::default();
    server.0.borrow_mut().unreachable = true;

    // When: Connecting
    let result = RecordingStateMachine::connect(server, RecordingNotifier::default());

    // Then: ConnectionUnavailable
    assert!(matches!(
        result,
        Err(DeckError::ConnectionUnavailable { .. })
    ));
}

/// WHAT: Record indicator follows push events, not the start command
/// WHY: Start can fail server-side, so only STARTED/STOPPED move the indicator
#[test]
#[allow(clippy::unwrap_used)]
fn given_off_when_toggling_record_and_events_arrive_then_indicator_reconciled() {
    // Given: Nothing running
    let server = FakeServer::default();
    let notifier = RecordingNotifier::default();
    let mut machine = RecordingStateMachine::connect(server.clone(), notifier.clone()).unwrap();

    // When: Toggling record
    machine.toggle_record().unwrap();

    // Then: Start sent, indicator still Off
    assert_eq!(server.count(Call::StartRecord), 1);
    assert_eq!(machine.indicators().record, RecordIndicator::Off);

    // When: STARTED arrives
    machine.handle_event(record_event(OutputState::Started, None));

    // Then: Recording
    assert_eq!(machine.indicators().record, RecordIndicator::Recording);

    // When: STOPPED with an output path arrives
    machine.handle_event(record_event(OutputState::Stopped, Some(r"C:\out.mp4")));

    // Then: Off, and exactly one notification names the file
    assert_eq!(machine.indicators().record, RecordIndicator::Off);
    let saved: Vec<String> = notifier
        .messages()
        .into_iter()
        .filter(|m| m.contains(r"C:\out.mp4"))
        .collect();
    assert_eq!(saved.len(), 1);
}

/// WHAT: Toggling while recording or paused sends stop
/// WHY: The record button is a toggle over the cached state
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_or_paused_when_toggling_record_then_stop_sent() {
    for seeded in [status(true, false), status(true, true)] {
        // Given: An active recording
        let server = FakeServer::with_status(seeded, ReplayStatus::default());
        let mut machine =
            RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();

        // When: Toggling
        machine.toggle_record().unwrap();

        // Then: Stop sent, no start
        assert_eq!(server.count(Call::StopRecord), 1);
        assert_eq!(server.count(Call::StartRecord), 0);
    }
}

/// WHAT: Failed command leaves the indicators at their last known state
/// WHY: Commands are not retried; the next event or query reconciles
#[test]
#[allow(clippy::unwrap_used)]
fn given_server_drops_when_toggling_then_error_and_state_unchanged() {
    // Given: A connected machine whose server then goes away
    let server = FakeServer::with_status(status(true, false), ReplayStatus { active: true });
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();
    let before = machine.indicators();
    server.0.borrow_mut().unreachable = true;

    // When: Toggling record and replay
    let record = machine.toggle_record();
    let replay = machine.toggle_replay();

    // Then: Both fail once, indicators unchanged
    assert!(matches!(
        record,
        Err(DeckError::ConnectionUnavailable { .. })
    ));
    assert!(replay.is_err());
    assert_eq!(machine.indicators(), before);
}

/// WHAT: Pause toggle reads status back and maps it to one of three colours
/// WHY: Pause is the one path with a synchronous read-after-write
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_toggling_pause_then_indicator_from_requery() {
    // Given: Recording
    let server = FakeServer::with_status(status(true, false), ReplayStatus::default());
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();
    server.clear_calls();

    // When: Toggling pause twice
    machine.toggle_pause().unwrap();
    let after_first = machine.indicators().record;
    machine.toggle_pause().unwrap();

    // Then: Paused, then Recording, each after a status query
    assert_eq!(after_first, RecordIndicator::Paused);
    assert_eq!(machine.indicators().record, RecordIndicator::Recording);
    assert_eq!(
        server.calls(),
        vec![
            Call::TogglePause,
            Call::GetRecordStatus,
            Call::TogglePause,
            Call::GetRecordStatus,
        ]
    );
}

/// WHAT: Pause toggle with nothing recording reads back Off
/// WHY: paused=false, active=false maps to the Off colour
#[test]
#[allow(clippy::unwrap_used)]
fn given_not_recording_when_toggling_pause_then_off() {
    // Given: Not recording
    let server = FakeServer::default();
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();

    // When: Toggling pause
    machine.toggle_pause().unwrap();

    // Then: Off
    assert_eq!(machine.indicators().record, RecordIndicator::Off);
}

/// WHAT: Replay toggle picks start or stop from the cached state, never flips it
/// WHY: Only ReplayBufferStateChanged events move the replay indicator
#[test]
#[allow(clippy::unwrap_used)]
fn given_replay_off_when_toggling_and_event_arrives_then_active() {
    // Given: Replay off
    let server = FakeServer::default();
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();

    // When: Toggling
    machine.toggle_replay().unwrap();

    // Then: Start sent, still Off until the event
    assert_eq!(server.count(Call::StartReplay), 1);
    assert_eq!(machine.indicators().replay, ReplayIndicator::Off);
    machine.handle_event(CaptureEvent::ReplayStateChanged(ReplayStatus { active: true }));
    assert_eq!(machine.indicators().replay, ReplayIndicator::Active);

    // When: Toggling again and the stop event arrives
    machine.toggle_replay().unwrap();
    machine.handle_event(CaptureEvent::ReplayStateChanged(ReplayStatus { active: false }));

    // Then: Stop sent, Off
    assert_eq!(server.count(Call::StopReplay), 1);
    assert_eq!(machine.indicators().replay, ReplayIndicator::Off);
}

/// WHAT: Save is sent only when replay is active and recording is not paused
/// WHY: Saving a buffer tied to a paused pipeline is silently dropped
#[test]
#[allow(clippy::unwrap_used)]
fn given_each_state_combination_when_saving_replay_then_guarded() {
    for replay_active in [false, true] {
        for paused in [false, true] {
            // Given: One of the four combinations
            let server = FakeServer::with_status(
                status(paused, paused),
                ReplayStatus {
                    active: replay_active,
                },
            );
            let mut machine =
                RecordingStateMachine::connect(server.clone(), RecordingNotifier::default())
                    .unwrap();

            // When: Saving
            let sent = machine.save_replay().unwrap();

            // Then: Exactly one save iff active and not paused
            let expected = replay_active && !paused;
            assert_eq!(sent, expected, "replay={replay_active} paused={paused}");
            assert_eq!(server.count(Call::SaveReplay), usize::from(expected));
        }
    }
}

/// WHAT: Replay-saved events notify without touching indicators
/// WHY: The save is reported once per event and changes no colour
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_replay_when_saved_event_arrives_then_notified_only() {
    // Given: Replay active
    let notifier = RecordingNotifier::default();
    let server = FakeServer::with_status(RecordingStatus::default(), ReplayStatus { active: true });
    let mut machine = RecordingStateMachine::connect(server, notifier.clone()).unwrap();
    let before = machine.indicators();

    // When: A save event arrives
    machine.handle_event(CaptureEvent::ReplaySaved(ReplaySavedEvent {
        saved_path: r"C:\replays\clip.mkv".to_string(),
    }));

    // Then: One notification, indicators unchanged
    assert_eq!(
        notifier.messages(),
        vec!["Replay buffer saved at:\nC:\\replays\\clip.mkv".to_string()]
    );
    assert_eq!(machine.indicators(), before);
}

/// WHAT: Transitional and pause states are handled without errors
/// WHY: Unhandled states are no-ops; pause/resume reconcile idempotently
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_other_states_arrive_then_reconciled_without_notifications() {
    // Given: Recording
    let notifier = RecordingNotifier::default();
    let server = FakeServer::with_status(status(true, false), ReplayStatus::default());
    let mut machine = RecordingStateMachine::connect(server, notifier.clone()).unwrap();

    // When/Then: STOPPING leaves it, PAUSED and RESUMED move it, repeats are harmless
    machine.handle_event(record_event(OutputState::Stopping, None));
    assert_eq!(machine.indicators().record, RecordIndicator::Recording);
    machine.handle_event(record_event(OutputState::Paused, None));
    machine.handle_event(record_event(OutputState::Paused, None));
    assert_eq!(machine.indicators().record, RecordIndicator::Paused);
    machine.handle_event(record_event(OutputState::Resumed, None));
    assert_eq!(machine.indicators().record, RecordIndicator::Recording);
    machine.handle_event(record_event(OutputState::Starting, None));
    assert_eq!(machine.indicators().record, RecordIndicator::Recording);

    // And: No toasts for any of them
    assert!(notifier.messages().is_empty());
}

/// WHAT: Quit stops recording before the replay buffer
/// WHY: The server must not be left with orphaned active outputs
#[test]
#[allow(clippy::unwrap_used)]
fn given_both_outputs_active_when_quitting_then_record_stopped_before_replay() {
    // Given: Recording and replay both active
    let server = FakeServer::with_status(status(true, false), ReplayStatus { active: true });
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();
    server.clear_calls();

    // When: Quitting
    machine.quit().unwrap();

    // Then: Stop-record strictly precedes stop-replay
    let stops: Vec<Call> = server
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::StopRecord | Call::StopReplay))
        .collect();
    assert_eq!(stops, vec![Call::StopRecord, Call::StopReplay]);
}

/// WHAT: Quit stops nothing when nothing runs
/// WHY: Stop commands on idle outputs would be rejected by the server
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_outputs_when_quitting_then_no_stop_commands() {
    // Given: Nothing running
    let server = FakeServer::default();
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();

    // When: Quitting
    machine.quit().unwrap();

    // Then: No stops
    assert_eq!(server.count(Call::StopRecord), 0);
    assert_eq!(server.count(Call::StopReplay), 0);
}

/// WHAT: Quit re-queries status so an in-flight start is still stopped
/// WHY: STARTED may not have arrived yet when the user quits
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_started_but_event_pending_when_quitting_then_stop_sent() {
    // Given: Cache says Off but the server is already recording
    let server = FakeServer::default();
    let mut machine =
        RecordingStateMachine::connect(server.clone(), RecordingNotifier::default()).unwrap();
    machine.toggle_record().unwrap();
    server.0.borrow_mut().record = status(true, false);

    // When: Quitting
    machine.quit().unwrap();

    // Then: Recording stopped
    assert_eq!(server.count(Call::StopRecord), 1);
}
