//! Recording and replay-buffer control state machine.
//!
//! The capture server owns ground truth. This machine keeps a cached copy of
//! it in the two indicator axes, seeded once by a synchronous query and then
//! reconciled only by push events. User commands never flip an indicator
//! optimistically, since the server may refuse them.
//!
//! Push events are treated as idempotent reconciliation signals, not as
//! acknowledgements of a particular command.

use crate::{
    CaptureEvent, CommandDispatcher, CoreResult, Indicators, Notifier, OutputState,
    RecordIndicator, RecordTransitionEvent, ReplayIndicator, ReplaySavedEvent, ReplayStatus,
};

use tracing::{debug, info, instrument, warn};

/// Reconciles user commands with pushed capture-server state.
pub struct RecordingStateMachine<D, N> {
    dispatcher: D,
    notifier: N,
    indicators: Indicators,
}

impl<D: CommandDispatcher, N: Notifier> RecordingStateMachine<D, N> {
    /// Seeds both axes with one synchronous status query each.
    ///
    /// # Errors
    ///
    /// Returns error if the capture server cannot answer; callers treat this
    /// as fatal at startup.
    #[track_caller]
    #[instrument(skip(dispatcher, notifier))]
    pub fn connect(mut dispatcher: D, notifier: N) -> CoreResult<Self> {
        let record = dispatcher.get_record_status()?;
        let replay = dispatcher.get_replay_status()?;

        let indicators = Indicators {
            record: RecordIndicator::from_status(record),
            replay: ReplayIndicator::from_status(replay),
        };

        info!(
            record = ?indicators.record,
            replay = ?indicators.replay,
            "Capture state seeded"
        );

        Ok(Self {
            dispatcher,
            notifier,
            indicators,
        })
    }

    /// Current indicator tuple.
    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    /// Starts recording when off, stops it when recording or paused.
    ///
    /// The indicator is left untouched; the `STARTED`/`STOPPED` push event
    /// moves it.
    #[instrument(skip(self))]
    pub fn toggle_record(&mut self) -> CoreResult<()> {
        if self.indicators.record.is_active() {
            self.dispatcher.stop_record()?;
            debug!("Stop recording requested");
        } else {
            self.dispatcher.start_record()?;
            debug!("Start recording requested");
        }

        Ok(())
    }

    /// Toggles pause, then reads the status back to set the indicator.
    #[instrument(skip(self))]
    pub fn toggle_pause(&mut self) -> CoreResult<()> {
        self.dispatcher.toggle_pause()?;
        let status = self.dispatcher.get_record_status()?;

        self.indicators.record = RecordIndicator::from_status(status);

        info!(record = ?self.indicators.record, "Pause toggled");

        Ok(())
    }

    /// Starts the replay buffer when off, stops it when active.
    #[instrument(skip(self))]
    pub fn toggle_replay(&mut self) -> CoreResult<()> {
        if self.indicators.replay.is_active() {
            self.dispatcher.stop_replay()?;
            debug!("Stop replay buffer requested");
        } else {
            self.dispatcher.start_replay()?;
            debug!("Start replay buffer requested");
        }

        Ok(())
    }

    /// Saves the replay buffer, only while it runs and recording is not paused.
    ///
    /// Any other combination is silently dropped. Returns whether a save
    /// command was sent.
    #[instrument(skip(self))]
    pub fn save_replay(&mut self) -> CoreResult<bool> {
        let allowed = self.indicators.replay.is_active()
            && self.indicators.record != RecordIndicator::Paused;

        if !allowed {
            debug!(
                record = ?self.indicators.record,
                replay = ?self.indicators.replay,
                "Replay save not allowed in current state, ignoring"
            );
            return Ok(false);
        }

        self.dispatcher.save_replay()?;

        Ok(true)
    }

    /// Applies one push event from the capture server.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::RecordStateChanged(transition) => self.on_record_transition(transition),
            CaptureEvent::ReplayStateChanged(status) => self.on_replay_status(status),
            CaptureEvent::ReplaySaved(saved) => self.on_replay_saved(saved),
        }
    }

    /// Stops every active output before the process exits.
    ///
    /// Recording is stopped before the replay buffer. Both stops are
    /// attempted even if the first fails; the first failure is returned.
    #[instrument(skip(self))]
    pub fn quit(&mut self) -> CoreResult<()> {
        let record_active = match self.dispatcher.get_record_status() {
            Ok(status) => status.active,
            Err(e) => {
                warn!(error = ?e, "Record status unavailable at quit, using cached state");
                self.indicators.record.is_active()
            }
        };

        let replay_active = match self.dispatcher.get_replay_status() {
            Ok(status) => status.active,
            Err(e) => {
                warn!(error = ?e, "Replay status unavailable at quit, using cached state");
                self.indicators.replay.is_active()
            }
        };

        let record_result = if record_active {
            info!("Stopping recording before exit");
            self.dispatcher.stop_record()
        } else {
            Ok(())
        };

        let replay_result = if replay_active {
            info!("Stopping replay buffer before exit");
            self.dispatcher.stop_replay()
        } else {
            Ok(())
        };

        record_result.and(replay_result)
    }

    fn on_record_transition(&mut self, transition: RecordTransitionEvent) {
        match transition.state {
            OutputState::Started => {
                self.indicators.record = RecordIndicator::Recording;
                info!("Recording started");
                self.notifier.notify("Recording started");
            }
            OutputState::Stopped => {
                self.indicators.record = RecordIndicator::Off;
                match transition.output_path {
                    Some(path) => {
                        info!(output_path = %path, "Recording saved");
                        self.notifier
                            .notify(&format!("Recording saved at:\n{}", path));
                    }
                    None => debug!("Recording stopped without an output path"),
                }
            }
            OutputState::Paused => self.indicators.record = RecordIndicator::Paused,
            OutputState::Resumed => self.indicators.record = RecordIndicator::Recording,
            OutputState::Starting | OutputState::Stopping => {
                debug!(state = ?transition.state, "Transitional record state, no change");
            }
        }
    }

    fn on_replay_status(&mut self, status: ReplayStatus) {
        self.indicators.replay = ReplayIndicator::from_status(status);
        info!(replay = ?self.indicators.replay, "Replay buffer state changed");
    }

    fn on_replay_saved(&self, saved: ReplaySavedEvent) {
        info!(saved_path = %saved.saved_path, "Replay buffer saved");
        self.notifier
            .notify(&format!("Replay buffer saved at:\n{}", saved.saved_path));
    }
}
