//! Tray icon artwork generated from the indicator tuple.
//!
//! The left half shows the recording axis, the right half the replay axis,
//! separated by a one-pixel transparent gutter.

use capture_deck_core::{Indicators, RecordIndicator, ReplayIndicator};

use image::{Rgba, RgbaImage};

pub(crate) const ICON_SIZE: u32 = 32;

pub(crate) const OFF_GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);
pub(crate) const RECORDING_RED: Rgba<u8> = Rgba([220, 38, 38, 255]);
pub(crate) const PAUSED_YELLOW: Rgba<u8> = Rgba([234, 179, 8, 255]);
pub(crate) const REPLAY_GREEN: Rgba<u8> = Rgba([22, 163, 74, 255]);
const GUTTER: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub(crate) fn record_colour(record: RecordIndicator) -> Rgba<u8> {
    match record {
        RecordIndicator::Off => OFF_GREY,
        RecordIndicator::Recording => RECORDING_RED,
        RecordIndicator::Paused => PAUSED_YELLOW,
    }
}

pub(crate) fn replay_colour(replay: ReplayIndicator) -> Rgba<u8> {
    match replay {
        ReplayIndicator::Off => OFF_GREY,
        ReplayIndicator::Active => REPLAY_GREEN,
    }
}

/// Paints the two-axis icon.
pub(crate) fn render(indicators: Indicators) -> RgbaImage {
    let half = ICON_SIZE / 2;
    let left = record_colour(indicators.record);
    let right = replay_colour(indicators.replay);

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, _y| {
        if x + 1 == half {
            GUTTER
        } else if x < half {
            left
        } else {
            right
        }
    })
}

/// Hover text naming both axes.
pub(crate) fn tooltip(indicators: Indicators) -> String {
    let record = match indicators.record {
        RecordIndicator::Off => "Not recording",
        RecordIndicator::Recording => "Recording",
        RecordIndicator::Paused => "Recording paused",
    };
    let replay = match indicators.replay {
        ReplayIndicator::Off => "Replay buffer off",
        ReplayIndicator::Active => "Replay buffer on",
    };

    format!("Capture Deck - {} | {}", record, replay)
}
