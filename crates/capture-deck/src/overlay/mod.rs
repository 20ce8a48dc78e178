mod overlay_window;
mod query_input;
mod title;

pub(crate) use {
    overlay_window::OverlayWindow,
    query_input::{OverlayKey, QueryInput},
    title::overlay_title,
};
