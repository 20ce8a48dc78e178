mod entry;
mod source;

pub use {
    entry::{WindowEntry, WindowHandle, WindowSnapshot},
    source::{WindowCandidate, WindowFlags, WindowSnapshotSource, WindowSystem},
};

pub(crate) use source::is_taskbar_window;
