use std::fmt;

/// Opaque OS window identifier.
///
/// The OS owns the window's lifetime, so a handle may be stale by the time
/// it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A searchable window: its handle plus a label captured at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// Handle used to focus the window.
    pub handle: WindowHandle,
    /// `"{title} - {process_name}"`, immutable once captured.
    pub display_label: String,
}

impl WindowEntry {
    /// Creates an entry with a precomputed label.
    pub fn new(handle: WindowHandle, display_label: impl Into<String>) -> Self {
        Self {
            handle,
            display_label: display_label.into(),
        }
    }
}

/// Windows in enumeration order, rebuilt wholesale on every activation.
pub type WindowSnapshot = Vec<WindowEntry>;
