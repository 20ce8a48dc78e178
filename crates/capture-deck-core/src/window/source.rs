use crate::{CoreResult, WindowEntry, WindowHandle, WindowSnapshot};

use tracing::{debug, instrument};

/// Visibility and style flags of a top-level window, as reported by the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    /// The window is currently visible.
    pub visible: bool,
    /// The handle still refers to a live window.
    pub exists: bool,
    /// Hidden by the OS cloaking mechanism (other virtual desktop, suspended UWP).
    pub cloaked: bool,
    /// Extended style marks it a tool window.
    pub tool_window: bool,
    /// Extended style marks it an app window.
    pub app_window: bool,
    /// Has a parent window.
    pub has_parent: bool,
    /// Has an owner window.
    pub has_owner: bool,
}

/// A raw top-level window before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCandidate {
    /// OS handle.
    pub handle: WindowHandle,
    /// Window title, possibly empty.
    pub title: String,
    /// Visibility and style flags.
    pub flags: WindowFlags,
}

/// Window-system collaborator.
///
/// Implemented over Win32 by the application and by in-memory fakes in tests.
pub trait WindowSystem {
    /// Lists every top-level window in enumeration order.
    fn top_level_windows(&self) -> CoreResult<Vec<WindowCandidate>>;

    /// Name of the process owning `handle`, if it can be resolved.
    fn process_name_of(&self, handle: WindowHandle) -> Option<String>;

    /// Moves `handle` to the foreground.
    fn focus(&self, handle: WindowHandle) -> CoreResult<()>;
}

/// Taskbar-visibility predicate, evaluated in order with short-circuit.
pub(crate) fn is_taskbar_window(flags: &WindowFlags) -> bool {
    if !flags.visible || !flags.exists || flags.cloaked {
        return false;
    }

    if flags.app_window {
        return true;
    }

    if flags.tool_window {
        return false;
    }

    !flags.has_parent && !flags.has_owner
}

/// Builds [`WindowSnapshot`]s from a [`WindowSystem`].
pub struct WindowSnapshotSource<W> {
    system: W,
}

impl<W: WindowSystem> WindowSnapshotSource<W> {
    /// Wraps a window system.
    pub fn new(system: W) -> Self {
        Self { system }
    }

    /// Enumerates visible, taskbar-eligible windows with non-empty titles.
    ///
    /// A process name that cannot be resolved degrades to an empty string
    /// rather than failing the enumeration.
    ///
    /// # Errors
    ///
    /// Returns error if the OS enumeration itself fails.
    #[instrument(skip(self))]
    pub fn enumerate(&self) -> CoreResult<WindowSnapshot> {
        let candidates = self.system.top_level_windows()?;
        let candidate_count = candidates.len();

        let snapshot: WindowSnapshot = candidates
            .into_iter()
            .filter(|candidate| is_taskbar_window(&candidate.flags))
            .filter(|candidate| !candidate.title.is_empty())
            .map(|candidate| {
                let process_name = self
                    .system
                    .process_name_of(candidate.handle)
                    .unwrap_or_default();
                WindowEntry::new(
                    candidate.handle,
                    format!("{} - {}", candidate.title, process_name),
                )
            })
            .collect();

        debug!(
            candidate_count,
            window_count = snapshot.len(),
            "Window snapshot built"
        );

        Ok(snapshot)
    }

    /// Requests a foreground switch to `handle`.
    pub fn focus(&self, handle: WindowHandle) -> CoreResult<()> {
        self.system.focus(handle)
    }
}
