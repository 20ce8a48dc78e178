//! Win32 window enumeration, inspection and focus.

use capture_deck_core::{
    CoreResult, DeckError, WindowCandidate, WindowFlags, WindowHandle, WindowSystem,
};

use std::{ffi::c_void, mem, panic::Location};

use error_location::ErrorLocation;
use tracing::{debug, instrument};
use windows::{
    Win32::{
        Foundation::{BOOL, CloseHandle, HWND, LPARAM, TRUE},
        Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute},
        System::Threading::{
            OpenProcess, PROCESS_NAME_FORMAT, PROCESS_QUERY_LIMITED_INFORMATION,
            QueryFullProcessImageNameW,
        },
        UI::WindowsAndMessaging::{
            EnumWindows, GW_OWNER, GWL_EXSTYLE, GetParent, GetWindow, GetWindowLongW,
            GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow,
            IsWindowVisible, SW_RESTORE, SW_SHOW, SetForegroundWindow, ShowWindow,
            WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
        },
    },
    core::PWSTR,
};

/// Live desktop windows through the Win32 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    /// Creates the window system.
    pub fn new() -> Self {
        Self
    }

    fn flags_of(hwnd: HWND) -> WindowFlags {
        let ex_style = unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) } as u32;

        WindowFlags {
            visible: unsafe { IsWindowVisible(hwnd) }.as_bool(),
            exists: unsafe { IsWindow(hwnd) }.as_bool(),
            cloaked: Self::is_cloaked(hwnd),
            tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
            app_window: ex_style & WS_EX_APPWINDOW.0 != 0,
            has_parent: unsafe { GetParent(hwnd) }.0 != 0,
            has_owner: unsafe { GetWindow(hwnd, GW_OWNER) }.0 != 0,
        }
    }

    fn is_cloaked(hwnd: HWND) -> bool {
        let mut cloaked: u32 = 0;
        let queried = unsafe {
            DwmGetWindowAttribute(
                hwnd,
                DWMWA_CLOAKED,
                &mut cloaked as *mut u32 as *mut c_void,
                mem::size_of::<u32>() as u32,
            )
        };

        queried.is_ok() && cloaked != 0
    }

    fn title_of(hwnd: HWND) -> String {
        let length = unsafe { GetWindowTextLengthW(hwnd) };
        if length <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u16; length as usize + 1];
        let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
        if copied <= 0 {
            return String::new();
        }

        String::from_utf16_lossy(&buffer[..copied as usize])
    }
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // lparam is the `&mut handles` from `top_level_windows`, alive for the whole EnumWindows call.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };
    handles.push(hwnd);
    TRUE
}

impl WindowSystem for Win32WindowSystem {
    #[track_caller]
    #[instrument(skip(self))]
    fn top_level_windows(&self) -> CoreResult<Vec<WindowCandidate>> {
        let mut handles: Vec<HWND> = Vec::new();

        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut handles as *mut Vec<HWND> as isize),
            )
        }
        .map_err(|e| DeckError::WindowEnumerationFailed {
            reason: format!("EnumWindows failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(handle_count = handles.len(), "Top-level windows enumerated");

        Ok(handles
            .into_iter()
            .map(|hwnd| WindowCandidate {
                handle: WindowHandle(hwnd.0),
                title: Self::title_of(hwnd),
                flags: Self::flags_of(hwnd),
            })
            .collect())
    }

    fn process_name_of(&self, handle: WindowHandle) -> Option<String> {
        let hwnd = HWND(handle.0);

        let mut pid: u32 = 0;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
        if pid == 0 {
            return None;
        }

        let process = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }.ok()?;

        let mut buffer = [0u16; 260];
        let mut length = buffer.len() as u32;
        let queried = unsafe {
            QueryFullProcessImageNameW(
                process,
                PROCESS_NAME_FORMAT(0),
                PWSTR(buffer.as_mut_ptr()),
                &mut length,
            )
        };
        let _ = unsafe { CloseHandle(process) };
        queried.ok()?;

        let path = String::from_utf16_lossy(&buffer[..length as usize]);
        path.rsplit('\\').next().map(str::to_string)
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn focus(&self, handle: WindowHandle) -> CoreResult<()> {
        let hwnd = HWND(handle.0);

        if !unsafe { IsWindow(hwnd) }.as_bool() {
            return Err(DeckError::StaleWindowHandle {
                handle,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let show = if unsafe { IsIconic(hwnd) }.as_bool() {
            SW_RESTORE
        } else {
            SW_SHOW
        };
        let _ = unsafe { ShowWindow(hwnd, show) };

        if !unsafe { SetForegroundWindow(hwnd) }.as_bool() {
            return Err(DeckError::FocusRejected {
                handle,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
