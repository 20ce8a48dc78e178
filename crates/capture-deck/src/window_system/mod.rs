#[cfg(not(target_os = "windows"))]
mod unsupported;
#[cfg(target_os = "windows")]
mod win32;

#[cfg(not(target_os = "windows"))]
pub(crate) use unsupported::UnsupportedWindowSystem as DesktopWindowSystem;
#[cfg(target_os = "windows")]
pub(crate) use win32::Win32WindowSystem as DesktopWindowSystem;
