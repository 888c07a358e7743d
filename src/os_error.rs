//! Access to the calling thread's OS error indicator (`errno` on Unix, the
//! last-error value on Windows).

use std::io;

/// Current OS error code, `None` if it is 0.
pub fn current() -> Option<i32> {
    match io::Error::last_os_error().raw_os_error() {
        Some(0) | None => None,
        Some(code) => Some(code),
    }
}

/// Platform text for `code`, without std's `" (os error N)"` suffix.
pub fn describe(code: i32) -> String {
    let mut text = io::Error::from_raw_os_error(code).to_string();
    let suffix = format!(" (os error {})", code);
    if text.ends_with(&suffix) {
        text.truncate(text.len() - suffix.len());
    }
    text
}

#[cfg(any(target_os = "linux", target_os = "redox", target_os = "emscripten"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__errno_location()
}

#[cfg(any(target_os = "android", target_os = "openbsd", target_os = "netbsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__errno()
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::__error()
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
unsafe fn errno_location() -> *mut libc::c_int {
    libc::___errno()
}

/// Overwrites the indicator with `code`.
#[cfg(any(
    target_os = "linux",
    target_os = "redox",
    target_os = "emscripten",
    target_os = "android",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "solaris",
    target_os = "illumos",
))]
pub fn set(code: i32) {
    // SAFETY: errno is thread-local and the returned pointer is valid for the
    // lifetime of the calling thread.
    unsafe {
        *errno_location() = code as libc::c_int;
    }
}

#[cfg(windows)]
pub fn set(code: i32) {
    use windows::Win32::Foundation::{SetLastError, WIN32_ERROR};

    // SAFETY: SetLastError only writes the calling thread's last-error slot.
    unsafe {
        SetLastError(WIN32_ERROR(code as u32));
    }
}

#[cfg(not(any(
    windows,
    target_os = "linux",
    target_os = "redox",
    target_os = "emscripten",
    target_os = "android",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "solaris",
    target_os = "illumos",
)))]
pub fn set(_code: i32) {}
