//! I/O error helpers.
//!
//! Turns a raw io::Error into a message with an actionable hint, either as a
//! plain string (for typed errors) or as an adapter for `.map_err(...)` in
//! anyhow code paths.
//!
//! Usage:
//!   fs::read_to_string(path).map_err(io_error_with_help("read config xml", path))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Platform hint for a raw OS error code, if we know one.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => {
            Some("permission denied; check ownership and write permission on the directory")
        }
        libc::EXDEV => Some("cross-filesystem; all files and the temp name must share one filesystem"),
        libc::EBUSY => Some("resource busy; another process holds the file"),
        libc::ENOENT => Some("path not found; it may have been moved by another process"),
        libc::EEXIST | libc::ENOTEMPTY => Some("destination already exists"),
        libc::EISDIR => Some("cannot replace a directory with a file"),
        libc::ENOTDIR => Some("cannot replace a file with a directory"),
        libc::EROFS => Some("read-only filesystem"),
        libc::ENOSPC => Some("no space left on device"),
        libc::ENAMETOOLONG => Some("file name too long"),
        libc::ELOOP => Some("too many levels of symbolic links"),
        _ => None,
    }
}

/// Common Win32 codes.
#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        17 => Some("not same device; cross-filesystem rename"),
        32 => Some("sharing violation; file is in use"),
        2 | 3 => Some("path not found"),
        80 | 183 => Some("destination already exists"),
        206 => Some("file name or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("destination already exists; use --force to overwrite"),
        _ => None,
    }
}

/// Render an io::Error with a hint and, when present, the OS code.
pub fn describe_io_error(e: &io::Error) -> String {
    let mut msg = e.to_string();
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
        }
    }
    msg
}

/// Adapter for anyhow::Result code: `.map_err(io_error_with_help("op", path))`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!("{} '{}': {}", op, path.display(), describe_io_error(&e))
}
