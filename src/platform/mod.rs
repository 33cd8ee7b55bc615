//! Platform-specific helpers.
//! Hides Unix/other differences behind one API so the rest of the crate stays
//! platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{fsync_dir, open_log_file_secure_append, write_new_file_0600};

#[cfg(not(unix))]
pub use windows::{fsync_dir, open_log_file_secure_append, write_new_file_0600};
