//! Non-Unix implementations of platform helpers (best-effort; no ACL management).

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Open log file for appending.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Directory fsync is not available through std here; renames are left to the OS.
pub fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Write `contents` to a new file at `path` via a temp sibling and a no-clobber persist.
pub fn write_new_file_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in '{}'", parent.display()))?;
    tmp.write_all(contents).context("write temp file")?;
    tmp.as_file().sync_all().context("fsync temp file")?;
    tmp.persist_noclobber(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persist '{}'", path.display()))?;
    Ok(())
}
