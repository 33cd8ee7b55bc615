//! Unix implementations of platform helpers.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open log file for appending; 0600 applies only when the file is created, so
/// an administrator's adjusted permissions on an existing log are kept.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)
}

/// Flush a directory's entries (renames) to disk.
pub fn fsync_dir(dir: &Path) -> io::Result<()> {
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    File::open(dir)?.sync_all()
}

/// Write `contents` to a new file at `path` with mode 0600.
///
/// Data goes to a temp sibling first (fsynced, 0600), then is persisted with a
/// no-clobber rename: an existing `path` is an error and is left untouched.
pub fn write_new_file_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in '{}'", parent.display()))?;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o600))
        .context("chmod temp file")?;
    tmp.write_all(contents).context("write temp file")?;
    tmp.as_file().sync_all().context("fsync temp file")?;
    tmp.persist_noclobber(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persist '{}'", path.display()))?;

    let _ = fsync_dir(parent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_file_is_0600_and_not_clobbered() {
        let td = tempdir().unwrap();
        let p = td.path().join("cfg").join("config.xml");
        write_new_file_0600(&p, b"one").unwrap();
        let mode = fs::metadata(&p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);

        assert!(write_new_file_0600(&p, b"two").is_err());
        assert_eq!(fs::read_to_string(&p).unwrap(), "one");
    }

    #[test]
    fn fsync_dir_accepts_empty_relative_parent() {
        fsync_dir(Path::new("")).unwrap();
    }
}
