//! Placeholder name used to break write hazards in a cyclic rename.
//!
//! Two ways to get one:
//! - `reserve`: exclusive-create a random file through `tempfile`, then remove
//!   it. The name was provably free at that moment. Used by live runs.
//! - `probe`: generate `<prefix><pid>.<nanos>.<seq>` candidates and check that
//!   nothing exists there. Creates nothing. Used by dry runs.
//!
//! Either way another process can claim the name before the first step runs.
//! That window is accepted; the first step will then fail (or overwrite under
//! `--force`) instead of silently losing data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_TEMP_PREFIX: &str = ".file-rename.";

const MAX_PROBES: u32 = 64;

static COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TempName(PathBuf);

impl TempName {
    /// Use an explicit path (caller guarantees it is free).
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Reserve a unique name in `dir` using the platform temp-file facility.
    ///
    /// The result is `dir` joined with the reserved file name, so a relative
    /// `dir` gives a relative temp path, the same form `probe` returns.
    /// `tempfile` itself hands back an absolute path.
    pub fn reserve(dir: &Path, prefix: &str) -> io::Result<Self> {
        let placeholder = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".tmp")
            .rand_bytes(10)
            .tempfile_in(dir)?
            .into_temp_path();
        let name = placeholder
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| io::Error::other("reserved temp path has no file name"))?;
        placeholder.close()?;
        Ok(Self(dir.join(name)))
    }

    /// Find a free name in `dir` without creating anything.
    pub fn probe(dir: &Path, prefix: &str) -> io::Result<Self> {
        for _ in 0..MAX_PROBES {
            let candidate = dir.join(candidate_name(prefix));
            match fs::symlink_metadata(&candidate) {
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self(candidate)),
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free temporary name found in '{}'", dir.display()),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Directory that receives the temp name: the parent of the first input, so the
/// placeholder lives on the same filesystem as the files being permuted.
pub fn temp_dir_for(first: &Path) -> &Path {
    first.parent().unwrap_or_else(|| Path::new(""))
}

fn candidate_name(prefix: &str) -> String {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{pid}.{nanos}.{seq}.tmp")
}
