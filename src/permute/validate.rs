//! Preconditions checked before any mutation.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::mode::PermutationMode;
use crate::errors::RenameError;

/// File-count rules: at least one file, and an even count for pairwise modes.
pub fn check_count(files: &[PathBuf], mode: PermutationMode) -> Result<(), RenameError> {
    if files.is_empty() {
        return Err(RenameError::invalid("no files given"));
    }
    if mode.requires_even() && files.len() % 2 != 0 {
        return Err(RenameError::invalid(format!(
            "even number of files required for {mode} (got {})",
            files.len()
        )));
    }
    Ok(())
}

/// Reject repeated entries. Two spellings of one file ("a" and "./a", or a
/// symlinked directory) are caught through their canonical form when it exists.
pub fn check_distinct(files: &[PathBuf]) -> Result<(), RenameError> {
    let mut lexical: HashSet<&Path> = HashSet::with_capacity(files.len());
    let mut canonical: HashSet<PathBuf> = HashSet::with_capacity(files.len());
    for f in files {
        if !lexical.insert(f.as_path()) {
            return Err(duplicate(f));
        }
        if let Some(real) = canonical_entry(f)
            && !canonical.insert(real)
        {
            return Err(duplicate(f));
        }
    }
    Ok(())
}

/// Fail on the first path that does not exist. Dangling symlinks count as present.
pub fn check_exist(files: &[PathBuf]) -> Result<(), RenameError> {
    for f in files {
        match fs::symlink_metadata(f) {
            Ok(_) => debug!(path = %f.display(), "input exists"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RenameError::NotFound(f.clone()));
            }
            Err(e) => {
                return Err(RenameError::invalid(format!(
                    "cannot stat '{}': {e}",
                    f.display()
                )));
            }
        }
    }
    Ok(())
}

/// Canonicalize the parent and keep the final component as-is, so a symlink
/// input is identified by its own location rather than its target.
fn canonical_entry(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent_real = dunce::canonicalize(parent).ok()?;
    Some(parent_real.join(name))
}

fn duplicate(f: &Path) -> RenameError {
    RenameError::invalid(format!("duplicate path: {}", f.display()))
}
