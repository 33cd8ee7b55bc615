//! Plan execution.
//! Steps run strictly in order and stop at the first failure. Nothing is
//! rolled back: the error reports how many steps were committed.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::plan::{RenamePlan, RenameStep};
use crate::errors::RenameError;
use crate::platform::fsync_dir;

/// How a single step moves content from `src` to `dest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Atomic same-filesystem rename.
    #[default]
    Rename,
    /// Copy content to `dest`, then remove `src`. Only when explicitly requested.
    Copy,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rename" | "move" | "mv" => Some(Action::Rename),
            "copy" | "cp" => Some(Action::Copy),
            _ => None,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Action::Rename => "rename",
            Action::Copy => "copy",
        }
    }

    /// Run this action for one step against `fs`.
    pub fn execute<F: FileSystem + ?Sized>(self, fs: &mut F, src: &Path, dest: &Path) -> io::Result<()> {
        match self {
            Action::Rename => fs.rename(src, dest),
            Action::Copy => fs.copy_then_remove(src, dest),
        }
    }

    /// The line printed for a step in verbose and dry-run output.
    pub fn trace_line(self, step: &RenameStep) -> String {
        format!("{} {}", self.verb(), step)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl FromStr for Action {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid action: '{s}' (expected rename or copy)"))
    }
}

/// Filesystem primitives the executor needs.
pub trait FileSystem {
    /// True if anything (including a dangling symlink) occupies `path`.
    fn exists(&self, path: &Path) -> bool;
    fn rename(&mut self, src: &Path, dest: &Path) -> io::Result<()>;
    fn copy_then_remove(&mut self, src: &Path, dest: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFs;

impl FileSystem for StdFs {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn rename(&mut self, src: &Path, dest: &Path) -> io::Result<()> {
        fs::rename(src, dest)?;
        // Persist the directory entry change; a failed fsync must not turn a
        // committed rename into a reported failure.
        if let Some(parent) = dest.parent() {
            let _ = fsync_dir(parent);
        }
        Ok(())
    }

    fn copy_then_remove(&mut self, src: &Path, dest: &Path) -> io::Result<()> {
        fs::copy(src, dest)?;
        fs::remove_file(src)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    pub action: Action,
    /// Allow a step to replace an existing destination.
    pub force: bool,
    /// Emit a trace line per step before applying it.
    pub verbose: bool,
}

/// Apply every step of `plan` in order. Returns the number of steps applied.
///
/// `trace` receives one line per step (only when `opts.verbose`) before the
/// step is attempted, so the output shows which prefix was committed. A trace
/// write error (closed pipe) ends the trace, not the plan.
pub fn execute<F: FileSystem + ?Sized>(
    plan: &RenamePlan,
    fs: &mut F,
    opts: ExecOptions,
    mut trace: impl FnMut(&str) -> io::Result<()>,
) -> Result<usize, RenameError> {
    let total = plan.len();
    debug!(mode = %plan.mode(), steps = total, temp = %plan.temp().path().display(), "executing plan");

    let mut tracing_steps = opts.verbose;
    for (index, step) in plan.steps().iter().enumerate() {
        if tracing_steps && let Err(e) = trace(&opts.action.trace_line(step)) {
            warn!(step = index + 1, error = %e, "step trace output closed; continuing without it");
            tracing_steps = false;
        }

        let outcome = if !opts.force && fs.exists(&step.dest) {
            Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination '{}' already exists", step.dest.display()),
            ))
        } else {
            opts.action.execute(fs, &step.src, &step.dest)
        };

        match outcome {
            Ok(()) => {
                info!(
                    step = index + 1,
                    of = total,
                    action = %opts.action,
                    src = %step.src.display(),
                    dest = %step.dest.display(),
                    "applied"
                );
            }
            Err(source) => {
                warn!(
                    step = index + 1,
                    of = total,
                    src = %step.src.display(),
                    dest = %step.dest.display(),
                    error = %source,
                    "step failed; halting"
                );
                if plan.temp_holds_data_after(index) {
                    warn!(
                        temp = %plan.temp().path().display(),
                        "temporary name still holds file content"
                    );
                }
                return Err(RenameError::StepFailed {
                    index,
                    dest: step.dest.clone(),
                    src: step.src.clone(),
                    completed: index,
                    source,
                });
            }
        }
    }
    Ok(total)
}

/// The lines a verbose run of `plan` would print, in order. Used for dry runs.
pub fn preview(plan: &RenamePlan, action: Action) -> Vec<String> {
    plan.steps().iter().map(|s| action.trace_line(s)).collect()
}
