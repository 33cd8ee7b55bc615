//! Rename plan construction.
//!
//! A plan is an ordered list of `(dest, src)` steps built entirely in memory.
//! Every cycle is routed through the temp name: the first source moves to the
//! temp, each freed name receives the next source, and the temp's content
//! closes the cycle into the last freed name. No step ever targets a path that
//! still holds content that has not been relocated.

use std::fmt;
use std::path::{Path, PathBuf};

use super::mode::PermutationMode;
use super::temp::TempName;
use super::validate::check_count;
use crate::errors::RenameError;

/// One rename: content at `src` ends up at `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub dest: PathBuf,
    pub src: PathBuf,
}

impl RenameStep {
    fn new(dest: &Path, src: &Path) -> Self {
        Self {
            dest: dest.to_path_buf(),
            src: src.to_path_buf(),
        }
    }
}

impl fmt::Display for RenameStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.src.display(), self.dest.display())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    mode: PermutationMode,
    temp: TempName,
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    /// Build the step sequence for `files` under `mode`, using `temp` as the placeholder.
    ///
    /// Only count rules are checked here; existence and duplicates are the
    /// caller's job so this stays a pure function of its inputs.
    pub fn build(
        files: &[PathBuf],
        mode: PermutationMode,
        temp: TempName,
    ) -> Result<Self, RenameError> {
        check_count(files, mode)?;

        let t = temp.path();
        let mut steps = Vec::with_capacity(files.len() + files.len() / 2 + 1);
        match mode {
            PermutationMode::RotateLeft => push_cycle(&mut steps, t, files.iter()),
            PermutationMode::RotateRight => push_cycle(&mut steps, t, files.iter().rev()),
            PermutationMode::Swap => {
                for pair in files.chunks_exact(2) {
                    push_cycle(&mut steps, t, pair.iter());
                }
            }
            PermutationMode::Flip => {
                let n = files.len();
                for i in 0..n / 2 {
                    push_cycle(&mut steps, t, [&files[i], &files[n - 1 - i]].into_iter());
                }
            }
        }

        Ok(Self { mode, temp, steps })
    }

    pub fn mode(&self) -> PermutationMode {
        self.mode
    }

    pub fn temp(&self) -> &TempName {
        &self.temp
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when the temp holds live content after `completed` steps, i.e. a
    /// cycle was opened but its closing step never ran.
    pub fn temp_holds_data_after(&self, completed: usize) -> bool {
        let t = self.temp.path();
        let mut holds = false;
        for step in self.steps.iter().take(completed) {
            if step.dest == t {
                holds = true;
            } else if step.src == t {
                holds = false;
            }
        }
        holds
    }
}

/// Append one cycle: t <- c1, c1 <- c2, ..., c(k-1) <- ck, ck <- t.
/// A cycle of one name is the identity and emits nothing.
fn push_cycle<'a>(
    steps: &mut Vec<RenameStep>,
    t: &Path,
    cycle: impl Iterator<Item = &'a PathBuf>,
) {
    let names: Vec<&PathBuf> = cycle.collect();
    let (Some(first), Some(last)) = (names.first(), names.last()) else {
        return;
    };
    if names.len() < 2 {
        return;
    }
    steps.push(RenameStep::new(t, first));
    for w in names.windows(2) {
        steps.push(RenameStep::new(w[0], w[1]));
    }
    steps.push(RenameStep::new(last, t));
}
