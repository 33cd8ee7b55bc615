//! Typed error definitions for file_rename.
//! Precondition failures are separated from mid-plan failures so the binary can
//! report them with distinct exit codes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::permute::helpers::describe_io_error;

#[derive(Debug, Error)]
pub enum RenameError {
    /// Bad mode name, wrong file count, repeated path. Nothing was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A listed path did not exist at validation time. Nothing was touched.
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    /// A rename step failed. Steps before `index` are committed and stay committed.
    #[error(
        "step {} failed renaming '{}' -> '{}': {} ({} step(s) already applied, not rolled back)",
        step_number(.index),
        .src.display(),
        .dest.display(),
        describe_io_error(.source),
        .completed
    )]
    StepFailed {
        index: usize,
        dest: PathBuf,
        src: PathBuf,
        completed: usize,
        #[source]
        source: io::Error,
    },

    #[error("operation interrupted by user before any rename was applied")]
    Interrupted,
}

fn step_number(index: &usize) -> usize {
    index + 1
}

/// Exit status for precondition failures (nothing was modified).
pub const EXIT_PRECONDITION: u8 = 2;
/// Exit status when a rename step failed mid-plan.
pub const EXIT_STEP_FAILED: u8 = 3;
/// Exit status after an interrupt received before execution.
pub const EXIT_INTERRUPTED: u8 = 130;

impl RenameError {
    /// Stable machine-readable kind, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            RenameError::InvalidArgument(_) => "invalid_argument",
            RenameError::NotFound(_) => "not_found",
            RenameError::StepFailed { .. } => "step_failed",
            RenameError::Interrupted => "interrupted",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RenameError::InvalidArgument(_) | RenameError::NotFound(_) => EXIT_PRECONDITION,
            RenameError::StepFailed { .. } => EXIT_STEP_FAILED,
            RenameError::Interrupted => EXIT_INTERRUPTED,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RenameError::InvalidArgument(msg.into())
    }
}
