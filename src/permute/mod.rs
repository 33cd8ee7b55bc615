//! Permutation renaming: validate, plan, then apply (or preview).
//!
//! Order of work for one invocation:
//! 1. count, duplicate and (unless dry-run) existence checks
//! 2. temp name: reserved for live runs, probed for dry runs
//! 3. plan built in memory
//! 4. steps applied in order, or printed for a dry run
//!
//! Nothing on disk changes before step 4, apart from the short-lived
//! placeholder `tempfile` creates and removes while reserving the temp name.

pub mod exec;
pub mod helpers;
pub mod mode;
pub mod plan;
pub mod temp;
pub mod validate;

use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

pub use exec::{Action, ExecOptions, FileSystem, StdFs, execute, preview};
pub use mode::PermutationMode;
pub use plan::{RenamePlan, RenameStep};
pub use temp::{DEFAULT_TEMP_PREFIX, TempName, temp_dir_for};

use crate::errors::RenameError;

/// Everything needed to permute one list of files.
#[derive(Debug, Clone)]
pub struct PermuteRequest {
    pub files: Vec<PathBuf>,
    pub mode: PermutationMode,
    pub action: Action,
    pub dry_run: bool,
    pub verbose: bool,
    pub force: bool,
    pub temp_prefix: String,
}

impl PermuteRequest {
    pub fn new(files: Vec<PathBuf>, mode: PermutationMode) -> Self {
        Self {
            files,
            mode,
            action: Action::default(),
            dry_run: false,
            verbose: false,
            force: false,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct PermuteOutcome {
    pub plan: RenamePlan,
    /// Steps actually applied (0 for a dry run).
    pub applied: usize,
}

/// Run all precondition checks. No filesystem mutation happens here.
pub fn validate_request(req: &PermuteRequest) -> Result<(), RenameError> {
    validate::check_count(&req.files, req.mode)?;
    validate::check_distinct(&req.files)?;
    if !req.dry_run {
        validate::check_exist(&req.files)?;
    }
    Ok(())
}

/// Validate and build the plan for `req`, choosing a temp name appropriate
/// for the run type.
pub fn plan_request(req: &PermuteRequest) -> Result<RenamePlan, RenameError> {
    validate_request(req)?;

    // `files` is non-empty after validation.
    let dir = temp_dir_for(&req.files[0]);
    let reserve = !req.dry_run && req.files.len() > 1;
    let chosen = if reserve {
        TempName::reserve(dir, &req.temp_prefix)
    } else {
        TempName::probe(dir, &req.temp_prefix)
    };
    let temp = chosen.map_err(|e| {
        RenameError::invalid(format!(
            "cannot choose a temporary name in '{}': {}",
            dir.display(),
            helpers::describe_io_error(&e)
        ))
    })?;
    debug!(temp = %temp.path().display(), reserved = reserve, "temporary name chosen");

    let plan = RenamePlan::build(&req.files, req.mode, temp)?;
    info!(mode = %plan.mode(), files = req.files.len(), steps = plan.len(), "plan built");
    Ok(plan)
}

/// Plan and then either print (dry run) or apply the plan.
///
/// `trace` receives the per-step lines: every line for a dry run, and one
/// line before each step when `verbose` is set. Once it reports a write error
/// no further lines are offered.
/// `before_apply` runs after planning and before the first mutation; an error
/// from it aborts with nothing changed.
pub fn permute<F: FileSystem + ?Sized>(
    req: &PermuteRequest,
    fs: &mut F,
    mut trace: impl FnMut(&str) -> io::Result<()>,
    before_apply: impl FnOnce() -> Result<(), RenameError>,
) -> Result<PermuteOutcome, RenameError> {
    let plan = plan_request(req)?;

    if req.dry_run {
        for line in preview(&plan, req.action) {
            if let Err(e) = trace(&line) {
                debug!(error = %e, "dry-run output closed");
                break;
            }
        }
        return Ok(PermuteOutcome { plan, applied: 0 });
    }

    before_apply()?;

    let opts = ExecOptions {
        action: req.action,
        force: req.force,
        verbose: req.verbose,
    };
    let applied = execute(&plan, fs, opts, trace)?;
    Ok(PermuteOutcome { plan, applied })
}
