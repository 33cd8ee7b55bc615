//! Core library for `file_rename`.
//!
//! Permutes the names of a list of existing files (rotate, swap, flip) by
//! routing every cycle through a temporary name, so no rename ever lands on a
//! name whose content has not been moved out yet.
//!
//! The flow is validate -> plan -> apply: the whole `RenamePlan` is computed in
//! memory before the first rename, and a dry run prints exactly the steps a
//! live run would apply.

pub mod cli;
pub mod config;
pub mod errors;
pub mod input;
pub mod output;
pub mod permute;
pub mod platform;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, load_config, path_has_symlink_ancestor};
pub use errors::RenameError;
pub use permute::{
    Action, FileSystem, PermutationMode, PermuteOutcome, PermuteRequest, RenamePlan, RenameStep,
    StdFs, TempName, permute, plan_request,
};

/// Build a request from a loaded config and a file list.
pub fn request_from_config(cfg: &Config, files: Vec<std::path::PathBuf>) -> PermuteRequest {
    PermuteRequest {
        files,
        mode: cfg.default_mode,
        action: cfg.action,
        dry_run: cfg.dry_run,
        verbose: cfg.verbose || cfg.dry_run,
        force: cfg.force,
        temp_prefix: cfg.temp_prefix.clone(),
    }
}
