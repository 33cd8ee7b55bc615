//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Mode is chosen with `--mode NAME` or one shorthand flag; they conflict.
//! - With no FILES the list is read from stdin (`--null` for NUL records).
//! - --debug is a shorthand for --log-level debug.

use clap::{ArgGroup, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::errors::RenameError;
use crate::permute::{Action, PermutationMode};

/// Rotate, swap or flip the names of a list of files.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "file-rename",
    author,
    version,
    about = "Rotate, swap or flip file names through a temporary name without losing data"
)]
#[command(group(
    ArgGroup::new("mode_select")
        .args(["mode", "rotate_left", "rotate_right", "swap", "flip"])
        .multiple(false)
))]
pub struct Args {
    /// Files to permute, in order. Read from stdin when omitted.
    #[arg(value_name = "FILES", value_hint = ValueHint::AnyPath)]
    pub files: Vec<PathBuf>,

    /// Permutation mode: rotate-left, rotate-right, swap, flip, flip-even (or l, r, s, f).
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Shorthand for --mode rotate-left.
    #[arg(long)]
    pub rotate_left: bool,

    /// Shorthand for --mode rotate-right.
    #[arg(long)]
    pub rotate_right: bool,

    /// Shorthand for --mode swap.
    #[arg(long)]
    pub swap: bool,

    /// Shorthand for --mode flip.
    #[arg(long, alias = "flip-even")]
    pub flip: bool,

    /// Read NUL-delimited paths from stdin instead of one per line.
    #[arg(short = '0', long)]
    pub null: bool,

    /// Print each step before it is applied.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the steps that would run, change nothing (implies --verbose).
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Allow a step to overwrite an existing destination.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Copy each file then remove the source instead of renaming it.
    #[arg(long)]
    pub copy: bool,

    /// Read configuration from this XML file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print where file-rename looks for its config file, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long)]
    pub init_config: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Mode named on the command line, if any.
    ///
    /// clap keeps the shorthand flags and `--mode` mutually exclusive. The
    /// `--mode` value is parsed here so an unknown name is reported as an
    /// invalid argument like the other preconditions.
    pub fn requested_mode(&self) -> Result<Option<PermutationMode>, RenameError> {
        if self.rotate_left {
            return Ok(Some(PermutationMode::RotateLeft));
        }
        if self.rotate_right {
            return Ok(Some(PermutationMode::RotateRight));
        }
        if self.swap {
            return Ok(Some(PermutationMode::Swap));
        }
        if self.flip {
            return Ok(Some(PermutationMode::Flip));
        }
        self.mode.as_deref().map(str::parse::<PermutationMode>).transpose()
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    /// An unknown `--log-level` name is an invalid argument.
    pub fn effective_log_level(&self) -> Result<Option<LogLevel>, RenameError> {
        if self.debug {
            return Ok(Some(LogLevel::Debug));
        }
        self.log_level
            .as_deref()
            .map(|s| {
                LogLevel::parse(s).ok_or_else(|| {
                    RenameError::invalid(format!(
                        "unknown log level '{s}' (expected quiet, normal, info or debug)"
                    ))
                })
            })
            .transpose()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<(), RenameError> {
        if let Some(mode) = self.requested_mode()? {
            cfg.default_mode = mode;
        }
        if let Some(level) = self.effective_log_level()? {
            cfg.log_level = level;
        }
        if self.copy {
            cfg.action = Action::Copy;
        }
        if self.verbose {
            cfg.verbose = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
            cfg.verbose = true;
        }
        if self.force {
            cfg.force = true;
        }
        Ok(())
    }
}

pub fn parse() -> Args {
    Args::parse()
}
