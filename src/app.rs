//! Application orchestrator.
//! Loads/merges config, initializes logging, gathers the file list, installs
//! the interrupt handler, and runs the permutation.

use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use file_rename::cli::Args;
use file_rename::config::{create_template_config, resolve_config_path};
use file_rename::output as out;
use file_rename::{RenameError, StdFs, input, load_config, permute, request_from_config, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle the config-file commands before logging init
    if args.print_config {
        return print_config(&args);
    }
    if args.init_config {
        let (path, _) = resolve_config_path(args.config.as_deref())
            .context("could not determine a config location")?;
        create_template_config(&path)?;
        out::print_success(&format!("template config written to {}", path.display()));
        return Ok(());
    }

    // XML first, CLI wins.
    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg)?;

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(?cfg, "effective configuration");

    let result = (|| -> Result<()> {
        let files = gather_files(&args)?;
        // Installed only now: while the list is read from stdin, Ctrl-C keeps
        // its default behaviour and ends the process.
        ctrlc::set_handler(|| {
            shutdown::request();
        })
        .context("install interrupt handler")?;
        let req = request_from_config(&cfg, files);
        let mut fs = StdFs;
        let outcome = permute(&req, &mut fs, out::print_user, shutdown::check_before_apply)?;
        if req.dry_run {
            info!(steps = outcome.plan.len(), "dry-run: nothing renamed");
        } else {
            info!(mode = %outcome.plan.mode(), applied = outcome.applied, "permutation complete");
            if shutdown::is_requested() {
                warn!("interrupt received during execution; the plan was completed");
            }
        }
        Ok(())
    })();

    if let Err(e) = &result {
        match e.downcast_ref::<RenameError>() {
            Some(re) => debug!(code = re.code(), error = %re, "file-rename failed"),
            None => debug!(error = %format!("{e:#}"), "file-rename failed"),
        }
    }

    // Flush the file appender before returning.
    drop(guard);
    result
}

/// Positional files, or the list on stdin when none were given.
fn gather_files(args: &Args) -> Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        return Ok(args.files.clone());
    }
    if atty::is(atty::Stream::Stdin) {
        return Err(RenameError::InvalidArgument(
            "no files given (pass FILES or pipe a list on stdin)".into(),
        )
        .into());
    }
    let files = input::read_paths(io::stdin().lock(), args.null).context("read file list from stdin")?;
    debug!(count = files.len(), null = args.null, "read file list from stdin");
    Ok(files)
}

fn print_config(args: &Args) -> Result<()> {
    match resolve_config_path(args.config.as_deref()) {
        Some((path, named)) => {
            let how = if named { "explicit" } else { "default" };
            out::print_info(&format!("config file ({how}): {}", path.display()));
            if path.exists() {
                out::print_info("the file exists");
            } else {
                out::print_info("no file there yet; run with --init-config to create a template");
            }
        }
        None => out::print_warn("could not determine a config location"),
    }
    Ok(())
}
