//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Unknown fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{path_has_symlink_ancestor, resolve_config_path};
use super::types::{Config, LogLevel};
use crate::permute::helpers::io_error_with_help;
use crate::permute::{Action, DEFAULT_TEMP_PREFIX, PermutationMode};
use crate::platform::write_new_file_0600;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    temp_prefix: Option<String>,
    default_mode: Option<String>,
    action: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    verbose: Option<bool>,
}

// Accept " true " and friends; quick_xml hands text nodes over untrimmed.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, rejecting values we cannot interpret.
fn xml_to_config(parsed: XmlConfig, origin: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("log_level in '{}'", origin.display()))?;
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = non_empty(parsed.temp_prefix.as_deref()) {
        if s.contains(std::path::is_separator) {
            bail!(
                "temp_prefix in '{}' must not contain a path separator: '{s}'",
                origin.display()
            );
        }
        cfg.temp_prefix = s.to_string();
    }
    if let Some(s) = non_empty(parsed.default_mode.as_deref()) {
        cfg.default_mode = s
            .parse::<PermutationMode>()
            .with_context(|| format!("default_mode in '{}'", origin.display()))?;
    }
    if let Some(s) = non_empty(parsed.action.as_deref()) {
        cfg.action = s
            .parse::<Action>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("action in '{}'", origin.display()))?;
    }
    if let Some(v) = parsed.verbose {
        cfg.verbose = v;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(io_error_with_help("read config xml", path))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Load the effective config file, or defaults when none applies.
///
/// A file named by `--config` or `$FILE_RENAME_CONFIG` must exist; the OS
/// default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some((path, named)) = resolve_config_path(explicit) else {
        debug!("no config location available; using defaults");
        return Ok(Config::default());
    };
    if !path.exists() {
        if named {
            bail!("config file not found: {}", path.display());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}

/// Write a commented template config at `path`. Refuses to overwrite an
/// existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    let content = format!(
        "<!--\n  file-rename configuration (XML)\n\n    log_level     -> quiet | normal | info | debug\n    log_file      -> optional log file (stderr is always used)\n    temp_prefix   -> prefix of the temporary placeholder name\n    default_mode  -> rotate-left | rotate-right | swap | flip\n    action        -> rename | copy\n    verbose       -> true | false\n\n  CLI flags override these values.\n-->\n<config>\n  <log_level>{}</log_level>\n  <temp_prefix>{}</temp_prefix>\n  <default_mode>{}</default_mode>\n  <action>{}</action>\n  <verbose>false</verbose>\n</config>\n",
        LogLevel::default(),
        DEFAULT_TEMP_PREFIX,
        PermutationMode::default(),
        Action::default(),
    );

    write_new_file_0600(path, content.as_bytes())?;
    debug!(path = %path.display(), "created template config");
    Ok(())
}
