//! Config lookup through the process environment; serialized because env is global.

use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use file_rename::config::{CONFIG_ENV, resolve_config_path};
use file_rename::{Action, LogLevel, PermutationMode, load_config};

#[test]
#[serial]
fn env_override_is_loaded() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <log_level>debug</log_level>\n  <default_mode>rotate-right</default_mode>\n  <action>copy</action>\n  <temp_prefix>.swap-</temp_prefix>\n</config>\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg_path);
    }
    let (resolved, named) = resolve_config_path(None).unwrap();
    let cfg = load_config(None);
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(resolved, cfg_path);
    assert!(named);
    let cfg = cfg.unwrap();
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.default_mode, PermutationMode::RotateRight);
    assert_eq!(cfg.action, Action::Copy);
    assert_eq!(cfg.temp_prefix, ".swap-");
}

#[test]
#[serial]
fn env_pointing_at_missing_file_is_an_error() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, td.path().join("absent.xml"));
    }
    let res = load_config(None);
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    assert!(res.is_err());
}

#[test]
#[serial]
fn explicit_argument_beats_env() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.xml");
    fs::write(&a, "<config><verbose>true</verbose></config>").unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, td.path().join("absent.xml"));
    }
    let res = load_config(Some(&a));
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    assert!(res.unwrap().verbose);
}
