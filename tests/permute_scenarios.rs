//! End-to-end permutations on scratch directories through the library API.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use file_rename::permute::{ExecOptions, execute, preview};
use file_rename::{
    Action, FileSystem, PermutationMode, PermuteRequest, RenameError, RenamePlan, StdFs, TempName,
    permute, plan_request,
};

/// Real filesystem that also records every call in order.
#[derive(Default)]
struct Recording {
    inner: StdFs,
    calls: Vec<String>,
}

impl FileSystem for Recording {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
    fn rename(&mut self, src: &Path, dest: &Path) -> io::Result<()> {
        self.calls
            .push(format!("rename '{}' -> '{}'", src.display(), dest.display()));
        self.inner.rename(src, dest)
    }
    fn copy_then_remove(&mut self, src: &Path, dest: &Path) -> io::Result<()> {
        self.calls
            .push(format!("copy '{}' -> '{}'", src.display(), dest.display()));
        self.inner.copy_then_remove(src, dest)
    }
}

fn scratch(names: &[&str]) -> (assert_fs::TempDir, Vec<PathBuf>) {
    let dir = assert_fs::TempDir::new().unwrap();
    let files = names
        .iter()
        .map(|n| {
            let c = dir.child(n);
            c.write_str(&n.to_uppercase()).unwrap();
            c.path().to_path_buf()
        })
        .collect();
    (dir, files)
}

fn contents(files: &[PathBuf]) -> Vec<String> {
    files.iter().map(|f| fs::read_to_string(f).unwrap()).collect()
}

fn entry_names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

fn run(files: &[PathBuf], mode: PermutationMode) -> Result<usize, RenameError> {
    let req = PermuteRequest::new(files.to_vec(), mode);
    permute(&req, &mut StdFs, |_| Ok(()), || Ok(())).map(|o| o.applied)
}

#[test]
fn abcd_scenario_for_each_mode() {
    let cases = [
        (PermutationMode::RotateLeft, ["B", "C", "D", "A"]),
        (PermutationMode::RotateRight, ["D", "A", "B", "C"]),
        (PermutationMode::Swap, ["B", "A", "D", "C"]),
        (PermutationMode::Flip, ["D", "C", "B", "A"]),
    ];
    for (mode, expected) in cases {
        let (dir, files) = scratch(&["a", "b", "c", "d"]);
        run(&files, mode).unwrap();
        assert_eq!(contents(&files), expected, "mode {mode}");
        assert_eq!(entry_names(dir.path()), ["a", "b", "c", "d"], "no temp left behind");
    }
}

#[test]
fn rotate_right_undoes_rotate_left() {
    let (_dir, files) = scratch(&["one", "two", "three", "four", "five"]);
    let before = contents(&files);
    run(&files, PermutationMode::RotateLeft).unwrap();
    assert_ne!(contents(&files), before);
    run(&files, PermutationMode::RotateRight).unwrap();
    assert_eq!(contents(&files), before);
}

#[test]
fn swap_and_flip_are_involutions() {
    for mode in [PermutationMode::Swap, PermutationMode::Flip] {
        let (_dir, files) = scratch(&["p", "q", "r", "s", "t", "u"]);
        let before = contents(&files);
        run(&files, mode).unwrap();
        assert_ne!(contents(&files), before);
        run(&files, mode).unwrap();
        assert_eq!(contents(&files), before, "mode {mode}");
    }
}

#[test]
fn odd_count_for_pairwise_modes_touches_nothing() {
    for mode in [PermutationMode::Swap, PermutationMode::Flip] {
        let (dir, files) = scratch(&["a", "b", "c"]);
        let err = run(&files, mode).unwrap_err();
        assert!(matches!(err, RenameError::InvalidArgument(_)), "got {err:?}");
        assert_eq!(contents(&files), ["A", "B", "C"]);
        assert_eq!(entry_names(dir.path()), ["a", "b", "c"]);
    }
}

#[test]
fn missing_input_fails_before_any_rename() {
    let (dir, mut files) = scratch(&["a", "b", "c"]);
    files.insert(1, dir.path().join("ghost"));
    let mut rec = Recording::default();
    let req = PermuteRequest::new(files.clone(), PermutationMode::RotateLeft);
    let err = permute(&req, &mut rec, |_| Ok(()), || Ok(())).unwrap_err();
    match err {
        RenameError::NotFound(p) => assert_eq!(p, dir.path().join("ghost")),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(rec.calls.is_empty());
    assert_eq!(entry_names(dir.path()), ["a", "b", "c"]);
}

#[test]
fn dry_run_trace_matches_live_calls() {
    let (_dir, files) = scratch(&["a", "b", "c", "d"]);
    let req = PermuteRequest::new(files.clone(), PermutationMode::Flip);
    let plan = plan_request(&req).unwrap();

    let dry = preview(&plan, Action::Rename);
    let mut rec = Recording::default();
    let mut live_trace = Vec::new();
    let opts = ExecOptions {
        verbose: true,
        ..Default::default()
    };
    execute(&plan, &mut rec, opts, |l| {
        live_trace.push(l.to_string());
        Ok(())
    })
    .unwrap();

    assert_eq!(dry, rec.calls);
    assert_eq!(dry, live_trace);
    assert_eq!(contents(&files), ["D", "C", "B", "A"]);
}

#[test]
fn dry_run_changes_nothing_and_tolerates_missing_files() {
    let (dir, mut files) = scratch(&["a", "b"]);
    files.push(dir.path().join("not-yet"));
    let mut req = PermuteRequest::new(files, PermutationMode::RotateLeft);
    req.dry_run = true;
    let mut lines = Vec::new();
    let mut rec = Recording::default();
    let outcome = permute(
        &req,
        &mut rec,
        |l| {
            lines.push(l.to_string());
            Ok(())
        },
        || Ok(()),
    )
    .unwrap();
    assert_eq!(outcome.applied, 0);
    assert_eq!(lines.len(), 4);
    assert!(rec.calls.is_empty());
    assert_eq!(entry_names(dir.path()), ["a", "b"]);
}

#[test]
fn force_lets_a_step_replace_an_existing_entry() {
    let (dir, files) = scratch(&["a", "b", "c"]);
    dir.child("occupied").write_str("OLD").unwrap();
    let temp = TempName::fixed(dir.path().join("occupied"));
    let plan = RenamePlan::build(&files, PermutationMode::RotateRight, temp).unwrap();

    let blocked = execute(&plan, &mut StdFs, ExecOptions::default(), |_| Ok(())).unwrap_err();
    assert!(matches!(blocked, RenameError::StepFailed { index: 0, completed: 0, .. }));
    assert_eq!(contents(&files), ["A", "B", "C"]);

    let opts = ExecOptions {
        force: true,
        ..Default::default()
    };
    let applied = execute(&plan, &mut StdFs, opts, |_| Ok(())).unwrap();
    assert_eq!(applied, plan.len());
    assert_eq!(contents(&files), ["C", "A", "B"]);
    assert_eq!(entry_names(dir.path()), ["a", "b", "c"]);
}

#[test]
fn copy_action_gives_same_result() {
    let (dir, files) = scratch(&["a", "b", "c"]);
    let mut req = PermuteRequest::new(files.clone(), PermutationMode::RotateLeft);
    req.action = Action::Copy;
    let mut rec = Recording::default();
    permute(&req, &mut rec, |_| Ok(()), || Ok(())).unwrap();
    assert_eq!(contents(&files), ["B", "C", "A"]);
    assert!(rec.calls.iter().all(|c| c.starts_with("copy ")));
    assert_eq!(entry_names(dir.path()), ["a", "b", "c"]);
}

#[test]
fn mid_plan_failure_is_not_rolled_back() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("a").write_str("A").unwrap();
    dir.child("sub").create_dir_all().unwrap();
    let files = vec![dir.path().join("a"), dir.path().join("sub")];

    // Copying a directory fails, so step 2 (a <- sub) fails after t <- a committed.
    let mut req = PermuteRequest::new(files, PermutationMode::RotateLeft);
    req.action = Action::Copy;
    let err = permute(&req, &mut StdFs, |_| Ok(()), || Ok(())).unwrap_err();
    match err {
        RenameError::StepFailed { index, completed, src, .. } => {
            assert_eq!(index, 1);
            assert_eq!(completed, 1);
            assert_eq!(src, dir.path().join("sub"));
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert!(!dir.path().join("a").exists());
    let names = entry_names(dir.path());
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names.iter().any(|n| n.starts_with(".file-rename.")), "{names:?}");
}

#[test]
fn interrupt_before_apply_changes_nothing() {
    let (dir, files) = scratch(&["a", "b"]);
    let req = PermuteRequest::new(files.clone(), PermutationMode::Swap);
    let err = permute(&req, &mut StdFs, |_| Ok(()), || Err(RenameError::Interrupted)).unwrap_err();
    assert!(matches!(err, RenameError::Interrupted));
    assert_eq!(contents(&files), ["A", "B"]);
    assert_eq!(entry_names(dir.path()), ["a", "b"]);
}

#[test]
fn duplicate_input_rejected() {
    let (_dir, mut files) = scratch(&["a", "b"]);
    files.push(files[0].clone());
    let err = run(&files, PermutationMode::RotateLeft).unwrap_err();
    assert!(err.to_string().contains("duplicate path"));
    assert_eq!(contents(&files[..2]), ["A", "B"]);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_permuted_as_a_link() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("real").write_str("R").unwrap();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(dir.path().join("nowhere"), &link).unwrap();
    let files = vec![dir.path().join("real"), link.clone()];
    run(&files, PermutationMode::Swap).unwrap();
    assert_eq!(fs::read_to_string(&link).unwrap(), "R");
    assert!(fs::symlink_metadata(dir.path().join("real")).unwrap().file_type().is_symlink());
}
