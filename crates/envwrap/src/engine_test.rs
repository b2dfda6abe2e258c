// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;
use crate::{CURRENT_ENV_VAR, PROMPT_VAR, SEARCH_PATH_VAR};

const PRISTINE_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

struct Fixture {
    _tmp: TempDir,
    engine: Engine,
}

#[fixture]
fn fx() -> Fixture {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let engine = Engine::open(&Config::with_override(tmp.path())).expect("Should open store");
    Fixture { _tmp: tmp, engine }
}

fn pristine_session() -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    vars.insert(SEARCH_PATH_VAR.to_string(), PRISTINE_PATH.to_string());
    vars.insert(PROMPT_VAR.to_string(), "$ ".to_string());
    vars
}

fn activate(engine: &Engine, vars: &mut BTreeMap<String, String>, name: &str) {
    let session = Session::from_vars(vars);
    let prompt = vars.get(PROMPT_VAR).cloned();
    let plan = engine
        .activate(name, &session, prompt.as_deref())
        .expect("Should activate");
    plan.apply(vars);
}

#[rstest]
fn test_create_then_list_once(fx: Fixture) {
    fx.engine.create("myproject").unwrap();

    let listing = fx.engine.list().unwrap();
    let count = listing
        .environments
        .iter()
        .filter(|e| e.name == "myproject")
        .count();
    assert_eq!(count, 1);

    match fx.engine.create("myproject") {
        Err(Error::AlreadyExists(name)) => assert_eq!(name, "myproject"),
        other => panic!("Expected AlreadyExists, got: {:?}", other),
    }
}

#[rstest]
fn test_create_base_already_exists(fx: Fixture) {
    assert!(matches!(
        fx.engine.create(BASE_ENV_NAME),
        Err(Error::AlreadyExists(_))
    ));
}

#[rstest]
fn test_create_invalid_name(fx: Fixture) {
    assert!(matches!(
        fx.engine.create("../oops"),
        Err(Error::InvalidName { .. })
    ));
}

#[rstest]
fn test_add_path_is_idempotent(fx: Fixture) {
    fx.engine.create("dev").unwrap();

    let first = fx.engine.add_path("dev", "/opt/dev/bin").unwrap();
    let before = fx.engine.store().load("dev").unwrap();
    let second = fx.engine.add_path("dev", "/opt/dev/bin").unwrap();
    let after = fx.engine.store().load("dev").unwrap();

    assert_eq!(first, PathChange::Added("/opt/dev/bin".to_string()));
    assert_eq!(second, PathChange::Unchanged("/opt/dev/bin".to_string()));
    assert_eq!(before, after);
}

#[rstest]
fn test_add_path_appends_in_insertion_order(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    for path in ["/opt/c", "/opt/a", "/opt/b"] {
        fx.engine.add_path("dev", path).unwrap();
    }
    assert_eq!(
        fx.engine.store().load("dev").unwrap().paths,
        vec!["/opt/c", "/opt/a", "/opt/b"]
    );
}

#[rstest]
fn test_add_path_normalizes(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    let change = fx.engine.add_path("dev", "/opt/dev/./lib/../bin").unwrap();
    assert_eq!(change.path(), "/opt/dev/bin");
}

#[rstest]
fn test_add_then_remove_round_trip(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.add_path("dev", "/opt/keep").unwrap();
    let before = fx.engine.store().load("dev").unwrap();

    fx.engine.add_path("dev", "/opt/temp").unwrap();
    fx.engine.remove_path("dev", "/opt/temp").unwrap();

    assert_eq!(fx.engine.store().load("dev").unwrap(), before);
}

#[rstest]
fn test_remove_missing_path(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    match fx.engine.remove_path("dev", "/opt/nothing") {
        Err(Error::PathNotFound { path, name }) => {
            assert_eq!(path, "/opt/nothing");
            assert_eq!(name, "dev");
        }
        other => panic!("Expected PathNotFound, got: {:?}", other),
    }
}

#[rstest]
fn test_path_ops_on_unknown_env(fx: Fixture) {
    assert!(matches!(
        fx.engine.add_path("nope", "/opt/a"),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        fx.engine.remove_path("nope", "/opt/a"),
        Err(Error::NotFound(_))
    ));
}

#[rstest]
fn test_delete_base_is_protected(fx: Fixture) {
    assert!(matches!(
        fx.engine.delete(BASE_ENV_NAME),
        Err(Error::Protected(_))
    ));
}

#[rstest]
fn test_delete_unknown(fx: Fixture) {
    assert!(matches!(fx.engine.delete("nope"), Err(Error::NotFound(_))));
}

#[rstest]
fn test_delete_current_resets_to_base(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.store().set_current("dev").unwrap();

    assert!(fx.engine.delete("dev").unwrap());
    assert!(!fx.engine.store().exists("dev"));
    let raw = std::fs::read_to_string(fx.engine.store().current_pointer_path()).unwrap();
    assert_eq!(raw, "base\n");
    assert_eq!(fx.engine.current().unwrap(), BASE_ENV_NAME);
}

#[rstest]
fn test_delete_other_keeps_current(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.create("scratch").unwrap();
    fx.engine.store().set_current("dev").unwrap();

    assert!(!fx.engine.delete("scratch").unwrap());
    assert_eq!(fx.engine.current().unwrap(), "dev");
}

#[rstest]
fn test_clone_creates_target(fx: Fixture) {
    fx.engine.create("src").unwrap();
    fx.engine.add_path("src", "/opt/a").unwrap();

    assert_eq!(
        fx.engine.clone_env("src", "copy").unwrap(),
        CloneOutcome::Created
    );
    assert_eq!(fx.engine.store().load("copy").unwrap().paths, vec!["/opt/a"]);
}

#[rstest]
fn test_clone_overwrites_target_exactly(fx: Fixture) {
    fx.engine.create("src").unwrap();
    fx.engine.add_path("src", "/opt/a").unwrap();
    fx.engine.add_path("src", "/opt/b").unwrap();
    fx.engine.create("dst").unwrap();
    fx.engine.add_path("dst", "/opt/old").unwrap();

    assert_eq!(
        fx.engine.clone_env("src", "dst").unwrap(),
        CloneOutcome::Overwritten
    );

    let store = fx.engine.store();
    let src_record = std::fs::read_to_string(store.record_path("src")).unwrap();
    let dst_record = std::fs::read_to_string(store.record_path("dst")).unwrap();
    assert_eq!(dst_record, src_record.replace("\"src\"", "\"dst\""));
    assert_eq!(store.load("dst").unwrap().paths, vec!["/opt/a", "/opt/b"]);
}

#[rstest]
fn test_clone_unknown_source(fx: Fixture) {
    assert!(matches!(
        fx.engine.clone_env("nope", "dst"),
        Err(Error::NotFound(_))
    ));
    assert!(!fx.engine.store().exists("dst"));
}

#[rstest]
fn test_clone_into_base_is_protected(fx: Fixture) {
    fx.engine.create("src").unwrap();
    assert!(matches!(
        fx.engine.clone_env("src", BASE_ENV_NAME),
        Err(Error::Protected(_))
    ));
}

#[rstest]
fn test_rename_moves_record_and_pointer(fx: Fixture) {
    fx.engine.create("old").unwrap();
    fx.engine.add_path("old", "/opt/a").unwrap();
    fx.engine.store().set_current("old").unwrap();

    fx.engine.rename("old", "new").unwrap();

    assert!(!fx.engine.store().exists("old"));
    assert_eq!(fx.engine.store().load("new").unwrap().paths, vec!["/opt/a"]);
    assert_eq!(fx.engine.current().unwrap(), "new");
}

#[rstest]
fn test_rename_errors(fx: Fixture) {
    fx.engine.create("a").unwrap();
    fx.engine.create("b").unwrap();

    assert!(matches!(fx.engine.rename("a", "b"), Err(Error::AlreadyExists(_))));
    assert!(matches!(fx.engine.rename("nope", "c"), Err(Error::NotFound(_))));
    assert!(matches!(
        fx.engine.rename(BASE_ENV_NAME, "c"),
        Err(Error::Protected(_))
    ));
    assert!(matches!(
        fx.engine.rename("a", BASE_ENV_NAME),
        Err(Error::Protected(_))
    ));
}

#[rstest]
fn test_list_marks_current(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.add_path("dev", "/opt/a").unwrap();
    fx.engine.store().set_current("dev").unwrap();

    let listing = fx.engine.list().unwrap();
    let current: Vec<_> = listing
        .environments
        .iter()
        .filter(|e| e.is_current)
        .map(|e| (e.name.as_str(), e.path_count))
        .collect();
    assert_eq!(current, vec![("dev", 1)]);
}

#[rstest]
fn test_activate_unknown(fx: Fixture) {
    let session = Session::from_vars(&pristine_session());
    assert!(matches!(
        fx.engine.activate("nope", &session, None),
        Err(Error::NotFound(_))
    ));
    assert_eq!(fx.engine.current().unwrap(), BASE_ENV_NAME);
}

#[rstest]
fn test_activate_twice_has_no_duplicates(fx: Fixture) {
    fx.engine.create("a").unwrap();
    fx.engine.add_path("a", "/opt/a/bin").unwrap();
    let mut vars = pristine_session();

    activate(&fx.engine, &mut vars, "a");
    activate(&fx.engine, &mut vars, "a");

    let entries = crate::search_path::split(&vars[SEARCH_PATH_VAR]);
    let mut unique = entries.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(entries.len(), unique.len());
    assert_eq!(vars[PROMPT_VAR], "[a] $ ");
}

#[rstest]
fn test_activate_cycle_restores_first_path(fx: Fixture) {
    fx.engine.create("a").unwrap();
    fx.engine.add_path("a", "/opt/a/bin").unwrap();
    fx.engine.create("b").unwrap();
    fx.engine.add_path("b", "/opt/b/bin").unwrap();
    let mut vars = pristine_session();

    activate(&fx.engine, &mut vars, "a");
    let first = vars[SEARCH_PATH_VAR].clone();
    activate(&fx.engine, &mut vars, "b");
    activate(&fx.engine, &mut vars, "a");

    assert_eq!(vars[SEARCH_PATH_VAR], first);
}

#[rstest]
fn test_myproject_scenario(fx: Fixture) {
    fx.engine.create("myproject").unwrap();
    fx.engine.add_path("myproject", "/opt/myproject/bin").unwrap();
    let mut vars = pristine_session();

    activate(&fx.engine, &mut vars, "myproject");
    let entries = crate::search_path::split(&vars[SEARCH_PATH_VAR]);
    assert_eq!(entries.last().map(String::as_str), Some("/opt/myproject/bin"));
    assert_eq!(
        entries.iter().filter(|e| *e == "/opt/myproject/bin").count(),
        1
    );
    assert_eq!(fx.engine.current().unwrap(), "myproject");

    let session = Session::from_vars(&vars);
    let plan = fx
        .engine
        .deactivate(&session, vars.get(PROMPT_VAR).map(String::as_str))
        .unwrap();
    plan.apply(&mut vars);

    assert!(!vars[SEARCH_PATH_VAR].contains("/opt/myproject/bin"));
    assert_eq!(vars[SEARCH_PATH_VAR], PRISTINE_PATH);
    assert_eq!(fx.engine.current().unwrap(), BASE_ENV_NAME);
    assert_eq!(vars[CURRENT_ENV_VAR], BASE_ENV_NAME);
}

#[rstest]
fn test_reset_scenario(fx: Fixture) {
    for path in ["/opt/one", "/opt/two", "/opt/three"] {
        fx.engine.add_path(BASE_ENV_NAME, path).unwrap();
    }
    let mut vars = pristine_session();
    activate(&fx.engine, &mut vars, BASE_ENV_NAME);
    assert_ne!(vars[SEARCH_PATH_VAR], PRISTINE_PATH);

    fx.engine.reset().unwrap();
    assert!(fx.engine.store().load(BASE_ENV_NAME).unwrap().paths.is_empty());
    assert_eq!(fx.engine.current().unwrap(), BASE_ENV_NAME);

    activate(&fx.engine, &mut vars, BASE_ENV_NAME);
    assert_eq!(vars[SEARCH_PATH_VAR], PRISTINE_PATH);
}

#[rstest]
fn test_reset_leaves_other_environments(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.add_path("dev", "/opt/dev").unwrap();
    fx.engine.store().set_current("dev").unwrap();

    fx.engine.reset().unwrap();

    assert_eq!(fx.engine.current().unwrap(), BASE_ENV_NAME);
    assert_eq!(fx.engine.store().load("dev").unwrap().paths, vec!["/opt/dev"]);
}

#[rstest]
fn test_session_current_overrides_pointer(fx: Fixture) {
    fx.engine.create("dev").unwrap();
    fx.engine.create("other").unwrap();
    fx.engine.store().set_current("other").unwrap();

    let mut vars = pristine_session();
    vars.insert(CURRENT_ENV_VAR.to_string(), "dev".to_string());
    assert_eq!(
        fx.engine.session_current(&Session::from_vars(&vars)).unwrap(),
        "dev"
    );

    vars.insert(CURRENT_ENV_VAR.to_string(), "deleted".to_string());
    assert_eq!(
        fx.engine.session_current(&Session::from_vars(&vars)).unwrap(),
        "other"
    );
}
