// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use rstest::rstest;

use super::*;

fn lookup_from(vars: &[(&str, &str)]) -> Box<dyn Fn(&str) -> Option<OsString>> {
    let vars: HashMap<String, OsString> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), OsString::from(v)))
        .collect();
    Box::new(move |key| vars.get(key).cloned())
}

#[rstest]
fn test_explicit_override_wins() {
    let lookup = lookup_from(&[(HOME_ENV_VAR, "/from/var"), ("XDG_CONFIG_HOME", "/xdg")]);
    let config = Config::resolve(
        Some(Path::new("/explicit")),
        lookup,
        Some(Path::new("/opt/envwrap")),
    )
    .unwrap();
    assert_eq!(config.store_root, PathBuf::from("/explicit"));
    assert_eq!(config.source, StoreRootSource::Explicit);
}

#[rstest]
fn test_home_variable_before_xdg() {
    let lookup = lookup_from(&[(HOME_ENV_VAR, "/from/var"), ("XDG_CONFIG_HOME", "/xdg")]);
    let config = Config::resolve(None, lookup, Some(Path::new("/opt/envwrap"))).unwrap();
    assert_eq!(config.store_root, PathBuf::from("/from/var"));
    assert_eq!(config.source, StoreRootSource::HomeVariable);
}

#[rstest]
fn test_xdg_config_home_subdirectory() {
    let lookup = lookup_from(&[("XDG_CONFIG_HOME", "/xdg")]);
    let config = Config::resolve(None, lookup, Some(Path::new("/opt/envwrap"))).unwrap();
    assert_eq!(config.store_root, PathBuf::from("/xdg/env-manager"));
    assert_eq!(config.source, StoreRootSource::XdgConfigHome);
}

#[rstest]
fn test_installation_fallback() {
    let lookup = lookup_from(&[]);
    let config = Config::resolve(None, lookup, Some(Path::new("/opt/envwrap"))).unwrap();
    assert_eq!(config.store_root, PathBuf::from("/opt/envwrap/envs"));
    assert_eq!(config.source, StoreRootSource::Installation);
}

#[rstest]
fn test_empty_variables_are_ignored() {
    let lookup = lookup_from(&[(HOME_ENV_VAR, ""), ("XDG_CONFIG_HOME", "")]);
    let config = Config::resolve(None, lookup, Some(Path::new("/opt/envwrap"))).unwrap();
    assert_eq!(config.source, StoreRootSource::Installation);
}

#[rstest]
fn test_nothing_resolvable() {
    let result = Config::resolve(None, lookup_from(&[]), None);
    assert!(matches!(result, Err(Error::NoStoreRoot)));
}
