// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Resolution of the directory that holds environment records.
//!
//! The first match wins:
//!
//! 1. an explicit override (`--home` or `ENV_MANAGER_HOME`),
//! 2. `$XDG_CONFIG_HOME/env-manager`,
//! 3. an `envs` directory next to the installed executable.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, HOME_ENV_VAR, Result};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// Directory name used under `$XDG_CONFIG_HOME`.
pub const XDG_SUBDIR: &str = "env-manager";

/// Directory name used next to the installation.
pub const INSTALL_SUBDIR: &str = "envs";

/// Which rule selected the store root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRootSource {
    /// Passed explicitly by the caller (e.g. `--home`).
    Explicit,
    /// Taken from `ENV_MANAGER_HOME`.
    HomeVariable,
    /// Derived from `XDG_CONFIG_HOME`.
    XdgConfigHome,
    /// Directory next to the installed executable.
    Installation,
}

impl fmt::Display for StoreRootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreRootSource::Explicit => "--home",
            StoreRootSource::HomeVariable => HOME_ENV_VAR,
            StoreRootSource::XdgConfigHome => "XDG_CONFIG_HOME",
            StoreRootSource::Installation => "installation directory",
        };
        f.write_str(label)
    }
}

/// Resolved configuration for locating the store.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_root: PathBuf,
    pub source: StoreRootSource,
}

impl Config {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::resolve(None, |key| std::env::var_os(key), install_dir.as_deref())
    }

    /// Resolve with an explicit override that takes precedence over everything.
    pub fn with_override<P: Into<PathBuf>>(store_root: P) -> Self {
        Self {
            store_root: store_root.into(),
            source: StoreRootSource::Explicit,
        }
    }

    /// Apply the resolution order against an arbitrary variable lookup.
    pub fn resolve<F>(
        explicit: Option<&Path>,
        lookup: F,
        install_dir: Option<&Path>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (store_root, source) = if let Some(explicit) = explicit {
            (explicit.to_path_buf(), StoreRootSource::Explicit)
        } else if let Some(home) = non_empty(HOME_ENV_VAR) {
            (PathBuf::from(home), StoreRootSource::HomeVariable)
        } else if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
            (
                PathBuf::from(xdg).join(XDG_SUBDIR),
                StoreRootSource::XdgConfigHome,
            )
        } else if let Some(dir) = install_dir {
            (dir.join(INSTALL_SUBDIR), StoreRootSource::Installation)
        } else {
            return Err(Error::NoStoreRoot);
        };

        tracing::debug!(root = %store_root.display(), source = %source, "resolved store root");
        Ok(Self { store_root, source })
    }
}
