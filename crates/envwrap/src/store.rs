// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Durable storage for environment records and the current-environment pointer.
//!
//! Each environment is one `<name>.json` file in the store root. The current
//! environment is a plain text file named [`CURRENT_POINTER_FILENAME`]. Every
//! write replaces the whole file through a temporary sibling and a rename, so
//! a reader never observes a partially written record.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::environment::validate_name;
use crate::{
    BASE_ENV_NAME, CURRENT_POINTER_FILENAME, Environment, Error, RECORD_EXTENSION, Result,
};

#[cfg(test)]
#[path = "./store_test.rs"]
mod store_test;

/// Summary of one environment as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSummary {
    pub name: String,
    pub path_count: usize,
    pub is_current: bool,
}

/// Result of scanning the store.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Name of the current environment.
    pub current: String,

    /// Readable environments, `base` first and the rest by name.
    pub environments: Vec<EnvironmentSummary>,

    /// Record files that could not be read, parsed or named.
    pub invalid: Vec<PathBuf>,
}

/// Handle to an on-disk environment store.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store at `root`, creating it and the `base` record if needed.
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let store = Self { root: root.into() };

        std::fs::create_dir_all(&store.root).map_err(|e| Error::WriteFailed {
            path: store.root.clone(),
            error: e,
        })?;

        if !store.exists(BASE_ENV_NAME) {
            tracing::debug!(root = %store.root.display(), "initializing base environment");
            store.save(&Environment::base())?;
        }

        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the record for `name`.
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{RECORD_EXTENSION}"))
    }

    /// Location of the current-environment pointer.
    pub fn current_pointer_path(&self) -> PathBuf {
        self.root.join(CURRENT_POINTER_FILENAME)
    }

    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.record_path(name).is_file()
    }

    /// Load the record for `name`.
    pub fn load(&self, name: &str) -> Result<Environment> {
        validate_name(name)?;
        let path = self.record_path(name);

        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(name.to_string()));
            }
            Err(e) => return Err(Error::ReadFailed { path, error: e }),
        };

        let mut env: Environment =
            serde_json::from_str(&json).map_err(|e| Error::InvalidRecord {
                path: path.clone(),
                error: e,
            })?;

        // The file name is authoritative.
        if env.name != name {
            tracing::warn!(
                file = %path.display(),
                recorded = %env.name,
                "environment record name does not match its file name"
            );
            env.name = name.to_string();
        }
        env.dedup_paths();

        tracing::trace!(env = name, paths = env.paths.len(), "loaded environment");
        Ok(env)
    }

    /// Persist `env`, replacing any previous record.
    pub fn save(&self, env: &Environment) -> Result<()> {
        validate_name(&env.name)?;
        let path = self.record_path(&env.name);

        let mut json = serde_json::to_string_pretty(env).map_err(|e| Error::InvalidRecord {
            path: path.clone(),
            error: e,
        })?;
        json.push('\n');

        write_atomic(&path, json.as_bytes())?;
        tracing::debug!(env = %env.name, file = %path.display(), "saved environment");
        Ok(())
    }

    /// Delete the record for `name`.
    pub fn remove(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if name == BASE_ENV_NAME {
            return Err(Error::Protected(name.to_string()));
        }

        let path = self.record_path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(env = name, file = %path.display(), "removed environment");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(name.to_string()))
            }
            Err(e) => Err(Error::WriteFailed { path, error: e }),
        }
    }

    /// Names of all environments, `base` first and the rest sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.scan()?.0)
    }

    /// Summarize every environment, collecting unusable records separately.
    pub fn list(&self) -> Result<Listing> {
        let current = self.get_current()?;
        let (names, mut invalid) = self.scan()?;
        let mut listing = Listing {
            current: current.clone(),
            ..Default::default()
        };

        for name in names {
            match self.load(&name) {
                Ok(env) => listing.environments.push(EnvironmentSummary {
                    is_current: env.name == current,
                    path_count: env.paths.len(),
                    name: env.name,
                }),
                Err(Error::InvalidRecord { path, error }) => {
                    tracing::warn!(file = %path.display(), %error, "skipping invalid environment file");
                    invalid.push(path);
                }
                Err(Error::ReadFailed { path, error }) => {
                    tracing::warn!(file = %path.display(), %error, "skipping unreadable environment file");
                    invalid.push(path);
                }
                Err(err) => return Err(err),
            }
        }

        invalid.sort();
        listing.invalid = invalid;
        Ok(listing)
    }

    /// Valid environment names in the store, plus record files whose names
    /// cannot be environment names.
    fn scan(&self) -> Result<(Vec<String>, Vec<PathBuf>)> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| Error::ReadFailed {
            path: self.root.clone(),
            error: e,
        })?;

        let mut names = Vec::new();
        let mut invalid = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(BASE_ENV_NAME) => {}
                Some(stem) if validate_name(stem).is_ok() => names.push(stem.to_string()),
                _ => {
                    tracing::warn!(file = %path.display(), "environment file has an invalid name");
                    invalid.push(path);
                }
            }
        }

        names.sort();
        names.insert(0, BASE_ENV_NAME.to_string());
        Ok((names, invalid))
    }

    /// Name of the current environment.
    ///
    /// A missing or empty pointer means `base`. A pointer that cannot be
    /// read, or that names an environment which no longer exists, is reset
    /// to `base`.
    pub fn get_current(&self) -> Result<String> {
        let path = self.current_pointer_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BASE_ENV_NAME.to_string());
            }
            Err(error) => {
                tracing::warn!(
                    file = %path.display(),
                    %error,
                    "current environment pointer is unreadable, resetting to base"
                );
                self.reset_pointer();
                return Ok(BASE_ENV_NAME.to_string());
            }
        };

        let name = parse_pointer(&contents);
        if name.is_empty() {
            return Ok(BASE_ENV_NAME.to_string());
        }

        if !self.exists(&name) {
            tracing::warn!(pointer = %name, "current environment no longer exists, resetting to base");
            self.reset_pointer();
            return Ok(BASE_ENV_NAME.to_string());
        }

        Ok(name)
    }

    fn reset_pointer(&self) {
        if let Err(error) = self.set_current(BASE_ENV_NAME) {
            tracing::warn!(%error, "could not reset current environment pointer");
        }
    }

    /// Point the current environment at `name`, which must exist.
    pub fn set_current(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if !self.exists(name) {
            return Err(Error::NotFound(name.to_string()));
        }

        let path = self.current_pointer_path();
        write_atomic(&path, format!("{name}\n").as_bytes())?;
        tracing::debug!(env = name, "set current environment");
        Ok(())
    }

}

/// Replace the file at `path` with `contents` in one step.
///
/// The data is staged in a temporary file next to `path` and renamed over
/// it, so a reader sees either the old file or the new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_failed = |error| Error::WriteFailed {
        path: path.to_path_buf(),
        error,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(contents).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

/// Read a pointer file, accepting plain text or a JSON string.
fn parse_pointer(contents: &str) -> String {
    let trimmed = contents.trim();
    if trimmed.starts_with('"') {
        if let Ok(name) = serde_json::from_str::<String>(trimmed) {
            return name.trim().to_string();
        }
    }
    trimmed.to_string()
}
