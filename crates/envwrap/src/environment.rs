// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! The environment record and the rules for names and paths.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{BASE_ENV_NAME, Error, Result};

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

const MAX_NAME_LEN: usize = 255;

/// A named, ordered list of search path entries.
///
/// Order determines precedence and is preserved through persistence.
/// Entries are unique.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Environment {
    pub name: String,

    #[serde(default)]
    pub paths: Vec<String>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            paths: Vec::new(),
        }
    }

    /// The environment that is always present.
    pub fn base() -> Self {
        Self::new(BASE_ENV_NAME)
    }

    pub fn is_base(&self) -> bool {
        self.name == BASE_ENV_NAME
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Append a path, returning false if it was already present.
    pub fn push_path<S: Into<String>>(&mut self, path: S) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Remove a path, returning false if it was not present.
    pub fn remove_path(&mut self, path: &str) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(index) => {
                self.paths.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop repeated entries, keeping the first occurrence.
    ///
    /// Records edited by hand may violate uniqueness.
    pub(crate) fn dedup_paths(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.paths.retain(|p| seen.insert(p.clone()));
    }
}

/// Check that a name is safe to use as an environment identifier.
///
/// Names become file names inside the store, so they may not contain path
/// separators or start with `.` (hidden files, `..`) or `-` (flag lookalikes).
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name must not be empty");
    }
    if name.len() > MAX_NAME_LEN {
        return invalid("name is too long");
    }
    if name.starts_with('.') {
        return invalid("name must not start with '.'");
    }
    if name.starts_with('-') {
        return invalid("name must not start with '-'");
    }
    if name.contains('/') || name.contains('\\') {
        return invalid("name must not contain path separators");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return invalid("name contains unsupported characters");
    }

    Ok(())
}

/// Normalize a user supplied path to the absolute form stored in records.
///
/// `~` and `~/` are expanded, relative paths are resolved against the
/// current directory, existing paths are canonicalized and missing ones are
/// cleaned lexically.
pub fn normalize_path(path: &str) -> Result<String> {
    let cwd = std::env::current_dir()?;
    normalize_path_from(path, &cwd)
}

/// Same as [`normalize_path`] with an explicit working directory.
pub fn normalize_path_from(path: &str, cwd: &Path) -> Result<String> {
    let expanded = if path == "~" || path.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot resolve ~ without HOME",
            ))
        })?;
        let rel = path.strip_prefix("~/").unwrap_or("");
        home.join(rel)
    } else if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    };

    let resolved = match dunce::canonicalize(&expanded) {
        Ok(canonical) => canonical,
        Err(_) => clean_lexically(&expanded),
    };

    Ok(resolved.display().to_string())
}

fn clean_lexically(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on the root is a no-op, so `/..` stays `/`
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
