// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Validated operations over the environment store.

use crate::activation::{Plan, Session, plan_activation};
use crate::environment::{normalize_path, validate_name};
use crate::{BASE_ENV_NAME, Config, Environment, Error, Listing, Result, Store};

#[cfg(test)]
#[path = "./engine_test.rs"]
mod engine_test;

/// Outcome of adding a path to an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChange {
    /// The normalized path was appended.
    Added(String),
    /// The normalized path was already registered.
    Unchanged(String),
}

impl PathChange {
    pub fn path(&self) -> &str {
        match self {
            PathChange::Added(path) | PathChange::Unchanged(path) => path,
        }
    }
}

/// Outcome of cloning an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Created,
    /// The target existed and its paths were replaced.
    Overwritten,
}

/// Environment operations on top of a [`Store`].
#[derive(Debug, Clone)]
pub struct Engine {
    store: Store,
}

impl Engine {
    /// Open the store described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Store::open(&config.store_root)?))
    }

    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Create a new empty environment.
    pub fn create(&self, name: &str) -> Result<Environment> {
        validate_name(name)?;
        if self.store.exists(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let env = Environment::new(name);
        self.store.save(&env)?;
        tracing::info!(env = name, "created environment");
        Ok(env)
    }

    /// Delete an environment.
    ///
    /// Returns true when it was the current environment and the pointer was
    /// moved back to `base`.
    pub fn delete(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        if name == BASE_ENV_NAME {
            return Err(Error::Protected(name.to_string()));
        }
        if !self.store.exists(name) {
            return Err(Error::NotFound(name.to_string()));
        }

        let was_current = self.store.get_current()? == name;
        self.store.remove(name)?;
        if was_current {
            self.store.set_current(BASE_ENV_NAME)?;
        }

        tracing::info!(env = name, was_current, "deleted environment");
        Ok(was_current)
    }

    /// Append a path to an environment. Adding a registered path is a no-op.
    pub fn add_path(&self, name: &str, path: &str) -> Result<PathChange> {
        let mut env = self.store.load(name)?;
        let normalized = normalize_path(path)?;

        if !env.push_path(normalized.clone()) {
            tracing::debug!(env = name, path = %normalized, "path already registered");
            return Ok(PathChange::Unchanged(normalized));
        }

        self.store.save(&env)?;
        tracing::info!(env = name, path = %normalized, "added path");
        Ok(PathChange::Added(normalized))
    }

    /// Remove a path from an environment, returning the normalized path.
    pub fn remove_path(&self, name: &str, path: &str) -> Result<String> {
        let mut env = self.store.load(name)?;
        let normalized = normalize_path(path)?;

        if !env.remove_path(&normalized) {
            return Err(Error::PathNotFound {
                path: normalized,
                name: name.to_string(),
            });
        }

        self.store.save(&env)?;
        tracing::info!(env = name, path = %normalized, "removed path");
        Ok(normalized)
    }

    /// Copy the paths of `source` into `target`.
    ///
    /// An existing target is overwritten without confirmation.
    pub fn clone_env(&self, source: &str, target: &str) -> Result<CloneOutcome> {
        validate_name(source)?;
        validate_name(target)?;
        if target == BASE_ENV_NAME {
            return Err(Error::Protected(target.to_string()));
        }

        let source_env = self.store.load(source)?;
        let outcome = if self.store.exists(target) {
            tracing::warn!(from = source, to = target, "overwriting existing environment");
            CloneOutcome::Overwritten
        } else {
            CloneOutcome::Created
        };

        self.store.save(&Environment {
            name: target.to_string(),
            paths: source_env.paths,
        })?;
        tracing::info!(from = source, to = target, ?outcome, "cloned environment");
        Ok(outcome)
    }

    /// Rename an environment, moving the current pointer along with it.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        validate_name(old)?;
        validate_name(new)?;
        for name in [old, new] {
            if name == BASE_ENV_NAME {
                return Err(Error::Protected(name.to_string()));
            }
        }

        let env = self.store.load(old)?;
        if self.store.exists(new) {
            return Err(Error::AlreadyExists(new.to_string()));
        }

        self.store.save(&Environment {
            name: new.to_string(),
            paths: env.paths,
        })?;
        if self.store.get_current()? == old {
            self.store.set_current(new)?;
        }
        self.store.remove(old)?;

        tracing::info!(old, new, "renamed environment");
        Ok(())
    }

    /// All environments with their path counts and the current marker.
    pub fn list(&self) -> Result<Listing> {
        self.store.list()
    }

    /// Name of the persisted current environment.
    pub fn current(&self) -> Result<String> {
        self.store.get_current()
    }

    /// Record of the persisted current environment.
    pub fn current_environment(&self) -> Result<Environment> {
        let name = self.store.get_current()?;
        self.store.load(&name)
    }

    /// The environment a session is using.
    ///
    /// A session that activated an environment which still exists overrides
    /// the persisted pointer.
    pub fn session_current(&self, session: &Session) -> Result<String> {
        match &session.current {
            Some(name) if self.store.exists(name) => Ok(name.clone()),
            _ => self.store.get_current(),
        }
    }

    /// Clear the paths of `base` and make it current.
    pub fn reset(&self) -> Result<()> {
        let mut base = self.store.load(BASE_ENV_NAME)?;
        base.paths.clear();
        self.store.save(&base)?;
        self.store.set_current(BASE_ENV_NAME)?;
        tracing::info!("reset to base environment");
        Ok(())
    }

    /// Plan switching `session` to `name` and persist it as current.
    ///
    /// `prompt` is the session's live prompt, when the marker should be
    /// maintained.
    pub fn activate(&self, name: &str, session: &Session, prompt: Option<&str>) -> Result<Plan> {
        let target = self.store.load(name)?;
        let prompt_state = prompt.map(|p| session.prompt_state(p));

        let plan = plan_activation(&target, &session.base_path(), prompt_state);
        self.store.set_current(&target.name)?;

        tracing::info!(env = name, added = plan.added.len(), "activated environment");
        Ok(plan)
    }

    /// Switch `session` back to `base`.
    pub fn deactivate(&self, session: &Session, prompt: Option<&str>) -> Result<Plan> {
        self.activate(BASE_ENV_NAME, session, prompt)
    }
}
