// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! The activation protocol.
//!
//! Activation runs in a helper process that cannot touch the caller's
//! environment. [`plan_activation`] therefore only computes a [`Plan`]; the
//! caller applies it to its own live session. [`Plan::apply`] is the
//! reference applier over a variable map.

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::prompt::PromptState;
use crate::search_path;
use crate::{
    APPLIED_PATHS_ENV_VAR, CURRENT_ENV_VAR, Environment, Error, PROMPT_BASE_ENV_VAR,
    PROMPT_MARKER_ENV_VAR, PROMPT_VAR, Result, SEARCH_PATH_VAR,
};

#[cfg(test)]
#[path = "./activation_test.rs"]
mod activation_test;

/// The session variables activation reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current value of the search path.
    pub path: String,

    /// Entries a previous activation added to the search path.
    pub applied: Vec<String>,

    /// Environment the session believes is active.
    pub current: Option<String>,

    /// Unmarked prompt recorded by the last activation.
    pub prompt_base: Option<String>,

    /// Marker recorded by the last activation.
    pub prompt_marker: Option<String>,
}

impl Session {
    /// Snapshot the variables of this process.
    ///
    /// Fails when a session variable is not valid unicode, since a plan
    /// built from a lossy copy would rewrite entries it must leave alone.
    pub fn from_env() -> Result<Self> {
        Self::from_os_lookup(|key| std::env::var_os(key))
    }

    /// Snapshot a session held in a variable map.
    pub fn from_vars(vars: &BTreeMap<String, String>) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_os_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut vars = BTreeMap::new();
        for key in [
            SEARCH_PATH_VAR,
            APPLIED_PATHS_ENV_VAR,
            CURRENT_ENV_VAR,
            PROMPT_BASE_ENV_VAR,
            PROMPT_MARKER_ENV_VAR,
        ] {
            let Some(value) = lookup(key) else {
                continue;
            };
            let value = value
                .into_string()
                .map_err(|_| Error::NonUnicodeVariable { var: key.to_string() })?;
            vars.insert(key.to_string(), value);
        }
        Ok(Self::from_vars(&vars))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            path: lookup(SEARCH_PATH_VAR).unwrap_or_default(),
            applied: lookup(APPLIED_PATHS_ENV_VAR)
                .map(|v| search_path::split(&v))
                .unwrap_or_default(),
            current: lookup(CURRENT_ENV_VAR).filter(|v| !v.is_empty()),
            prompt_base: lookup(PROMPT_BASE_ENV_VAR),
            prompt_marker: lookup(PROMPT_MARKER_ENV_VAR),
        }
    }

    /// The search path as it was before any envwrap activation.
    pub fn base_path(&self) -> String {
        search_path::strip_injected(&self.path, &self.applied)
    }

    /// Rebuild the prompt state from the live prompt text.
    pub fn prompt_state(&self, current_prompt: &str) -> PromptState {
        PromptState::recover(
            current_prompt,
            self.prompt_base.as_deref(),
            self.prompt_marker.as_deref(),
        )
    }
}

/// Assignments that switch a session to an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Environment being activated.
    pub target: String,

    /// Variables to export into the session.
    pub exports: BTreeMap<String, String>,

    /// New prompt, when prompt bookkeeping was requested.
    pub prompt: Option<String>,

    /// Entries added on top of the base segment.
    pub added: Vec<String>,
}

impl Plan {
    /// Value the plan gives the search path.
    pub fn search_path(&self) -> Option<&str> {
        self.exports.get(SEARCH_PATH_VAR).map(String::as_str)
    }

    /// Apply every assignment to a session's variables.
    pub fn apply(&self, vars: &mut BTreeMap<String, String>) {
        for (name, value) in &self.exports {
            vars.insert(name.clone(), value.clone());
        }
        if let Some(prompt) = &self.prompt {
            vars.insert(PROMPT_VAR.to_string(), prompt.clone());
        }
    }
}

/// Compute the plan that layers `target` on top of `base_path`.
///
/// When `prompt` is given, its marker is set to the target and the plan
/// carries both the rendered prompt and the state needed to recover it.
pub fn plan_activation(
    target: &Environment,
    base_path: &str,
    prompt: Option<PromptState>,
) -> Plan {
    let (path, added) = search_path::layer(base_path, &target.paths);

    let mut exports = BTreeMap::new();
    exports.insert(SEARCH_PATH_VAR.to_string(), path);
    exports.insert(CURRENT_ENV_VAR.to_string(), target.name.clone());
    exports.insert(APPLIED_PATHS_ENV_VAR.to_string(), search_path::join(&added));

    let prompt = prompt.map(|mut state| {
        state.set_marker(Some(&target.name));
        exports.insert(PROMPT_BASE_ENV_VAR.to_string(), state.base().to_string());
        exports.insert(
            PROMPT_MARKER_ENV_VAR.to_string(),
            state.marker().unwrap_or_default().to_string(),
        );
        state.render()
    });

    Plan {
        target: target.name.clone(),
        exports,
        prompt,
        added,
    }
}
