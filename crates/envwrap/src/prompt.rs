// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Prompt marker bookkeeping.
//!
//! The marker is kept as explicit state (the unmarked prompt plus the marker
//! name) instead of being searched for in the prompt text, so setting it any
//! number of times never stacks or half-removes markers.

use crate::BASE_ENV_NAME;

#[cfg(test)]
#[path = "./prompt_test.rs"]
mod prompt_test;

/// A prompt and the environment marker rendered in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    base: String,
    marker: Option<String>,
}

impl PromptState {
    /// An unmarked prompt.
    pub fn new<S: Into<String>>(base: S) -> Self {
        Self {
            base: base.into(),
            marker: None,
        }
    }

    /// Rebuild the state of a live prompt.
    ///
    /// `saved_base` and `saved_marker` are what the last activation recorded.
    /// They are trusted only while `current` still matches what they render
    /// to; otherwise the prompt was changed by the user and `current` is
    /// taken as the new unmarked prompt.
    pub fn recover(current: &str, saved_base: Option<&str>, saved_marker: Option<&str>) -> Self {
        if let Some(base) = saved_base {
            let mut saved = Self::new(base);
            saved.set_marker(saved_marker);
            if saved.render() == current {
                return saved;
            }
        }
        Self::new(current)
    }

    /// Show `[name]` for an environment, or nothing for `None` and `base`.
    pub fn set_marker(&mut self, name: Option<&str>) {
        self.marker = name
            .filter(|n| !n.is_empty() && *n != BASE_ENV_NAME)
            .map(String::from);
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// The prompt as it should be displayed.
    pub fn render(&self) -> String {
        match &self.marker {
            Some(name) => format!("[{name}] {}", self.base),
            None => self.base.clone(),
        }
    }
}
