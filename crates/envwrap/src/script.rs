// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Rendering a [`Plan`] as shell statements the caller can source.

use crate::{PROMPT_VAR, Plan};

#[cfg(test)]
#[path = "./script_test.rs"]
mod script_test;

/// Shell dialect to render assignments for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellKind {
    /// sh, bash, zsh and friends.
    #[default]
    Posix,
    Fish,
}

impl ShellKind {
    /// Pick a dialect from a shell path such as `$SHELL`.
    pub fn detect(shell: Option<&str>) -> Self {
        let name = shell
            .and_then(|s| s.rsplit('/').next())
            .unwrap_or_default();
        if name == "fish" {
            ShellKind::Fish
        } else {
            ShellKind::Posix
        }
    }
}

/// Render the plan as a small script of variable assignments.
pub fn render_script(plan: &Plan, shell: ShellKind) -> String {
    let mut script = String::new();
    script.push_str(&format!("# envwrap: activate '{}'\n", plan.target));

    for (name, value) in &plan.exports {
        let line = match shell {
            ShellKind::Posix => format!("export {name}={}\n", quote_posix(value)),
            ShellKind::Fish => format!("set -gx {name} {}\n", quote_fish(value)),
        };
        script.push_str(&line);
    }

    if let Some(prompt) = &plan.prompt {
        match shell {
            ShellKind::Posix => {
                script.push_str(&format!("{PROMPT_VAR}={}\n", quote_posix(prompt)));
            }
            // fish draws its prompt from a function, there is no variable to set
            ShellKind::Fish => {
                tracing::debug!("skipping prompt update for fish");
            }
        }
    }

    script
}

/// Single-quote a value for POSIX shells.
fn quote_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Single-quote a value for fish, where `\` and `'` are escapable.
fn quote_fish(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}
