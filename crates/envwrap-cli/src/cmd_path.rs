// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap addpath` and `envwrap removepath` commands.

use std::path::Path;

use clap::Args;
use envwrap::{Engine, PathChange};
use miette::Result;

/// Add a path to the current environment
#[derive(Debug, Args)]
pub struct CmdAddPath {
    /// Directory to add
    path: String,

    /// Add to this environment instead of the current one
    #[clap(short, long = "env", value_name = "NAME")]
    env: Option<String>,

    /// Register the path even if it does not exist yet
    #[clap(long)]
    allow_missing: bool,

    #[clap(flatten)]
    plan: crate::PlanFlags,
}

impl CmdAddPath {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        let name = target_env(engine, self.env.as_deref())?;

        let normalized = envwrap::environment::normalize_path(&self.path)?;
        if !self.allow_missing && !Path::new(&normalized).exists() {
            return Err(envwrap::Error::PathMissing(normalized.into()).into());
        }

        match engine.add_path(&name, &self.path)? {
            PathChange::Added(path) => {
                println!("Added path '{path}' to environment '{name}'");
            }
            PathChange::Unchanged(path) => {
                println!("Path '{path}' already exists in environment '{name}'");
            }
        }

        self.plan.refresh(engine, None)?;
        Ok(0)
    }
}

/// Remove a path from the current environment
#[derive(Debug, Args)]
pub struct CmdRemovePath {
    /// Directory to remove
    path: String,

    /// Remove from this environment instead of the current one
    #[clap(short, long = "env", value_name = "NAME")]
    env: Option<String>,

    #[clap(flatten)]
    plan: crate::PlanFlags,
}

impl CmdRemovePath {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        let name = target_env(engine, self.env.as_deref())?;
        let path = engine.remove_path(&name, &self.path)?;
        println!("Removed path '{path}' from environment '{name}'");

        self.plan.refresh(engine, None)?;
        Ok(0)
    }
}

/// The environment path verbs operate on.
fn target_env(engine: &Engine, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(name) => Ok(name.to_string()),
        None => Ok(engine.session_current(&crate::name_session())?),
    }
}
