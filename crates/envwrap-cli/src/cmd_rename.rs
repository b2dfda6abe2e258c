// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap rename` command.

use clap::Args;
use envwrap::Engine;
use miette::Result;

/// Rename an environment
#[derive(Debug, Args)]
pub struct CmdRename {
    /// Current name
    old: String,

    /// New name
    new: String,
}

impl CmdRename {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        engine.rename(&self.old, &self.new)?;
        println!("Renamed environment: {} to {}", self.old, self.new);
        Ok(0)
    }
}
