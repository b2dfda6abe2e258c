// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap create` command.

use clap::Args;
use envwrap::Engine;
use miette::Result;

/// Create a new empty environment
#[derive(Debug, Args)]
pub struct CmdCreate {
    /// Name of the environment
    name: String,
}

impl CmdCreate {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        engine.create(&self.name)?;

        println!("Created environment: {}", self.name);
        println!();
        println!("Next steps:");
        println!("  1. Run 'envwrap activate {}' to switch to it", self.name);
        println!("  2. Run 'envwrap addpath <dir>' to register directories");

        Ok(0)
    }
}
