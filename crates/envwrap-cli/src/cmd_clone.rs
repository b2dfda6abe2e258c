// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap clone` command.

use clap::Args;
use envwrap::{CloneOutcome, Engine};
use miette::Result;

/// Copy an environment's paths into another, overwriting it
#[derive(Debug, Args)]
pub struct CmdClone {
    /// Environment to copy from
    source: String,

    /// Environment to create or overwrite
    target: String,
}

impl CmdClone {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        match engine.clone_env(&self.source, &self.target)? {
            CloneOutcome::Created => {
                println!("Cloned environment: {} to {}", self.source, self.target);
            }
            CloneOutcome::Overwritten => {
                println!(
                    "Cloned environment: {} to {} (previous paths of {} replaced)",
                    self.source, self.target, self.target
                );
            }
        }
        Ok(0)
    }
}
