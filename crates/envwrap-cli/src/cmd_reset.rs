// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap reset` command.

use clap::Args;
use envwrap::Engine;
use miette::Result;

/// Clear the base environment and make it current
#[derive(Debug, Args)]
pub struct CmdReset {
    #[clap(flatten)]
    plan: crate::PlanFlags,
}

impl CmdReset {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        engine.reset()?;
        println!("Reset to base environment and cleared all paths");

        self.plan.refresh(engine, Some(envwrap::BASE_ENV_NAME))?;
        Ok(0)
    }
}
