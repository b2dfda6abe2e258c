// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap delete` command.

use clap::Args;
use envwrap::{BASE_ENV_NAME, Engine, Session};
use miette::Result;

/// Delete an environment
#[derive(Debug, Args)]
pub struct CmdDelete {
    /// Environment to delete
    name: String,

    #[clap(flatten)]
    plan: crate::PlanFlags,
}

impl CmdDelete {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        let session = self.plan.session()?;
        self.run_in(engine, &session)
    }

    /// Delete on behalf of `session`, moving it to `base` when it was using
    /// the deleted environment.
    pub fn run_in(&mut self, engine: &Engine, session: &Session) -> Result<i32> {
        let session_was_on = engine.session_current(session)? == self.name;
        let pointer_was_on = engine.delete(&self.name)?;
        if session_was_on || pointer_was_on {
            println!("Switched to base environment before deleting '{}'", self.name);
        }
        println!("Deleted environment: {}", self.name);

        let target = session_was_on.then_some(BASE_ENV_NAME);
        self.plan.refresh_session(engine, session, target)?;
        Ok(0)
    }
}
