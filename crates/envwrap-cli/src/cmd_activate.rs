// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap activate` and `envwrap deactivate` commands.

use clap::Args;
use colored::Colorize;
use envwrap::{Engine, Plan, Session};
use miette::Result;

/// Activate an environment in the calling shell
#[derive(Debug, Args)]
pub struct CmdActivate {
    /// Environment to activate
    #[clap(default_value = envwrap::BASE_ENV_NAME)]
    pub name: String,

    #[clap(flatten)]
    pub plan: crate::PlanFlags,
}

impl CmdActivate {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        let session = Session::from_env()?;
        let plan = engine.activate(&self.name, &session, self.plan.prompt.as_deref())?;

        self.plan.emit(&plan)?;
        report(&plan, self.plan.stdout_is_free());
        Ok(0)
    }
}

/// Return the calling shell to the base environment
#[derive(Debug, Args)]
pub struct CmdDeactivate {
    #[clap(flatten)]
    pub plan: crate::PlanFlags,
}

impl CmdDeactivate {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        let mut activate = CmdActivate {
            name: envwrap::BASE_ENV_NAME.to_string(),
            plan: self.plan.clone(),
        };
        activate.run(engine)
    }
}

/// Describe what the plan does. Goes to stderr when stdout holds the script.
fn report(plan: &Plan, to_stdout: bool) {
    let mut lines = vec![format!("Activated environment: {}", plan.target.bold())];
    if !plan.added.is_empty() {
        lines.push("Added paths to PATH:".to_string());
        for path in &plan.added {
            lines.push(format!("  - {}", path.green()));
        }
    }

    for line in lines {
        if to_stdout {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }
}
