// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap current` command.

use clap::Args;
use colored::Colorize;
use envwrap::{Engine, Session};
use miette::Result;

/// Show the current environment
#[derive(Debug, Args)]
pub struct CmdCurrent {
    /// Only print the name (for scripts and login restore)
    #[clap(long)]
    name_only: bool,
}

impl CmdCurrent {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        self.run_in(engine, &crate::name_session())
    }

    pub fn run_in(&mut self, engine: &Engine, session: &Session) -> Result<i32> {
        let name = engine.session_current(session)?;

        if self.name_only {
            println!("{name}");
            return Ok(0);
        }

        println!("Current env: {}", name.bold());

        let env = match engine.store().load(&name) {
            Ok(env) => env,
            Err(error) => {
                tracing::warn!(env = %name, %error, "could not read the current environment");
                return Ok(0);
            }
        };
        if !env.paths.is_empty() {
            println!();
            println!("Paths in this environment:");
            for path in &env.paths {
                println!("  - {}", path.cyan());
            }
        }

        Ok(0)
    }
}
