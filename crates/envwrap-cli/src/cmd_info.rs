// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap info` command.

use clap::Args;
use colored::Colorize;
use envwrap::{Config, Engine};
use miette::Result;

/// Show where environments are stored and how that was decided
#[derive(Debug, Args)]
pub struct CmdInfo {}

impl CmdInfo {
    pub fn run(&mut self, config: &Config, engine: &Engine) -> Result<i32> {
        let store = engine.store();
        let listing = engine.list()?;

        println!("{}", "Environment Manager Configuration".bold());
        println!("=================================");
        println!("Version:             {}", env!("CARGO_PKG_VERSION"));
        println!("Config directory:    {}", store.root().display());
        println!("Resolved from:       {}", config.source);
        println!("Current env file:    {}", store.current_pointer_path().display());
        println!("Current environment: {}", listing.current);
        println!();
        println!("Total environments: {}", listing.environments.len());
        if !listing.invalid.is_empty() {
            println!("Invalid env files:  {}", listing.invalid.len());
        }

        println!();
        println!("{}", "Environment Variables:".bold());
        for key in [envwrap::HOME_ENV_VAR, "XDG_CONFIG_HOME", envwrap::CURRENT_ENV_VAR] {
            match std::env::var(key) {
                Ok(value) if !value.is_empty() => println!("  {key} = {value}"),
                _ => println!("  {key} = {}", "(not set)".dimmed()),
            }
        }

        Ok(0)
    }
}
