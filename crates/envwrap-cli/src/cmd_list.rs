// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envwrap list` command.

use clap::{Args, ValueEnum};
use colored::Colorize;
use envwrap::{Engine, Listing};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Table,
    Yaml,
    Json,
}

/// List all environments
#[derive(Debug, Args)]
pub struct CmdList {
    /// Only print environment names, one per line (for completion)
    #[clap(long)]
    names_only: bool,

    /// Output format
    #[clap(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    current: &'a str,
    environments: Vec<ListEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    invalid: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    paths: usize,
    active: bool,
}

impl CmdList {
    pub fn run(&mut self, engine: &Engine) -> Result<i32> {
        if self.names_only {
            for name in engine.store().names()? {
                println!("{name}");
            }
            return Ok(0);
        }

        let listing = engine.list()?;
        match self.format {
            ListFormat::Table => self.show_table(&listing),
            ListFormat::Yaml => {
                let yaml = serde_yaml::to_string(&to_output(&listing)).into_diagnostic()?;
                print!("{yaml}");
            }
            ListFormat::Json => {
                let json = serde_json::to_string_pretty(&to_output(&listing)).into_diagnostic()?;
                println!("{json}");
            }
        }

        Ok(0)
    }

    fn show_table(&self, listing: &Listing) {
        for env in &listing.environments {
            let count = format!("({} path{})", env.path_count, plural(env.path_count));
            if env.is_current {
                println!(
                    "+ {} {} {}",
                    env.name.green().bold(),
                    "(active)".yellow(),
                    count.dimmed()
                );
            } else {
                println!("+ {} {}", env.name, count.dimmed());
            }
        }

        for path in &listing.invalid {
            println!(
                "+ {} {} is an invalid env file",
                "!!! Error:".red(),
                path.display()
            );
        }
    }
}

fn to_output(listing: &Listing) -> ListOutput<'_> {
    ListOutput {
        current: &listing.current,
        environments: listing
            .environments
            .iter()
            .map(|e| ListEntry {
                name: &e.name,
                paths: e.path_count,
                active: e.is_current,
            })
            .collect(),
        invalid: listing
            .invalid
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
