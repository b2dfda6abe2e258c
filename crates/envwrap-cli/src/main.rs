// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! envwrap - Per-Session PATH Environment Manager CLI

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use envwrap::{Config, Engine, Plan, Session, ShellKind};
use miette::{Result, WrapErr};

mod cmd_activate;
mod cmd_clone;
mod cmd_create;
mod cmd_current;
mod cmd_delete;
mod cmd_info;
mod cmd_list;
mod cmd_path;
mod cmd_rename;
mod cmd_reset;

use cmd_activate::{CmdActivate, CmdDeactivate};
use cmd_clone::CmdClone;
use cmd_create::CmdCreate;
use cmd_current::CmdCurrent;
use cmd_delete::CmdDelete;
use cmd_info::CmdInfo;
use cmd_list::CmdList;
use cmd_path::{CmdAddPath, CmdRemovePath};
use cmd_rename::CmdRename;
use cmd_reset::CmdReset;


#[derive(Parser)]
#[clap(
    name = "envwrap",
    about = "Per-Session PATH Environment Manager",
    version,
    long_about = "Manage named sets of PATH entries and switch between them in the live shell"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    /// Store environments in DIR (overrides ENV_MANAGER_HOME and XDG_CONFIG_HOME)
    #[clap(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

/// Shell dialect accepted by `--shell`.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ShellArg {
    #[value(alias = "sh", alias = "bash", alias = "zsh")]
    Posix,
    Fish,
}

/// Flags controlling how an activation plan is delivered to the shell.
#[derive(Args, Clone, Debug, Default)]
pub struct PlanFlags {
    /// Write the activation script to FILE for the calling shell to source
    #[clap(long = "export-shell", value_name = "FILE")]
    pub export_shell: Option<PathBuf>,

    /// Shell dialect of the script (default: detected from $SHELL)
    #[clap(long, value_enum)]
    pub shell: Option<ShellArg>,

    /// The shell's current prompt, to keep the [name] marker up to date
    #[clap(long, allow_hyphen_values = true)]
    pub prompt: Option<String>,
}

impl PlanFlags {
    pub fn shell_kind(&self) -> ShellKind {
        match self.shell {
            Some(ShellArg::Posix) => ShellKind::Posix,
            Some(ShellArg::Fish) => ShellKind::Fish,
            None => ShellKind::detect(std::env::var("SHELL").ok().as_deref()),
        }
    }

    /// Whether human readable output has stdout to itself.
    pub fn stdout_is_free(&self) -> bool {
        self.export_shell.is_some()
    }

    /// Write the rendered plan to the export file, or to stdout.
    pub fn emit(&self, plan: &Plan) -> Result<()> {
        let script = envwrap::render_script(plan, self.shell_kind());
        match &self.export_shell {
            Some(path) => {
                envwrap::write_atomic(path, script.as_bytes())
                    .wrap_err_with(|| format!("Failed to write activation script {:?}", path))?;
                tracing::debug!(file = %path.display(), "wrote activation script");
            }
            None => print!("{script}"),
        }
        Ok(())
    }

    /// After a mutation, re-plan the session so it reflects the store.
    ///
    /// Only done when an export file was requested, since mutating verbs
    /// otherwise print plain messages on stdout. `target` defaults to the
    /// environment the session is using.
    pub fn refresh(&self, engine: &Engine, target: Option<&str>) -> Result<()> {
        let session = self.session()?;
        self.refresh_session(engine, &session, target)
    }

    /// Same as [`PlanFlags::refresh`] for an already captured session.
    pub fn refresh_session(
        &self,
        engine: &Engine,
        session: &Session,
        target: Option<&str>,
    ) -> Result<()> {
        if self.export_shell.is_none() {
            return Ok(());
        }

        let name = match target {
            Some(name) => name.to_string(),
            None => engine.session_current(session)?,
        };
        let plan = engine.activate(&name, session, self.prompt.as_deref())?;
        self.emit(&plan)
    }

    /// Capture the calling session.
    ///
    /// A plan needs every session variable intact. Without an export file
    /// only the active name is used, so unreadable variables are skipped.
    pub fn session(&self) -> Result<Session> {
        if self.export_shell.is_some() {
            return Ok(Session::from_env()?);
        }
        Ok(name_session())
    }
}

/// Session snapshot for verbs that only need the active environment name.
pub fn name_session() -> Session {
    Session::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring unreadable session variables");
        Session {
            current: std::env::var(envwrap::CURRENT_ENV_VAR)
                .ok()
                .filter(|v| !v.is_empty()),
            ..Default::default()
        }
    })
}

#[derive(Subcommand)]
enum Command {
    /// Create a new empty environment
    Create(CmdCreate),

    /// Activate an environment in the calling shell
    Activate(CmdActivate),

    /// Return the calling shell to the base environment
    Deactivate(CmdDeactivate),

    /// List all environments
    List(CmdList),

    /// Show the current environment
    Current(CmdCurrent),

    /// Add a path to the current environment
    #[clap(name = "addpath")]
    AddPath(CmdAddPath),

    /// Remove a path from the current environment
    #[clap(name = "removepath")]
    RemovePath(CmdRemovePath),

    /// Delete an environment
    Delete(CmdDelete),

    /// Clear the base environment and make it current
    Reset(CmdReset),

    /// Copy an environment's paths into another, overwriting it
    Clone(CmdClone),

    /// Rename an environment
    Rename(CmdRename),

    /// Show where environments are stored and how that was decided
    Info(CmdInfo),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        // stdout may carry an activation script, keep diagnostics off it
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        let config = match &self.home {
            Some(home) => Config::with_override(home),
            None => Config::from_env()?,
        };
        let engine = Engine::open(&config)?;

        // Dispatch to command
        match self.cmd {
            Command::Create(mut cmd) => cmd.run(&engine),
            Command::Activate(mut cmd) => cmd.run(&engine),
            Command::Deactivate(mut cmd) => cmd.run(&engine),
            Command::List(mut cmd) => cmd.run(&engine),
            Command::Current(mut cmd) => cmd.run(&engine),
            Command::AddPath(mut cmd) => cmd.run(&engine),
            Command::RemovePath(mut cmd) => cmd.run(&engine),
            Command::Delete(mut cmd) => cmd.run(&engine),
            Command::Reset(mut cmd) => cmd.run(&engine),
            Command::Clone(mut cmd) => cmd.run(&engine),
            Command::Rename(mut cmd) => cmd.run(&engine),
            Command::Info(mut cmd) => cmd.run(&config, &engine),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
