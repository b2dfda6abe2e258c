// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! envwrap - Per-Session PATH Environment Manager
//!
//! This crate provides the core library for managing named environments, each
//! an ordered list of directories that are layered onto a shell session's
//! search path when the environment is activated.
//!
//! # Overview
//!
//! A child process cannot modify the environment of the shell that started
//! it, so activation is split in two phases. The library computes a
//! [`Plan`] (a data-only mapping of variable assignments) and the live shell
//! applies it, usually by sourcing the script rendered by [`render_script`].
//!
//! # Example
//!
//! ```no_run
//! use envwrap::{Config, Engine, Session};
//!
//! let config = Config::from_env()?;
//! let engine = Engine::open(&config)?;
//! engine.create("myproject")?;
//! engine.add_path("myproject", "/opt/myproject/bin")?;
//!
//! let session = Session::from_env()?;
//! let plan = engine.activate("myproject", &session, None)?;
//! print!("{}", envwrap::render_script(&plan, envwrap::ShellKind::Posix));
//! # Ok::<(), envwrap::Error>(())
//! ```

pub mod activation;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod prompt;
pub mod script;
pub mod search_path;
pub mod store;

pub use activation::{Plan, Session, plan_activation};
pub use config::{Config, StoreRootSource};
pub use engine::{CloneOutcome, Engine, PathChange};
pub use environment::{Environment, validate_name};
pub use error::{Error, Result};
pub use prompt::PromptState;
pub use script::{ShellKind, render_script};
pub use store::{EnvironmentSummary, Listing, Store, write_atomic};

/// Name of the environment that always exists and cannot be deleted.
pub const BASE_ENV_NAME: &str = "base";

/// File extension of per-environment records.
pub const RECORD_EXTENSION: &str = "json";

/// Well-known filename of the current-environment pointer.
pub const CURRENT_POINTER_FILENAME: &str = ".current_env";

/// Explicit store location override.
pub const HOME_ENV_VAR: &str = "ENV_MANAGER_HOME";

/// Session variable naming the environment active in this shell.
pub const CURRENT_ENV_VAR: &str = "ENVWRAP_CURRENT";

/// Session variable holding the entries an activation added to the search path.
pub const APPLIED_PATHS_ENV_VAR: &str = "ENVWRAP_APPLIED_PATHS";

/// Session variable holding the prompt without any environment marker.
pub const PROMPT_BASE_ENV_VAR: &str = "ENVWRAP_PROMPT_BASE";

/// Session variable holding the marker currently rendered into the prompt.
pub const PROMPT_MARKER_ENV_VAR: &str = "ENVWRAP_PROMPT_MARKER";

/// The search path variable managed by activation.
pub const SEARCH_PATH_VAR: &str = "PATH";

/// The prompt variable rewritten by the prompt marker.
pub const PROMPT_VAR: &str = "PS1";
