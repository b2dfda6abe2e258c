// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for envwrap operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with envwrap Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during envwrap operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Environment does not exist
    #[error("Environment '{0}' does not exist")]
    #[diagnostic(
        code(envwrap::not_found),
        help("Run 'envwrap list' to see available environments")
    )]
    NotFound(String),

    /// Path is not registered in the environment
    #[error("Path '{path}' not found in environment '{name}'")]
    #[diagnostic(code(envwrap::path_not_found))]
    PathNotFound { path: String, name: String },

    /// Path does not exist on disk
    #[error("Path '{0}' does not exist")]
    #[diagnostic(
        code(envwrap::path_missing),
        help("Create the directory first or pass --allow-missing")
    )]
    PathMissing(PathBuf),

    /// Environment already exists
    #[error("Environment '{0}' already exists")]
    #[diagnostic(code(envwrap::already_exists))]
    AlreadyExists(String),

    /// Operation not permitted on the base environment
    #[error("Environment '{0}' is protected")]
    #[diagnostic(
        code(envwrap::protected),
        help("The base environment cannot be deleted, renamed or overwritten; use 'envwrap reset' to clear it")
    )]
    Protected(String),

    /// Environment name is not a safe identifier
    #[error("Invalid environment name '{name}': {reason}")]
    #[diagnostic(
        code(envwrap::invalid_name),
        help("Use letters, digits, '_', '-' and '.', not starting with '.' or '-'")
    )]
    InvalidName { name: String, reason: &'static str },

    /// Environment record could not be parsed
    #[error("Invalid environment file: {path:?}")]
    #[diagnostic(
        code(envwrap::invalid_record),
        help("Fix or delete the file; records look like {{\"name\": \"...\", \"paths\": []}}")
    )]
    InvalidRecord {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    /// Session variable holds bytes that are not valid unicode
    #[error("Session variable {var} is not valid unicode")]
    #[diagnostic(
        code(envwrap::non_unicode_variable),
        help("Remove the offending entries from {var} before switching environments")
    )]
    NonUnicodeVariable { var: String },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(envwrap::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to write file
    #[error("Failed to write file: {path:?}")]
    #[diagnostic(code(envwrap::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// No store location could be determined
    #[error("Could not determine where to store environments")]
    #[diagnostic(
        code(envwrap::no_store_root),
        help("Set ENV_MANAGER_HOME or XDG_CONFIG_HOME, or pass --home")
    )]
    NoStoreRoot,

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(envwrap::io_error))]
    Io(#[from] std::io::Error),
}
