//! CLI support for tq
//!
//! Provides programmatic access to the `tq` command so that other tools can
//! embed it without spawning a process.

mod check;

pub use check::{CheckOptions, CheckResult, execute_check};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass a file or pipe a document to stdin.")]
    NoInput,
}
