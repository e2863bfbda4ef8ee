//! Error types emitted by the fleetplan CLI.
//!
//! Keep this error type reasonably small; the CLI helpers all return
//! `Result<_, CliError>` and large variants are copied at every boundary.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fleetplan_service::{ServiceBuildError, SubmitError};
use thiserror::Error;

/// Errors emitted by the fleetplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// Opening the dataset file failed.
    #[error("failed to open dataset at {path:?}: {source}")]
    OpenDataset {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Dataset JSON could not be decoded.
    #[error("failed to parse dataset JSON at {path:?}: {source}")]
    ParseDataset {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Building the planning service failed.
    #[error(transparent)]
    BuildService(#[from] ServiceBuildError),
    /// The planning service rejected the request.
    #[error("planning request rejected: {source}")]
    Submit {
        #[source]
        source: SubmitError,
    },
    /// Building the runtime that follows task updates failed.
    #[error("failed to start the update follower: {source}")]
    BuildFollower {
        #[source]
        source: std::io::Error,
    },
    /// The update stream closed before a result was published.
    #[error("task updates ended before a result was published")]
    UpdatesClosed,
    /// Serialising the task result failed.
    #[error("failed to serialise the task result: {0}")]
    SerialiseResult(#[source] serde_json::Error),
    /// Writing CLI output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
