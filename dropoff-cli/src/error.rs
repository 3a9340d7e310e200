//! Error types emitted by the Dropoff CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dropoff_core::OptimiseError;
use thiserror::Error;

/// Errors emitted by the Dropoff CLI.
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
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// The configured average speed cannot convert distance into time.
    #[error("--{field} must be a positive, finite speed (got {value})")]
    InvalidSpeed {
        /// Flag name of the offending option.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The request decoded but failed validation.
    #[error("request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: OptimiseError,
    },
    /// The optimiser rejected the request.
    #[error("optimiser failed: {source}")]
    Optimise {
        /// Optimiser failure.
        source: OptimiseError,
    },
    /// Serialising the response failed.
    #[error("failed to serialise optimise response: {0}")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write optimise output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// A global logger was already installed.
    #[error("failed to initialise logging: {0}")]
    InitLogger(#[from] log::SetLoggerError),
}
