//! Error types for idle-scan.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning profiles or writing the report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An AWS API call failed (credentials, permissions, throttling, network).
    #[error("{operation} failed: {message}")]
    Aws {
        /// API operation that failed, e.g. `DescribeReplicationGroups`
        operation: &'static str,
        /// Flattened error chain from the SDK
        message: String,
    },

    /// The tool config file could not be read or parsed.
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A metric result did not carry a usable timestamp.
    #[error("Malformed metric data for {metric}: {reason}")]
    MetricData { metric: String, reason: String },

    #[error("Failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Wrap an SDK error, keeping its full source chain in the message.
    pub fn aws<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        ScanError::Aws {
            operation,
            message: aws_smithy_types::error::display::DisplayErrorContext(err).to_string(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScanError>;
