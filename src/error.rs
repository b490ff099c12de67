// src/error.rs

use std::io;
use thiserror::Error;

/// Errors surfaced by loading, planning and executing a paint run.
#[derive(Debug, Error)]
pub enum AutopaintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed cell table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cell table column '{column}' holds {value}, which is not a grid coordinate")]
    InvalidCoordinate { column: &'static str, value: f64 },

    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("Invalid screen layout: {0}")]
    InvalidLayout(String),

    #[error("Input driver failure: {0}")]
    Driver(String),

    /// The operator triggered the abort signal.
    #[error("Run aborted by operator")]
    Aborted,
}

pub type Result<T> = std::result::Result<T, AutopaintError>;
