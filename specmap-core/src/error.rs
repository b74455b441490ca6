//! Error types for specmap-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Session-level error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Loading a map or reference failed; session state is untouched.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Calibration was rejected or the engine failed.
    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// File I/O error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation requires a loaded spectral map.
    #[error("no spectral map loaded")]
    NoMap,

    /// A queued row does not exist in the loaded map.
    #[error("row {row} out of range (map has {row_count} rows)")]
    RowOutOfRange { row: usize, row_count: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a [`DataLoader`](crate::DataLoader).
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be parsed as a number.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The file contained no numeric data.
    #[error("file contains no spectral data")]
    Empty,

    /// Rows of a map have differing channel counts.
    #[error("line {line}: expected {expected} channels, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A reference file holds a 2D block instead of a single spectrum.
    #[error("expected a single spectrum, found {rows} rows x {columns} columns")]
    NotASpectrum { rows: usize, columns: usize },
}

/// Failures reported by a [`CalibrationEngine`](crate::CalibrationEngine) fit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitFailure {
    /// The engine has no line list for the requested material.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// Too few reference peaks were located to fit the requested dimension.
    #[error("peaks not found ({found} found, {required} required)")]
    PeaksNotFound { found: usize, required: usize },

    /// The least-squares system was singular.
    #[error("fit did not converge")]
    Singular,
}

/// Errors from a calibration attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// No reference spectrum is loaded.
    #[error("no reference spectrum loaded")]
    MissingReference,

    /// A calibration parameter has not been chosen.
    #[error("calibration parameter not set: {0}")]
    MissingParameter(&'static str),

    /// A parameter value is not advertised by the engine.
    #[error("unsupported {kind}: {value}")]
    UnsupportedParameter { kind: &'static str, value: String },

    /// Reference and map disagree on channel count.
    #[error("reference has {found} channels, map has {expected}")]
    ChannelMismatch { expected: usize, found: usize },

    /// The engine could not fit the reference.
    #[error(transparent)]
    Fit(#[from] FitFailure),
}
