//! Error types for Foucault.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::render::RenderError;

/// Result type alias for Foucault operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Which kind of column a dimension index selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    /// A coordinate column.
    Coordinate,
    /// A value column.
    Value,
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKind::Coordinate => write!(f, "coordinate"),
            DimensionKind::Value => write!(f, "value"),
        }
    }
}

/// Errors that can occur in Foucault.
#[derive(Debug, Error)]
pub enum PlotError {
    /// No plot registered under the given name.
    #[error("Plot not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A plot with the given name is already registered.
    #[error("Plot name already taken: {name}")]
    DuplicateName {
        /// The name that collided.
        name: String,
    },

    /// An explicitly supplied column index is out of range for the source.
    #[error("Invalid {kind} dimension {index} for source '{source_name}' with {count} columns")]
    InvalidDimension {
        /// Name of the data source.
        source_name: String,
        /// Whether the index selected a coordinate or a value column.
        kind: DimensionKind,
        /// The offending column index.
        index: usize,
        /// Total number of columns in the source.
        count: usize,
    },

    /// The rendering hook failed.
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    /// Failed to open a data file.
    #[error("Failed to open data file: {path}")]
    FileOpen {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be parsed.
    #[error("Malformed data file {path} (line {line}): {reason}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A sample row did not match the source's column count.
    #[error("Row with {got} fields appended to source '{source_name}' with {expected} columns")]
    Shape {
        /// Name of the data source.
        source_name: String,
        /// Column count of the source.
        expected: usize,
        /// Field count of the rejected row.
        got: usize,
    },
}

impl PlotError {
    /// Create a NotFound error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a DuplicateName error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create an InvalidDimension error.
    pub fn invalid_dimension(
        source_name: impl Into<String>,
        kind: DimensionKind,
        index: usize,
        count: usize,
    ) -> Self {
        Self::InvalidDimension {
            source_name: source_name.into(),
            kind,
            index,
            count,
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a Parse error.
    pub fn parse(path: PathBuf, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            path,
            line,
            reason: reason.into(),
        }
    }
}
