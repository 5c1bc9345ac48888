//! Error types for matrix-heatmap operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Every failure of the pipeline falls into one of these buckets; callers that
/// only care about "could not read/write", "bad input text" or "could not draw"
/// match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable or unwritable.
    Io,
    /// Input text is not a rectangular numeric grid.
    Parse,
    /// The matrix cannot be turned into an image (or shown).
    Render,
    /// Configuration file is missing or invalid.
    Config,
}

/// Errors that can occur while loading, rendering, saving or showing a heatmap.
#[derive(Error, Debug)]
pub enum Error {
    /// Input path does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// I/O error on a known path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// I/O error not tied to a file (terminal, stdout).
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// A token could not be parsed as a number.
    #[error("line {line}, column {column}: expected a number, found {token:?}")]
    Parse {
        /// 1-based physical line number.
        line: usize,
        /// 1-based token index within the line.
        column: usize,
        /// Offending token.
        token: String,
    },

    /// A row has a different number of columns than the first row.
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        /// 1-based physical line number.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Invalid dimensions for framebuffer or matrix.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Viewer could not be opened or driven.
    #[error("viewer error: {0}")]
    Viewer(String),

    /// Configuration file not found.
    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    ///
    /// `NotFound` errors become [`Error::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Io { .. } | Self::Stream(_) => ErrorKind::Io,
            Self::Parse { .. } | Self::RaggedRow { .. } => ErrorKind::Parse,
            Self::EmptyData
            | Self::InvalidDimensions { .. }
            | Self::ScaleDomain(_)
            | Self::PngEncoding(_)
            | Self::Viewer(_) => ErrorKind::Render,
            Self::ConfigNotFound(_) | Self::ConfigParse { .. } => ErrorKind::Config,
        }
    }
}
