//! Delimited text matrix loader.
//!
//! Reads files like
//!
//! ```text
//! # iterations per pixel
//! 0 1 2
//! 3 4 5
//! ```
//!
//! into a [`Matrix`]. Each non-empty line (after comment stripping) is one row;
//! tokens on a line are columns.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Loader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Comment marker; the rest of a line after it is ignored. Empty disables.
    pub comments: String,
    /// Column separator. `None` splits on any run of whitespace.
    pub delimiter: Option<char>,
    /// Leading physical lines to skip before parsing.
    pub skip_rows: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { comments: "#".to_string(), delimiter: None, skip_rows: 0 }
    }
}

/// Read and parse a matrix file.
///
/// # Errors
///
/// [`Error::NotFound`] / [`Error::Io`] if the file cannot be read, plus
/// everything [`parse_matrix`] returns.
pub fn load_matrix(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<Matrix> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let matrix = parse_matrix(&text, options)?;
    debug!(path = %path.display(), rows = matrix.rows(), cols = matrix.cols(), "Loaded matrix");
    Ok(matrix)
}

/// Parse matrix text.
///
/// # Errors
///
/// - [`Error::Parse`] for a token that is not a number.
/// - [`Error::RaggedRow`] for a row whose length differs from the first row.
/// - [`Error::EmptyData`] if there are no data rows.
pub fn parse_matrix(text: &str, options: &LoaderOptions) -> Result<Matrix> {
    let mut data = Vec::new();
    let mut rows = 0;
    let mut cols = 0;

    for (idx, raw) in text.lines().enumerate().skip(options.skip_rows) {
        let line_no = idx + 1;
        let content = strip_comment(raw, &options.comments);
        if content.trim().is_empty() {
            continue;
        }

        let before = data.len();
        for (col, token) in tokens(content, options.delimiter).enumerate() {
            let value = token.parse::<f32>().map_err(|_| Error::Parse {
                line: line_no,
                column: col + 1,
                token: token.to_string(),
            })?;
            data.push(value);
        }

        let found = data.len() - before;
        if rows == 0 {
            cols = found;
        } else if found != cols {
            return Err(Error::RaggedRow { line: line_no, expected: cols, found });
        }
        rows += 1;
    }

    Matrix::new(data, rows, cols)
}

fn strip_comment<'a>(line: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return line;
    }
    line.find(marker).map_or(line, |pos| &line[..pos])
}

fn tokens(line: &str, delimiter: Option<char>) -> Box<dyn Iterator<Item = &str> + '_> {
    match delimiter {
        None => Box::new(line.split_whitespace()),
        Some(d) => Box::new(line.split(d).map(str::trim)),
    }
}
