//! Rectangular row-major matrix of `f32` samples.

use trueno::Vector;

use crate::error::{Error, Result};

/// A rectangular 2D grid of values in row-major order.
///
/// Always has at least one row and one column. Cells may hold non-finite
/// values; they are excluded from [`Matrix::extent`].
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for zero rows or columns and
    /// [`Error::InvalidDimensions`] if `data.len() != rows * cols`.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || data.is_empty() {
            return Err(Error::EmptyData);
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::InvalidDimensions { width: cols as u32, height: rows as u32 });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a slice of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if there are no rows or the first row is
    /// empty, and [`Error::RaggedRow`] (with 1-based row numbers) if the
    /// rows differ in length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(Error::EmptyData);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRow { line: i + 1, expected: cols, found: row.len() });
            }
            data.extend_from_slice(row);
        }

        Self::new(data, rows.len(), cols)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// One row as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Raw row-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// `(min, max)` over the finite cells, or `None` if there are none.
    #[must_use]
    pub fn extent(&self) -> Option<(f32, f32)> {
        let finite: Vec<f32> = self.data.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }

        // SIMD reduction via trueno
        let vec = Vector::from_vec(finite);
        let min = vec.min().ok()?;
        let max = vec.max().ok()?;
        Some((min, max))
    }

    /// `(min, max)` over the strictly positive finite cells.
    #[must_use]
    pub fn positive_extent(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of non-finite cells.
    #[must_use]
    pub fn non_finite_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.row(2), None);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::RaggedRow { line: 2, expected: 2, found: 1 }));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(Matrix::from_rows(&[]), Err(Error::EmptyData)));
        assert!(matches!(Matrix::from_rows(&[vec![]]), Err(Error::EmptyData)));
        assert!(matches!(Matrix::new(vec![], 0, 0), Err(Error::EmptyData)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Matrix::new(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 2, height: 2 }));
    }

    #[test]
    fn test_extent_ignores_non_finite() {
        let m = Matrix::new(vec![f32::NAN, -2.0, 5.0, f32::INFINITY], 2, 2).unwrap();
        assert_eq!(m.extent(), Some((-2.0, 5.0)));
        assert_eq!(m.non_finite_count(), 2);
    }

    #[test]
    fn test_extent_all_nan() {
        let m = Matrix::new(vec![f32::NAN; 4], 2, 2).unwrap();
        assert_eq!(m.extent(), None);
    }

    #[test]
    fn test_positive_extent() {
        let m = Matrix::new(vec![-1.0, 0.0, 2.0, 8.0], 1, 4).unwrap();
        assert_eq!(m.positive_extent(), Some((2.0, 8.0)));
        let m = Matrix::new(vec![-1.0, 0.0], 1, 2).unwrap();
        assert_eq!(m.positive_extent(), None);
    }
}
