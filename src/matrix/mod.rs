//! Dense square matrices and the naive reference kernel.
//!
//! [`Matrix`] is the only data type the strategies consume and produce.
//! Storage is one row-major buffer of `n * n` elements, so the kernels
//! work on plain slices the same way regardless of strategy.

pub mod io;
pub mod naive_ijk;

use std::fmt;
use std::ops::Index;

use crate::error::{MatmulError, Result};

/// Element type of every matrix in this crate.
pub type Element = i64;

/// A square `n × n` matrix, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    n: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// An `n × n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self::filled(n, 0)
    }

    /// An `n × n` matrix with every cell set to `value`.
    pub fn filled(n: usize, value: Element) -> Self {
        Matrix {
            n,
            data: vec![value; n * n],
        }
    }

    /// Builds a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Element,
    {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        Matrix { n, data }
    }

    /// Builds a matrix from rows. The number of rows sets the dimension and
    /// every row must have exactly that many elements.
    pub fn from_rows(rows: Vec<Vec<Element>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(MatmulError::NotSquare {
                    row,
                    expected: n,
                    got: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Matrix { n, data })
    }

    /// Dimension `n` of the matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Element> {
        if row < self.n && col < self.n {
            Some(self.data[row * self.n + col])
        } else {
            None
        }
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= dim()`.
    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Element]> {
        // chunks(0) panics; an empty buffer yields no rows either way
        self.data.chunks(self.n.max(1))
    }

    /// The row-major backing buffer.
    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    /// Renders the upper-left `size × size` corner in the text format,
    /// clipped to the matrix dimension.
    pub fn preview(&self, size: usize) -> String {
        let size = size.min(self.n);
        let mut out = String::new();
        for row in self.rows().take(size) {
            io::push_row(&mut out, &row[..size]);
        }
        out
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Element;

    fn index(&self, (row, col): (usize, usize)) -> &Element {
        assert!(
            row < self.n && col < self.n,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.n,
            self.n
        );
        &self.data[row * self.n + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview(self.n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let m = Matrix::filled(3, 7);
        assert_eq!(m.dim(), 3);
        assert_eq!(m.as_slice(), &[7; 9]);
        assert_eq!(m[(2, 1)], 7);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let m = Matrix::from_fn(2, |i, j| (i * 10 + j) as Element);
        assert_eq!(m.as_slice(), &[0, 1, 10, 11]);
        assert_eq!(m.row(1), &[10, 11]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        match err {
            MatmulError::NotSquare { row, expected, got } => {
                assert_eq!((row, expected, got), (1, 2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        assert!(Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).is_err());
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::zeros(0);
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.preview(10), "");
        assert_eq!(m, Matrix::from_rows(vec![]).unwrap());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::zeros(2);
        assert_eq!(m.get(1, 1), Some(0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn test_preview_clips() {
        let m = Matrix::from_fn(3, |i, j| (i * 3 + j) as Element);
        assert_eq!(m.preview(2), "0 1 \n3 4 \n");
        assert_eq!(m.preview(10), m.to_string());
    }
}
