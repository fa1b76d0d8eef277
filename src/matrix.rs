//! Dense row-major matrices

use crate::error::{RatingMillError, Result};
use rayon::prelude::*;

/// Dense matrix stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Quantized ratings, one per (user, item) cell
pub type RatingMatrix = Matrix<u8>;

impl<T> Matrix<T> {
    /// Build a matrix by evaluating `f(row, col)` in row-major order
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate rows in order
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; a 0-column matrix has no elements to yield anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every element, keeping the shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Sync> Matrix<T> {
    /// Parallel elementwise map; element order and shape are preserved
    pub fn par_map<U: Send>(&self, f: impl Fn(&T) -> U + Sync + Send) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.par_iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(RatingMillError::shape_mismatch(format!(
                    "row {} has {} columns, expected {}",
                    idx,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }
}

impl Matrix<f64> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Compute `self * other^T`: (m x k) times (n x k)^T gives m x n
    pub fn mul_transpose(&self, other: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.cols != other.cols {
            return Err(RatingMillError::shape_mismatch(format!(
                "cannot multiply {}x{} by transpose of {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut data: Vec<f64> = Vec::with_capacity(self.rows * other.rows);
        for lhs in self.rows_iter() {
            for rhs in other.rows_iter() {
                data.push(lhs.iter().zip(rhs).map(|(a, b)| a * b).sum());
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: other.rows,
            data,
        })
    }

    /// Elementwise sum of two matrices of equal shape
    pub fn add(&self, other: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.shape() != other.shape() {
            return Err(RatingMillError::shape_mismatch(format!(
                "cannot add {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}
