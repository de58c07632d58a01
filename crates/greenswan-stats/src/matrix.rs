//! Dense row-major `f64` matrix.
//!
//! Just enough linear-algebra plumbing for [`pca`](crate::pca) and
//! [`kmeans`](crate::kmeans): rows are observations, columns are features.

use std::ops::{Index, IndexMut};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MatrixError {
    #[display("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("{len} values cannot fill a {rows}x{cols} matrix")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },
}

/// Dense matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use greenswan_stats::matrix::Matrix;
///
/// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
/// assert_eq!((m.nrows(), m.ncols()), (3, 2));
/// assert_eq!(m[(2, 1)], 6.0);
/// assert_eq!(m.column_means(), vec![3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates an empty matrix with `cols` columns, ready for [`push_row`](Self::push_row).
    #[must_use]
    pub fn with_columns(cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: vec![],
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not have exactly `ncols()` values.
    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(row.len(), self.cols, "row width must match matrix width");
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a slice of equally sized rows.
    ///
    /// An empty slice yields a `0x0` matrix.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[f64]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[must_use]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// All values in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn column(&self, j: usize) -> impl ExactSizeIterator<Item = f64> + '_ {
        assert!(j < self.cols, "column index out of range");
        (0..self.rows).map(move |i| self.data[i * self.cols + j])
    }

    /// Returns the arithmetic mean of each column (zeros for an empty matrix).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.cols];
        if self.rows == 0 {
            return means;
        }
        for row in self.rows() {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        let n = self.rows as f64;
        for mean in &mut means {
            *mean /= n;
        }
        means
    }

    /// Returns a copy with each column shifted to zero mean.
    #[must_use]
    pub fn centered(&self) -> Self {
        let means = self.column_means();
        let mut centered = self.clone();
        for i in 0..self.rows {
            for (j, mean) in means.iter().enumerate() {
                centered[(i, j)] -= mean;
            }
        }
        centered
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows && j < self.cols, "matrix index out of range");
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.rows && j < self.cols, "matrix index out of range");
        &mut self.data[i * self.cols + j]
    }
}

/// Squared Euclidean distance between two equally sized points.
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
