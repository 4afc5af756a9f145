//! Dense integer matrices and non-owning windows
//!
//! Row-major dense matrix of big integers, plus a borrowed window type that
//! aliases a row/column sub-range of an existing matrix without copying.
//! A window can neither outlive nor deallocate the matrix it views.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Dense big-integer matrix in row-major order. Owns its storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntMat {
    data: Vec<BigInt>,
    rows: usize,
    cols: usize,
}

impl IntMat {
    /// Create a matrix from a flat vector (row-major order)
    pub fn from_flat(data: Vec<BigInt>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Create a zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![BigInt::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create an identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            *m.get_mut(i, i) = BigInt::one();
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get matrix dimensions
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Access element at (i, j)
    pub fn get(&self, i: usize, j: usize) -> &BigInt {
        &self.data[i * self.cols + j]
    }

    /// Mutable access to element at (i, j)
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        &mut self.data[i * self.cols + j]
    }

    /// Get a row as a slice
    pub fn row(&self, i: usize) -> &[BigInt] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for t in 0..self.cols {
            self.data.swap(i * self.cols + t, j * self.cols + t);
        }
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for r in 0..self.rows {
            self.data.swap(r * self.cols + i, r * self.cols + j);
        }
    }

    /// Whether the matrix is square and equal to its transpose.
    pub fn is_symmetric(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }
        for i in 0..self.rows {
            for j in 0..i {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// Matrix product `self · other`
    pub fn mul(&self, other: &IntMat) -> IntMat {
        assert_eq!(self.cols, other.rows, "dimension mismatch in matrix product");
        let mut out = IntMat::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = BigInt::zero();
                for t in 0..self.cols {
                    acc += self.get(i, t) * other.get(t, j);
                }
                *out.get_mut(i, j) = acc;
            }
        }
        out
    }

    /// Transposed copy
    pub fn transpose(&self) -> IntMat {
        let mut out = IntMat::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                *out.get_mut(j, i) = self.get(i, j).clone();
            }
        }
        out
    }

    /// Non-owning window over rows `[r0, r1)` and columns `[c0, c1)`.
    pub fn window(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> MatWindow<'_> {
        assert!(r0 <= r1 && r1 <= self.rows, "row range out of bounds");
        assert!(c0 <= c1 && c1 <= self.cols, "column range out of bounds");
        MatWindow {
            mat: self,
            r0,
            c0,
            rows: r1 - r0,
            cols: c1 - c0,
        }
    }

    /// Window over the whole matrix.
    pub fn full(&self) -> MatWindow<'_> {
        self.window(0, 0, self.rows, self.cols)
    }

    /// Window skipping the maximal prefix of all-zero rows and the same
    /// number of leading columns. Only meaningful for square (Gram) input,
    /// where a dropped row's column is the matching inner-product column.
    pub fn strip_leading_zero_rows_and_cols(&self) -> MatWindow<'_> {
        assert_eq!(self.rows, self.cols, "expected a square (Gram) matrix");
        let mut z = 0;
        while z < self.rows && self.row(z).iter().all(Zero::is_zero) {
            z += 1;
        }
        self.window(z, z, self.rows, self.cols)
    }
}

/// Borrowed, shape-restricted alias into an [`IntMat`].
///
/// Dropping a window never touches the backing storage.
#[derive(Debug, Clone, Copy)]
pub struct MatWindow<'a> {
    mat: &'a IntMat,
    r0: usize,
    c0: usize,
    rows: usize,
    cols: usize,
}

impl MatWindow<'_> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Access element at (i, j) of the window
    pub fn get(&self, i: usize, j: usize) -> &BigInt {
        debug_assert!(i < self.rows && j < self.cols);
        self.mat.get(self.r0 + i, self.c0 + j)
    }

    /// Owned copy of the windowed region
    pub fn to_mat(&self) -> IntMat {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                data.push(self.get(i, j).clone());
            }
        }
        IntMat::from_flat(data, self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[i64]]) -> IntMat {
        let cols = rows.first().map_or(0, |r| r.len());
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&v| BigInt::from(v)))
            .collect();
        IntMat::from_flat(data, rows.len(), cols)
    }

    #[test]
    fn test_matrix_access() {
        let m = mat(&[&[0, 1, 2], &[3, 4, 5]]);

        assert_eq!(m.get(0, 0), &BigInt::from(0));
        assert_eq!(m.get(0, 2), &BigInt::from(2));
        assert_eq!(m.get(1, 0), &BigInt::from(3));
        assert_eq!(m.row(1), &[BigInt::from(3), BigInt::from(4), BigInt::from(5)]);
    }

    #[test]
    fn test_identity() {
        let id = IntMat::identity(3);
        assert_eq!(id.get(0, 0), &BigInt::one());
        assert_eq!(id.get(1, 1), &BigInt::one());
        assert_eq!(id.get(0, 1), &BigInt::zero());
    }

    #[test]
    fn test_swap_rows_and_cols() {
        let mut m = mat(&[&[1, 2], &[3, 4]]);
        m.swap_rows(0, 1);
        assert_eq!(m, mat(&[&[3, 4], &[1, 2]]));
        m.swap_cols(0, 1);
        assert_eq!(m, mat(&[&[4, 3], &[2, 1]]));
    }

    #[test]
    fn test_symmetry() {
        assert!(mat(&[&[2, 1], &[1, 2]]).is_symmetric());
        assert!(!mat(&[&[2, 1], &[0, 2]]).is_symmetric());
        assert!(!mat(&[&[1, 2, 3], &[4, 5, 6]]).is_symmetric());
        assert!(IntMat::zeros(0, 0).is_symmetric());
    }

    #[test]
    fn test_mul_transpose() {
        let a = mat(&[&[1, 2], &[3, 4]]);
        let b = mat(&[&[0, 1], &[1, 0]]);
        assert_eq!(a.mul(&b), mat(&[&[2, 1], &[4, 3]]));
        assert_eq!(a.transpose(), mat(&[&[1, 3], &[2, 4]]));
    }

    #[test]
    fn test_window_aliases_without_copy() {
        let m = mat(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let w = m.window(1, 1, 3, 3);

        assert_eq!(w.rows(), 2);
        assert_eq!(w.cols(), 2);
        assert_eq!(w.get(0, 0), &BigInt::from(5));
        assert_eq!(w.get(1, 1), &BigInt::from(9));
        assert_eq!(w.to_mat(), mat(&[&[5, 6], &[8, 9]]));
    }

    #[test]
    fn test_strip_leading_zero_rows() {
        let m = mat(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 4]]);
        let w = m.strip_leading_zero_rows_and_cols();
        assert_eq!((w.rows(), w.cols()), (1, 1));
        assert_eq!(w.get(0, 0), &BigInt::from(4));

        // No zero prefix: the window covers everything
        let full = mat(&[&[2, 1], &[1, 2]]);
        let w = full.strip_leading_zero_rows_and_cols();
        assert_eq!((w.rows(), w.cols()), (2, 2));

        // All-zero matrix strips to 0×0
        let z = IntMat::zeros(2, 2);
        let w = z.strip_leading_zero_rows_and_cols();
        assert_eq!((w.rows(), w.cols()), (0, 0));
    }
}
