//! Dense matrix of residues modulo N.
//!
//! Entries are `Integer`s kept in `[0, N)`. The modulus is not stored in the
//! matrix; every arithmetic routine takes the `Zn` context explicitly, the
//! same way the polynomial kernels do.

use num_traits::Zero;
use rayon::prelude::*;

use znpoly_integers::{Integer, Zn};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    data: Vec<Integer>,
    num_rows: usize,
    num_cols: usize,
}

impl DenseMatrix {
    /// Allocates a `num_rows x num_cols` matrix of zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![Integer::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Row `i` as a slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Integer] {
        let start = i * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Row `i` as a mutable slice.
    pub fn row_mut(&mut self, i: usize) -> &mut [Integer] {
        let start = i * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Overwrites row `i` with `values`, padding with zeros.
    ///
    /// This is how polynomial coefficient vectors are loaded: a polynomial
    /// shorter than the row width fills the leading entries only.
    ///
    /// # Panics
    ///
    /// Panics if `values` is longer than a row.
    pub fn set_row(&mut self, i: usize, values: &[Integer]) {
        assert!(values.len() <= self.num_cols, "row overflow");
        let dst = self.row_mut(i);
        dst[..values.len()].clone_from_slice(values);
        for v in &mut dst[values.len()..] {
            *v = Integer::zero();
        }
    }

    /// Matrix product modulo N: `self * other`.
    ///
    /// Each output row is accumulated over the integers and reduced once.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    #[must_use]
    pub fn mul_mod(&self, other: &Self, zn: &Zn) -> Self {
        assert_eq!(self.num_cols, other.num_rows, "dimension mismatch");

        let mut data = Vec::with_capacity(self.num_rows * other.num_cols);
        for i in 0..self.num_rows {
            data.extend(self.product_row(i, other, zn));
        }
        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }

    /// Matrix product modulo N with one rayon task per output row.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    #[must_use]
    pub fn mul_mod_parallel(&self, other: &Self, zn: &Zn) -> Self {
        assert_eq!(self.num_cols, other.num_rows, "dimension mismatch");

        let data: Vec<Integer> = (0..self.num_rows)
            .into_par_iter()
            .flat_map_iter(|i| self.product_row(i, other, zn))
            .collect();
        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }

    /// Row `i` of `self * other`, reduced.
    fn product_row(&self, i: usize, other: &Self, zn: &Zn) -> Vec<Integer> {
        let mut acc = vec![Integer::zero(); other.num_cols];
        for (k, a) in self.row(i).iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (s, b) in acc.iter_mut().zip(other.row(k)) {
                *s += a * b;
            }
        }
        acc.into_iter().map(|s| zn.reduce_owned(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i64]]) -> DenseMatrix {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut out = DenseMatrix::zeros(rows.len(), cols);
        for (i, r) in rows.iter().enumerate() {
            let values: Vec<Integer> = r.iter().map(|&v| Integer::new(v)).collect();
            out.set_row(i, &values);
        }
        out
    }

    #[test]
    fn test_zeros() {
        let a = DenseMatrix::zeros(3, 4);
        assert_eq!(a.num_rows(), 3);
        assert_eq!(a.num_cols(), 4);
        assert!((0..3).all(|i| a.row(i).iter().all(Zero::is_zero)));
    }

    #[test]
    fn test_mul_mod() {
        let zn = Zn::from_u64(11);
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[5, 6], &[7, 8]]);
        // [[19, 22], [43, 50]] mod 11
        assert_eq!(a.mul_mod(&b, &zn), m(&[&[8, 0], &[10, 6]]));
    }

    #[test]
    fn test_mul_mod_rectangular() {
        let zn = Zn::from_u64(101);
        let a = m(&[&[1, 0, 2]]);
        let b = m(&[&[1, 2], &[3, 4], &[5, 6]]);
        let c = a.mul_mod(&b, &zn);
        assert_eq!(c.num_rows(), 1);
        assert_eq!(c.num_cols(), 2);
        assert_eq!(c.row(0), &[Integer::new(11), Integer::new(14)]);
        assert_eq!(a.mul_mod_parallel(&b, &zn), c);
    }

    #[test]
    fn test_set_row_pads() {
        let mut a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        a.set_row(1, &[Integer::new(9)]);
        assert_eq!(a.row(1), &[Integer::new(9), Integer::zero(), Integer::zero()]);
        assert_eq!(a.row(0), &[Integer::new(1), Integer::new(2), Integer::new(3)]);
        a.row_mut(0)[2] = Integer::new(7);
        assert_eq!(a.row(0)[2], Integer::new(7));
    }

    #[test]
    #[should_panic(expected = "row overflow")]
    fn test_set_row_overflow() {
        let mut a = DenseMatrix::zeros(1, 2);
        a.set_row(0, &[Integer::new(1), Integer::new(2), Integer::new(3)]);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_mul_mod_dimension_mismatch() {
        let zn = Zn::from_u64(5);
        let a = DenseMatrix::zeros(2, 3);
        let _ = a.mul_mod(&a, &zn);
    }
}
