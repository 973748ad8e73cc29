//! Choosing between the sequential and the rayon matrix product.

use znpoly_integers::Zn;

use crate::dense_matrix::DenseMatrix;

/// When a matrix product is worth spreading over the rayon pool.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Products with fewer multiply-adds than this (rows x inner x cols)
    /// stay sequential.
    pub min_work: usize,
    /// Products with fewer output rows than this stay sequential; the
    /// parallel kernel hands out one row per task.
    pub min_rows: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_work: 1 << 14,
            min_rows: 4,
        }
    }
}

impl ParallelConfig {
    /// Returns true when `a * b` should run on the rayon pool.
    #[must_use]
    pub fn use_parallel(&self, a: &DenseMatrix, b: &DenseMatrix) -> bool {
        let work = a
            .num_rows()
            .saturating_mul(a.num_cols())
            .saturating_mul(b.num_cols());
        a.num_rows() >= self.min_rows && work >= self.min_work
    }
}

/// Matrix product modulo N, run on the rayon pool when `config` says the
/// product is large enough.
///
/// # Panics
///
/// Panics if the inner dimensions disagree.
#[must_use]
pub fn mul_mod_with(
    a: &DenseMatrix,
    b: &DenseMatrix,
    zn: &Zn,
    config: &ParallelConfig,
) -> DenseMatrix {
    if config.use_parallel(a, b) {
        a.mul_mod_parallel(b, zn)
    } else {
        a.mul_mod(b, zn)
    }
}
