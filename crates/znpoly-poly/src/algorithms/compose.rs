//! Modular composition `f(g) mod h`.
//!
//! Horner's rule costs one modular multiplication per coefficient of f.
//! The Brent-Kung baby-step/giant-step method cuts f into blocks of
//! m = isqrt(deg h) + 1 coefficients, evaluates every block at g with one
//! matrix product against the powers g^0, ..., g^(m-1) mod h, and then runs
//! Horner over the blocks with g^m. A power matrix can be precomputed and
//! shared by many compositions with the same (g, h).

use rayon::prelude::*;
use std::sync::Arc;

use znpoly_integers::Zn;
use znpoly_linalg::parallel::mul_mod_with;
use znpoly_linalg::{DenseMatrix, ParallelConfig};

use crate::cutoffs::COMPOSE_BRENT_KUNG_CUTOFF;
use crate::dense::ZnPoly;

/// Integer square root.
fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Number of baby steps for a modulus of length `lenh`.
fn baby_steps(lenh: usize) -> usize {
    isqrt(lenh.saturating_sub(1)) + 1
}

#[track_caller]
fn check_modulus(g: &ZnPoly, h: &ZnPoly) {
    g.check_same_ring(h);
    assert!(!h.is_zero(), "division by zero polynomial");
}

#[track_caller]
fn check_compose_args(f: &ZnPoly, g: &ZnPoly, h: &ZnPoly) {
    f.check_same_ring(h);
    check_modulus(g, h);
    assert!(f.len() < h.len(), "composition requires len(f) < len(h)");
}

fn row_poly(ctx: &Arc<Zn>, m: &DenseMatrix, i: usize) -> ZnPoly {
    ZnPoly::from_vec(ctx, m.row(i).to_vec())
}

fn reduce_if_long(g: &ZnPoly, h: &ZnPoly, hinv: &ZnPoly) -> ZnPoly {
    if g.len() >= h.len() {
        g.rem_preinv(h, hinv)
    } else {
        g.clone()
    }
}

/// Loads the coefficients of f into `rows` consecutive rows of width m,
/// starting at row `offset`.
fn load_blocks(blocks: &mut DenseMatrix, offset: usize, f: &ZnPoly, m: usize) {
    for (j, chunk) in f.coeffs().chunks(m).enumerate() {
        blocks.set_row(offset + j, chunk);
    }
}

/// Horner over the evaluated blocks `rows[offset..offset + k]` with
/// `gm = g^m mod h`.
fn recombine_rows(
    ctx: &Arc<Zn>,
    rows: &DenseMatrix,
    offset: usize,
    k: usize,
    gm: &ZnPoly,
    h: &ZnPoly,
    hinv: &ZnPoly,
) -> ZnPoly {
    if k == 0 {
        return ZnPoly::zero(ctx);
    }
    let mut result = row_poly(ctx, rows, offset + k - 1);
    for j in (0..k - 1).rev() {
        result = result
            .mulmod_preinv(gm, h, hinv)
            .add(&row_poly(ctx, rows, offset + j));
    }
    result
}

/// `g^m mod h` recovered from the power matrix: row m-1 times row 1.
fn giant_step(ctx: &Arc<Zn>, a: &DenseMatrix, h: &ZnPoly, hinv: &ZnPoly) -> ZnPoly {
    let m = a.num_rows();
    assert!(m >= 2, "power matrix needs at least two rows");
    row_poly(ctx, a, m - 1).mulmod_preinv(&row_poly(ctx, a, 1), h, hinv)
}

/// Power matrix with rows `g^0, g^1, ..., g^(m-1) mod h`, m = isqrt(deg h) + 1,
/// each row `deg h` entries wide.
///
/// # Panics
///
/// Panics if `h` is constant.
#[must_use]
pub fn precompute_matrix(g: &ZnPoly, h: &ZnPoly, hinv: &ZnPoly) -> DenseMatrix {
    g.check_same_ring(h);
    assert!(h.len() >= 2, "modulus polynomial must have positive degree");
    let n = h.len() - 1;
    let m = baby_steps(h.len());
    let powers = reduce_if_long(g, h, hinv).powers_mod_preinv(m, h, hinv);

    let mut a = DenseMatrix::zeros(m, n);
    for (i, p) in powers.iter().enumerate() {
        a.set_row(i, p.coeffs());
    }
    a
}

/// Re-reduces a power matrix of g modulo some multiple of `f` to a power
/// matrix of g modulo `f`.
///
/// # Panics
///
/// Panics if `f` is constant or `a` has too few rows for `f`.
#[must_use]
pub fn reduce_matrix_mod_poly(a: &DenseMatrix, f: &ZnPoly, finv: &ZnPoly) -> DenseMatrix {
    assert!(f.len() >= 2, "modulus polynomial must have positive degree");
    let ctx = f.ctx();
    let n = f.len() - 1;
    let m = baby_steps(f.len());
    assert!(a.num_rows() >= m, "power matrix has too few rows");

    let mut reduced = DenseMatrix::zeros(m, n);
    reduced.set_row(0, ZnPoly::one(ctx).coeffs());
    for i in 1..m {
        let row = reduce_if_long(&row_poly(ctx, a, i), f, finv);
        reduced.set_row(i, row.coeffs());
    }
    reduced
}

/// Evaluates `f` at the powers stored in `a` and recombines.
fn compose_with_matrix(f: &ZnPoly, a: &DenseMatrix, h: &ZnPoly, hinv: &ZnPoly) -> ZnPoly {
    let ctx = f.ctx();
    if f.is_zero() {
        return ZnPoly::zero(ctx);
    }
    let m = a.num_rows();
    let k = f.len().div_ceil(m);

    let mut blocks = DenseMatrix::zeros(k, m);
    load_blocks(&mut blocks, 0, f, m);
    let evaluated = blocks.mul_mod(a, ctx);
    let gm = giant_step(ctx, a, h, hinv);
    recombine_rows(ctx, &evaluated, 0, k, &gm, h, hinv)
}

/// Shared power matrix and stacked block product for a batch.
struct BatchProduct {
    evaluated: DenseMatrix,
    offsets: Vec<(usize, usize)>,
    gm: ZnPoly,
}

fn batch_product(
    polys: &[ZnPoly],
    g: &ZnPoly,
    h: &ZnPoly,
    hinv: &ZnPoly,
    parallel: bool,
) -> BatchProduct {
    let ctx = h.ctx();
    let a = precompute_matrix(g, h, hinv);
    let m = a.num_rows();

    let mut offsets = Vec::with_capacity(polys.len());
    let mut total = 0;
    for f in polys {
        let k = f.len().div_ceil(m);
        offsets.push((total, k));
        total += k;
    }

    let mut blocks = DenseMatrix::zeros(total, m);
    for (f, &(offset, _)) in polys.iter().zip(&offsets) {
        load_blocks(&mut blocks, offset, f, m);
    }
    tracing::debug!(
        count = polys.len(),
        rows = total,
        baby_steps = m,
        parallel,
        "batched composition"
    );

    let evaluated = if parallel {
        mul_mod_with(&blocks, &a, ctx, &ParallelConfig::default())
    } else {
        blocks.mul_mod(&a, ctx)
    };
    let gm = giant_step(ctx, &a, h, hinv);
    BatchProduct {
        evaluated,
        offsets,
        gm,
    }
}

/// Composes every polynomial of `polys` with g modulo h using one shared
/// power matrix and a single stacked matrix product.
///
/// # Panics
///
/// Panics if any `len(f) >= len(h)` or `h` is zero.
#[must_use]
pub fn compose_mod_brent_kung_vec_preinv(
    polys: &[ZnPoly],
    g: &ZnPoly,
    h: &ZnPoly,
    hinv: &ZnPoly,
) -> Vec<ZnPoly> {
    check_modulus(g, h);
    for f in polys {
        check_compose_args(f, g, h);
    }
    if h.len() == 1 {
        return vec![ZnPoly::zero(h.ctx()); polys.len()];
    }
    let batch = batch_product(polys, g, h, hinv, false);
    batch
        .offsets
        .iter()
        .map(|&(offset, k)| recombine_rows(h.ctx(), &batch.evaluated, offset, k, &batch.gm, h, hinv))
        .collect()
}

/// Like [`compose_mod_brent_kung_vec_preinv`], with the matrix product and
/// the per-polynomial recombination spread over the rayon pool.
///
/// # Panics
///
/// Panics if any `len(f) >= len(h)` or `h` is zero.
#[must_use]
pub fn compose_mod_brent_kung_vec_preinv_threaded(
    polys: &[ZnPoly],
    g: &ZnPoly,
    h: &ZnPoly,
    hinv: &ZnPoly,
) -> Vec<ZnPoly> {
    check_modulus(g, h);
    for f in polys {
        check_compose_args(f, g, h);
    }
    if h.len() == 1 {
        return vec![ZnPoly::zero(h.ctx()); polys.len()];
    }
    let batch = batch_product(polys, g, h, hinv, true);
    batch
        .offsets
        .par_iter()
        .map(|&(offset, k)| recombine_rows(h.ctx(), &batch.evaluated, offset, k, &batch.gm, h, hinv))
        .collect()
}

/// `f(g) mod h` from a power matrix built by [`precompute_matrix`] for the
/// same h.
///
/// # Panics
///
/// Panics if `len(f) >= len(h)` or the matrix width is not `deg h`.
#[must_use]
pub fn compose_mod_brent_kung_precomp_preinv(
    f: &ZnPoly,
    a: &DenseMatrix,
    h: &ZnPoly,
    hinv: &ZnPoly,
) -> ZnPoly {
    f.check_same_ring(h);
    assert!(!h.is_zero(), "division by zero polynomial");
    assert!(f.len() < h.len(), "composition requires len(f) < len(h)");
    assert_eq!(
        a.num_cols(),
        h.len() - 1,
        "power matrix does not match the modulus"
    );
    if h.len() == 1 {
        return ZnPoly::zero(h.ctx());
    }
    compose_with_matrix(f, a, h, hinv)
}

impl ZnPoly {
    /// Full composition `self(g)` by Horner's rule.
    #[must_use]
    pub fn compose(&self, g: &Self) -> Self {
        self.check_same_ring(g);
        let ctx = self.ctx();
        let mut result = Self::zero(ctx);
        for c in self.coeffs().iter().rev() {
            result = result.mul(g).add(&Self::constant(ctx, c));
        }
        result
    }

    /// `self(g) mod h` by Horner's rule, given `hinv = h.preinv()`.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)` or `h` is zero.
    #[must_use]
    pub fn compose_mod_horner_preinv(&self, g: &Self, h: &Self, hinv: &Self) -> Self {
        check_compose_args(self, g, h);
        let ctx = self.ctx();
        if h.len() == 1 || self.is_zero() {
            return Self::zero(ctx);
        }
        let g = reduce_if_long(g, h, hinv);
        let coeffs = self.coeffs();
        let mut result = Self::constant(ctx, &coeffs[coeffs.len() - 1]);
        for c in coeffs.iter().rev().skip(1) {
            result = result
                .mulmod_preinv(&g, h, hinv)
                .add(&Self::constant(ctx, c));
        }
        result
    }

    /// `self(g) mod h` by Horner's rule.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)`, `h` is zero or its leading
    /// coefficient is not a unit.
    #[must_use]
    pub fn compose_mod_horner(&self, g: &Self, h: &Self) -> Self {
        check_compose_args(self, g, h);
        self.compose_mod_horner_preinv(g, h, &h.preinv())
    }

    /// `self(g) mod h` by Brent-Kung, given `hinv = h.preinv()`.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)` or `h` is zero.
    #[must_use]
    pub fn compose_mod_brent_kung_preinv(&self, g: &Self, h: &Self, hinv: &Self) -> Self {
        check_compose_args(self, g, h);
        if h.len() == 1 || self.is_zero() {
            return Self::zero(self.ctx());
        }
        let a = precompute_matrix(g, h, hinv);
        compose_with_matrix(self, &a, h, hinv)
    }

    /// `self(g) mod h` by Brent-Kung.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)`, `h` is zero or its leading
    /// coefficient is not a unit.
    #[must_use]
    pub fn compose_mod_brent_kung(&self, g: &Self, h: &Self) -> Self {
        check_compose_args(self, g, h);
        self.compose_mod_brent_kung_preinv(g, h, &h.preinv())
    }

    /// `self(g) mod h`, Horner for short moduli and Brent-Kung otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)` or `h` is zero.
    #[must_use]
    pub fn compose_mod_preinv(&self, g: &Self, h: &Self, hinv: &Self) -> Self {
        if h.len() < COMPOSE_BRENT_KUNG_CUTOFF {
            self.compose_mod_horner_preinv(g, h, hinv)
        } else {
            self.compose_mod_brent_kung_preinv(g, h, hinv)
        }
    }

    /// `self(g) mod h`.
    ///
    /// # Panics
    ///
    /// Panics if `len(self) >= len(h)`, `h` is zero or its leading
    /// coefficient is not a unit.
    #[must_use]
    pub fn compose_mod(&self, g: &Self, h: &Self) -> Self {
        check_compose_args(self, g, h);
        self.compose_mod_preinv(g, h, &h.preinv())
    }
}
