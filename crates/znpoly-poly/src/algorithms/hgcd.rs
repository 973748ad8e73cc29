//! Half-GCD.
//!
//! For `deg a > deg b` the half-gcd is the 2x2 cofactor matrix M of the
//! Euclidean remainder sequence of (a, b) such that `(c, d) = M * (a, b)`
//! are consecutive remainders with
//! `deg d < ceil(deg a / 2) <= deg c`.
//!
//! The recursion solves the problem on the high halves
//! `(a div x^m, b div x^m)`, whose quotients agree with those of the full
//! pair, performs one explicit division, then recurses once more on the
//! shifted remainder pair.

use num_traits::One;
use std::sync::Arc;

use znpoly_integers::{NotInvertible, Zn};

use crate::cutoffs::HGCD_BASECASE_CUTOFF;
use crate::dense::{require_invertible, ZnPoly};

/// A 2x2 matrix of polynomials acting on remainder pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HgcdMatrix {
    /// Row 0, column 0.
    pub m00: ZnPoly,
    /// Row 0, column 1.
    pub m01: ZnPoly,
    /// Row 1, column 0.
    pub m10: ZnPoly,
    /// Row 1, column 1.
    pub m11: ZnPoly,
}

impl HgcdMatrix {
    /// The identity matrix.
    #[must_use]
    pub fn identity(ctx: &Arc<Zn>) -> Self {
        Self {
            m00: ZnPoly::one(ctx),
            m01: ZnPoly::zero(ctx),
            m10: ZnPoly::zero(ctx),
            m11: ZnPoly::one(ctx),
        }
    }

    /// Returns `(m00*a + m01*b, m10*a + m11*b)`.
    #[must_use]
    pub fn apply(&self, a: &ZnPoly, b: &ZnPoly) -> (ZnPoly, ZnPoly) {
        let c = self.m00.mul(a).add(&self.m01.mul(b));
        let d = self.m10.mul(a).add(&self.m11.mul(b));
        (c, d)
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            m00: self.m00.mul(&other.m00).add(&self.m01.mul(&other.m10)),
            m01: self.m00.mul(&other.m01).add(&self.m01.mul(&other.m11)),
            m10: self.m10.mul(&other.m00).add(&self.m11.mul(&other.m10)),
            m11: self.m10.mul(&other.m01).add(&self.m11.mul(&other.m11)),
        }
    }

    /// Left-multiplies by the elementary matrix `[[0, 1], [1, -q]]` of one
    /// division step `(a, b) -> (b, a - q*b)`.
    pub fn step(&mut self, q: &ZnPoly) {
        let m10 = self.m00.sub(&q.mul(&self.m10));
        let m11 = self.m01.sub(&q.mul(&self.m11));
        self.m00 = std::mem::replace(&mut self.m10, m10);
        self.m01 = std::mem::replace(&mut self.m11, m11);
    }

    /// Returns true for the identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.m00.is_one() && self.m01.is_zero() && self.m10.is_zero() && self.m11.is_one()
    }
}

/// True when `d` is zero or has degree below `m`.
fn below(d: &ZnPoly, m: usize) -> bool {
    d.degree().map_or(true, |deg| deg < m)
}

/// Plain division steps until the second remainder drops below degree `m`.
pub(crate) fn euclid_steps(
    mut mat: HgcdMatrix,
    mut c: ZnPoly,
    mut d: ZnPoly,
    m: usize,
) -> Result<(HgcdMatrix, ZnPoly, ZnPoly), NotInvertible> {
    while !below(&d, m) {
        let (q, r) = c.divrem_f(&d)?;
        mat.step(&q);
        c = std::mem::replace(&mut d, r);
    }
    Ok((mat, c, d))
}

fn hgcd_recursive(
    a: &ZnPoly,
    b: &ZnPoly,
) -> Result<(HgcdMatrix, ZnPoly, ZnPoly), NotInvertible> {
    let ctx = a.ctx();
    let n = a.degree().unwrap_or(0);
    let m = (n + 1) / 2;

    if below(b, m) {
        return Ok((HgcdMatrix::identity(ctx), a.clone(), b.clone()));
    }
    if a.len() < HGCD_BASECASE_CUTOFF {
        return euclid_steps(HgcdMatrix::identity(ctx), a.clone(), b.clone(), m);
    }

    let (mut mat, _, _) = hgcd_recursive(&a.shift_right(m), &b.shift_right(m))?;
    let (c, d) = mat.apply(a, b);
    if below(&d, m) {
        return Ok((mat, c, d));
    }

    // One explicit division step
    let (q, r) = c.divrem_f(&d)?;
    mat.step(&q);
    let (c, d) = (d, r);
    if below(&d, m) {
        return Ok((mat, c, d));
    }

    let l = c.degree().unwrap_or(0);
    let Some(k) = (2 * m).checked_sub(l) else {
        return euclid_steps(mat, c, d, m);
    };
    let (m2, _, _) = hgcd_recursive(&c.shift_right(k), &d.shift_right(k))?;
    let (c, d) = m2.apply(&c, &d);
    euclid_steps(m2.mul(&mat), c, d, m)
}

/// Half-GCD of `(a, b)` with `deg a > deg b`.
///
/// Returns the cofactor matrix and the remainder pair it produces.
///
/// # Errors
///
/// Returns [`NotInvertible`] when a remainder with a non-unit leading
/// coefficient is met.
///
/// # Panics
///
/// Panics unless `a` is non-zero and `deg a > deg b`.
pub fn hgcd_f(
    a: &ZnPoly,
    b: &ZnPoly,
) -> Result<(HgcdMatrix, ZnPoly, ZnPoly), NotInvertible> {
    a.check_same_ring(b);
    assert!(
        !a.is_zero() && a.len() > b.len(),
        "hgcd requires deg(a) > deg(b)"
    );
    tracing::trace!(len_a = a.len(), len_b = b.len(), "hgcd");
    hgcd_recursive(a, b)
}

/// Half-GCD of `(a, b)` with `deg a > deg b`.
///
/// # Panics
///
/// Panics unless `deg a > deg b`, or when a leading coefficient is not a
/// unit.
#[must_use]
pub fn hgcd(a: &ZnPoly, b: &ZnPoly) -> (HgcdMatrix, ZnPoly, ZnPoly) {
    require_invertible(hgcd_f(a, b))
}

impl ZnPoly {
    /// Monic gcd driven by Half-GCD, finishing with Euclid on short
    /// remainders.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn gcd_hgcd_f(&self, other: &Self) -> Result<Self, NotInvertible> {
        self.check_same_ring(other);
        let (mut a, mut b) = if self.len() >= other.len() {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        if b.is_zero() {
            return a.make_monic_f();
        }
        let _span = tracing::debug_span!("gcd_hgcd", len = a.len()).entered();

        let r = a.rem_f(&b)?;
        a = std::mem::replace(&mut b, r);
        loop {
            if b.is_zero() {
                return a.make_monic_f();
            }
            if a.len() < HGCD_BASECASE_CUTOFF {
                return a.gcd_euclidean_f(&b);
            }
            let (_, c, d) = hgcd_f(&a, &b)?;
            a = c;
            b = d;
            if !b.is_zero() {
                let r = a.rem_f(&b)?;
                a = std::mem::replace(&mut b, r);
            }
        }
    }

    /// Monic gcd driven by Half-GCD.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn gcd_hgcd(&self, other: &Self) -> Self {
        require_invertible(self.gcd_hgcd_f(other))
    }

    /// Extended gcd driven by Half-GCD: `(G, S, T)` with `S*self + T*other = G`
    /// and G monic. The cofactors equal those of the Euclidean algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn xgcd_hgcd_f(&self, other: &Self) -> Result<(Self, Self, Self), NotInvertible> {
        self.check_same_ring(other);
        if self.len() < other.len() {
            let (g, t, s) = other.xgcd_hgcd_f(self)?;
            return Ok((g, s, t));
        }
        if let Some(trivial) = self.xgcd_degenerate_f(other)? {
            return Ok(trivial);
        }
        let ctx = self.ctx();
        let _span = tracing::debug_span!("xgcd_hgcd", len = self.len()).entered();

        let mut mat = HgcdMatrix::identity(ctx);
        let (q, r) = self.divrem_f(other)?;
        mat.step(&q);
        let mut a = other.clone();
        let mut b = r;

        while !b.is_zero() {
            if a.len() < HGCD_BASECASE_CUTOFF {
                let (m, c, _) = euclid_steps(mat, a, b, 0)?;
                mat = m;
                a = c;
                break;
            }
            let (m, c, d) = hgcd_f(&a, &b)?;
            mat = m.mul(&mat);
            a = c;
            b = d;
            if !b.is_zero() {
                let (q, r) = a.divrem_f(&b)?;
                mat.step(&q);
                a = std::mem::replace(&mut b, r);
            }
        }

        let lc = a.leading_coeff().cloned().unwrap_or_else(One::one);
        let inv = ctx.inv(&lc)?;
        Ok((
            a.scalar_mul(&inv),
            mat.m00.scalar_mul(&inv),
            mat.m01.scalar_mul(&inv),
        ))
    }

    /// Extended gcd driven by Half-GCD.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn xgcd_hgcd(&self, other: &Self) -> (Self, Self, Self) {
        require_invertible(self.xgcd_hgcd_f(other))
    }
}
