//! Polynomial division with remainder.
//!
//! Three strategies compute the same quotient and remainder:
//! - basecase long division, one reduction per output coefficient
//! - divide-and-conquer on windows of length 2*lenB - 1
//! - Newton division from a precomputed inverse of the reversed divisor
//!
//! For a dividend of length lenA and divisor of length lenB the quotient
//! has length lenA - lenB + 1 and the remainder fewer than lenB
//! coefficients. A dividend shorter than the divisor is its own remainder.

use num_traits::Zero;

use znpoly_integers::{Integer, NotInvertible, Zn};

use crate::algorithms::mul::{mul_into, mul_slices, mullow_slices};
use crate::cutoffs::{DIVREM_DIVCONQUER_CUTOFF, DIVREM_NEWTON_CUTOFF};
use crate::dense::{require_invertible, ZnPoly};

/// Schoolbook division into caller-supplied slices.
///
/// Writes the quotient to `q` (length `a.len() - b.len() + 1`) and the
/// remainder to `r` (length `b.len() - 1`, not normalized). `lead_inv` is
/// the inverse of the leading coefficient of `b`. Every quotient
/// coefficient is formed over the integers and reduced once.
///
/// # Panics
///
/// Panics if `b` is empty, `a` is shorter than `b` or the output slices
/// have the wrong lengths.
pub fn divrem_basecase_into(
    zn: &Zn,
    q: &mut [Integer],
    r: &mut [Integer],
    a: &[Integer],
    b: &[Integer],
    lead_inv: &Integer,
) {
    let lenb = b.len();
    assert!(lenb > 0 && a.len() >= lenb, "invalid operand lengths");
    let lenq = a.len() - lenb + 1;
    assert_eq!(q.len(), lenq);
    assert_eq!(r.len(), lenb - 1);

    for i in (0..lenq).rev() {
        let t = i + lenb - 1;
        let mut c = a[t].clone();
        for j in i + 1..=t.min(lenq - 1) {
            c -= &q[j] * &b[t - j];
        }
        q[i] = zn.mul(&zn.reduce_owned(c), lead_inv);
    }

    for (k, rk) in r.iter_mut().enumerate() {
        let mut c = a[k].clone();
        for j in 0..=k.min(lenq - 1) {
            c -= &q[j] * &b[k - j];
        }
        *rk = zn.reduce_owned(c);
    }
}

/// Schoolbook division returning fresh quotient and remainder vectors.
#[must_use]
pub fn divrem_basecase_slices(
    zn: &Zn,
    a: &[Integer],
    b: &[Integer],
    lead_inv: &Integer,
) -> (Vec<Integer>, Vec<Integer>) {
    let mut q = vec![Integer::zero(); a.len() - b.len() + 1];
    let mut r = vec![Integer::zero(); b.len() - 1];
    divrem_basecase_into(zn, &mut q, &mut r, a, b, lead_inv);
    (q, r)
}

/// Scratch length needed by the divide-and-conquer recursion for a
/// divisor window of length `lenb`.
#[must_use]
pub fn divconquer_scratch_len(lenb: usize) -> usize {
    if lenb <= DIVREM_DIVCONQUER_CUTOFF {
        0
    } else {
        7 * lenb + divconquer_scratch_len(lenb - lenb / 2)
    }
}

/// One divide-and-conquer step on a window: `a` has length `2n - 1` and
/// `b` length `n`. Writes the quotient to `q` (length n) and the product
/// `b * q` to `bq` (length 2n - 1).
fn divrem_divconquer_recursive(
    zn: &Zn,
    q: &mut [Integer],
    bq: &mut [Integer],
    a: &[Integer],
    b: &[Integer],
    lead_inv: &Integer,
    scratch: &mut [Integer],
) {
    let n = b.len();
    debug_assert_eq!(a.len(), 2 * n - 1);

    if n <= DIVREM_DIVCONQUER_CUTOFF {
        let (low, high) = bq.split_at_mut(n - 1);
        divrem_basecase_into(zn, q, low, a, b, lead_inv);
        for (x, ai) in low.iter_mut().zip(a) {
            *x = zn.sub(ai, x);
        }
        high.clone_from_slice(&a[n - 1..]);
        return;
    }

    let n2 = n / 2;
    let n1 = n - n2;
    let (q2, q1) = q.split_at_mut(n2);

    let (d1q1, rest) = scratch.split_at_mut(2 * n1 - 1);
    let (dq1, rest) = rest.split_at_mut(n - 1);
    let (t, rest) = rest.split_at_mut(n + n1 - 1);
    let (r1, rest) = rest.split_at_mut(n + n2 - 1);
    let (d3q2, rest) = rest.split_at_mut(2 * n2 - 1);
    let (dq2, child) = rest.split_at_mut(n - 1);

    // High half of the quotient from the top 2*n1 - 1 coefficients
    divrem_divconquer_recursive(zn, q1, d1q1, &a[2 * n2..], &b[n2..], lead_inv, child);

    // t = b * q1 = d1q1 * x^n2 + b[..n2] * q1
    mul_into(zn, dq1, &b[..n2], q1);
    t[..n - 1].clone_from_slice(dq1);
    for x in t[n - 1..].iter_mut() {
        x.set_zero();
    }
    for (ti, d) in t[n2..].iter_mut().zip(d1q1.iter()) {
        *ti = zn.add(ti, d);
    }

    // r1 = (a - t * x^n2) mod x^(n + n2 - 1); the top coefficients cancel
    for (i, ri) in r1.iter_mut().enumerate() {
        *ri = if i >= n2 {
            zn.sub(&a[i], &t[i - n2])
        } else {
            a[i].clone()
        };
    }

    // Low half of the quotient
    divrem_divconquer_recursive(zn, q2, d3q2, &r1[n1..], &b[n1..], lead_inv, child);

    // bq = t * x^n2 + d3q2 * x^n1 + b[..n1] * q2
    mul_into(zn, dq2, &b[..n1], q2);
    for x in bq[..n2].iter_mut() {
        x.set_zero();
    }
    bq[n2..].clone_from_slice(t);
    for (x, d) in bq[n1..].iter_mut().zip(d3q2.iter()) {
        *x = zn.add(x, d);
    }
    for (x, d) in bq.iter_mut().zip(dq2.iter()) {
        *x = zn.add(x, d);
    }
}

/// Returns `a[..n] - b * q mod x^n` for `n = b.len() - 1`.
fn remainder_from_quotient(zn: &Zn, a: &[Integer], b: &[Integer], q: &[Integer]) -> Vec<Integer> {
    let n = b.len() - 1;
    let bq = mullow_slices(zn, b, q, n);
    let mut r: Vec<Integer> = a[..n].to_vec();
    for (ri, c) in r.iter_mut().zip(&bq) {
        *ri = zn.sub(ri, c);
    }
    r
}

/// Divide-and-conquer division returning quotient and remainder vectors.
///
/// All recursion temporaries live in one scratch buffer allocated here,
/// sized by [`divconquer_scratch_len`].
///
/// # Panics
///
/// Panics if `b` is empty or `a` is shorter than `b`.
#[must_use]
pub fn divrem_divconquer_slices(
    zn: &Zn,
    a: &[Integer],
    b: &[Integer],
    lead_inv: &Integer,
) -> (Vec<Integer>, Vec<Integer>) {
    let lena = a.len();
    let lenb = b.len();
    assert!(lenb > 0 && lena >= lenb, "invalid operand lengths");
    let lenq = lena - lenb + 1;
    let mut q = vec![Integer::zero(); lenq];

    if lenq < lenb {
        // Only the top 2*lenq - 1 dividend and lenq divisor coefficients
        // contribute to the quotient.
        let n = lenq;
        let mut bq = vec![Integer::zero(); 2 * n - 1];
        let mut scratch = vec![Integer::zero(); divconquer_scratch_len(n)];
        divrem_divconquer_recursive(
            zn,
            &mut q,
            &mut bq,
            &a[lena - (2 * n - 1)..],
            &b[lenb - n..],
            lead_inv,
            &mut scratch,
        );
        let r = remainder_from_quotient(zn, a, b, &q);
        return (q, r);
    }

    let mut w = a.to_vec();
    let mut bq = vec![Integer::zero(); 2 * lenb - 1];
    let mut scratch = vec![Integer::zero(); divconquer_scratch_len(lenb)];
    let mut len = lena;

    while len >= 2 * lenb - 1 {
        let shift = len - (2 * lenb - 1);
        divrem_divconquer_recursive(
            zn,
            &mut q[shift..shift + lenb],
            &mut bq,
            &w[shift..len],
            b,
            lead_inv,
            &mut scratch,
        );
        for (wi, c) in w[shift..shift + lenb - 1].iter_mut().zip(&bq) {
            *wi = zn.sub(wi, c);
        }
        len -= lenb;
    }

    if len >= lenb {
        let (qlow, r) = divrem_divconquer_slices(zn, &w[..len], b, lead_inv);
        q[..qlow.len()].clone_from_slice(&qlow);
        return (q, r);
    }

    w.truncate(lenb - 1);
    (q, w)
}

/// Top `lenq` quotient coefficients from the top `lenq` dividend
/// coefficients: one reversed truncated product with `binv`.
fn quotient_block(zn: &Zn, a_top: &[Integer], binv: &[Integer]) -> Vec<Integer> {
    let lenq = a_top.len();
    let arev: Vec<Integer> = a_top.iter().rev().cloned().collect();
    let mut q = mullow_slices(zn, &arev, &binv[..binv.len().min(lenq)], lenq);
    q.resize(lenq, Integer::zero());
    q.reverse();
    q
}

/// Newton division quotient from `binv`, the power series inverse of the
/// reversed divisor.
///
/// Quotients longer than `binv` are produced in windows of `binv.len()`
/// coefficients from the top.
///
/// # Panics
///
/// Panics if `binv` is empty, `b` is empty or `a` is shorter than `b`.
#[must_use]
pub fn div_newton_n_preinv_slices(
    zn: &Zn,
    a: &[Integer],
    b: &[Integer],
    binv: &[Integer],
) -> Vec<Integer> {
    let lena = a.len();
    let lenb = b.len();
    assert!(lenb > 0 && lena >= lenb, "invalid operand lengths");
    assert!(!binv.is_empty(), "empty precomputed inverse");
    let lenq = lena - lenb + 1;

    if lenq <= binv.len() {
        return quotient_block(zn, &a[lena - lenq..], binv);
    }

    let mut w = a.to_vec();
    let mut q = vec![Integer::zero(); lenq];
    let mut len = lena;
    while len >= lenb {
        let lq = (len - lenb + 1).min(binv.len());
        let off = len - lenb + 1 - lq;
        let chunk = quotient_block(zn, &w[len - lq..len], binv);
        let prod = mul_slices(zn, b, &chunk);
        for (wi, c) in w[off..].iter_mut().zip(&prod) {
            *wi = zn.sub(wi, c);
        }
        q[off..off + lq].clone_from_slice(&chunk);
        len -= lq;
    }
    q
}

/// Newton division returning quotient and remainder vectors.
#[must_use]
pub fn divrem_newton_n_preinv_slices(
    zn: &Zn,
    a: &[Integer],
    b: &[Integer],
    binv: &[Integer],
) -> (Vec<Integer>, Vec<Integer>) {
    let q = div_newton_n_preinv_slices(zn, a, b, binv);
    let r = remainder_from_quotient(zn, a, b, &q);
    (q, r)
}

impl ZnPoly {
    /// Inverse of the leading coefficient of a divisor.
    #[track_caller]
    pub(crate) fn lead_inv_f(&self) -> Result<Integer, NotInvertible> {
        match self.leading_coeff() {
            None => panic!("division by zero polynomial"),
            Some(lc) => self.ctx().inv(lc),
        }
    }

    /// Handles the cases where no division takes place.
    fn trivial_divrem(&self, b: &Self) -> Option<(Self, Self)> {
        self.check_same_ring(b);
        assert!(!b.is_zero(), "division by zero polynomial");
        if self.len() < b.len() {
            Some((Self::zero(self.ctx()), self.clone()))
        } else {
            None
        }
    }

    fn from_divrem(&self, (q, r): (Vec<Integer>, Vec<Integer>)) -> (Self, Self) {
        let q = Self::from_vec(self.ctx(), q);
        let r = Self::from_vec(self.ctx(), r);
        debug_assert!(q.is_normalized() && r.is_normalized());
        (q, r)
    }

    /// Schoolbook division with remainder.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] with `gcd(lead(b), N)` when the leading
    /// coefficient of `b` is not a unit.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn divrem_basecase_f(&self, b: &Self) -> Result<(Self, Self), NotInvertible> {
        let inv = b.lead_inv_f()?;
        if let Some(trivial) = self.trivial_divrem(b) {
            return Ok(trivial);
        }
        let parts = divrem_basecase_slices(self.ctx(), self.coeffs(), b.coeffs(), &inv);
        Ok(self.from_divrem(parts))
    }

    /// Schoolbook division with remainder.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn divrem_basecase(&self, b: &Self) -> (Self, Self) {
        require_invertible(self.divrem_basecase_f(b))
    }

    /// Divide-and-conquer division with remainder.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `b` is not
    /// a unit.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn divrem_divconquer_f(&self, b: &Self) -> Result<(Self, Self), NotInvertible> {
        let inv = b.lead_inv_f()?;
        if let Some(trivial) = self.trivial_divrem(b) {
            return Ok(trivial);
        }
        let parts = divrem_divconquer_slices(self.ctx(), self.coeffs(), b.coeffs(), &inv);
        Ok(self.from_divrem(parts))
    }

    /// Divide-and-conquer division with remainder.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn divrem_divconquer(&self, b: &Self) -> (Self, Self) {
        require_invertible(self.divrem_divconquer_f(b))
    }

    /// Newton division with remainder given `binv`, the inverse of
    /// `b.reverse(b.len())` as a power series (see [`ZnPoly::preinv`]).
    ///
    /// # Panics
    ///
    /// Panics if `b` or `binv` is zero.
    #[must_use]
    pub fn divrem_newton_n_preinv(&self, b: &Self, binv: &Self) -> (Self, Self) {
        if let Some(trivial) = self.trivial_divrem(b) {
            return trivial;
        }
        let parts =
            divrem_newton_n_preinv_slices(self.ctx(), self.coeffs(), b.coeffs(), binv.coeffs());
        self.from_divrem(parts)
    }

    /// Newton division quotient given `binv`.
    ///
    /// # Panics
    ///
    /// Panics if `b` or `binv` is zero.
    #[must_use]
    pub fn div_newton_n_preinv(&self, b: &Self, binv: &Self) -> Self {
        if let Some((q, _)) = self.trivial_divrem(b) {
            return q;
        }
        let q = div_newton_n_preinv_slices(self.ctx(), self.coeffs(), b.coeffs(), binv.coeffs());
        Self::from_vec(self.ctx(), q)
    }

    /// Remainder modulo `b` given `binv`.
    ///
    /// # Panics
    ///
    /// Panics if `b` or `binv` is zero.
    #[must_use]
    pub fn rem_preinv(&self, b: &Self, binv: &Self) -> Self {
        self.divrem_newton_n_preinv(b, binv).1
    }

    /// Division with remainder, choosing the algorithm from the lengths.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] with `gcd(lead(b), N)` when the leading
    /// coefficient of `b` is not a unit.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn divrem_f(&self, b: &Self) -> Result<(Self, Self), NotInvertible> {
        let inv = b.lead_inv_f()?;
        if let Some(trivial) = self.trivial_divrem(b) {
            return Ok(trivial);
        }
        let zn = self.ctx();
        let lenb = b.len();
        let lenq = self.len() - lenb + 1;

        let parts = if lenb < DIVREM_DIVCONQUER_CUTOFF {
            divrem_basecase_slices(zn, self.coeffs(), b.coeffs(), &inv)
        } else if lenq >= DIVREM_NEWTON_CUTOFF {
            let binv = b.reverse(lenb).inv_series_f(lenq)?;
            divrem_newton_n_preinv_slices(zn, self.coeffs(), b.coeffs(), binv.coeffs())
        } else {
            divrem_divconquer_slices(zn, self.coeffs(), b.coeffs(), &inv)
        };
        Ok(self.from_divrem(parts))
    }

    /// Division with remainder, choosing the algorithm from the lengths.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn divrem(&self, b: &Self) -> (Self, Self) {
        require_invertible(self.divrem_f(b))
    }

    /// Quotient of the division by `b`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `b` is not
    /// a unit.
    pub fn div_f(&self, b: &Self) -> Result<Self, NotInvertible> {
        Ok(self.divrem_f(b)?.0)
    }

    /// Quotient of the division by `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn div(&self, b: &Self) -> Self {
        require_invertible(self.div_f(b))
    }

    /// Remainder of the division by `b`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `b` is not
    /// a unit.
    pub fn rem_f(&self, b: &Self) -> Result<Self, NotInvertible> {
        Ok(self.divrem_f(b)?.1)
    }

    /// Remainder of the division by `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn rem(&self, b: &Self) -> Self {
        require_invertible(self.rem_f(b))
    }

    /// Returns the exact quotient `self / b`, or `None` if `b` does not
    /// divide `self`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn divides(&self, b: &Self) -> Option<Self> {
        let (q, r) = self.divrem(b);
        r.is_zero().then_some(q)
    }

    /// Divides out the highest power of `b` dividing `self` and returns
    /// its exponent.
    ///
    /// # Panics
    ///
    /// Panics if `b` is constant or its leading coefficient is not a unit.
    pub fn remove(&mut self, b: &Self) -> usize {
        assert!(b.len() >= 2, "divisor must be non-constant");
        if self.is_zero() {
            return 0;
        }
        let mut count = 0;
        while let Some(q) = self.divides(b) {
            *self = q;
            count += 1;
        }
        count
    }
}
