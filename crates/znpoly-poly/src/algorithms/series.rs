//! Power series inversion and division.
//!
//! Newton iteration doubles the precision of an inverse W of Q at each
//! step: if `Q * W = 1 + x^m * E` then
//! `W - x^m * (W * E mod x^(m'-m))` is correct to `m'` terms. Only
//! truncated products and subtractions are needed.

use num_traits::Zero;

use znpoly_integers::{Integer, NotInvertible, Zn};

use crate::algorithms::mul::mullow_slices;
use crate::cutoffs::INV_NEWTON_CUTOFF;
use crate::dense::{require_invertible, ZnPoly};

/// Basecase inverse of the series `q` to `n` terms, given the inverse of
/// its constant term.
#[must_use]
pub fn inv_series_basecase(zn: &Zn, q: &[Integer], n: usize, inv0: &Integer) -> Vec<Integer> {
    if n == 0 {
        return Vec::new();
    }
    let mut w = Vec::with_capacity(n);
    w.push(inv0.clone());
    for k in 1..n {
        let mut s = Integer::zero();
        for j in 1..=k.min(q.len().saturating_sub(1)) {
            s += &q[j] * &w[k - j];
        }
        w.push(zn.neg(&zn.mul(&zn.reduce_owned(s), inv0)));
    }
    w
}

/// Newton inverse of the series `q` to `n` terms, given the inverse of
/// its constant term.
///
/// The working precisions are n, ceil(n/2), ceil(n/4), ..., 1, visited
/// from the bottom.
#[must_use]
pub fn inv_series_newton_slices(
    zn: &Zn,
    q: &[Integer],
    n: usize,
    inv0: &Integer,
) -> Vec<Integer> {
    if n == 0 {
        return Vec::new();
    }

    let mut precisions = Vec::new();
    let mut m = n;
    while m > 1 {
        precisions.push(m);
        m = (m + 1) / 2;
    }

    let mut w = vec![inv0.clone()];
    for &target in precisions.iter().rev() {
        let cur = w.len();
        let p = mullow_slices(zn, &q[..q.len().min(target)], &w, target);
        w.resize(target, Integer::zero());
        if p.len() > cur {
            let u = mullow_slices(zn, &w[..cur], &p[cur..], target - cur);
            for (wi, c) in w[cur..].iter_mut().zip(&u) {
                *wi = zn.neg(c);
            }
        }
    }
    w
}

impl ZnPoly {
    fn series_inv0_f(&self) -> Result<Integer, NotInvertible> {
        self.ctx().inv(&self.coeff(0))
    }

    /// Inverse power series to `n` terms by Newton iteration.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] with `gcd(q(0), N)` when the constant term
    /// is not a unit. A zero constant term (including the zero series)
    /// reports N itself, which does not split the modulus.
    pub fn inv_series_newton_f(&self, n: usize) -> Result<Self, NotInvertible> {
        if n == 0 {
            return Ok(Self::zero(self.ctx()));
        }
        let inv0 = self.series_inv0_f()?;
        let w = inv_series_newton_slices(self.ctx(), self.coeffs(), n, &inv0);
        Ok(Self::from_vec(self.ctx(), w))
    }

    /// Inverse power series to `n` terms by Newton iteration.
    ///
    /// # Panics
    ///
    /// Panics if the constant term is not a unit.
    #[must_use]
    pub fn inv_series_newton(&self, n: usize) -> Self {
        require_invertible(self.inv_series_newton_f(n))
    }

    /// Inverse power series to `n` terms.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] with `gcd(q(0), N)` when the constant term
    /// is not a unit. A zero constant term (including the zero series)
    /// reports N itself, which does not split the modulus.
    pub fn inv_series_f(&self, n: usize) -> Result<Self, NotInvertible> {
        if n == 0 {
            return Ok(Self::zero(self.ctx()));
        }
        let inv0 = self.series_inv0_f()?;
        let w = if n < INV_NEWTON_CUTOFF {
            inv_series_basecase(self.ctx(), self.coeffs(), n, &inv0)
        } else {
            inv_series_newton_slices(self.ctx(), self.coeffs(), n, &inv0)
        };
        Ok(Self::from_vec(self.ctx(), w))
    }

    /// Inverse power series to `n` terms.
    ///
    /// # Panics
    ///
    /// Panics if the constant term is not a unit.
    #[must_use]
    pub fn inv_series(&self, n: usize) -> Self {
        require_invertible(self.inv_series_f(n))
    }

    /// Power series quotient `self / b` to `n` terms.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the constant term of `b` is not a unit,
    /// with factor N when that term is zero.
    pub fn div_series_f(&self, b: &Self, n: usize) -> Result<Self, NotInvertible> {
        self.check_same_ring(b);
        Ok(self.mullow(&b.inv_series_f(n)?, n))
    }

    /// Power series quotient `self / b` to `n` terms.
    ///
    /// # Panics
    ///
    /// Panics if the constant term of `b` is not a unit.
    #[must_use]
    pub fn div_series(&self, b: &Self, n: usize) -> Self {
        require_invertible(self.div_series_f(b, n))
    }

    /// Inverse of the reversed polynomial to `len` terms, the precomputed
    /// input of every `_preinv` routine.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient is not a unit.
    ///
    /// # Panics
    ///
    /// Panics on the zero polynomial.
    pub fn preinv_f(&self) -> Result<Self, NotInvertible> {
        assert!(!self.is_zero(), "division by zero polynomial");
        self.reverse(self.len()).inv_series_f(self.len())
    }

    /// Inverse of the reversed polynomial to `len` terms.
    ///
    /// # Panics
    ///
    /// Panics on the zero polynomial or if the leading coefficient is not a
    /// unit.
    #[must_use]
    pub fn preinv(&self) -> Self {
        require_invertible(self.preinv_f())
    }
}
