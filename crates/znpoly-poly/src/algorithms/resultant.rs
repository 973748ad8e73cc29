//! Resultants and discriminants.
//!
//! The resultant follows the Euclidean remainder sequence using
//! `res(A, B) = (-1)^(deg A deg B) lc(B)^(deg A - deg R) res(B, R)` for
//! `R = A mod B`, and `res(A, c) = c^(deg A)` for a constant c.

use num_traits::{One, Zero};

use znpoly_integers::{Integer, NotInvertible};

use crate::dense::{require_invertible, ZnPoly};

fn odd_product(m: usize, n: usize) -> bool {
    m % 2 == 1 && n % 2 == 1
}

impl ZnPoly {
    /// Resultant of `self` and `other` by the Euclidean algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn resultant_euclidean_f(&self, other: &Self) -> Result<Integer, NotInvertible> {
        self.check_same_ring(other);
        let zn = self.ctx();
        if self.is_zero() || other.is_zero() {
            return Ok(Integer::zero());
        }

        let (mut a, mut b, mut res) = if self.len() >= other.len() {
            (self.clone(), other.clone(), Integer::one())
        } else if odd_product(self.len() - 1, other.len() - 1) {
            (other.clone(), self.clone(), zn.neg(&Integer::one()))
        } else {
            (other.clone(), self.clone(), Integer::one())
        };

        loop {
            let (la, lb) = (a.len(), b.len());
            if lb == 1 {
                let c = zn.pow_u64(&b.coeff(0), (la - 1) as u64);
                return Ok(zn.mul(&res, &c));
            }
            let r = a.rem_f(&b)?;
            if r.is_zero() {
                return Ok(Integer::zero());
            }
            if odd_product(la - 1, lb - 1) {
                res = zn.neg(&res);
            }
            let lc = b.coeff(lb - 1);
            res = zn.mul(&res, &zn.pow_u64(&lc, (la - r.len()) as u64));
            a = std::mem::replace(&mut b, r);
        }
    }

    /// Resultant of `self` and `other` by the Euclidean algorithm.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn resultant_euclidean(&self, other: &Self) -> Integer {
        require_invertible(self.resultant_euclidean_f(other))
    }

    /// Resultant of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn resultant_f(&self, other: &Self) -> Result<Integer, NotInvertible> {
        self.resultant_euclidean_f(other)
    }

    /// Resultant of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn resultant(&self, other: &Self) -> Integer {
        self.resultant_euclidean(other)
    }

    /// Discriminant `(-1)^(n(n-1)/2) res(f, f') / lc(f)`, with `f'` taken
    /// as formally of degree n-1. Zero for constants.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a leading coefficient met on the way
    /// is not a unit.
    pub fn discriminant_f(&self) -> Result<Integer, NotInvertible> {
        let zn = self.ctx();
        if self.len() <= 1 {
            return Ok(Integer::zero());
        }
        let n = self.len() - 1;
        let df = self.derivative();
        let Some(ddf) = df.degree() else {
            return Ok(Integer::zero());
        };

        let mut disc = self.resultant_euclidean_f(&df)?;
        let lc = self.coeff(n);
        // lc^(n - 1 - deg f') / lc
        disc = if ddf + 1 < n {
            zn.mul(&disc, &zn.pow_u64(&lc, (n - 2 - ddf) as u64))
        } else {
            zn.mul(&disc, &zn.inv(&lc)?)
        };
        if (n * (n - 1) / 2) % 2 == 1 {
            disc = zn.neg(&disc);
        }
        Ok(disc)
    }

    /// Discriminant of `self`.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn discriminant(&self) -> Integer {
        require_invertible(self.discriminant_f())
    }
}
