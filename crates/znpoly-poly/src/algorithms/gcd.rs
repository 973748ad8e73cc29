//! Euclidean gcd, extended gcd and modular inversion.
//!
//! The gcd is always monic; `gcd(0, 0) = 0`. Over a composite modulus each
//! routine has an `_f` form that stops on the first remainder whose leading
//! coefficient is not a unit and hands back the factor of N it exposes.

use num_traits::One;

use znpoly_integers::NotInvertible;

use crate::cutoffs::{GCD_HGCD_CUTOFF, XGCD_HGCD_CUTOFF};
use crate::dense::{require_invertible, ZnPoly};

impl ZnPoly {
    /// Monic gcd by the classical Euclidean algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn gcd_euclidean_f(&self, other: &Self) -> Result<Self, NotInvertible> {
        self.check_same_ring(other);
        let (mut a, mut b) = if self.len() >= other.len() {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        while !b.is_zero() {
            let r = a.rem_f(&b)?;
            a = std::mem::replace(&mut b, r);
        }
        a.make_monic_f()
    }

    /// Monic gcd by the classical Euclidean algorithm.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn gcd_euclidean(&self, other: &Self) -> Self {
        require_invertible(self.gcd_euclidean_f(other))
    }

    /// Handles the extended gcd when `len(self) >= len(other)` and one side
    /// is zero.
    pub(crate) fn xgcd_degenerate_f(
        &self,
        other: &Self,
    ) -> Result<Option<(Self, Self, Self)>, NotInvertible> {
        let ctx = self.ctx();
        if self.is_zero() {
            let zero = Self::zero(ctx);
            return Ok(Some((zero.clone(), zero.clone(), zero)));
        }
        if other.is_zero() {
            let inv = self.lead_inv_f()?;
            return Ok(Some((
                self.scalar_mul(&inv),
                Self::constant(ctx, &inv),
                Self::zero(ctx),
            )));
        }
        Ok(None)
    }

    /// Extended gcd by the Euclidean algorithm: `(G, S, T)` with
    /// `S*self + T*other = G`, G monic, `deg S < deg other - deg G` and
    /// `deg T < deg self - deg G`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn xgcd_euclidean_f(&self, other: &Self) -> Result<(Self, Self, Self), NotInvertible> {
        self.check_same_ring(other);
        if self.len() < other.len() {
            let (g, t, s) = other.xgcd_euclidean_f(self)?;
            return Ok((g, s, t));
        }
        if let Some(trivial) = self.xgcd_degenerate_f(other)? {
            return Ok(trivial);
        }
        let ctx = self.ctx();

        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(ctx), Self::zero(ctx));
        let (mut t0, mut t1) = (Self::zero(ctx), Self::one(ctx));
        while !r1.is_zero() {
            let (q, r) = r0.divrem_f(&r1)?;
            r0 = r;
            std::mem::swap(&mut r0, &mut r1);
            s0 = s0.sub(&q.mul(&s1));
            std::mem::swap(&mut s0, &mut s1);
            t0 = t0.sub(&q.mul(&t1));
            std::mem::swap(&mut t0, &mut t1);
        }

        let lc = r0.leading_coeff().cloned().unwrap_or_else(One::one);
        let inv = ctx.inv(&lc)?;
        Ok((r0.scalar_mul(&inv), s0.scalar_mul(&inv), t0.scalar_mul(&inv)))
    }

    /// Extended gcd by the Euclidean algorithm.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn xgcd_euclidean(&self, other: &Self) -> (Self, Self, Self) {
        require_invertible(self.xgcd_euclidean_f(other))
    }

    /// Monic gcd, switching to Half-GCD for long inputs.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn gcd_f(&self, other: &Self) -> Result<Self, NotInvertible> {
        if self.len().min(other.len()) >= GCD_HGCD_CUTOFF {
            self.gcd_hgcd_f(other)
        } else {
            self.gcd_euclidean_f(other)
        }
    }

    /// Monic gcd.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        require_invertible(self.gcd_f(other))
    }

    /// Extended gcd `(G, S, T)` with `S*self + T*other = G`, switching to
    /// Half-GCD for long inputs.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn xgcd_f(&self, other: &Self) -> Result<(Self, Self, Self), NotInvertible> {
        if self.len().min(other.len()) >= XGCD_HGCD_CUTOFF {
            self.xgcd_hgcd_f(other)
        } else {
            self.xgcd_euclidean_f(other)
        }
    }

    /// Extended gcd.
    ///
    /// # Panics
    ///
    /// Panics when a leading coefficient is not a unit.
    #[must_use]
    pub fn xgcd(&self, other: &Self) -> (Self, Self, Self) {
        require_invertible(self.xgcd_f(other))
    }

    /// Returns `(G, S)` with G the monic gcd of `self` and `b` and
    /// `S*self = G (mod b)`, `deg S < deg b - deg G`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    ///
    /// # Panics
    ///
    /// Panics if `b` is constant.
    pub fn gcdinv_f(&self, b: &Self) -> Result<(Self, Self), NotInvertible> {
        self.check_same_ring(b);
        assert!(b.len() >= 2, "modulus polynomial must have positive degree");
        let a = if self.len() >= b.len() {
            self.rem_f(b)?
        } else {
            self.clone()
        };
        let (g, s, _) = a.xgcd_f(b)?;
        Ok((g, s))
    }

    /// Returns `(G, S)` with `S*self = G (mod b)`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is constant or a leading coefficient is not a unit.
    #[must_use]
    pub fn gcdinv(&self, b: &Self) -> (Self, Self) {
        require_invertible(self.gcdinv_f(b))
    }

    /// Inverse of `self` modulo `b`, or `None` when they share a factor.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    ///
    /// # Panics
    ///
    /// Panics if `b` is constant.
    pub fn invmod_f(&self, b: &Self) -> Result<Option<Self>, NotInvertible> {
        let (g, s) = self.gcdinv_f(b)?;
        Ok(g.is_one().then_some(s))
    }

    /// Inverse of `self` modulo `b`, or `None` when they share a factor.
    ///
    /// # Panics
    ///
    /// Panics if `b` is constant or a leading coefficient is not a unit.
    #[must_use]
    pub fn invmod(&self, b: &Self) -> Option<Self> {
        require_invertible(self.invmod_f(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use znpoly_integers::{Integer, Zn};

    fn ctx(n: u64) -> Arc<Zn> {
        Arc::new(Zn::from_u64(n))
    }

    #[test]
    fn test_gcd_common_linear_factor() {
        let zn = ctx(101);
        // (x + 1)(x + 2) and (x + 1)(x + 3)
        let a = ZnPoly::from_i64s(&zn, &[2, 3, 1]);
        let b = ZnPoly::from_i64s(&zn, &[3, 4, 1]);
        assert_eq!(a.gcd(&b), ZnPoly::from_i64s(&zn, &[1, 1]));
        assert_eq!(b.gcd(&a), ZnPoly::from_i64s(&zn, &[1, 1]));
    }

    #[test]
    fn test_gcd_is_monic_and_handles_zero() {
        let zn = ctx(7);
        let a = ZnPoly::from_i64s(&zn, &[2, 4]);
        let zero = ZnPoly::zero(&zn);
        assert_eq!(a.gcd(&zero), ZnPoly::from_i64s(&zn, &[4, 1]));
        assert!(zero.gcd(&zero).is_zero());
    }

    #[test]
    fn test_xgcd_bezout() {
        let zn = ctx(1_000_003);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for (la, lb) in [(7, 5), (3, 9), (12, 12), (1, 4)] {
            let a = ZnPoly::random_not_zero(&zn, la, &mut rng);
            let b = ZnPoly::random_not_zero(&zn, lb, &mut rng);
            let (g, s, t) = a.xgcd(&b);
            assert!(g.is_monic());
            assert_eq!(s.mul(&a).add(&t.mul(&b)), g);
            assert!(a.rem(&g).is_zero());
            assert!(b.rem(&g).is_zero());
        }
    }

    #[test]
    fn test_xgcd_edge_cases() {
        let zn = ctx(11);
        let zero = ZnPoly::zero(&zn);
        let a = ZnPoly::from_i64s(&zn, &[1, 2, 3]);

        let (g, s, t) = zero.xgcd(&zero);
        assert!(g.is_zero() && s.is_zero() && t.is_zero());

        // 3^-1 = 4 mod 11
        let (g, s, t) = a.xgcd(&zero);
        assert_eq!(g, ZnPoly::from_i64s(&zn, &[4, 8, 1]));
        assert_eq!(s, ZnPoly::from_i64s(&zn, &[4]));
        assert!(t.is_zero());

        let (g, s, t) = zero.xgcd(&a);
        assert_eq!(g, ZnPoly::from_i64s(&zn, &[4, 8, 1]));
        assert!(s.is_zero());
        assert_eq!(t, ZnPoly::from_i64s(&zn, &[4]));

        let (g, s, t) = a.xgcd(&ZnPoly::from_i64s(&zn, &[5]));
        assert!(g.is_one());
        assert!(s.is_zero());
        assert_eq!(t, ZnPoly::from_i64s(&zn, &[9]));
    }

    #[test]
    fn test_gcd_f_reports_factor() {
        let zn = ctx(15);
        let a = ZnPoly::from_i64s(&zn, &[0, 0, 1]);
        let b = ZnPoly::from_i64s(&zn, &[1, 5]);
        let err = a.gcd_f(&b).unwrap_err();
        assert_eq!(err.factor(), &Integer::new(5));
        assert!(a.xgcd_f(&b).is_err());
    }

    #[test]
    fn test_invmod() {
        let zn = ctx(7);
        let modulus = ZnPoly::from_i64s(&zn, &[1, 0, 1]);
        let x = ZnPoly::x(&zn);
        let inv = x.invmod(&modulus).unwrap();
        assert_eq!(inv, ZnPoly::from_i64s(&zn, &[0, -1]));
        assert!(x.mul(&inv).rem(&modulus).is_one());

        let shared = ZnPoly::from_i64s(&zn, &[1, 1]);
        let x2m1 = ZnPoly::from_i64s(&zn, &[-1, 0, 1]);
        assert!(shared.invmod(&x2m1).is_none());
    }

    #[test]
    fn test_gcdinv_reduces_input() {
        let zn = ctx(13);
        let b = ZnPoly::from_i64s(&zn, &[3, 1, 0, 1]);
        let a = ZnPoly::from_i64s(&zn, &[2, 7, 1, 9, 4, 1]);
        let (g, s) = a.gcdinv(&b);
        assert!(s.len() < b.len());
        assert_eq!(s.mul(&a).rem(&b), g.rem(&b));
    }

    #[test]
    #[should_panic(expected = "modulus polynomial must have positive degree")]
    fn test_gcdinv_constant_modulus_panics() {
        let zn = ctx(13);
        let a = ZnPoly::from_i64s(&zn, &[1, 1]);
        let _ = a.gcdinv(&ZnPoly::one(&zn));
    }
}
