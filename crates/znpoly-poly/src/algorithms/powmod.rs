//! Modular multiplication and powering.
//!
//! The `_preinv` forms take `finv = f.preinv()` so that every reduction is a
//! Newton division; the plain forms compute it once per call.

use num_traits::Zero;

use znpoly_integers::{Integer, NotInvertible};

use crate::dense::{require_invertible, ZnPoly};

impl ZnPoly {
    /// Reduces `self` modulo `f` unless it is already shorter.
    fn reduced_mod_preinv(&self, f: &Self, finv: &Self) -> Self {
        if self.len() >= f.len() {
            self.rem_preinv(f, finv)
        } else {
            self.clone()
        }
    }

    /// `self * b mod f` given `finv`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero.
    #[must_use]
    pub fn mulmod_preinv(&self, b: &Self, f: &Self, finv: &Self) -> Self {
        self.check_same_ring(b);
        self.mul(b).reduced_mod_preinv(f, finv)
    }

    /// `self * b mod f`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `f` is not a
    /// unit.
    pub fn mulmod_f(&self, b: &Self, f: &Self) -> Result<Self, NotInvertible> {
        self.check_same_ring(b);
        self.mul(b).rem_f(f)
    }

    /// `self * b mod f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn mulmod(&self, b: &Self, f: &Self) -> Self {
        require_invertible(self.mulmod_f(b, f))
    }

    /// `self^e mod f` by left-to-right binary exponentiation, given `finv`.
    ///
    /// A constant `f` gives zero.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero.
    #[must_use]
    pub fn powmod_ui_binexp_preinv(&self, e: u64, f: &Self, finv: &Self) -> Self {
        self.powmod_bits_preinv(64 - e.leading_zeros() as usize, |i| (e >> i) & 1 == 1, f, finv)
    }

    /// `self^e mod f` by binary exponentiation.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `f` is not a
    /// unit.
    pub fn powmod_ui_binexp_f(&self, e: u64, f: &Self) -> Result<Self, NotInvertible> {
        let finv = f.preinv_f()?;
        Ok(self.powmod_ui_binexp_preinv(e, f, &finv))
    }

    /// `self^e mod f` by binary exponentiation.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero or its leading coefficient is not a unit.
    #[must_use]
    pub fn powmod_ui_binexp(&self, e: u64, f: &Self) -> Self {
        require_invertible(self.powmod_ui_binexp_f(e, f))
    }

    /// `self^e mod f` for a big exponent, given `finv`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero or `e` is negative.
    #[must_use]
    pub fn powmod_fmpz_binexp_preinv(&self, e: &Integer, f: &Self, finv: &Self) -> Self {
        assert!(!e.is_negative(), "negative exponent");
        self.powmod_bits_preinv(e.bit_len(), |i| e.bit(i), f, finv)
    }

    /// `self^e mod f` for a big exponent.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient of `f` is not a
    /// unit.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero or `e` is negative.
    pub fn powmod_fmpz_binexp_f(&self, e: &Integer, f: &Self) -> Result<Self, NotInvertible> {
        let finv = f.preinv_f()?;
        Ok(self.powmod_fmpz_binexp_preinv(e, f, &finv))
    }

    /// `self^e mod f` for a big exponent.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero, `e` is negative or the leading coefficient of
    /// `f` is not a unit.
    #[must_use]
    pub fn powmod_fmpz_binexp(&self, e: &Integer, f: &Self) -> Self {
        require_invertible(self.powmod_fmpz_binexp_f(e, f))
    }

    fn powmod_bits_preinv(
        &self,
        bits: usize,
        bit: impl Fn(usize) -> bool,
        f: &Self,
        finv: &Self,
    ) -> Self {
        self.check_same_ring(f);
        assert!(!f.is_zero(), "division by zero polynomial");
        let ctx = self.ctx();
        if f.len() == 1 {
            return Self::zero(ctx);
        }
        if bits == 0 {
            return Self::one(ctx);
        }
        let base = self.reduced_mod_preinv(f, finv);
        if base.is_zero() {
            return base;
        }

        let mut result = base.clone();
        for i in (0..bits - 1).rev() {
            result = result.sqr().reduced_mod_preinv(f, finv);
            if bit(i) {
                result = result.mul(&base).reduced_mod_preinv(f, finv);
            }
        }
        result
    }

    /// `x^e mod f` given `finv`. The doubling chain squares and, for each
    /// set bit, shifts by one before reducing.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero or `e` is negative.
    #[must_use]
    pub fn powmod_x_fmpz_preinv(e: &Integer, f: &Self, finv: &Self) -> Self {
        assert!(!f.is_zero(), "division by zero polynomial");
        assert!(!e.is_negative(), "negative exponent");
        let ctx = f.ctx();
        if f.len() == 1 {
            return Self::zero(ctx);
        }
        if e.is_zero() {
            return Self::one(ctx);
        }

        let bits = e.bit_len();
        let mut result = Self::x(ctx).reduced_mod_preinv(f, finv);
        for i in (0..bits - 1).rev() {
            result = result.sqr();
            if e.bit(i) {
                result = result.shift_left(1);
            }
            result = result.reduced_mod_preinv(f, finv);
        }
        result
    }

    /// `[g^0, g^1, ..., g^(n-1)] mod f` given `finv`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero.
    #[must_use]
    pub fn powers_mod_preinv(&self, n: usize, f: &Self, finv: &Self) -> Vec<Self> {
        self.check_same_ring(f);
        assert!(!f.is_zero(), "division by zero polynomial");
        let ctx = self.ctx();
        if f.len() == 1 {
            return vec![Self::zero(ctx); n];
        }
        let g = self.reduced_mod_preinv(f, finv);
        let mut powers = Vec::with_capacity(n);
        if n == 0 {
            return powers;
        }
        powers.push(Self::one(ctx));
        for i in 1..n {
            let next = powers[i - 1].mulmod_preinv(&g, f, finv);
            powers.push(next);
        }
        powers
    }
}
