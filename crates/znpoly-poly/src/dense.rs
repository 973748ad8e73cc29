//! Dense univariate polynomials over Z/NZ.
//!
//! A [`ZnPoly`] stores its coefficients in ascending degree order, every
//! coefficient reduced into `[0, N)`, and never carries a zero leading
//! coefficient. The zero polynomial has no coefficients at all.

use std::fmt;
use std::sync::Arc;

use num_traits::{One, Zero};
use rand::Rng;

use znpoly_integers::{Integer, NotInvertible, Zn};

/// A dense univariate polynomial over Z/NZ.
///
/// The modulus context is shared by `Arc`; cloning a polynomial copies the
/// coefficients but not the context. Binary operations on polynomials over
/// different moduli panic.
#[derive(Clone)]
pub struct ZnPoly {
    /// Coefficients in ascending degree order, normalized.
    coeffs: Vec<Integer>,
    /// The ring Z/NZ the coefficients live in.
    ctx: Arc<Zn>,
}

/// Unwraps the result of a `_f` routine for its panicking counterpart.
#[track_caller]
pub(crate) fn require_invertible<T>(result: Result<T, NotInvertible>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl ZnPoly {
    /// Builds a polynomial from already reduced coefficients.
    pub(crate) fn from_vec(ctx: &Arc<Zn>, coeffs: Vec<Integer>) -> Self {
        let mut p = Self {
            coeffs,
            ctx: Arc::clone(ctx),
        };
        p.normalize();
        p
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(ctx: &Arc<Zn>) -> Self {
        Self {
            coeffs: Vec::new(),
            ctx: Arc::clone(ctx),
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one(ctx: &Arc<Zn>) -> Self {
        Self::from_vec(ctx, vec![Integer::one()])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x(ctx: &Arc<Zn>) -> Self {
        Self::from_vec(ctx, vec![Integer::zero(), Integer::one()])
    }

    /// Creates a constant polynomial, reducing `c` modulo N.
    #[must_use]
    pub fn constant(ctx: &Arc<Zn>, c: &Integer) -> Self {
        Self::from_vec(ctx, vec![ctx.reduce(c)])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(ctx: &Arc<Zn>, c: &Integer, n: usize) -> Self {
        let c = ctx.reduce(c);
        if c.is_zero() {
            return Self::zero(ctx);
        }
        let mut coeffs = vec![Integer::zero(); n + 1];
        coeffs[n] = c;
        Self::from_vec(ctx, coeffs)
    }

    /// Creates a polynomial from arbitrary integer coefficients.
    #[must_use]
    pub fn from_coeffs(ctx: &Arc<Zn>, coeffs: Vec<Integer>) -> Self {
        let coeffs = coeffs.into_iter().map(|c| ctx.reduce_owned(c)).collect();
        Self::from_vec(ctx, coeffs)
    }

    /// Creates a polynomial from machine integer coefficients.
    #[must_use]
    pub fn from_i64s(ctx: &Arc<Zn>, coeffs: &[i64]) -> Self {
        Self::from_vec(ctx, coeffs.iter().map(|&c| ctx.from_i64(c)).collect())
    }

    /// Creates the zero polynomial with room for `capacity` coefficients.
    #[must_use]
    pub fn with_capacity(ctx: &Arc<Zn>, capacity: usize) -> Self {
        Self {
            coeffs: Vec::with_capacity(capacity),
            ctx: Arc::clone(ctx),
        }
    }

    /// Draws a polynomial with `len` uniformly random coefficients.
    ///
    /// The result is normalized, so its length may be smaller than `len`.
    pub fn random<R: Rng + ?Sized>(ctx: &Arc<Zn>, len: usize, rng: &mut R) -> Self {
        Self::from_vec(ctx, (0..len).map(|_| ctx.random(rng)).collect())
    }

    /// Draws a monic polynomial of length `len`.
    pub fn random_monic<R: Rng + ?Sized>(ctx: &Arc<Zn>, len: usize, rng: &mut R) -> Self {
        if len == 0 {
            return Self::zero(ctx);
        }
        let mut coeffs: Vec<Integer> = (0..len - 1).map(|_| ctx.random(rng)).collect();
        coeffs.push(Integer::one());
        Self::from_vec(ctx, coeffs)
    }

    /// Draws a non-zero polynomial of length at most `len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn random_not_zero<R: Rng + ?Sized>(ctx: &Arc<Zn>, len: usize, rng: &mut R) -> Self {
        assert!(len > 0, "cannot draw a non-zero polynomial of length 0");
        loop {
            let p = Self::random(ctx, len, rng);
            if !p.is_zero() {
                return p;
            }
        }
    }

    /// Returns the modulus context.
    #[must_use]
    pub fn ctx(&self) -> &Arc<Zn> {
        &self.ctx
    }

    /// Returns the modulus N.
    #[must_use]
    pub fn modulus(&self) -> &Integer {
        self.ctx.modulus()
    }

    /// Panics unless both polynomials live over the same modulus.
    #[track_caller]
    pub(crate) fn check_same_ring(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.ctx, &other.ctx) || *self.ctx == *other.ctx,
            "polynomials over different moduli"
        );
    }

    /// Ensures capacity for at least `n` coefficients. Never shrinks.
    pub fn reserve(&mut self, n: usize) {
        if n > self.coeffs.len() {
            self.coeffs.reserve(n - self.coeffs.len());
        }
    }

    /// Keeps only the coefficients of x^0 .. x^(n-1).
    pub fn truncate(&mut self, n: usize) {
        self.coeffs.truncate(n);
        self.normalize();
    }

    /// Sets the length, padding with zeros or dropping coefficients.
    ///
    /// Does not normalize; call [`ZnPoly::normalize`] before handing the
    /// polynomial to any arithmetic routine.
    pub fn set_length(&mut self, n: usize) {
        self.coeffs.resize(n, Integer::zero());
    }

    /// Strips zero leading coefficients.
    pub fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(Zero::is_zero) {
            self.coeffs.pop();
        }
    }

    /// Returns true if no leading coefficient is zero.
    pub(crate) fn is_normalized(&self) -> bool {
        self.coeffs.last().map_or(true, |c| !c.is_zero())
    }

    /// Returns the number of coefficients, zero for the zero polynomial.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the degree, `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Integer {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[Integer] {
        &self.coeffs
    }

    /// Returns the leading coefficient, `None` for the zero polynomial.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Integer> {
        self.coeffs.last()
    }

    /// Sets the coefficient of x^i, reducing `c` modulo N.
    pub fn set_coeff(&mut self, i: usize, c: &Integer) {
        let c = self.ctx.reduce(c);
        if i >= self.coeffs.len() {
            if c.is_zero() {
                return;
            }
            self.coeffs.resize(i + 1, Integer::zero());
        }
        self.coeffs[i] = c;
        self.normalize();
    }

    /// Swaps two polynomials in place.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Returns the allocated capacity in coefficients.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.coeffs.capacity()
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if this is the constant 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Returns true if the leading coefficient is 1.
    #[must_use]
    pub fn is_monic(&self) -> bool {
        self.coeffs.last().is_some_and(One::is_one)
    }

    /// Returns true if this is a constant unit of Z/NZ.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.coeffs.len() == 1 && self.ctx.is_unit(&self.coeffs[0])
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.check_same_ring(other);
        let (long, short) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut coeffs = long.coeffs.clone();
        for (c, s) in coeffs.iter_mut().zip(&short.coeffs) {
            *c = self.ctx.add(c, s);
        }
        Self::from_vec(&self.ctx, coeffs)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| self.ctx.neg(c)).collect(),
            ctx: Arc::clone(&self.ctx),
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.check_same_ring(other);
        let len = self.len().max(other.len());
        let coeffs = (0..len)
            .map(|i| match (self.coeffs.get(i), other.coeffs.get(i)) {
                (Some(a), Some(b)) => self.ctx.sub(a, b),
                (Some(a), None) => a.clone(),
                (None, Some(b)) => self.ctx.neg(b),
                (None, None) => Integer::zero(),
            })
            .collect();
        Self::from_vec(&self.ctx, coeffs)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scalar_mul(&self, c: &Integer) -> Self {
        let c = self.ctx.reduce(c);
        if c.is_zero() {
            return Self::zero(&self.ctx);
        }
        let coeffs = self.coeffs.iter().map(|x| self.ctx.mul(x, &c)).collect();
        Self::from_vec(&self.ctx, coeffs)
    }

    /// Divides by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when `c` is not a unit modulo N.
    pub fn scalar_div(&self, c: &Integer) -> Result<Self, NotInvertible> {
        let inv = self.ctx.inv(&self.ctx.reduce(c))?;
        Ok(self.scalar_mul(&inv))
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift_left(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut coeffs = vec![Integer::zero(); n];
        coeffs.extend_from_slice(&self.coeffs);
        Self {
            coeffs,
            ctx: Arc::clone(&self.ctx),
        }
    }

    /// Divides by x^n, discarding the low coefficients.
    #[must_use]
    pub fn shift_right(&self, n: usize) -> Self {
        if n >= self.len() {
            return Self::zero(&self.ctx);
        }
        Self {
            coeffs: self.coeffs[n..].to_vec(),
            ctx: Arc::clone(&self.ctx),
        }
    }

    /// Reverses the first `n` coefficients: returns x^(n-1) * p(1/x)
    /// for `p` truncated to length `n`.
    #[must_use]
    pub fn reverse(&self, n: usize) -> Self {
        let coeffs = (0..n).rev().map(|i| self.coeff(i)).collect();
        Self::from_vec(&self.ctx, coeffs)
    }

    /// Divides by the leading coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when the leading coefficient is not a unit.
    pub fn make_monic_f(&self) -> Result<Self, NotInvertible> {
        match self.leading_coeff() {
            None => Ok(self.clone()),
            Some(lc) if lc.is_one() => Ok(self.clone()),
            Some(lc) => self.scalar_div(lc),
        }
    }

    /// Divides by the leading coefficient. The zero polynomial is returned
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the leading coefficient is not a unit modulo N.
    #[must_use]
    pub fn make_monic(&self) -> Self {
        require_invertible(self.make_monic_f())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.len() <= 1 {
            return Self::zero(&self.ctx);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| self.ctx.mul(c, &Integer::from(i)))
            .collect();
        Self::from_vec(&self.ctx, coeffs)
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn evaluate(&self, x: &Integer) -> Integer {
        let x = self.ctx.reduce(x);
        let mut result = Integer::zero();
        for c in self.coeffs.iter().rev() {
            result = self.ctx.add(&self.ctx.mul(&result, &x), c);
        }
        result
    }

    /// Evaluates the polynomial at every point of `xs`.
    #[must_use]
    pub fn evaluate_many(&self, xs: &[Integer]) -> Vec<Integer> {
        xs.iter().map(|x| self.evaluate(x)).collect()
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, e: u64) -> Self {
        if e == 0 {
            return Self::one(&self.ctx);
        }
        if e == 1 || self.is_zero() {
            return self.clone();
        }

        let mut result = Self::one(&self.ctx);
        let mut base = self.clone();
        let mut exp = e;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.sqr();
            }
        }

        result
    }
}

impl PartialEq for ZnPoly {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs && self.ctx.modulus() == other.ctx.modulus()
    }
}

impl Eq for ZnPoly {}

impl fmt::Debug for ZnPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZnPoly")
            .field("modulus", self.ctx.modulus())
            .field("coeffs", &self.coeffs)
            .finish()
    }
}

impl fmt::Display for ZnPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(n: u64) -> Arc<Zn> {
        Arc::new(Zn::from_u64(n))
    }

    #[test]
    fn test_normalization() {
        let zn = ctx(7);
        let p = ZnPoly::from_i64s(&zn, &[1, 2, 7, 14]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.degree(), Some(1));

        let zero = ZnPoly::from_i64s(&zn, &[0, 0, 7]);
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), None);
        assert_eq!(zero.leading_coeff(), None);
    }

    #[test]
    fn test_basic_ops() {
        let zn = ctx(7);
        let p = ZnPoly::from_i64s(&zn, &[1, 2]); // 1 + 2x
        let q = ZnPoly::from_i64s(&zn, &[3, 5]); // 3 + 5x

        let sum = p.add(&q);
        assert_eq!(sum, ZnPoly::from_i64s(&zn, &[4, 0]));
        assert_eq!(sum.len(), 1);

        let diff = p.sub(&q);
        assert_eq!(diff, ZnPoly::from_i64s(&zn, &[-2, -3]));
        assert!(p.add(&p.neg()).is_zero());
    }

    #[test]
    fn test_set_coeff_and_truncate() {
        let zn = ctx(11);
        let mut p = ZnPoly::zero(&zn);
        p.set_coeff(3, &Integer::new(-1));
        assert_eq!(p.len(), 4);
        assert_eq!(p.coeff(3), Integer::new(10));
        p.set_coeff(0, &Integer::new(2));
        p.set_coeff(3, &Integer::new(0));
        assert_eq!(p.len(), 1);

        let mut q = ZnPoly::from_i64s(&zn, &[1, 0, 0, 4]);
        q.truncate(3);
        assert!(q.is_one());
    }

    #[test]
    fn test_set_length_then_normalize() {
        let zn = ctx(5);
        let mut p = ZnPoly::from_i64s(&zn, &[1, 2, 3]);
        p.set_length(6);
        assert_eq!(p.len(), 6);
        p.normalize();
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_reserve_never_shrinks() {
        let zn = ctx(5);
        let mut p = ZnPoly::with_capacity(&zn, 32);
        p.reserve(4);
        assert!(p.capacity() >= 32);
    }

    #[test]
    fn test_shift_and_reverse() {
        let zn = ctx(101);
        let p = ZnPoly::from_i64s(&zn, &[1, 2, 3]);
        assert_eq!(p.shift_left(2), ZnPoly::from_i64s(&zn, &[0, 0, 1, 2, 3]));
        assert_eq!(p.shift_left(2).shift_right(2), p);
        assert!(p.shift_right(3).is_zero());
        assert_eq!(p.reverse(3), ZnPoly::from_i64s(&zn, &[3, 2, 1]));
        assert_eq!(p.reverse(5), ZnPoly::from_i64s(&zn, &[0, 0, 3, 2, 1]));
        assert_eq!(p.reverse(2), ZnPoly::from_i64s(&zn, &[2, 1]));
    }

    #[test]
    fn test_make_monic() {
        let zn = ctx(7);
        let p = ZnPoly::from_i64s(&zn, &[1, 3]);
        let m = p.make_monic();
        assert!(m.is_monic());
        assert_eq!(m, ZnPoly::from_i64s(&zn, &[5, 1])); // 3^-1 = 5

        let zn = ctx(15);
        let p = ZnPoly::from_i64s(&zn, &[1, 6]);
        let err = p.make_monic_f().unwrap_err();
        assert_eq!(err.factor(), &Integer::new(3));
    }

    #[test]
    fn test_derivative_in_characteristic() {
        let zn = ctx(3);
        // x^3 + x has derivative 3x^2 + 1 = 1 mod 3
        let p = ZnPoly::from_i64s(&zn, &[0, 1, 0, 1]);
        assert!(p.derivative().is_one());
    }

    #[test]
    fn test_evaluate() {
        let zn = ctx(101);
        // p(x) = 1 + 2x + 3x^2, p(2) = 17
        let p = ZnPoly::from_i64s(&zn, &[1, 2, 3]);
        assert_eq!(p.evaluate(&Integer::new(2)), Integer::new(17));
        assert_eq!(
            p.evaluate_many(&[Integer::new(0), Integer::new(-1)]),
            vec![Integer::new(1), Integer::new(2)]
        );
    }

    #[test]
    fn test_pow() {
        let zn = ctx(5);
        let p = ZnPoly::from_i64s(&zn, &[1, 1]);
        // (1 + x)^5 = 1 + x^5 in characteristic 5
        assert_eq!(p.pow(5), ZnPoly::from_i64s(&zn, &[1, 0, 0, 0, 0, 1]));
        assert!(p.pow(0).is_one());
    }

    #[test]
    fn test_display() {
        let zn = ctx(7);
        let p = ZnPoly::from_i64s(&zn, &[3, 0, 1]);
        assert_eq!(p.to_string(), "3 + 1*x^2");
        assert_eq!(ZnPoly::zero(&zn).to_string(), "0");
    }

    #[test]
    fn test_is_unit() {
        let zn = ctx(10);
        assert!(ZnPoly::from_i64s(&zn, &[3]).is_unit());
        assert!(!ZnPoly::from_i64s(&zn, &[4]).is_unit());
        assert!(!ZnPoly::x(&zn).is_unit());
    }

    #[test]
    #[should_panic(expected = "polynomials over different moduli")]
    fn test_mixed_moduli_panic() {
        let p = ZnPoly::one(&ctx(7));
        let q = ZnPoly::one(&ctx(11));
        let _ = p.add(&q);
    }
}
