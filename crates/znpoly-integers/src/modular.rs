//! Modular arithmetic over Z/NZ.
//!
//! `Zn` is the modulus context threaded through every polynomial
//! routine. It is immutable once built and shared by `Arc` between all
//! polynomials of one computation. Residues are plain [`Integer`]s kept
//! in `[0, N)`.

use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::Integer;

/// Failure to invert an element of Z/NZ.
///
/// `factor` is `gcd(a, N)`. For a non-zero residue of a composite modulus
/// this is a non-trivial factor of N; for `a = 0` it is N itself.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NotInvertible {
    /// The element shares the factor `factor` with the modulus.
    #[error("element is not invertible modulo N (gcd with N is {factor})")]
    Factor {
        /// The common factor `gcd(a, N)`.
        factor: Integer,
    },
}

impl NotInvertible {
    /// Returns the factor of N discovered by the failed inversion.
    #[must_use]
    pub fn factor(&self) -> &Integer {
        match self {
            Self::Factor { factor } => factor,
        }
    }
}

/// The ring Z/NZ for a runtime modulus N >= 2.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Zn {
    modulus: Integer,
}

impl Zn {
    /// Creates the context for the modulus N.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is smaller than 2.
    #[must_use]
    pub fn new(modulus: Integer) -> Self {
        assert!(modulus > Integer::one(), "modulus must be at least 2");
        Self { modulus }
    }

    /// Creates the context for a machine-word modulus.
    #[must_use]
    pub fn from_u64(modulus: u64) -> Self {
        Self::new(Integer::from(modulus))
    }

    /// Returns the modulus.
    #[must_use]
    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    /// Returns the bit length of the modulus.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.modulus.bit_len()
    }

    /// Reduces an arbitrary integer into `[0, N)`.
    #[must_use]
    pub fn reduce(&self, a: &Integer) -> Integer {
        let r = a % &self.modulus;
        if r.is_negative() {
            r + &self.modulus
        } else {
            r
        }
    }

    /// Reduces an owned integer into `[0, N)`.
    #[must_use]
    pub fn reduce_owned(&self, a: Integer) -> Integer {
        if !a.is_negative() && a < self.modulus {
            return a;
        }
        self.reduce(&a)
    }

    /// Maps a machine integer into Z/NZ.
    #[must_use]
    pub fn from_i64(&self, value: i64) -> Integer {
        self.reduce(&Integer::new(value))
    }

    /// Returns `a + b`.
    #[must_use]
    pub fn add(&self, a: &Integer, b: &Integer) -> Integer {
        let s = a + b;
        if s >= self.modulus {
            s - &self.modulus
        } else {
            s
        }
    }

    /// Returns `a - b`.
    #[must_use]
    pub fn sub(&self, a: &Integer, b: &Integer) -> Integer {
        let d = a - b;
        if d.is_negative() {
            d + &self.modulus
        } else {
            d
        }
    }

    /// Returns `-a`.
    #[must_use]
    pub fn neg(&self, a: &Integer) -> Integer {
        if a.is_zero() {
            Integer::zero()
        } else {
            &self.modulus - a
        }
    }

    /// Returns `a * b`.
    #[must_use]
    pub fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        (a * b) % &self.modulus
    }

    /// Returns `2 * a`.
    #[must_use]
    pub fn double(&self, a: &Integer) -> Integer {
        self.add(a, a)
    }

    /// Returns true if `a` is a unit of Z/NZ.
    #[must_use]
    pub fn is_unit(&self, a: &Integer) -> bool {
        !a.is_zero() && a.gcd(&self.modulus).is_one()
    }

    /// Computes `gcd(a, N)` together with the inverse of `a` modulo
    /// `N / gcd` when the gcd is one.
    ///
    /// The second component is only meaningful if the first is one.
    #[must_use]
    pub fn gcdinv(&self, a: &Integer) -> (Integer, Integer) {
        let mut r0 = self.modulus.clone();
        let mut r1 = a.clone();
        let mut t0 = Integer::zero();
        let mut t1 = Integer::one();

        while !r1.is_zero() {
            let q = &r0 / &r1;
            let r2 = &r0 - &(&q * &r1);
            let t2 = &t0 - &(&q * &t1);
            r0 = std::mem::replace(&mut r1, r2);
            t0 = std::mem::replace(&mut t1, t2);
        }

        (r0, self.reduce(&t0))
    }

    /// Computes the modular inverse of `a`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] carrying `gcd(a, N)` when `a` is not a unit.
    pub fn inv(&self, a: &Integer) -> Result<Integer, NotInvertible> {
        let (g, inv) = self.gcdinv(a);
        if g.is_one() {
            Ok(inv)
        } else {
            Err(NotInvertible::Factor { factor: g })
        }
    }

    /// Returns `a / b`.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when `b` is not a unit.
    pub fn div(&self, a: &Integer, b: &Integer) -> Result<Integer, NotInvertible> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    /// Computes `a^e` for a non-negative exponent by square-and-multiply.
    #[must_use]
    pub fn pow(&self, a: &Integer, e: &Integer) -> Integer {
        let mut result = Integer::one() % &self.modulus;
        let bits = e.bit_len();
        for i in (0..bits).rev() {
            result = self.mul(&result, &result);
            if e.bit(i) {
                result = self.mul(&result, a);
            }
        }
        result
    }

    /// Computes `a^e` for a machine-word exponent.
    #[must_use]
    pub fn pow_u64(&self, a: &Integer, e: u64) -> Integer {
        self.pow(a, &Integer::from(e))
    }

    /// Draws a uniformly distributed residue.
    ///
    /// Sixty-four extra random bits make the bias of the final reduction
    /// negligible.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        let nbytes = (self.bits() + 64 + 7) / 8;
        let mut bytes = vec![0u8; nbytes];
        rng.fill_bytes(&mut bytes);
        Integer::from_le_bytes(&bytes) % &self.modulus
    }

    /// Draws a uniformly distributed non-zero residue.
    pub fn random_nonzero<R: Rng + ?Sized>(&self, rng: &mut R) -> Integer {
        loop {
            let c = self.random(rng);
            if !c.is_zero() {
                return c;
            }
        }
    }
}

impl fmt::Debug for Zn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zn({})", self.modulus)
    }
}

impl fmt::Display for Zn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z/{}Z", self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn z(v: i64) -> Integer {
        Integer::new(v)
    }

    #[test]
    fn test_basic_ops() {
        let zn = Zn::from_u64(7);

        assert_eq!(zn.add(&z(5), &z(4)), z(2)); // 5 + 4 = 9 ≡ 2 (mod 7)
        assert_eq!(zn.sub(&z(4), &z(5)), z(6));
        assert_eq!(zn.mul(&z(5), &z(4)), z(6)); // 20 ≡ 6 (mod 7)
        assert_eq!(zn.neg(&z(3)), z(4));
        assert_eq!(zn.neg(&z(0)), z(0));
    }

    #[test]
    fn test_reduce_negative() {
        let zn = Zn::from_u64(7);
        assert_eq!(zn.reduce(&z(-3)), z(4));
        assert_eq!(zn.reduce(&z(-14)), z(0));
        assert_eq!(zn.from_i64(23), z(2));
    }

    #[test]
    fn test_inverse() {
        let zn = Zn::from_u64(7);
        // 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!(zn.inv(&z(3)), Ok(z(5)));
        assert_eq!(
            zn.inv(&z(0)),
            Err(NotInvertible::Factor { factor: z(7) })
        );
    }

    #[test]
    fn test_inverse_reports_factor() {
        let zn = Zn::from_u64(91); // 7 * 13
        let err = zn.inv(&z(14)).unwrap_err();
        assert_eq!(err.factor(), &z(7));
        assert!(!zn.is_unit(&z(26)));
        assert!(zn.is_unit(&z(10)));
    }

    #[test]
    fn test_pow() {
        let zn = Zn::from_u64(7);
        assert_eq!(zn.pow_u64(&z(3), 0), z(1));
        assert_eq!(zn.pow_u64(&z(3), 2), z(2));
        assert_eq!(zn.pow_u64(&z(3), 6), z(1)); // Fermat
    }

    #[test]
    fn test_random_in_range() {
        let zn = Zn::new("340282366920938463463374607431768211507".parse().unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let r = zn.random(&mut rng);
            assert!(!r.is_negative());
            assert!(&r < zn.modulus());
            assert!(!zn.random_nonzero(&mut rng).is_zero());
        }
    }

    #[test]
    #[should_panic(expected = "modulus must be at least 2")]
    fn test_rejects_unit_modulus() {
        let _ = Zn::from_u64(1);
    }
}
