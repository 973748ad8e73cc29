//! Polynomial multiplication.
//!
//! The slice kernels take reduced coefficients and produce reduced
//! coefficients. Products are accumulated over the integers and reduced
//! once per output coefficient, so a length-n classical product costs n
//! reductions instead of n^2.
//!
//! Karatsuba runs entirely over the integers and reduces at the end.

use num_traits::Zero;

use znpoly_integers::{Integer, Zn};

use crate::cutoffs::KARATSUBA_CUTOFF;
use crate::dense::ZnPoly;

/// Reduces every entry of an accumulator in place.
fn reduce_in_place(zn: &Zn, out: &mut [Integer]) {
    for c in out.iter_mut() {
        *c = zn.reduce_owned(std::mem::take(c));
    }
}

/// Classical product of two non-empty slices over the integers.
fn schoolbook_raw(out: &mut [Integer], a: &[Integer], b: &[Integer]) {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for c in out.iter_mut() {
        c.set_zero();
    }
    for (i, x) in long.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (o, y) in out[i..].iter_mut().zip(short) {
            *o += x * y;
        }
    }
}

/// Classical multiplication: `out = a * b`.
///
/// The longer operand drives the outer loop.
///
/// # Panics
///
/// Panics if either operand is empty or `out` does not have length
/// `a.len() + b.len() - 1`.
pub fn mul_classical(zn: &Zn, out: &mut [Integer], a: &[Integer], b: &[Integer]) {
    assert!(!a.is_empty() && !b.is_empty(), "empty operand");
    assert_eq!(out.len(), a.len() + b.len() - 1);
    schoolbook_raw(out, a, b);
    reduce_in_place(zn, out);
}

/// Classical squaring: `out = a^2`.
///
/// Each cross product a_i * a_j with i < j is formed once and doubled.
///
/// # Panics
///
/// Panics if `a` is empty or `out` does not have length `2 * a.len() - 1`.
pub fn sqr_classical(zn: &Zn, out: &mut [Integer], a: &[Integer]) {
    assert!(!a.is_empty(), "empty operand");
    assert_eq!(out.len(), 2 * a.len() - 1);

    for c in out.iter_mut() {
        c.set_zero();
    }
    for (i, x) in a.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (o, y) in out[2 * i + 1..].iter_mut().zip(&a[i + 1..]) {
            *o += x * y;
        }
    }
    for c in out.iter_mut() {
        let doubled = &*c + &*c;
        *c = doubled;
    }
    for (i, x) in a.iter().enumerate() {
        out[2 * i] += x * x;
    }
    reduce_in_place(zn, out);
}

/// Classical truncated product: `out = a * b mod x^n` with
/// `n = out.len()`.
///
/// # Panics
///
/// Panics if either operand is empty or `n > a.len() + b.len() - 1`.
pub fn mullow_classical(zn: &Zn, out: &mut [Integer], a: &[Integer], b: &[Integer]) {
    assert!(!a.is_empty() && !b.is_empty(), "empty operand");
    assert!(out.len() <= a.len() + b.len() - 1);

    for (k, o) in out.iter_mut().enumerate() {
        let mut sum = Integer::zero();
        let lo = k.saturating_sub(b.len() - 1);
        let hi = k.min(a.len() - 1);
        for i in lo..=hi {
            sum += &a[i] * &b[k - i];
        }
        *o = zn.reduce_owned(sum);
    }
}

/// Classical product keeping only the coefficients of x^start and above.
///
/// `out` has the full product length; entries below `start` are zeroed.
///
/// # Panics
///
/// Panics if either operand is empty or `out` does not have length
/// `a.len() + b.len() - 1`.
pub fn mulhigh_classical(
    zn: &Zn,
    out: &mut [Integer],
    a: &[Integer],
    b: &[Integer],
    start: usize,
) {
    assert!(!a.is_empty() && !b.is_empty(), "empty operand");
    assert_eq!(out.len(), a.len() + b.len() - 1);

    for (k, o) in out.iter_mut().enumerate() {
        if k < start {
            o.set_zero();
            continue;
        }
        let mut sum = Integer::zero();
        let lo = k.saturating_sub(b.len() - 1);
        let hi = k.min(a.len() - 1);
        for i in lo..=hi {
            sum += &a[i] * &b[k - i];
        }
        *o = zn.reduce_owned(sum);
    }
}

/// Adds two integer slices coefficient-wise without reduction.
fn add_raw(a: &[Integer], b: &[Integer]) -> Vec<Integer> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = long.to_vec();
    for (r, s) in result.iter_mut().zip(short) {
        *r += s;
    }
    result
}

/// Exact Karatsuba product over the integers.
fn karatsuba_raw(a: &[Integer], b: &[Integer]) -> Vec<Integer> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let len = a.len() + b.len() - 1;

    // Base case
    if b.len() < KARATSUBA_CUTOFF {
        let mut out = vec![Integer::zero(); len];
        schoolbook_raw(&mut out, a, b);
        return out;
    }

    let mut result = vec![Integer::zero(); len];

    // Unbalanced: slice the longer operand into chunks of the shorter one
    if a.len() >= 2 * b.len() {
        for (i, chunk) in a.chunks(b.len()).enumerate() {
            let prod = karatsuba_raw(chunk, b);
            for (r, c) in result[i * b.len()..].iter_mut().zip(prod) {
                *r += c;
            }
        }
        return result;
    }

    // Split: a = a0 + a1*x^half, b = b0 + b1*x^half
    let half = (a.len() + 1) / 2;
    let (a0, a1) = a.split_at(half);
    let (b0, b1) = b.split_at(half.min(b.len()));

    // z0 = a0*b0, z2 = a1*b1, z1 = (a0+a1)*(b0+b1) - z0 - z2
    let z0 = karatsuba_raw(a0, b0);
    let z2 = karatsuba_raw(a1, b1);
    let mut z1 = karatsuba_raw(&add_raw(a0, a1), &add_raw(b0, b1));
    for (i, c) in z0.iter().enumerate() {
        z1[i] -= c;
    }
    for (i, c) in z2.iter().enumerate() {
        z1[i] -= c;
    }

    // Combine: result = z0 + z1*x^half + z2*x^(2*half)
    for (r, c) in result.iter_mut().zip(z0) {
        *r += c;
    }
    // The top entries of z1 are exact zeros that may fall past the end.
    for (r, c) in result[half..].iter_mut().zip(z1) {
        *r += c;
    }
    if !z2.is_empty() {
        for (r, c) in result[2 * half..].iter_mut().zip(z2) {
            *r += c;
        }
    }

    result
}

/// Karatsuba multiplication: `out = a * b`.
///
/// # Panics
///
/// Panics if either operand is empty or `out` does not have length
/// `a.len() + b.len() - 1`.
pub fn mul_karatsuba(zn: &Zn, out: &mut [Integer], a: &[Integer], b: &[Integer]) {
    assert!(!a.is_empty() && !b.is_empty(), "empty operand");
    assert_eq!(out.len(), a.len() + b.len() - 1);
    for (o, c) in out.iter_mut().zip(karatsuba_raw(a, b)) {
        *o = zn.reduce_owned(c);
    }
}

/// Writes `a * b` into `out`, choosing the algorithm from the lengths.
///
/// Squaring is used when both operands are the same slice.
///
/// # Panics
///
/// Panics if either operand is empty or `out` does not have length
/// `a.len() + b.len() - 1`.
pub fn mul_into(zn: &Zn, out: &mut [Integer], a: &[Integer], b: &[Integer]) {
    let same = std::ptr::eq(a, b);
    if a.len().min(b.len()) >= KARATSUBA_CUTOFF {
        mul_karatsuba(zn, out, a, b);
    } else if same {
        sqr_classical(zn, out, a);
    } else {
        mul_classical(zn, out, a, b);
    }
}

/// Returns `a * b` as a coefficient vector of length
/// `a.len() + b.len() - 1`, or empty if either operand is empty.
///
/// The result is not normalized.
#[must_use]
pub fn mul_slices(zn: &Zn, a: &[Integer], b: &[Integer]) -> Vec<Integer> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Integer::zero(); a.len() + b.len() - 1];
    mul_into(zn, &mut out, a, b);
    out
}

/// Returns `a * b mod x^n` as a coefficient vector of length
/// `min(n, a.len() + b.len() - 1)`.
///
/// The result is not normalized.
#[must_use]
pub fn mullow_slices(zn: &Zn, a: &[Integer], b: &[Integer], n: usize) -> Vec<Integer> {
    let a = &a[..a.len().min(n)];
    let b = &b[..b.len().min(n)];
    if a.is_empty() || b.is_empty() || n == 0 {
        return Vec::new();
    }
    let len = n.min(a.len() + b.len() - 1);
    if a.len().min(b.len()) >= KARATSUBA_CUTOFF {
        let mut full = mul_slices(zn, a, b);
        full.truncate(len);
        full
    } else {
        let mut out = vec![Integer::zero(); len];
        mullow_classical(zn, &mut out, a, b);
        out
    }
}

impl ZnPoly {
    /// Multiplies two polynomials.
    ///
    /// Automatically selects the best algorithm based on length.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        self.check_same_ring(other);
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.ctx());
        }
        let coeffs = mul_slices(self.ctx(), self.coeffs(), other.coeffs());
        Self::from_vec(self.ctx(), coeffs)
    }

    /// Squares a polynomial.
    #[must_use]
    pub fn sqr(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let a = self.coeffs();
        let coeffs = mul_slices(self.ctx(), a, a);
        Self::from_vec(self.ctx(), coeffs)
    }

    /// Returns `self * other mod x^n`.
    #[must_use]
    pub fn mullow(&self, other: &Self, n: usize) -> Self {
        self.check_same_ring(other);
        let coeffs = mullow_slices(self.ctx(), self.coeffs(), other.coeffs(), n);
        Self::from_vec(self.ctx(), coeffs)
    }

    /// Returns `self * other` with the coefficients of x^0 .. x^(n-1)
    /// set to zero.
    #[must_use]
    pub fn mulhigh_n(&self, other: &Self, n: usize) -> Self {
        self.check_same_ring(other);
        if self.is_zero() || other.is_zero() || n >= self.len() + other.len() - 1 {
            return Self::zero(self.ctx());
        }
        let mut out = vec![Integer::zero(); self.len() + other.len() - 1];
        mulhigh_classical(self.ctx(), &mut out, self.coeffs(), other.coeffs(), n);
        Self::from_vec(self.ctx(), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn ctx(n: u64) -> Arc<Zn> {
        Arc::new(Zn::from_u64(n))
    }

    #[test]
    fn test_mul_schoolbook() {
        let zn = ctx(101);
        let p = ZnPoly::from_i64s(&zn, &[1, 2]); // 1 + 2x
        let q = ZnPoly::from_i64s(&zn, &[3, 4]); // 3 + 4x

        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        assert_eq!(p.mul(&q), ZnPoly::from_i64s(&zn, &[3, 10, 8]));
    }

    #[test]
    fn test_mul_zero_divisors() {
        // (2x + 1)(3x + 1) = 6x^2 + 5x + 1 = 5x + 1 mod 6
        let zn = ctx(6);
        let p = ZnPoly::from_i64s(&zn, &[1, 2]);
        let q = ZnPoly::from_i64s(&zn, &[1, 3]);
        let r = p.mul(&q);
        assert_eq!(r.len(), 2);
        assert_eq!(r, ZnPoly::from_i64s(&zn, &[1, 5]));
    }

    #[test]
    fn test_sqr_matches_mul() {
        let zn = ctx(1_000_003);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for len in [1, 2, 7, 31, 80] {
            let p = ZnPoly::random_not_zero(&zn, len, &mut rng);
            assert_eq!(p.sqr(), p.mul(&p.clone()));
        }
    }

    #[test]
    fn test_karatsuba_large() {
        // Operands long enough to trigger Karatsuba, including unbalanced ones
        let zn = Arc::new(Zn::new(
            "340282366920938463463374607431768211507".parse().unwrap(),
        ));
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for (la, lb) in [(100, 100), (100, 33), (257, 40), (64, 63)] {
            let a = ZnPoly::random_not_zero(&zn, la, &mut rng);
            let b = ZnPoly::random_not_zero(&zn, lb, &mut rng);
            let mut school = vec![Integer::zero(); a.len() + b.len() - 1];
            let mut kara = school.clone();
            mul_classical(&zn, &mut school, a.coeffs(), b.coeffs());
            mul_karatsuba(&zn, &mut kara, a.coeffs(), b.coeffs());
            assert_eq!(school, kara, "mismatch for lengths {la} x {lb}");
        }
    }

    #[test]
    fn test_mullow_and_mulhigh_split_product() {
        let zn = ctx(97);
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let a = ZnPoly::random_not_zero(&zn, 12, &mut rng);
        let b = ZnPoly::random_not_zero(&zn, 9, &mut rng);
        let full = a.mul(&b);
        for n in [0, 1, 5, 19, 30] {
            let low = a.mullow(&b, n);
            let high = a.mulhigh_n(&b, n);
            assert_eq!(low.add(&high), full);
            let mut expected = full.clone();
            expected.truncate(n);
            assert_eq!(low, expected);
        }
    }

    #[test]
    fn test_mul_by_zero() {
        let zn = ctx(7);
        let p = ZnPoly::from_i64s(&zn, &[1, 2, 3]);
        assert!(p.mul(&ZnPoly::zero(&zn)).is_zero());
        assert!(ZnPoly::zero(&zn).sqr().is_zero());
        assert!(p.mullow(&p, 0).is_zero());
    }
}
