//! Irreducibility tests over F_p.
//!
//! Constants (including zero) are not irreducible; every polynomial of
//! degree one is.

use znpoly_poly::ZnPoly;

use crate::ddf::{distinct_degree_factorization, DdfConfig};
use crate::frobenius::FrobeniusPowers;
use crate::squarefree::is_squarefree;

/// Distinct primes dividing `n`, in increasing order.
fn prime_divisors(mut n: usize) -> Vec<usize> {
    let mut primes = Vec::new();
    let mut q = 2;
    while q * q <= n {
        if n % q == 0 {
            primes.push(q);
            while n % q == 0 {
                n /= q;
            }
        }
        q += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

/// Rabin's test: f of degree n is irreducible iff `x^(p^n) = x mod f` and
/// `gcd(x^(p^(n/q)) - x, f) = 1` for every prime q dividing n.
///
/// The Frobenius powers come from a [`FrobeniusPowers`] cache, so only
/// `x^p` is computed by exponentiation.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn is_irreducible_rabin(f: &ZnPoly) -> bool {
    let Some(n) = f.degree() else {
        return false;
    };
    match n {
        0 => return false,
        1 => return true,
        _ => {}
    }

    let f = f.make_monic();
    let finv = f.preinv();
    let x = ZnPoly::x(f.ctx());
    let cache = FrobeniusPowers::new(&f, &finv, n);

    if cache.frobenius_power(n) != x {
        return false;
    }
    prime_divisors(n).into_iter().all(|q| {
        let g = cache.frobenius_power(n / q).sub(&x);
        f.gcd(&g).len() == 1
    })
}

/// Irreducibility through distinct-degree factorization: f is irreducible
/// iff it is squarefree and its only distinct-degree part has degree
/// `deg f`.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn is_irreducible_ddf(f: &ZnPoly) -> bool {
    let Some(n) = f.degree() else {
        return false;
    };
    match n {
        0 => return false,
        1 => return true,
        _ => {}
    }
    if !is_squarefree(f) {
        return false;
    }
    let ddf = distinct_degree_factorization(f, &DdfConfig::default());
    ddf.degrees == [n]
}

/// Returns true when f is irreducible over F_p.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn is_irreducible(f: &ZnPoly) -> bool {
    is_irreducible_rabin(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use znpoly_poly::Zn;

    #[test]
    fn test_prime_divisors() {
        assert_eq!(prime_divisors(1), Vec::<usize>::new());
        assert_eq!(prime_divisors(12), vec![2, 3]);
        assert_eq!(prime_divisors(13), vec![13]);
        assert_eq!(prime_divisors(90), vec![2, 3, 5]);
    }

    #[test]
    fn test_known_polynomials_over_f2() {
        let zn = Arc::new(Zn::from_u64(2));
        let cases: [(&[i64], bool); 6] = [
            (&[1, 1, 0, 1], true),
            (&[1, 1, 1], true),
            (&[1, 0, 1], false),
            (&[1, 1, 0, 0, 1], true),
            (&[1, 0, 1, 0, 1], false),
            (&[1, 1, 1, 1, 1], true),
        ];
        for (coeffs, expected) in cases {
            let f = ZnPoly::from_i64s(&zn, coeffs);
            assert_eq!(is_irreducible_rabin(&f), expected, "{coeffs:?}");
            assert_eq!(is_irreducible_ddf(&f), expected, "{coeffs:?}");
        }
    }

    #[test]
    fn test_product_of_same_degree_factors() {
        // (x^2 + 1)(x^2 + x + 2) over F_3 passes x^(p^4) = x but not the gcd step
        let zn = Arc::new(Zn::from_u64(3));
        let f = ZnPoly::from_i64s(&zn, &[1, 0, 1]).mul(&ZnPoly::from_i64s(&zn, &[2, 1, 1]));
        assert!(!is_irreducible_rabin(&f));
        assert!(!is_irreducible_ddf(&f));
    }

    #[test]
    fn test_degenerate_inputs() {
        let zn = Arc::new(Zn::from_u64(7));
        assert!(!is_irreducible(&ZnPoly::zero(&zn)));
        assert!(!is_irreducible(&ZnPoly::from_i64s(&zn, &[4])));
        assert!(is_irreducible(&ZnPoly::from_i64s(&zn, &[4, 3])));
        assert!(!is_irreducible_ddf(&ZnPoly::from_i64s(&zn, &[4])));
        // x^2 + 1 over F_7 has no root since 7 = 3 mod 4
        assert!(is_irreducible(&ZnPoly::from_i64s(&zn, &[1, 0, 1])));
        assert!(!is_irreducible(&ZnPoly::from_i64s(&zn, &[1, 2, 1])));
    }

    #[test]
    fn test_tests_agree_on_random_inputs() {
        let zn = Arc::new(Zn::from_u64(13));
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut irreducible = 0;
        for len in 2..10 {
            for _ in 0..20 {
                let f = ZnPoly::random_monic(&zn, len, &mut rng);
                let rabin = is_irreducible_rabin(&f);
                assert_eq!(rabin, is_irreducible_ddf(&f), "{f:?}");
                irreducible += usize::from(rabin);
            }
        }
        assert!(irreducible > 0);
    }
}
