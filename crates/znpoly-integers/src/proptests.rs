//! Property-based tests for integer and modular arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Zn};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Moduli covering primes, prime powers and products of primes
    fn modulus() -> impl Strategy<Value = u64> {
        prop_oneof![Just(2u64), Just(7), Just(101), Just(91), Just(1024), Just(1_000_003)]
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                &a * &(&b + &c),
                &(&a * &b) + &(&a * &c)
            );
        }

        #[test]
        fn integer_div_rem_identity(a in small_int(), b in 1i64..1000i64) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let q = &a / &b;
            let r = &a % &b;
            prop_assert_eq!(&(&q * &b) + &r, a);
        }

        #[test]
        fn reduce_lands_in_range(a in any::<i64>(), n in modulus()) {
            let zn = Zn::from_u64(n);
            let r = zn.reduce(&Integer::new(a));
            prop_assert!(!r.is_negative());
            prop_assert!(&r < zn.modulus());
        }

        #[test]
        fn zn_add_sub_inverse(a in small_int(), b in small_int(), n in modulus()) {
            let zn = Zn::from_u64(n);
            let a = zn.from_i64(a);
            let b = zn.from_i64(b);
            prop_assert_eq!(zn.sub(&zn.add(&a, &b), &b), a.clone());
            prop_assert!(zn.add(&a, &zn.neg(&a)).is_zero());
        }

        #[test]
        fn zn_mul_matches_integers(a in small_int(), b in small_int(), n in modulus()) {
            let zn = Zn::from_u64(n);
            let expected = zn.reduce(&(Integer::new(a) * Integer::new(b)));
            prop_assert_eq!(zn.mul(&zn.from_i64(a), &zn.from_i64(b)), expected);
        }

        #[test]
        fn zn_inverse_or_factor(a in small_int(), n in modulus()) {
            let zn = Zn::from_u64(n);
            let a = zn.from_i64(a);
            match zn.inv(&a) {
                Ok(inv) => prop_assert!(zn.mul(&a, &inv).is_one()),
                Err(e) => {
                    let f = e.factor();
                    prop_assert!(!f.is_one());
                    prop_assert!((zn.modulus() % f).is_zero());
                    prop_assert!((&a % f).is_zero());
                }
            }
        }

        #[test]
        fn zn_pow_adds_exponents(a in small_int(), e1 in 0u64..50, e2 in 0u64..50, n in modulus()) {
            let zn = Zn::from_u64(n);
            let a = zn.from_i64(a);
            prop_assert_eq!(
                zn.pow_u64(&a, e1 + e2),
                zn.mul(&zn.pow_u64(&a, e1), &zn.pow_u64(&a, e2))
            );
        }
    }
}
