//! Property-based tests for factorization over F_p.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use znpoly_poly::{Zn, ZnPoly};

    use crate::{
        distinct_degree_factorization, factor_with, is_irreducible_ddf, is_irreducible_rabin,
        is_squarefree, squarefree_factorization, DdfConfig,
    };

    const P: i64 = 10_007;

    fn field() -> Arc<Zn> {
        Arc::new(Zn::from_u64(P as u64))
    }

    fn monic_poly(min_len: usize, max_len: usize) -> impl Strategy<Value = ZnPoly> {
        proptest::collection::vec(0..P, min_len - 1..max_len).prop_map(|mut c| {
            c.push(1);
            ZnPoly::from_i64s(&field(), &c)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn squarefree_parts_recombine(a in monic_poly(1, 6), b in monic_poly(1, 5), c in monic_poly(2, 4)) {
            let f = a.mul(&b.pow(2)).mul(&c.pow(3));
            let sqf = squarefree_factorization(&f);
            prop_assert_eq!(sqf.expand(), f);
            for (s, _) in &sqf {
                prop_assert!(is_squarefree(s));
            }
        }

        #[test]
        fn ddf_products_recombine(f in monic_poly(2, 20), beta in 0.2f64..0.9) {
            prop_assume!(is_squarefree(&f));
            let config = DdfConfig { beta, ..DdfConfig::default() };
            let ddf = distinct_degree_factorization(&f, &config);
            prop_assert_eq!(ddf.factors.expand(), f);
            for (g, d) in ddf.iter() {
                prop_assert_eq!((g.len() - 1) % d, 0);
            }
        }

        #[test]
        fn factors_are_irreducible_and_recombine(f in monic_poly(1, 16), seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let fac = factor_with(&f, &DdfConfig::default(), &mut rng);
            prop_assert_eq!(fac.expand(), f);
            for (g, _) in &fac {
                prop_assert!(is_irreducible_rabin(g));
            }
        }

        #[test]
        fn irreducibility_tests_agree(f in monic_poly(2, 12)) {
            prop_assert_eq!(is_irreducible_rabin(&f), is_irreducible_ddf(&f));
        }
    }
}
