//! Property-based tests for polynomial arithmetic over Z/NZ.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;
    use std::sync::Arc;

    use crate::algorithms::compose::{compose_mod_brent_kung_precomp_preinv, precompute_matrix};
    use crate::algorithms::mul::{mul_classical, mul_karatsuba};
    use crate::cutoffs::{GCD_HGCD_CUTOFF, XGCD_HGCD_CUTOFF};
    use crate::{Integer, ZnPoly, Zn};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const P: i64 = 1_000_003;

    fn field() -> Arc<Zn> {
        Arc::new(Zn::from_u64(P as u64))
    }

    fn coeffs(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-P..P, 0..=max_len)
    }

    fn poly(max_len: usize) -> impl Strategy<Value = ZnPoly> {
        coeffs(max_len).prop_map(|c| ZnPoly::from_i64s(&field(), &c))
    }

    fn nonzero_poly(max_len: usize) -> impl Strategy<Value = ZnPoly> {
        poly(max_len).prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    fn monic_poly(min_len: usize, max_len: usize) -> impl Strategy<Value = ZnPoly> {
        proptest::collection::vec(-P..P, min_len - 1..max_len).prop_map(|mut c| {
            c.push(1);
            ZnPoly::from_i64s(&field(), &c)
        })
    }

    proptest! {
        #[test]
        fn mul_commutative(a in poly(20), b in poly(20)) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn distributive(a in poly(12), b in poly(12), c in poly(12)) {
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn sqr_is_self_mul(a in poly(40)) {
            prop_assert_eq!(a.sqr(), a.mul(&a.clone()));
        }

        #[test]
        fn karatsuba_matches_schoolbook(a in nonzero_poly(80), b in nonzero_poly(80)) {
            let zn = field();
            let len = a.len() + b.len() - 1;
            let mut expected = vec![Integer::zero(); len];
            let mut actual = vec![Integer::zero(); len];
            mul_classical(&zn, &mut expected, a.coeffs(), b.coeffs());
            mul_karatsuba(&zn, &mut actual, a.coeffs(), b.coeffs());
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn mullow_is_truncated_mul(a in poly(30), b in poly(30), n in 0usize..70) {
            let mut full = a.mul(&b);
            full.truncate(n);
            prop_assert_eq!(a.mullow(&b, n), full);
        }

        #[test]
        fn divrem_identity(a in poly(60), b in nonzero_poly(30)) {
            let (q, r) = a.divrem(&b);
            prop_assert!(r.len() < b.len());
            prop_assert_eq!(q.mul(&b).add(&r), a);
        }

        #[test]
        fn division_strategies_agree(a in poly(90), b in monic_poly(2, 40)) {
            let expected = a.divrem_basecase(&b);
            prop_assert_eq!(a.divrem_divconquer(&b), expected.clone());
            prop_assert_eq!(a.divrem_newton_n_preinv(&b, &b.preinv()), expected);
        }

        #[test]
        fn inverse_series(q in nonzero_poly(30), n in 1usize..100) {
            prop_assume!(!q.coeff(0).is_zero());
            let w = q.inv_series(n);
            let mut check = q.mullow(&w, n);
            check.truncate(n);
            prop_assert!(check.is_one());
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(15), b in nonzero_poly(15), c in nonzero_poly(6)) {
            let (a, b) = (a.mul(&c), b.mul(&c));
            let g = a.gcd(&b);
            prop_assert!(g.is_monic());
            prop_assert!(a.rem(&g).is_zero());
            prop_assert!(b.rem(&g).is_zero());
            prop_assert!(g.rem(&c.make_monic()).is_zero());
        }

        #[test]
        fn xgcd_bezout(a in poly(25), b in poly(25)) {
            let (g, s, t) = a.xgcd(&b);
            prop_assert_eq!(s.mul(&a).add(&t.mul(&b)), g.clone());
            prop_assert_eq!(g, a.gcd(&b));
        }

        #[test]
        fn composition_strategies_agree(
            h in monic_poly(2, 30),
            f in poly(29),
            g in poly(40),
        ) {
            prop_assume!(f.len() < h.len());
            let hinv = h.preinv();
            let naive = f.compose(&g).rem(&h);
            prop_assert_eq!(f.compose_mod_horner_preinv(&g, &h, &hinv), naive.clone());
            prop_assert_eq!(f.compose_mod_brent_kung_preinv(&g, &h, &hinv), naive.clone());
            let a = precompute_matrix(&g, &h, &hinv);
            prop_assert_eq!(compose_mod_brent_kung_precomp_preinv(&f, &a, &h, &hinv), naive);
        }

        #[test]
        fn powmod_exponent_addition(g in poly(10), f in monic_poly(2, 10), e1 in 0u64..200, e2 in 0u64..200) {
            let finv = f.preinv();
            let lhs = g.powmod_ui_binexp_preinv(e1 + e2, &f, &finv);
            let rhs = g
                .powmod_ui_binexp_preinv(e1, &f, &finv)
                .mulmod_preinv(&g.powmod_ui_binexp_preinv(e2, &f, &finv), &f, &finv);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn resultant_multiplicative(a in nonzero_poly(8), b in nonzero_poly(8), c in nonzero_poly(8)) {
            let zn = field();
            let lhs = a.resultant(&b.mul(&c));
            let rhs = zn.mul(&a.resultant(&b), &a.resultant(&c));
            prop_assert_eq!(lhs, rhs);
        }
    }

    fn ring(p: u64) -> Arc<Zn> {
        Arc::new(Zn::from_u64(p))
    }

    /// `(a * c, b * c, c)` for random monic `a`, `b`, `c` of the given lengths.
    fn planted(
        p: u64,
        la: usize,
        lb: usize,
        lc: usize,
        seed: u64,
    ) -> (ZnPoly, ZnPoly, ZnPoly) {
        let zn = ring(p);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let c = ZnPoly::random_monic(&zn, lc, &mut rng);
        let a = ZnPoly::random_monic(&zn, la, &mut rng).mul(&c);
        let b = ZnPoly::random_monic(&zn, lb, &mut rng).mul(&c);
        (a, b, c)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn long_gcd_dispatch_matches_euclid(
            p in prop::sample::select(vec![3u64, P as u64]),
            la in 262usize..600,
            lb in 262usize..600,
            lc in 40usize..100,
            seed in any::<u64>(),
        ) {
            let (a, b, c) = planted(p, la, lb, lc, seed);
            prop_assert!(a.len() >= 300 && a.len() <= 700);
            prop_assert!(a.len().min(b.len()) >= GCD_HGCD_CUTOFF);

            let g = a.gcd(&b);
            prop_assert_eq!(&g, &a.gcd_euclidean(&b));
            prop_assert!(g.is_monic());
            prop_assert!(g.rem(&c).is_zero());
            prop_assert!(a.rem(&g).is_zero());
            prop_assert!(b.rem(&g).is_zero());
        }

        #[test]
        fn long_xgcd_dispatch_matches_euclid(
            p in prop::sample::select(vec![3u64, P as u64]),
            la in 262usize..600,
            lb in 262usize..600,
            lc in 40usize..100,
            seed in any::<u64>(),
        ) {
            let (a, b, c) = planted(p, la, lb, lc, seed);
            prop_assert!(a.len().min(b.len()) >= XGCD_HGCD_CUTOFF);

            let (g, s, t) = a.xgcd(&b);
            prop_assert_eq!((g.clone(), s.clone(), t.clone()), a.xgcd_euclidean(&b));
            prop_assert_eq!(s.mul(&a).add(&t.mul(&b)), g.clone());
            prop_assert!(g.rem(&c).is_zero());
        }
    }
}
