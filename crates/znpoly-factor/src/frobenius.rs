//! Frobenius powers `x^(p^k) mod f`.
//!
//! Over F_p the map `a -> a^p` is a ring homomorphism, so if
//! `u = x^(p^i) mod f` and `w = x^(p^j) mod f` then `u(w) = x^(p^(i+j)) mod f`.
//! Powers of p are therefore assembled by modular composition instead of
//! exponentiation, which only has to be done once for `x^p`.

use znpoly_poly::algorithms::compose::{compose_mod_brent_kung_precomp_preinv, precompute_matrix};
use znpoly_poly::ZnPoly;

/// Cache of `x^(p^(2^i)) mod f` for `2^i <= m`, bound to one (f, finv) pair.
#[derive(Clone, Debug)]
pub struct FrobeniusPowers {
    pows: Vec<ZnPoly>,
    f: ZnPoly,
    finv: ZnPoly,
}

impl FrobeniusPowers {
    /// Builds the cache for exponents up to `m`.
    ///
    /// `finv` must be `f.preinv()`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is zero.
    #[must_use]
    pub fn new(f: &ZnPoly, finv: &ZnPoly, m: usize) -> Self {
        assert!(!f.is_zero(), "division by zero polynomial");
        let mut pows = Vec::new();
        if m > 0 {
            let p = f.modulus();
            pows.push(ZnPoly::powmod_x_fmpz_preinv(p, f, finv));
            let mut span = 1usize;
            while span.checked_mul(2).is_some_and(|next| next <= m) {
                let last = &pows[pows.len() - 1];
                let next = last.compose_mod_preinv(last, f, finv);
                pows.push(next);
                span *= 2;
            }
        }
        Self {
            pows,
            f: f.clone(),
            finv: finv.clone(),
        }
    }

    /// Number of cached powers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pows.len()
    }

    /// Returns true when nothing is cached (m = 0).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pows.is_empty()
    }

    /// The cached `x^(p^(2^i)) mod f`.
    #[must_use]
    pub fn powers(&self) -> &[ZnPoly] {
        &self.pows
    }

    /// The largest k accepted by [`frobenius_power`](Self::frobenius_power).
    #[must_use]
    pub fn max_exponent(&self) -> usize {
        match self.pows.len() {
            0 => 0,
            n if n >= usize::BITS as usize => usize::MAX,
            n => (1usize << n) - 1,
        }
    }

    /// `x^(p^k) mod f`, composing the cached powers along the bits of k.
    ///
    /// # Panics
    ///
    /// Panics if k exceeds [`max_exponent`](Self::max_exponent).
    #[must_use]
    pub fn frobenius_power(&self, k: usize) -> ZnPoly {
        assert!(k <= self.max_exponent(), "frobenius power exceeds the cache");
        let x = ZnPoly::x(self.f.ctx());
        if k == 0 {
            return if x.len() >= self.f.len() {
                x.rem_preinv(&self.f, &self.finv)
            } else {
                x
            };
        }

        let mut result: Option<ZnPoly> = None;
        for (i, pow) in self.pows.iter().enumerate() {
            if (k >> i) & 1 == 0 {
                continue;
            }
            result = Some(match result {
                None => pow.clone(),
                Some(r) => r.compose_mod_preinv(pow, &self.f, &self.finv),
            });
        }
        result.unwrap_or(x)
    }
}

/// The list `x^(p^i) mod f` for `i = 0..=m`.
///
/// After `x^p` every entry is the previous one composed with `x^p`, all
/// through one shared power matrix.
///
/// # Panics
///
/// Panics if `f` is constant.
#[must_use]
pub fn frobenius_powers_precomp(f: &ZnPoly, finv: &ZnPoly, m: usize) -> Vec<ZnPoly> {
    assert!(f.len() >= 2, "modulus polynomial must have positive degree");
    let ctx = f.ctx();
    let x = ZnPoly::x(ctx);
    let x = if x.len() >= f.len() {
        x.rem_preinv(f, finv)
    } else {
        x
    };
    let mut res = Vec::with_capacity(m + 1);
    res.push(x);
    if m == 0 {
        return res;
    }

    let xp = ZnPoly::powmod_x_fmpz_preinv(f.modulus(), f, finv);
    let a = precompute_matrix(&xp, f, finv);
    res.push(xp);
    for i in 2..=m {
        let next = compose_mod_brent_kung_precomp_preinv(&res[i - 1], &a, f, finv);
        res.push(next);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use znpoly_poly::{Integer, Zn};

    fn x_pow_p_pow(f: &ZnPoly, finv: &ZnPoly, k: u32) -> ZnPoly {
        let e = f.modulus().pow(k);
        ZnPoly::powmod_x_fmpz_preinv(&e, f, finv)
    }

    #[test]
    fn test_cache_matches_direct_powering() {
        let zn = Arc::new(Zn::from_u64(10_007));
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let f = ZnPoly::random_monic(&zn, 12, &mut rng);
        let finv = f.preinv();
        let cache = FrobeniusPowers::new(&f, &finv, 13);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.max_exponent(), 15);

        for k in 0..=15u32 {
            assert_eq!(
                cache.frobenius_power(k as usize),
                x_pow_p_pow(&f, &finv, k),
                "k = {k}"
            );
        }
    }

    #[test]
    fn test_precomp_list() {
        let zn = Arc::new(Zn::from_u64(5));
        let f = ZnPoly::from_i64s(&zn, &[2, 1, 0, 3, 0, 1]);
        let finv = f.preinv();
        let list = frobenius_powers_precomp(&f, &finv, 6);
        assert_eq!(list.len(), 7);
        for (k, p) in list.iter().enumerate() {
            assert_eq!(*p, x_pow_p_pow(&f, &finv, k as u32));
        }
    }

    #[test]
    fn test_irreducible_cycle() {
        // x^3 + x + 1 is irreducible over F_2, so x^(2^3) = x
        let zn = Arc::new(Zn::from_u64(2));
        let f = ZnPoly::from_i64s(&zn, &[1, 1, 0, 1]);
        let finv = f.preinv();
        let cache = FrobeniusPowers::new(&f, &finv, 3);
        assert_eq!(cache.frobenius_power(3), ZnPoly::x(&zn));
        assert_ne!(cache.frobenius_power(1), ZnPoly::x(&zn));
        assert_eq!(
            ZnPoly::powmod_x_fmpz_preinv(&Integer::new(8), &f, &finv),
            ZnPoly::x(&zn)
        );
    }

    #[test]
    fn test_empty_cache() {
        let zn = Arc::new(Zn::from_u64(3));
        let f = ZnPoly::from_i64s(&zn, &[1, 0, 1]);
        let cache = FrobeniusPowers::new(&f, &f.preinv(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.frobenius_power(0), ZnPoly::x(&zn));
    }
}
