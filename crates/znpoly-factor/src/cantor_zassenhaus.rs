//! Cantor-Zassenhaus equal-degree splitting and complete factorization.
//!
//! A complete factorization runs three stages: squarefree factorization,
//! distinct-degree factorization of each squarefree part, then random
//! equal-degree splitting of each distinct-degree product.

use num_traits::One;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use znpoly_poly::{Integer, ZnPoly};

use crate::ddf::{distinct_degree_factorization, DdfConfig};
use crate::factorization::Factorization;
use crate::squarefree::squarefree_factorization;

/// Seed used by [`factor`] and [`factor_batch`].
pub const DEFAULT_SEED: u64 = 123;

/// The splitting map applied to a random residue `a` modulo `f`.
///
/// For odd p this is `a^((p^d - 1)/2) - 1`; for p = 2 it is the trace
/// `a + a^2 + ... + a^(2^(d-1))`. Either vanishes on roughly half of the
/// irreducible factors.
struct Splitter {
    exponent: Option<Integer>,
    d: usize,
}

impl Splitter {
    fn new(p: &Integer, d: usize) -> Self {
        let exponent = if *p == Integer::new(2) {
            None
        } else {
            let pd = p.pow(u32::try_from(d).unwrap_or(u32::MAX));
            Some((pd - Integer::one()) / Integer::new(2))
        };
        Self { exponent, d }
    }

    fn apply(&self, a: &ZnPoly, f: &ZnPoly, finv: &ZnPoly) -> ZnPoly {
        match &self.exponent {
            Some(e) => a
                .powmod_fmpz_binexp_preinv(e, f, finv)
                .sub(&ZnPoly::one(f.ctx())),
            None => {
                let mut trace = a.clone();
                let mut term = a.clone();
                for _ in 1..self.d {
                    term = term.mulmod_preinv(&term, f, finv);
                    trace = trace.add(&term);
                }
                trace
            }
        }
    }
}

/// Tries one random residue; returns a proper monic factor of f on success.
fn try_split<R: Rng + ?Sized>(
    f: &ZnPoly,
    finv: &ZnPoly,
    splitter: &Splitter,
    rng: &mut R,
) -> Option<ZnPoly> {
    let a = ZnPoly::random(f.ctx(), f.len() - 1, rng);
    if a.len() <= 1 {
        return None;
    }

    let g = f.gcd(&a);
    if g.len() > 1 {
        return Some(g);
    }

    let g = f.gcd(&splitter.apply(&a, f, finv));
    (g.len() > 1 && g.len() < f.len()).then_some(g)
}

/// Splits a product of distinct irreducible factors, all of degree `d`,
/// into those factors.
///
/// The input is made monic and the factors are returned monic, in no
/// particular order.
///
/// # Panics
///
/// Panics if `d` is zero, if the degree of f is not a multiple of `d`, or
/// if the leading coefficient is not a unit. The modulus must be prime.
#[must_use]
pub fn equal_degree_factorization<R: Rng + ?Sized>(
    f: &ZnPoly,
    d: usize,
    rng: &mut R,
) -> Vec<ZnPoly> {
    assert!(d > 0, "factor degree must be positive");
    let Some(n) = f.degree() else {
        return Vec::new();
    };
    assert!(n % d == 0, "degree {n} is not a multiple of {d}");
    if n == 0 {
        return Vec::new();
    }

    let splitter = Splitter::new(f.modulus(), d);
    let mut factors = Vec::with_capacity(n / d);
    let mut pending = vec![f.make_monic()];
    let mut attempts = 0usize;

    while let Some(g) = pending.pop() {
        if g.len() - 1 == d {
            factors.push(g);
            continue;
        }
        let ginv = g.preinv();
        let h = loop {
            attempts += 1;
            if let Some(h) = try_split(&g, &ginv, &splitter, rng) {
                break h;
            }
        };
        pending.push(g.div(&h));
        pending.push(h);
    }

    tracing::trace!(degree = n, factor_degree = d, attempts, "equal-degree split");
    factors
}

/// Complete factorization into monic irreducible factors with their
/// multiplicities, using the given configuration and randomness.
///
/// The unit of the result is the leading coefficient of f. Factors are
/// sorted by degree. Zero and constants give no factors.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn factor_with<R: Rng + ?Sized>(f: &ZnPoly, config: &DdfConfig, rng: &mut R) -> Factorization {
    let _span = tracing::debug_span!("factor", degree = f.degree().unwrap_or(0)).entered();
    let sqf = squarefree_factorization(f);
    let mut out = Factorization::with_unit(f.ctx(), sqf.unit().clone());

    for (s, e) in &sqf {
        let ddf = distinct_degree_factorization(s, config);
        for (g, d) in ddf.iter() {
            for irreducible in equal_degree_factorization(g, d, rng) {
                out.insert(irreducible, *e);
            }
        }
    }

    out.sort();
    tracing::debug!(factors = out.len(), "factorization finished");
    out
}

/// Complete factorization with the default configuration and a fixed seed.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn factor(f: &ZnPoly) -> Factorization {
    let mut rng = ChaCha8Rng::seed_from_u64(DEFAULT_SEED);
    factor_with(f, &DdfConfig::default(), &mut rng)
}

/// Factors several polynomials in parallel.
#[must_use]
pub fn factor_batch(polys: &[ZnPoly]) -> Vec<Factorization> {
    polys.par_iter().map(factor).collect()
}
