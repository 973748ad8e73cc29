//! Distinct-degree factorization.
//!
//! Baby-step/giant-step strategy of Kaltofen and Shoup. For a squarefree
//! monic v of degree n over F_p, with l = ceil(n^beta) baby steps
//! `h_i = x^(p^i) mod v` and giant steps `H_j = x^(p^(l(j+1))) mod v`, the
//! interval polynomial `prod_i (H_j - h_i)` is divisible by exactly the
//! irreducible factors whose degree lies in `(l*j, l*(j+1)]`. A gcd with v
//! extracts them all at once; a fine pass then separates each interval by
//! exact degree.

use znpoly_linalg::DenseMatrix;
use znpoly_poly::algorithms::compose::{
    compose_mod_brent_kung_precomp_preinv, precompute_matrix, reduce_matrix_mod_poly,
};
use znpoly_poly::ZnPoly;

use crate::factorization::Factorization;

/// Tuning of the distinct-degree factorization.
#[derive(Clone, Debug)]
pub struct DdfConfig {
    /// Baby step count is `ceil(n^beta)` for a polynomial of degree n.
    pub beta: f64,
    /// Baby steps are built by Brent-Kung composition when the bit length
    /// of p exceeds `matrix_ratio * (isqrt(n) + 1)`, and by repeated
    /// powering otherwise.
    pub matrix_ratio: f64,
}

impl Default for DdfConfig {
    fn default() -> Self {
        Self {
            beta: 0.5,
            matrix_ratio: 0.75,
        }
    }
}

impl DdfConfig {
    /// Number of baby steps for degree `n`, at least 2.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn baby_steps(&self, n: usize) -> usize {
        ((n as f64).powf(self.beta).ceil() as usize).max(2)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn use_matrix(&self, bits: usize, n: usize) -> bool {
        let root = (n as f64).sqrt().floor() + 1.0;
        bits as f64 > self.matrix_ratio * root
    }
}

/// Result of a distinct-degree factorization: `factors[i]` is the product of
/// all irreducible factors of degree `degrees[i]`.
#[derive(Clone, Debug)]
pub struct DistinctDegreeFactorization {
    /// Products of equal-degree irreducible factors, each monic, exponent 1.
    pub factors: Factorization,
    /// Degree of the irreducible factors inside each product.
    pub degrees: Vec<usize>,
}

impl DistinctDegreeFactorization {
    /// Iterates over `(product, degree)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ZnPoly, usize)> {
        self.factors
            .iter()
            .map(|(f, _)| f)
            .zip(self.degrees.iter().copied())
    }
}

fn reduced(a: &ZnPoly, v: &ZnPoly, vinv: &ZnPoly) -> ZnPoly {
    if a.len() >= v.len() {
        a.rem_preinv(v, vinv)
    } else {
        a.clone()
    }
}

/// `h_i = x^(p^i) mod v` for i = 0..=l.
fn baby_steps(v: &ZnPoly, vinv: &ZnPoly, l: usize, config: &DdfConfig) -> Vec<ZnPoly> {
    let p = v.modulus();
    let n = v.len() - 1;
    let mut h = Vec::with_capacity(l + 1);
    h.push(reduced(&ZnPoly::x(v.ctx()), v, vinv));
    h.push(ZnPoly::powmod_x_fmpz_preinv(p, v, vinv));

    if config.use_matrix(p.bit_len(), n) {
        let a = precompute_matrix(&h[1], v, vinv);
        for i in 2..=l {
            let next = compose_mod_brent_kung_precomp_preinv(&h[i - 1], &a, v, vinv);
            h.push(next);
        }
    } else {
        for i in 2..=l {
            let next = h[i - 1].powmod_fmpz_binexp_preinv(p, v, vinv);
            h.push(next);
        }
    }
    h
}

/// Splits a squarefree polynomial into products of irreducible factors of
/// equal degree.
///
/// The input is made monic; zero and constants give an empty result.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime and the input squarefree for the result to be meaningful.
#[must_use]
pub fn distinct_degree_factorization(f: &ZnPoly, config: &DdfConfig) -> DistinctDegreeFactorization {
    let ctx = f.ctx();
    let mut out = DistinctDegreeFactorization {
        factors: Factorization::new(ctx),
        degrees: Vec::new(),
    };
    let Some(n) = f.degree() else {
        return out;
    };
    if n == 0 {
        return out;
    }
    let mut v = f.make_monic();
    if n == 1 {
        out.factors.insert(v, 1);
        out.degrees.push(1);
        return out;
    }

    let l = config.baby_steps(n);
    let m = n.div_ceil(2 * l);
    let _span = tracing::debug_span!("ddf", degree = n, baby_steps = l, giant_steps = m).entered();

    let mut vinv = v.preinv();
    let h = baby_steps(&v, &vinv, l, config);

    // Coarse pass: one interval polynomial per giant step.
    let mut giant: Vec<ZnPoly> = Vec::with_capacity(m);
    let mut intervals: Vec<ZnPoly> = Vec::with_capacity(m);
    let mut hh: DenseMatrix = precompute_matrix(&h[l], &v, &vinv);
    let mut d = 1;
    for j in 0..m {
        let big_h = match giant.last() {
            None => h[l].clone(),
            Some(prev) => {
                let shrunk = intervals.last().is_some_and(|i: &ZnPoly| i.len() > 1);
                if shrunk {
                    hh = reduce_matrix_mod_poly(&hh, &v, &vinv);
                }
                compose_mod_brent_kung_precomp_preinv(&reduced(prev, &v, &vinv), &hh, &v, &vinv)
            }
        };

        let mut interval = ZnPoly::one(ctx);
        let mut i = l;
        while i > 0 && 2 * d <= v.len() - 1 {
            i -= 1;
            let diff = big_h.sub(&reduced(&h[i], &v, &vinv));
            interval = interval.mulmod_preinv(&diff, &v, &vinv);
            d += 1;
        }

        let g = v.gcd(&interval);
        if g.len() > 1 {
            tracing::trace!(giant_step = j, degree = g.len() - 1, "interval factor");
            v.remove(&g);
            vinv = v.preinv();
        }
        giant.push(big_h);
        intervals.push(g);

        if v.len() - 1 < 2 * d {
            break;
        }
    }

    // Fine pass: split each interval by exact degree.
    for (j, (interval, big_h)) in intervals.iter().zip(&giant).enumerate() {
        if interval.len() <= 1 {
            continue;
        }
        if interval.len() - 1 > (j + 1) * l || j == 0 {
            let mut g = interval.clone();
            let mut i = l;
            while i > 0 && g.len() > 1 {
                i -= 1;
                let factor = g.gcd(&big_h.sub(&h[i]));
                if factor.len() > 1 {
                    g = g.div(&factor);
                    out.factors.insert(factor, 1);
                    out.degrees.push(l * (j + 1) - i);
                }
            }
        } else {
            out.factors.insert(interval.clone(), 1);
            out.degrees.push(interval.len() - 1);
        }
    }

    if v.len() > 1 {
        let deg = v.len() - 1;
        tracing::trace!(degree = deg, "irreducible remainder");
        out.factors.insert(v, 1);
        out.degrees.push(deg);
    }
    tracing::debug!(parts = out.degrees.len(), "ddf finished");
    out
}
