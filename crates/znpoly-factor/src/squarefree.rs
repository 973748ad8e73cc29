//! Squarefree factorization over F_p.
//!
//! Yun's algorithm on f and f', with one twist for positive characteristic:
//! whatever is left once the derivative stops producing factors is a
//! polynomial in x^p, and since `a^p = a` on F_p its p-th root is obtained
//! by keeping every p-th coefficient.

use znpoly_poly::ZnPoly;

use crate::factorization::Factorization;

/// `g` with `g(x)^p = f`, for f a polynomial in x^p over F_p.
fn pth_root(f: &ZnPoly, p: usize) -> ZnPoly {
    let coeffs = f.coeffs().iter().step_by(p).cloned().collect();
    ZnPoly::from_coeffs(f.ctx(), coeffs)
}

/// The characteristic as a `usize`, when it fits.
fn characteristic(f: &ZnPoly) -> Option<usize> {
    f.modulus().to_usize()
}

fn squarefree_monic(f: &ZnPoly, out: &mut Factorization) {
    if f.len() <= 1 {
        return;
    }
    let df = f.derivative();
    if df.is_zero() {
        // f = g(x^p); p <= deg f here, so it fits in usize
        let p = characteristic(f).unwrap_or(usize::MAX);
        let mut inner = Factorization::new(f.ctx());
        squarefree_monic(&pth_root(f, p), &mut inner);
        inner.pow(p);
        out.concat(&inner);
        return;
    }

    let mut g = f.gcd(&df);
    let mut w = f.div(&g);
    let mut i = 1;
    while w.len() > 1 {
        let y = w.gcd(&g);
        let z = w.div(&y);
        if z.len() > 1 {
            out.insert(z, i);
        }
        i += 1;
        g = g.div(&y);
        w = y;
    }

    if g.len() > 1 {
        let p = characteristic(&g).unwrap_or(usize::MAX);
        let mut inner = Factorization::new(f.ctx());
        squarefree_monic(&pth_root(&g, p), &mut inner);
        inner.pow(p);
        out.concat(&inner);
    }
}

/// Squarefree factorization `f = lc * prod s_i^i` with every `s_i` monic,
/// squarefree and pairwise coprime. The leading coefficient becomes the
/// unit.
///
/// # Panics
///
/// Panics if the leading coefficient is not a unit. The modulus must be
/// prime.
#[must_use]
pub fn squarefree_factorization(f: &ZnPoly) -> Factorization {
    let ctx = f.ctx();
    let Some(lc) = f.leading_coeff() else {
        return Factorization::with_unit(ctx, f.coeff(0));
    };
    let mut out = Factorization::with_unit(ctx, lc.clone());
    squarefree_monic(&f.make_monic(), &mut out);
    out
}

/// Returns true when f has no repeated factor. Zero is not squarefree.
///
/// The modulus must be prime.
#[must_use]
pub fn is_squarefree(f: &ZnPoly) -> bool {
    match f.len() {
        0 => false,
        1 | 2 => true,
        _ => {
            let df = f.derivative();
            !df.is_zero() && f.gcd(&df).len() == 1
        }
    }
}
