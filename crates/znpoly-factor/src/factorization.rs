//! Factor collections.

use num_traits::One;
use std::cmp::Ordering;
use std::sync::Arc;

use znpoly_poly::{Integer, Zn, ZnPoly};

/// A product `unit * f_1^e_1 * ... * f_k^e_k`.
///
/// Factors are kept distinct: inserting a factor already present adds to
/// its exponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    ctx: Arc<Zn>,
    unit: Integer,
    factors: Vec<(ZnPoly, usize)>,
}

fn cmp_polys(a: &ZnPoly, b: &ZnPoly) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.coeffs().iter().rev().cmp(b.coeffs().iter().rev()))
}

impl Factorization {
    /// The empty factorization with unit one.
    #[must_use]
    pub fn new(ctx: &Arc<Zn>) -> Self {
        Self::with_unit(ctx, Integer::one())
    }

    /// The empty factorization with the given unit.
    #[must_use]
    pub fn with_unit(ctx: &Arc<Zn>, unit: Integer) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            unit: ctx.reduce(&unit),
            factors: Vec::new(),
        }
    }

    /// The modulus context.
    #[must_use]
    pub fn ctx(&self) -> &Arc<Zn> {
        &self.ctx
    }

    /// The unit.
    #[must_use]
    pub fn unit(&self) -> &Integer {
        &self.unit
    }

    /// Replaces the unit.
    pub fn set_unit(&mut self, unit: &Integer) {
        self.unit = self.ctx.reduce(unit);
    }

    /// Number of distinct factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true when there are no factors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// The (factor, exponent) pairs.
    #[must_use]
    pub fn factors(&self) -> &[(ZnPoly, usize)] {
        &self.factors
    }

    /// Iterates over the (factor, exponent) pairs.
    pub fn iter(&self) -> std::slice::Iter<'_, (ZnPoly, usize)> {
        self.factors.iter()
    }

    /// Adds `f^exp`, merging with an equal factor. Zero exponents are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `f` is over a different modulus.
    pub fn insert(&mut self, f: ZnPoly, exp: usize) {
        assert!(f.ctx() == &self.ctx, "polynomials over different moduli");
        if exp == 0 {
            return;
        }
        match self.factors.iter_mut().find(|(g, _)| *g == f) {
            Some((_, e)) => *e += exp,
            None => self.factors.push((f, exp)),
        }
    }

    /// Inserts every factor of `other`. The unit of `other` is ignored.
    pub fn concat(&mut self, other: &Self) {
        for (f, e) in &other.factors {
            self.insert(f.clone(), *e);
        }
    }

    /// Multiplies every exponent by `exp`. The unit is left unchanged.
    pub fn pow(&mut self, exp: usize) {
        if exp == 0 {
            self.factors.clear();
            return;
        }
        for (_, e) in &mut self.factors {
            *e *= exp;
        }
    }

    /// Sorts by degree, then by coefficients from the top.
    pub fn sort(&mut self) {
        self.factors
            .sort_by(|(f, e), (g, d)| cmp_polys(f, g).then(e.cmp(d)));
    }

    /// Multiplies the factorization out.
    #[must_use]
    pub fn expand(&self) -> ZnPoly {
        let mut result = ZnPoly::constant(&self.ctx, &self.unit);
        for (f, e) in &self.factors {
            result = result.mul(&f.pow(*e as u64));
        }
        result
    }

    /// Sum of `deg f * e` over all factors.
    #[must_use]
    pub fn total_degree(&self) -> usize {
        self.factors
            .iter()
            .map(|(f, e)| f.degree().unwrap_or(0) * e)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Factorization {
    type Item = &'a (ZnPoly, usize);
    type IntoIter = std::slice::Iter<'a, (ZnPoly, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.factors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Arc<Zn> {
        Arc::new(Zn::from_u64(7))
    }

    #[test]
    fn test_insert_merges() {
        let zn = ctx();
        let mut fac = Factorization::new(&zn);
        let f = ZnPoly::from_i64s(&zn, &[1, 1]);
        let g = ZnPoly::from_i64s(&zn, &[2, 1]);
        fac.insert(f.clone(), 1);
        fac.insert(g.clone(), 2);
        fac.insert(f.clone(), 3);
        fac.insert(g.clone(), 0);
        assert_eq!(fac.len(), 2);
        assert_eq!(fac.factors()[0], (f, 4));
        assert_eq!(fac.factors()[1], (g, 2));
        assert_eq!(fac.total_degree(), 6);
    }

    #[test]
    fn test_concat_and_pow() {
        let zn = ctx();
        let f = ZnPoly::from_i64s(&zn, &[1, 1]);
        let g = ZnPoly::from_i64s(&zn, &[3, 0, 1]);
        let mut a = Factorization::new(&zn);
        a.insert(f.clone(), 1);
        let mut b = Factorization::with_unit(&zn, Integer::new(5));
        b.insert(f.clone(), 2);
        b.insert(g.clone(), 1);

        a.concat(&b);
        assert!(a.unit().is_one());
        a.pow(2);
        assert_eq!(a.factors(), &[(f, 6), (g, 2)]);
    }

    #[test]
    fn test_expand_includes_unit() {
        let zn = ctx();
        let mut fac = Factorization::with_unit(&zn, Integer::new(3));
        fac.insert(ZnPoly::from_i64s(&zn, &[1, 1]), 2);
        assert_eq!(fac.expand(), ZnPoly::from_i64s(&zn, &[3, 6, 3]));

        let empty = Factorization::with_unit(&zn, Integer::new(-1));
        assert_eq!(empty.expand(), ZnPoly::from_i64s(&zn, &[6]));
    }

    #[test]
    fn test_sort_by_degree() {
        let zn = ctx();
        let mut fac = Factorization::new(&zn);
        fac.insert(ZnPoly::from_i64s(&zn, &[1, 0, 1]), 1);
        fac.insert(ZnPoly::from_i64s(&zn, &[4, 1]), 1);
        fac.insert(ZnPoly::from_i64s(&zn, &[2, 1]), 1);
        fac.sort();
        let degrees: Vec<_> = fac.iter().map(|(f, _)| f.degree().unwrap()).collect();
        assert_eq!(degrees, vec![1, 1, 2]);
        assert_eq!(fac.factors()[0].0, ZnPoly::from_i64s(&zn, &[2, 1]));
    }
}
