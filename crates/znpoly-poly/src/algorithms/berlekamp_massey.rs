//! Incremental Berlekamp-Massey over Z/NZ.
//!
//! Points s_0, s_1, ... are fed in any number of batches. After
//! [`BerlekampMassey::reduce`] the polynomial V1 is the minimal polynomial of
//! the sequence seen so far (up to a unit) and R1 is the matching remainder:
//! with S the reversed points as a polynomial, `V1 * S = R1 (mod x^n)`.
//!
//! The update is a truncated Euclidean algorithm on (x^n, S), continued
//! only as far as the new points require, so repeated calls reuse all
//! earlier work.

use num_traits::Zero;
use std::sync::Arc;

use znpoly_integers::{Integer, NotInvertible, Zn};

use crate::dense::{require_invertible, ZnPoly};

/// State of the incremental Berlekamp-Massey reducer.
#[derive(Clone, Debug)]
pub struct BerlekampMassey {
    ctx: Arc<Zn>,
    points: Vec<Integer>,
    npoints: usize,
    r0: ZnPoly,
    r1: ZnPoly,
    v0: ZnPoly,
    v1: ZnPoly,
}

fn twice_degree_reaches(r: &ZnPoly, n: usize) -> bool {
    r.degree().is_some_and(|d| 2 * d >= n)
}

impl BerlekampMassey {
    /// Creates an empty reducer over `ctx`.
    #[must_use]
    pub fn new(ctx: &Arc<Zn>) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            points: Vec::new(),
            npoints: 0,
            r0: ZnPoly::one(ctx),
            r1: ZnPoly::zero(ctx),
            v0: ZnPoly::zero(ctx),
            v1: ZnPoly::one(ctx),
        }
    }

    /// Forgets every point and resets the state.
    pub fn start_over(&mut self) {
        *self = Self::new(&self.ctx);
    }

    /// Appends one point, reduced modulo N.
    pub fn add_point(&mut self, s: &Integer) {
        self.points.push(self.ctx.reduce(s));
    }

    /// Appends a batch of points.
    pub fn add_points(&mut self, s: &[Integer]) {
        self.points.reserve(s.len());
        for p in s {
            self.add_point(p);
        }
    }

    /// Appends `count` zero points.
    pub fn add_zeros(&mut self, count: usize) {
        self.points.resize(self.points.len() + count, Integer::zero());
    }

    /// All points added so far.
    #[must_use]
    pub fn points(&self) -> &[Integer] {
        &self.points
    }

    /// Number of points already absorbed by `reduce`.
    #[must_use]
    pub fn reduced_points(&self) -> usize {
        self.npoints
    }

    /// The current minimal polynomial candidate V1.
    #[must_use]
    pub fn v_poly(&self) -> &ZnPoly {
        &self.v1
    }

    /// The current remainder R1.
    #[must_use]
    pub fn r_poly(&self) -> &ZnPoly {
        &self.r1
    }

    /// Absorbs the pending points. Returns true when V1 changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotInvertible`] when a remainder with a non-unit leading
    /// coefficient is met.
    pub fn reduce_f(&mut self) -> Result<bool, NotInvertible> {
        let queued = self.points.len() - self.npoints;
        let mut rev: Vec<Integer> = self.points[self.npoints..].to_vec();
        rev.reverse();
        let rt = ZnPoly::from_vec(&self.ctx, rev);

        self.r0 = self.r0.shift_left(queued).add(&self.v0.mul(&rt));
        self.r1 = self.r1.shift_left(queued).add(&self.v1.mul(&rt));
        self.npoints += queued;

        if !twice_degree_reaches(&self.r1, self.npoints) {
            return Ok(false);
        }

        while twice_degree_reaches(&self.r1, self.npoints) {
            let (q, r) = self.r0.divrem_f(&self.r1)?;
            self.r0 = std::mem::replace(&mut self.r1, r);
            let v = self.v0.sub(&q.mul(&self.v1));
            self.v0 = std::mem::replace(&mut self.v1, v);
        }
        Ok(true)
    }

    /// Absorbs the pending points. Returns true when V1 changed.
    ///
    /// # Panics
    ///
    /// Panics when a remainder with a non-unit leading coefficient is met.
    pub fn reduce(&mut self) -> bool {
        require_invertible(self.reduce_f())
    }
}

/// Monic minimal polynomial of a linearly recurrent sequence.
///
/// # Panics
///
/// Panics when a leading coefficient met on the way is not a unit.
#[must_use]
pub fn minpoly(ctx: &Arc<Zn>, sequence: &[Integer]) -> ZnPoly {
    let mut bm = BerlekampMassey::new(ctx);
    bm.add_points(sequence);
    bm.reduce();
    bm.v_poly().make_monic()
}

/// Extends a sequence with its monic minimal polynomial
/// `x^L + c_{L-1} x^{L-1} + ... + c_0`, using
/// `s_{i+L} = -(c_0 s_i + ... + c_{L-1} s_{i+L-1})`.
///
/// # Panics
///
/// Panics if `minpoly` is not monic or fewer than L initial values are
/// given.
#[must_use]
pub fn extend_sequence(minpoly: &ZnPoly, initial: &[Integer], target_length: usize) -> Vec<Integer> {
    assert!(minpoly.is_monic(), "minimal polynomial must be monic");
    let zn = minpoly.ctx();
    let l = minpoly.len() - 1;
    assert!(initial.len() >= l, "need at least {l} initial values");

    let c = &minpoly.coeffs()[..l];
    let mut sequence: Vec<Integer> = initial.iter().map(|s| zn.reduce(s)).collect();
    while sequence.len() < target_length {
        let i = sequence.len() - l;
        let mut acc = Integer::zero();
        for (cj, sj) in c.iter().zip(&sequence[i..]) {
            acc += cj * sj;
        }
        sequence.push(zn.neg(&zn.reduce_owned(acc)));
    }
    sequence
}
