//! # znpoly-poly
//!
//! Dense univariate polynomial arithmetic over Z/NZ for an arbitrary
//! precision modulus N.
//!
//! This crate provides:
//! - The `ZnPoly` container with length-normalized coefficient storage
//! - Classical and Karatsuba multiplication with delayed reduction
//! - Basecase, divide-and-conquer and Newton division
//! - Power series inversion by Newton iteration
//! - Euclidean and Half-GCD gcd/xgcd
//! - Modular composition (Horner and Brent-Kung, batched and threaded)
//! - Modular powering, Berlekamp-Massey, resultants
//!
//! ## Algorithm Selection
//!
//! The dispatching entry points choose an algorithm from the operand
//! lengths, see [`cutoffs`]:
//! - Multiplication: classical below `KARATSUBA_CUTOFF`, Karatsuba above
//! - Division: basecase, divide-and-conquer, then Newton with a
//!   precomputed inverse of the reversed divisor
//! - GCD: Euclid below `GCD_HGCD_CUTOFF`, Half-GCD above
//!
//! ## Non-invertible coefficients
//!
//! Over a composite N a leading coefficient may fail to be a unit. The
//! `_f` variants return [`NotInvertible`] carrying `gcd(lead, N)`; the plain
//! variants panic in that situation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod algorithms;
pub mod cutoffs;
pub mod dense;

#[cfg(test)]
mod proptests;

pub use algorithms::berlekamp_massey::BerlekampMassey;
pub use algorithms::hgcd::HgcdMatrix;
pub use dense::ZnPoly;
pub use znpoly_integers::{Integer, NotInvertible, Zn};
