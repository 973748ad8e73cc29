//! Factorization of dense polynomials over Z/pZ.
//!
//! This crate provides:
//! - **Squarefree factorization**: Yun's algorithm with p-th root deflation
//! - **Distinct-degree factorization**: Kaltofen-Shoup baby-step/giant-step
//! - **Frobenius powers**: cached `x^(p^k) mod f` by modular composition
//! - **Cantor-Zassenhaus**: probabilistic equal-degree splitting
//! - **Irreducibility tests**: Rabin's test and a distinct-degree variant
//!
//! # Parallelism
//!
//! [`factor_batch`] factors independent inputs in parallel with rayon, and
//! the batched compositions of `znpoly-poly` run their matrix products on
//! the rayon pool.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod cantor_zassenhaus;
pub mod ddf;
pub mod factorization;
pub mod frobenius;
pub mod irreducible;
pub mod squarefree;

#[cfg(test)]
mod proptests;

pub use cantor_zassenhaus::{equal_degree_factorization, factor, factor_batch, factor_with};
pub use ddf::{distinct_degree_factorization, DdfConfig, DistinctDegreeFactorization};
pub use factorization::Factorization;
pub use frobenius::{frobenius_powers_precomp, FrobeniusPowers};
pub use irreducible::{is_irreducible, is_irreducible_ddf, is_irreducible_rabin};
pub use squarefree::{is_squarefree, squarefree_factorization};
