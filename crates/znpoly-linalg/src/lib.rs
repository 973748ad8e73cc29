//! # znpoly-linalg
//!
//! Dense linear algebra over Z/NZ for znpoly.
//!
//! This crate provides:
//! - Dense row-major matrices of residues
//! - Matrix products with a single modular reduction per entry
//! - Parallel matrix operations via rayon
//!
//! The matrices here are the workhorse of Brent-Kung modular composition:
//! one side holds powers of a polynomial, the other blocks of coefficients.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod parallel;

pub use dense_matrix::DenseMatrix;
pub use parallel::ParallelConfig;
