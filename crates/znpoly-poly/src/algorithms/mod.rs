//! Polynomial algorithms.
//!
//! Each module extends [`ZnPoly`](crate::ZnPoly) with one family of
//! operations and exposes the slice kernels it is built from:
//! - Classical and Karatsuba multiplication
//! - Division: basecase, divide-and-conquer, Newton with a precomputed inverse
//! - Power series inversion
//! - Euclidean gcd and Half-GCD
//! - Modular powering and composition (Horner, Brent-Kung)
//! - Berlekamp-Massey
//! - Resultants

pub mod berlekamp_massey;
pub mod compose;
pub mod div;
pub mod gcd;
pub mod hgcd;
pub mod mul;
pub mod powmod;
pub mod resultant;
pub mod series;
