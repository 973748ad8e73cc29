//! # znpoly-integers
//!
//! Arbitrary precision integer arithmetic and the Z/NZ modulus context.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - The modulus context `Zn` with modular add/sub/mul/inverse/random
//! - `NotInvertible`, the recoverable failure that carries a factor of N
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - Large integers are heap-allocated with GMP-like performance

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod integer;
pub mod modular;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use modular::{NotInvertible, Zn};
