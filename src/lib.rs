//! # znpoly
//!
//! Dense univariate polynomials over Z/NZ, for moduli of any size.
//!
//! ## Features
//!
//! - **Arithmetic**: classical and Karatsuba products, truncated products
//! - **Division**: basecase, divide-and-conquer and Newton with a
//!   precomputed inverse
//! - **GCD**: Euclid and Half-GCD, with cofactors and modular inverses
//! - **Modular composition**: Horner, Brent-Kung, batched and threaded
//! - **Factorization over F_p**: squarefree, distinct-degree and
//!   equal-degree stages, irreducibility tests
//!
//! Over a composite N the `_f` entry points report a non-invertible
//! leading coefficient as a factor of N instead of panicking.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use znpoly::prelude::*;
//!
//! let zn = Arc::new(Zn::from_u64(101));
//! let f = ZnPoly::from_i64s(&zn, &[2, 3, 1]); // (x + 1)(x + 2)
//! let fac = factor(&f);
//! assert_eq!(fac.len(), 2);
//! assert_eq!(fac.expand(), f);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use znpoly_factor as factor;
pub use znpoly_integers as integers;
pub use znpoly_linalg as linalg;
pub use znpoly_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use znpoly_factor::{
        distinct_degree_factorization, factor, factor_batch, is_irreducible,
        squarefree_factorization, DdfConfig, Factorization,
    };
    pub use znpoly_integers::{Integer, NotInvertible, Zn};
    pub use znpoly_linalg::DenseMatrix;
    pub use znpoly_poly::{BerlekampMassey, ZnPoly};
}
