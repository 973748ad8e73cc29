//! Algorithm selection thresholds.
//!
//! All lengths count coefficients, not degrees. The explicit entry points
//! (`divrem_basecase`, `hgcd`, `compose_mod_horner`, ...) ignore these and
//! always run the named algorithm.

/// Operand length from which multiplication switches to Karatsuba.
pub const KARATSUBA_CUTOFF: usize = 32;

/// Divisor length from which division leaves the basecase.
///
/// Also the leaf size of the divide-and-conquer recursion.
pub const DIVREM_DIVCONQUER_CUTOFF: usize = 16;

/// Quotient length from which division uses a Newton reciprocal.
pub const DIVREM_NEWTON_CUTOFF: usize = 256;

/// Series length from which inversion uses Newton iteration.
pub const INV_NEWTON_CUTOFF: usize = 64;

/// Operand length from which `gcd` uses Half-GCD.
pub const GCD_HGCD_CUTOFF: usize = 160;

/// Operand length from which `xgcd` uses Half-GCD.
pub const XGCD_HGCD_CUTOFF: usize = 128;

/// Length below which Half-GCD runs plain Euclidean steps.
pub const HGCD_BASECASE_CUTOFF: usize = 32;

/// Modulus length from which `compose_mod` uses Brent-Kung.
pub const COMPOSE_BRENT_KUNG_CUTOFF: usize = 16;
