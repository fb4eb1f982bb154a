//! Fast transforms for arithmetic in cyclotomic rings.
//!
//! Two independent backends, each built once and then shared read-only:
//!
//! - [`ModularTransformContext`]: number-theoretic transform over Z_q and
//!   its negacyclic variant, which diagonalises multiplication in
//!   Z_q\[x\]/(x^d+1).
//! - [`ComplexTransformContext`]: complex FFTs of length M/4 and the
//!   canonical embedding used to pack M/4 complex slots into a real
//!   polynomial of degree M/2.
//!
//! All transforms take the caller's buffer by reference and return a new
//! vector; tables are never mutated after construction.

pub mod emb;
pub mod error;
pub mod fft;
pub mod ntt;

pub use error::{Error, Result};
pub use fft::ComplexTransformContext;
pub use ntt::ModularTransformContext;

pub use modulus::{NumberTheory, Primes, Word};
pub use num::complex::Complex64;
