//! Residue arithmetic and number-theoretic collaborators for the transforms.
//!
//! - [`Word`]: fixed-width residue words whose modular products are computed
//!   in a type twice as wide, so reductions never overflow.
//! - [`NumberTheory`]: root-of-unity discovery and modular inversion, with
//!   [`Primes`] as the default implementation for prime moduli.

pub mod error;
pub mod prime;
pub mod word;

pub use error::{Error, Result};
pub use prime::{NumberTheory, Primes, mod_inv, pow_mod};
pub use word::Word;
