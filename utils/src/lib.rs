//! Bit-level helpers shared by the transform crates.
//!
//! Iterative radix-2 transforms consume their input in bit-reversed order.
//! This crate owns the index arithmetic for that permutation so the
//! transform tables and the canonical-embedding path agree on it.

pub mod bits;

pub use bits::{WordOps, bit_reverse_inplace, bit_reverse_vec, reverse_bits};
