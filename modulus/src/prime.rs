use crate::error::{Error, Result};
use num_integer::{ExtendedGcd, Integer};
use prime_factorization::Factorization;
use tracing::trace;

/// Number-theoretic services needed to build transform tables.
pub trait NumberTheory {
    /// Returns an element of exact multiplicative order `order` modulo `modulus`.
    fn root_of_unity(&self, order: u64, modulus: u64) -> Result<u64>;

    /// Returns x^-1 mod `modulus`.
    fn mod_inv(&self, x: u64, modulus: u64) -> Result<u64>;
}

/// [`NumberTheory`] over prime moduli.
///
/// Roots are derived from the smallest generator of Z_q^*, found by testing
/// candidates against the distinct prime factors of q-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Primes;

impl NumberTheory for Primes {
    fn root_of_unity(&self, order: u64, modulus: u64) -> Result<u64> {
        let err: Error = Error::NoRootOfUnity { order, modulus };

        if order == 0 || modulus < 2 {
            return Err(err);
        }

        if order == 1 {
            return Ok(1);
        }

        let phi: u64 = modulus - 1;

        if phi % order != 0 {
            return Err(err);
        }

        if !Factorization::run(modulus).is_prime {
            return Err(err);
        }

        let factors: Vec<u64> = distinct_factors(phi);
        let generator: u64 = primitive_root(modulus, &factors).ok_or_else(|| err.clone())?;
        let root: u64 = pow_mod(generator, phi / order, modulus);

        if !has_exact_order(root, order, modulus) {
            return Err(err);
        }

        trace!(order, modulus, generator, root, "root of unity");

        Ok(root)
    }

    fn mod_inv(&self, x: u64, modulus: u64) -> Result<u64> {
        mod_inv(x, modulus)
    }
}

/// Returns x^exponent mod q.
pub fn pow_mod(x: u64, exponent: u64, q: u64) -> u64 {
    debug_assert!(q != 0, "invalid argument q=0");
    let q_wide: u128 = q as u128;
    let mut y: u128 = 1 % q_wide;
    let mut x: u128 = x as u128 % q_wide;
    let mut i: u64 = exponent;
    while i > 0 {
        if i & 1 == 1 {
            y = y * x % q_wide;
        }
        x = x * x % q_wide;
        i >>= 1;
    }
    y as u64
}

/// Returns x^-1 mod q, or [`Error::NotInvertible`] if gcd(x, q) != 1.
pub fn mod_inv(x: u64, q: u64) -> Result<u64> {
    let err: Error = Error::NotInvertible {
        value: x,
        modulus: q,
    };

    if q < 2 {
        return Err(err);
    }

    let ExtendedGcd { gcd, x: inv, .. } = ((x % q) as i128).extended_gcd(&(q as i128));

    if gcd != 1 {
        return Err(err);
    }

    Ok(inv.rem_euclid(q as i128) as u64)
}

/// Returns the distinct prime factors of n.
fn distinct_factors(n: u64) -> Vec<u64> {
    Factorization::run(n)
        .prime_factor_repr()
        .iter()
        .map(|factor| factor.0)
        .collect()
}

/// Returns the smallest generator of Z_q^*, given the distinct prime factors of q-1.
fn primitive_root(q: u64, factors: &[u64]) -> Option<u64> {
    if q == 2 {
        return Some(1);
    }
    (2..q).find(|&candidate| {
        factors
            .iter()
            .all(|&factor| pow_mod(candidate, (q - 1) / factor, q) != 1)
    })
}

/// Checks x^order = 1 and x^(order/p) != 1 for every prime p | order.
fn has_exact_order(x: u64, order: u64, q: u64) -> bool {
    if pow_mod(x, order, q) != 1 {
        return false;
    }
    distinct_factors(order)
        .iter()
        .all(|&factor| pow_mod(x, order / factor, q) != 1)
}
