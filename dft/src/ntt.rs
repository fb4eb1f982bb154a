//! Number-theoretic transform over Z_q and its negacyclic fold.
//!
//! The cyclic transform [`ModularTransformContext::ntt`] is an iterative
//! decimation-in-time Cooley-Tukey: the input is loaded in bit-reversed
//! order, then `log2(n)` butterfly layers of doubling block size bring it
//! back to natural order.
//!
//! The negacyclic pair [`ModularTransformContext::ftt_fwd`] /
//! [`ModularTransformContext::ftt_inv`] twists coefficient `i` by `w^i`
//! before the cyclic transform, where `w` is a primitive `2d`-th root of
//! unity. Output slot `k` then holds the evaluation of the input at
//! `w^(2k+1)`, a root of `x^d + 1`, so pointwise products of transformed
//! operands are products in Z_q\[x\]/(x^d+1). The inverse undoes the twist
//! and the `1/d` normalisation in a single pass over `scaled_roots_inv`.

use crate::error::{Error, Result, check_len};
use itertools::izip;
use modulus::{NumberTheory, Primes, Word, pow_mod};
use tracing::{debug, trace};
use utils::reverse_bits;

/// Precomputed tables for transforms over Z_q\[x\]/(x^d+1).
///
/// Residues are stored in `W`; every product is formed in `W::Wide`
/// before reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModularTransformContext<W: Word = u64> {
    modulus: W,
    degree: usize,
    log_degree: u32,
    /// `roots[i] = w^i mod q`.
    roots: Vec<W>,
    /// `roots_inv[i] = w^-i mod q`.
    roots_inv: Vec<W>,
    /// `scaled_roots_inv[i] = d^-1 * w^-i mod q`.
    scaled_roots_inv: Vec<W>,
    /// `bitrev[i]` is `i` with its `log2(d)` low bits reversed.
    bitrev: Vec<usize>,
}

impl<W: Word> ModularTransformContext<W> {
    /// Builds the tables for degree `degree` modulo `modulus`, with a
    /// primitive `2 * degree`-th root of unity found by [`Primes`].
    pub fn new(degree: usize, modulus: W) -> Result<Self> {
        Self::with_number_theory(degree, modulus, None, &Primes)
    }

    /// Builds the tables from a caller-supplied primitive `2 * degree`-th
    /// root of unity.
    pub fn with_root(degree: usize, modulus: W, root: W) -> Result<Self> {
        Self::with_number_theory(degree, modulus, Some(root), &Primes)
    }

    /// Builds the tables using `number_theory` for root discovery (when
    /// `root` is `None`) and for the modular inverses of the root and the degree.
    pub fn with_number_theory<N: NumberTheory>(
        degree: usize,
        modulus: W,
        root: Option<W>,
        number_theory: &N,
    ) -> Result<Self> {
        if !degree.is_power_of_two() {
            return Err(Error::NotPowerOfTwo {
                what: "degree",
                value: degree,
            });
        }

        let q: u64 = modulus.to_u64();

        if q < 2 {
            return Err(Error::InvalidModulus { modulus: q });
        }

        let order: u64 = (degree as u64) << 1;

        let root: W = match root {
            Some(root) => root.reduce(modulus),
            None => W::from_u64(number_theory.root_of_unity(order, q)?),
        };

        // For a power-of-two degree, w^d = -1 is equivalent to w having order exactly 2d.
        if pow_mod(root.to_u64(), degree as u64, q) != q - 1 {
            return Err(Error::InvalidRootOfUnity {
                root: root.to_u64(),
                order,
                modulus: q,
            });
        }

        let root_inv: W = W::from_u64(number_theory.mod_inv(root.to_u64(), q)?);
        let degree_inv: W = W::from_u64(number_theory.mod_inv(degree as u64, q)?);

        let roots: Vec<W> = powers(root, degree, modulus);
        let roots_inv: Vec<W> = powers(root_inv, degree, modulus);
        let scaled_roots_inv: Vec<W> = roots_inv
            .iter()
            .map(|w_inv| degree_inv.mul_mod(*w_inv, modulus))
            .collect();

        let log_degree: u32 = degree.trailing_zeros();
        let bitrev: Vec<usize> = (0..degree).map(|i| reverse_bits(i, log_degree)).collect();

        debug!(
            degree,
            modulus = %modulus,
            root = %root,
            "built modular transform context"
        );

        Ok(Self {
            modulus,
            degree,
            log_degree,
            roots,
            roots_inv,
            scaled_roots_inv,
            bitrev,
        })
    }

    pub fn modulus(&self) -> W {
        self.modulus
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the primitive `2d`-th root of unity the tables are built from.
    pub fn root(&self) -> W {
        if self.degree > 1 {
            self.roots[1]
        } else {
            W::from_u64(self.modulus.to_u64() - 1)
        }
    }

    pub fn roots(&self) -> &[W] {
        &self.roots
    }

    pub fn roots_inv(&self) -> &[W] {
        &self.roots_inv
    }

    pub fn scaled_roots_inv(&self) -> &[W] {
        &self.scaled_roots_inv
    }

    pub fn bitrev(&self) -> &[usize] {
        &self.bitrev
    }

    /// Cyclic transform of `coeffs` with twiddles taken from `rou`.
    ///
    /// Layer `logm` reads `rou[i << (1 + log2(n) - logm)]`, so with
    /// `rou = roots()` the transform is evaluated at powers of `w^2`, and
    /// with `rou = roots_inv()` it is the unnormalised inverse.
    ///
    /// Fails if `rou.len() != coeffs.len()` or `coeffs.len() != degree`.
    pub fn ntt(&self, coeffs: &[W], rou: &[W]) -> Result<Vec<W>> {
        check_len("roots of unity table", coeffs.len(), rou.len())?;
        check_len("coefficients", self.degree, coeffs.len())?;

        trace!(n = coeffs.len(), "ntt");

        let q: W = self.modulus;
        let log_n: u32 = self.log_degree;

        let mut result: Vec<W> = self.bitrev.iter().map(|&j| coeffs[j].reduce(q)).collect();

        for logm in 1..=log_n {
            let half: usize = 1 << (logm - 1);
            let shift: u32 = 1 + log_n - logm;
            result.chunks_exact_mut(half << 1).for_each(|block| {
                let (even, odd) = block.split_at_mut(half);
                izip!(even.iter_mut(), odd.iter_mut())
                    .enumerate()
                    .for_each(|(i, (a, b))| {
                        let t: W = rou[i << shift].mul_mod(*b, q);
                        let u: W = *a;
                        *a = u.add_mod(t, q);
                        *b = u.sub_mod(t, q);
                    });
            });
        }

        Ok(result)
    }

    /// Negacyclic forward transform: `out[k] = sum_i coeffs[i] * w^(i(2k+1))`.
    pub fn ftt_fwd(&self, coeffs: &[W]) -> Result<Vec<W>> {
        check_len("coefficients", self.degree, coeffs.len())?;
        let q: W = self.modulus;
        let twisted: Vec<W> = izip!(coeffs, &self.roots)
            .map(|(c, w)| c.mul_mod(*w, q))
            .collect();
        self.ntt(&twisted, &self.roots)
    }

    /// Negacyclic inverse transform, `ftt_inv(ftt_fwd(a)) = a mod q`.
    pub fn ftt_inv(&self, coeffs: &[W]) -> Result<Vec<W>> {
        check_len("coefficients", self.degree, coeffs.len())?;
        let q: W = self.modulus;
        let mut result: Vec<W> = self.ntt(coeffs, &self.roots_inv)?;
        izip!(result.iter_mut(), &self.scaled_roots_inv).for_each(|(r, s)| *r = r.mul_mod(*s, q));
        Ok(result)
    }

    /// Returns `a[i] * b[i] mod q`.
    pub fn mul_pointwise(&self, a: &[W], b: &[W]) -> Result<Vec<W>> {
        check_len("a", self.degree, a.len())?;
        check_len("b", self.degree, b.len())?;
        let q: W = self.modulus;
        Ok(izip!(a, b).map(|(a, b)| a.mul_mod(*b, q)).collect())
    }

    /// Returns `a * b` in Z_q\[x\]/(x^d+1), both operands in coefficient form.
    pub fn negacyclic_mul(&self, a: &[W], b: &[W]) -> Result<Vec<W>> {
        let a_hat: Vec<W> = self.ftt_fwd(a)?;
        let b_hat: Vec<W> = self.ftt_fwd(b)?;
        self.ftt_inv(&self.mul_pointwise(&a_hat, &b_hat)?)
    }
}

/// Returns `[1, x, x^2, ..., x^(n-1)] mod q`.
fn powers<W: Word>(x: W, n: usize, q: W) -> Vec<W> {
    let mut table: Vec<W> = Vec::with_capacity(n);
    let mut acc: W = W::ONE;
    for _ in 0..n {
        table.push(acc);
        acc = acc.mul_mod(x, q);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_17() -> ModularTransformContext<u64> {
        ModularTransformContext::with_root(4, 17, 2).unwrap()
    }

    #[test]
    fn tables_degree_4_mod_17() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        assert_eq!(ctx.roots(), &[1, 2, 4, 8]);
        assert_eq!(ctx.roots_inv(), &[1, 9, 13, 15]);
        assert_eq!(ctx.scaled_roots_inv(), &[13, 15, 16, 8]);
        assert_eq!(ctx.bitrev(), &[0, 2, 1, 3]);
        assert_eq!(ctx.root(), 2);
    }

    #[test]
    fn ntt_degree_4_mod_17() {
        let ctx: ModularTransformContext<u64> = ctx_17();

        // X_k = sum_j a_j 4^(jk) mod 17, 4 = 2^2.
        let fwd: Vec<u64> = ctx.ntt(&[1, 2, 3, 4], ctx.roots()).unwrap();
        assert_eq!(fwd, vec![10, 7, 15, 6]);

        let back: Vec<u64> = ctx.ntt(&fwd, ctx.roots_inv()).unwrap();
        assert_eq!(back, vec![4, 8, 12, 16]);

        let d_inv: u64 = modulus::mod_inv(4, 17).unwrap();
        let back: Vec<u64> = back.iter().map(|x| x * d_inv % 17).collect();
        assert_eq!(back, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ftt_degree_4_mod_17() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        // a(x) = 1 + 2x + 3x^2 + 4x^3 at x = 2, 8, 15, 9.
        let fwd: Vec<u64> = ctx.ftt_fwd(&[1, 2, 3, 4]).unwrap();
        assert_eq!(fwd, vec![15, 13, 11, 16]);
        assert_eq!(ctx.ftt_inv(&fwd).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn negacyclic_mul_degree_4_mod_17() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        // (1 + 2x + 3x^2 + 4x^3)(5 + 6x + 7x^2 + 8x^3) = -56 - 36x + 2x^2 + 60x^3 mod x^4 + 1
        let c: Vec<u64> = ctx.negacyclic_mul(&[1, 2, 3, 4], &[5, 6, 7, 8]).unwrap();
        assert_eq!(c, vec![12, 15, 2, 9]);
    }

    #[test]
    fn new_finds_root() {
        let ctx: ModularTransformContext<u64> = ModularTransformContext::new(4, 17).unwrap();
        assert_eq!(ctx.root(), 9);
        assert_eq!(ctx.ftt_inv(&ctx.ftt_fwd(&[3, 1, 4, 1]).unwrap()).unwrap(), vec![3, 1, 4, 1]);
    }

    #[test]
    fn degree_one() {
        let ctx: ModularTransformContext<u64> = ModularTransformContext::new(1, 17).unwrap();
        assert_eq!(ctx.root(), 16);
        assert_eq!(ctx.ftt_fwd(&[5]).unwrap(), vec![5]);
        assert_eq!(ctx.ftt_inv(&[5]).unwrap(), vec![5]);
        assert_eq!(ctx.negacyclic_mul(&[5], &[7]).unwrap(), vec![1]);
    }

    #[test]
    fn inputs_are_reduced() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        assert_eq!(
            ctx.ftt_fwd(&[18, 19, 20, 21]).unwrap(),
            ctx.ftt_fwd(&[1, 2, 3, 4]).unwrap()
        );
    }

    #[test]
    fn rejects_non_power_of_two_degree() {
        for degree in [0usize, 3, 6, 12] {
            assert_eq!(
                ModularTransformContext::<u64>::new(degree, 17),
                Err(Error::NotPowerOfTwo {
                    what: "degree",
                    value: degree
                })
            );
        }
    }

    #[test]
    fn rejects_wrong_order_root() {
        // 4 has order 4 modulo 17, not 8.
        assert_eq!(
            ModularTransformContext::<u64>::with_root(4, 17, 4),
            Err(Error::InvalidRootOfUnity {
                root: 4,
                order: 8,
                modulus: 17
            })
        );
    }

    #[test]
    fn propagates_missing_root() {
        assert_eq!(
            ModularTransformContext::<u64>::new(16, 17),
            Err(Error::NumberTheory(modulus::Error::NoRootOfUnity {
                order: 32,
                modulus: 17
            }))
        );
    }

    #[test]
    fn rejects_small_modulus() {
        assert_eq!(
            ModularTransformContext::<u64>::new(4, 1),
            Err(Error::InvalidModulus { modulus: 1 })
        );
    }

    #[test]
    fn ntt_rejects_short_table() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        assert_eq!(
            ctx.ntt(&[1, 2, 3, 4], &ctx.roots()[..2]),
            Err(Error::LengthMismatch {
                what: "roots of unity table",
                expected: 4,
                got: 2
            })
        );
    }

    #[test]
    fn ftt_rejects_wrong_length() {
        let ctx: ModularTransformContext<u64> = ctx_17();
        assert!(ctx.ftt_fwd(&[1, 2, 3]).is_err());
        assert!(ctx.ftt_inv(&[1, 2, 3, 4, 5]).is_err());
        assert!(ctx.ntt(&[1, 2], &[1, 2]).is_err());
        assert!(ctx.negacyclic_mul(&[1, 2, 3, 4], &[1]).is_err());
    }

    #[test]
    fn u32_matches_u64() {
        let q: u64 = 12289;
        let ctx64: ModularTransformContext<u64> = ModularTransformContext::new(16, q).unwrap();
        let ctx32: ModularTransformContext<u32> = ModularTransformContext::new(16, q as u32).unwrap();
        let a64: Vec<u64> = (0..16).map(|i| (i * i * 977 + 5) % q).collect();
        let a32: Vec<u32> = a64.iter().map(|x| *x as u32).collect();
        let f64_: Vec<u64> = ctx64.ftt_fwd(&a64).unwrap();
        let f32_: Vec<u32> = ctx32.ftt_fwd(&a32).unwrap();
        izip!(&f64_, &f32_).for_each(|(a, b)| assert_eq!(*a, *b as u64));
        assert_eq!(ctx32.ftt_inv(&f32_).unwrap(), a32);
    }
}
