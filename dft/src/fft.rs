//! Complex FFTs of length M/4 over precomputed M-th roots of unity.
//!
//! Two iterative radix-2 variants are kept side by side:
//! - [`ComplexTransformContext::fft`] walks the layers by `logm` and reads
//!   twiddles from a caller-supplied table, mirroring the modular `ntt`.
//! - [`ComplexTransformContext::fft_fwd`] / [`ComplexTransformContext::fft_inv`]
//!   double the stage length `ell` and index the context's own M-th roots
//!   with a per-stage `gap = M / ell`.
//!
//! Both produce natural-order output from natural-order input and agree
//! when `fft` is given the (M/2)-th roots `roots[2k]`.

use crate::error::{Error, Result, check_len};
use itertools::izip;
use num::complex::Complex64;
use std::f64::consts::PI;
use tracing::{debug, trace};
use utils::reverse_bits;

/// Precomputed tables for complex transforms with M-th roots of unity.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexTransformContext {
    m: usize,
    /// `roots[k] = exp(2*pi*sqrt(-1)*k/M)` for `k` in `[0, M]`, both ends included.
    roots: Vec<Complex64>,
    /// `rot_group[j] = 5^j mod M` for `j` in `[0, M/4)`.
    rot_group: Vec<usize>,
    /// `bitrev[i]` is `i` with its `log2(M/4)` low bits reversed.
    bitrev: Vec<usize>,
}

impl ComplexTransformContext {
    /// Builds the tables for length `m`, a power of two no smaller than 4.
    pub fn new(m: usize) -> Result<Self> {
        if !m.is_power_of_two() {
            return Err(Error::NotPowerOfTwo {
                what: "length",
                value: m,
            });
        }

        if m < 4 {
            return Err(Error::LengthTooSmall { length: m });
        }

        let roots: Vec<Complex64> = (0..=m)
            .map(|i| Complex64::from_polar(1.0, 2.0 * PI * (i as f64) / (m as f64)))
            .collect();

        let slots: usize = m >> 2;

        let mut rot_group: Vec<usize> = Vec::with_capacity(slots);
        let mut g: usize = 1;
        for _ in 0..slots {
            rot_group.push(g);
            g = (5 * g) % m;
        }

        let width: u32 = slots.trailing_zeros();
        let bitrev: Vec<usize> = (0..slots).map(|i| reverse_bits(i, width)).collect();

        debug!(length = m, slots, "built complex transform context");

        Ok(Self {
            m,
            roots,
            rot_group,
            bitrev,
        })
    }

    /// Returns M.
    pub fn length(&self) -> usize {
        self.m
    }

    /// Returns the number of slots M/4, the length every transform expects.
    pub fn slots(&self) -> usize {
        self.m >> 2
    }

    pub fn roots(&self) -> &[Complex64] {
        &self.roots
    }

    pub fn rot_group(&self) -> &[usize] {
        &self.rot_group
    }

    pub fn bitrev(&self) -> &[usize] {
        &self.bitrev
    }

    /// Fails unless `values.len() == M/4`.
    pub fn check_input(&self, values: &[Complex64]) -> Result<()> {
        check_len("input vector", self.slots(), values.len())
    }

    /// Loads `values` in bit-reversed order.
    fn bit_reversed(&self, values: &[Complex64]) -> Vec<Complex64> {
        self.bitrev.iter().map(|&j| values[j]).collect()
    }

    /// Cyclic complex transform with twiddles read from `rou`.
    ///
    /// Layer `logm` reads `rou[i << (1 + log2(n) - logm)]`; with
    /// `rou[k] = exp(2*pi*i*k/(2n))` this is the DFT with kernel `exp(2*pi*i/n)`.
    pub fn fft(&self, coeffs: &[Complex64], rou: &[Complex64]) -> Result<Vec<Complex64>> {
        check_len("roots of unity table", coeffs.len(), rou.len())?;
        self.check_input(coeffs)?;

        trace!(n = coeffs.len(), "fft");

        let log_n: u32 = coeffs.len().trailing_zeros();
        let mut result: Vec<Complex64> = self.bit_reversed(coeffs);

        for logm in 1..=log_n {
            let half: usize = 1 << (logm - 1);
            let shift: u32 = 1 + log_n - logm;
            result.chunks_exact_mut(half << 1).for_each(|block| {
                let (even, odd) = block.split_at_mut(half);
                izip!(even.iter_mut(), odd.iter_mut())
                    .enumerate()
                    .for_each(|(i, (a, b))| {
                        let t: Complex64 = rou[i << shift] * *b;
                        let u: Complex64 = *a;
                        *a = u + t;
                        *b = u - t;
                    });
            });
        }

        Ok(result)
    }

    /// Forward transform `out[k] = sum_j coeffs[j] * exp(2*pi*i*jk/n)`, n = M/4.
    pub fn fft_fwd(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_input(coeffs)?;
        trace!(n = coeffs.len(), "fft_fwd");
        Ok(self.fft_stages::<false>(coeffs))
    }

    /// Inverse of [`Self::fft_fwd`], including the final `1/n` scaling.
    pub fn fft_inv(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_input(coeffs)?;
        trace!(n = coeffs.len(), "fft_inv");
        let mut result: Vec<Complex64> = self.fft_stages::<true>(coeffs);
        let n: f64 = coeffs.len() as f64;
        result.iter_mut().for_each(|x| *x /= n);
        Ok(result)
    }

    /// Stage-doubling butterflies shared by `fft_fwd` and `fft_inv`.
    ///
    /// At stage `ell` the pair `(j, j + ell/2)` uses `roots[j * gap]`
    /// (forward) or `roots[(ell - j) * gap]` (inverse), `gap = M / ell`.
    fn fft_stages<const INVERSE: bool>(&self, coeffs: &[Complex64]) -> Vec<Complex64> {
        let n: usize = coeffs.len();
        let mut result: Vec<Complex64> = self.bit_reversed(coeffs);

        let mut ell: usize = 2;
        while ell <= n {
            let gap: usize = self.m / ell;
            let ell_h: usize = ell >> 1;
            result.chunks_exact_mut(ell).for_each(|block| {
                let (lo, hi) = block.split_at_mut(ell_h);
                izip!(lo.iter_mut(), hi.iter_mut())
                    .enumerate()
                    .for_each(|(j, (a, b))| {
                        let idx: usize = if INVERSE { (ell - j) * gap } else { j * gap };
                        let u: Complex64 = *a;
                        let v: Complex64 = *b * self.roots[idx];
                        *a = u + v;
                        *b = u - v;
                    });
            });
            ell <<= 1;
        }

        result
    }

    /// Cyclic convolution of two length-M/4 vectors through `fft_fwd`/`fft_inv`.
    pub fn cyclic_mul(&self, a: &[Complex64], b: &[Complex64]) -> Result<Vec<Complex64>> {
        let a_hat: Vec<Complex64> = self.fft_fwd(a)?;
        let b_hat: Vec<Complex64> = self.fft_fwd(b)?;
        let c_hat: Vec<Complex64> = izip!(a_hat, b_hat).map(|(a, b)| a * b).collect();
        self.fft_inv(&c_hat)
    }
}
