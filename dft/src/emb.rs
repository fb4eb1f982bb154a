//! Canonical embedding: packing M/4 complex slots.
//!
//! For `n = M/4` values `v`, [`ComplexTransformContext::emb`] returns
//!
//! ```text
//! out[k] = sum_j v[j] * zeta^(j * 5^k mod M),    zeta = exp(2*pi*i/M)
//! ```
//!
//! i.e. the evaluations at the primitive M-th roots `zeta^(5^k)` of the
//! polynomial with coefficients `v`. The powers of 5 pick one root from
//! each conjugate pair, so these n slots together with their conjugates
//! describe a real polynomial of degree M/2. The butterflies run in place
//! on a bit-reversed copy, reading twiddles through the rotation group.

use crate::error::Result;
use crate::fft::ComplexTransformContext;
use itertools::izip;
use num::complex::Complex64;
use tracing::trace;
use utils::bit_reverse_vec;

impl ComplexTransformContext {
    /// Forward canonical-embedding transform of M/4 values.
    pub fn emb(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_input(coeffs)?;
        trace!(n = coeffs.len(), "emb");

        let n: usize = coeffs.len();
        let m: usize = self.length();
        let roots: &[Complex64] = self.roots();
        let rot_group: &[usize] = self.rot_group();

        let mut res: Vec<Complex64> = bit_reverse_vec(coeffs);

        let mut l: usize = 2;
        while l <= n {
            let lh: usize = l >> 1;
            let lq: usize = l << 2;
            let gap: usize = m / lq;
            res.chunks_exact_mut(l).for_each(|block| {
                let (lo, hi) = block.split_at_mut(lh);
                izip!(lo.iter_mut(), hi.iter_mut(), rot_group)
                    .for_each(|(a, b, g)| {
                        let idx: usize = (g % lq) * gap;
                        let u: Complex64 = *a;
                        let v: Complex64 = *b * roots[idx];
                        *a = u + v;
                        *b = u - v;
                    });
            });
            l <<= 1;
        }

        Ok(res)
    }

    /// Inverse of [`Self::emb`]: `emb_inv(emb(v)) = v` up to rounding.
    pub fn emb_inv(&self, coeffs: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_input(coeffs)?;
        trace!(n = coeffs.len(), "emb_inv");

        let n: usize = coeffs.len();
        let m: usize = self.length();
        let roots: &[Complex64] = self.roots();
        let rot_group: &[usize] = self.rot_group();

        let mut res: Vec<Complex64> = coeffs.to_vec();

        let mut l: usize = n;
        while l >= 1 {
            let lh: usize = l >> 1;
            let lq: usize = l << 2;
            let gap: usize = m / lq;
            res.chunks_exact_mut(l).for_each(|block| {
                let (lo, hi) = block.split_at_mut(lh);
                izip!(lo.iter_mut(), hi.iter_mut(), rot_group)
                    .for_each(|(a, b, g)| {
                        let idx: usize = (lq - (g % lq)) * gap;
                        let u: Complex64 = *a + *b;
                        let v: Complex64 = (*a - *b) * roots[idx];
                        *a = u;
                        *b = v;
                    });
            });
            l >>= 1;
        }

        let mut res: Vec<Complex64> = bit_reverse_vec(&res);
        let scale: f64 = n as f64;
        res.iter_mut().for_each(|x| *x /= scale);

        Ok(res)
    }
}
