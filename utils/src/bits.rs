pub trait WordOps<O> {
    /// Returns ceil(log2(self)). `self` must be non-zero.
    fn log2(self) -> O;
    /// Returns the `n` least significant bits of `self` in reversed order.
    fn reverse_bits_msb(self, n: u32) -> O;
    fn mask(self) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> u64 {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (u64::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> u64 {
        (1 << self.log2()) - 1
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (usize::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> usize {
        (1 << self.log2()) - 1
    }
}

/// Returns `i` with its low `width` bits reversed.
/// Bits of `i` above `width` are discarded.
#[inline(always)]
pub fn reverse_bits(i: usize, width: u32) -> usize {
    i.reverse_bits_msb(width)
}

/// Returns a copy of `values` permuted so that `out[i] = values[reverse_bits(i, log2(n))]`.
///
/// Panics if `values.len()` is not a power of two.
pub fn bit_reverse_vec<T: Clone>(values: &[T]) -> Vec<T> {
    let n: usize = values.len();
    assert!(
        n.is_power_of_two(),
        "invalid values.len()={} must be a power of two",
        n
    );
    let width: u32 = n.trailing_zeros();
    (0..n).map(|i| values[reverse_bits(i, width)].clone()).collect()
}

/// Applies the bit-reversal permutation to `values` in place.
///
/// Panics if `values.len()` is not a power of two.
pub fn bit_reverse_inplace<T>(values: &mut [T]) {
    let n: usize = values.len();
    assert!(
        n.is_power_of_two(),
        "invalid values.len()={} must be a power of two",
        n
    );
    let width: u32 = n.trailing_zeros();
    for i in 0..n {
        let j: usize = reverse_bits(i, width);
        if i < j {
            values.swap(i, j);
        }
    }
}
