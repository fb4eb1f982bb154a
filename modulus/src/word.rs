use std::fmt::{Debug, Display};

/// Unsigned machine word holding a residue modulo some `q` that fits the word.
///
/// Products are formed in [`Word::Wide`] before reduction, so `mul_mod`
/// is exact for every `q` up to `Self::MAX`. Picking `u32` or `u64` is the
/// only knob controlling the supported modulus size.
pub trait Word:
    Copy + Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord + Send + Sync + 'static
{
    type Wide;

    const ZERO: Self;
    const ONE: Self;
    const BITS: u32;

    /// Converts a value known to fit in `Self`.
    fn from_u64(x: u64) -> Self;

    fn to_u64(self) -> u64;

    /// Returns self mod q.
    fn reduce(self, q: Self) -> Self;

    /// Returns (self + rhs) mod q. Both operands must be < q.
    fn add_mod(self, rhs: Self, q: Self) -> Self;

    /// Returns (self - rhs) mod q. Both operands must be < q.
    fn sub_mod(self, rhs: Self, q: Self) -> Self;

    /// Returns (self * rhs) mod q, computed in `Self::Wide`.
    fn mul_mod(self, rhs: Self, q: Self) -> Self;
}

macro_rules! impl_word {
    ($word:ty, $wide:ty) => {
        impl Word for $word {
            type Wide = $wide;

            const ZERO: Self = 0;
            const ONE: Self = 1;
            const BITS: u32 = <$word>::BITS;

            #[inline(always)]
            fn from_u64(x: u64) -> Self {
                debug_assert!(
                    x <= <$word>::MAX as u64,
                    "invalid argument x={} > {}::MAX",
                    x,
                    stringify!($word)
                );
                x as $word
            }

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn reduce(self, q: Self) -> Self {
                self % q
            }

            #[inline(always)]
            fn add_mod(self, rhs: Self, q: Self) -> Self {
                debug_assert!(self < q, "a:{} q:{}", self, q);
                debug_assert!(rhs < q, "b:{} q:{}", rhs, q);
                let (sum, carry) = self.overflowing_add(rhs);
                if carry || sum >= q {
                    sum.wrapping_sub(q)
                } else {
                    sum
                }
            }

            #[inline(always)]
            fn sub_mod(self, rhs: Self, q: Self) -> Self {
                debug_assert!(self < q, "a:{} q:{}", self, q);
                debug_assert!(rhs < q, "b:{} q:{}", rhs, q);
                if self >= rhs {
                    self - rhs
                } else {
                    q - (rhs - self)
                }
            }

            #[inline(always)]
            fn mul_mod(self, rhs: Self, q: Self) -> Self {
                ((self as $wide * rhs as $wide) % q as $wide) as $word
            }
        }
    };
}

impl_word!(u32, u64);
impl_word!(u64, u128);
