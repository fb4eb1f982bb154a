use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {what}: {value} is not a power of two")]
    NotPowerOfTwo { what: &'static str, value: usize },
    #[error("invalid transform length M={length}: must be at least 4")]
    LengthTooSmall { length: usize },
    #[error("invalid modulus {modulus}: must be at least 2")]
    InvalidModulus { modulus: u64 },
    #[error("invalid {what}: length {got} != {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid root of unity {root}: order is not {order} modulo {modulus}")]
    InvalidRootOfUnity { root: u64, order: u64, modulus: u64 },
    #[error(transparent)]
    NumberTheory(#[from] modulus::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::LengthMismatch`] unless `got == expected`.
#[inline]
pub(crate) fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if got != expected {
        return Err(Error::LengthMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}
