use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no root of unity of order {order} modulo {modulus}")]
    NoRootOfUnity { order: u64, modulus: u64 },
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: u64, modulus: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
