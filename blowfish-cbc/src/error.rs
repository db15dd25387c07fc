//! Error types for CBC operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CbcError {
    #[error("Input must be a byte sequence: {0}")]
    InvalidInputType(String),

    #[error("The key is not initialized")]
    UninitializedKey,

    #[error("Invalid IV length: expected 8 bytes, got {0}")]
    InvalidIvLength(usize),

    #[error("Invalid key length: {0} bytes")]
    InvalidKeyLength(usize),
}

pub type Result<T> = std::result::Result<T, CbcError>;
