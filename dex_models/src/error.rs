use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ModelsResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error")]
    ParseError,

    #[error("Chain error: {0}")]
    ChainError(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid secondary fee: {0}")]
    InvalidFee(String),

    #[error("Token mismatch: {0}")]
    TokenMismatch(String),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Arithmetic underflow")]
    ArithmeticUnderflow,

    #[error("Division by zero")]
    DivisionByZero,
}
