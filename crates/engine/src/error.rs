//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when no record has the requested id.
//! - [`InvalidArgument`] thrown when a required input is missing or malformed.
//! - [`InvalidAmount`] thrown when an amount cannot be parsed.
//! - [`AmountOverflow`] thrown when a total does not fit in the amount range.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidArgument`]: EngineError::InvalidArgument
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`AmountOverflow`]: EngineError::AmountOverflow
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),
}
