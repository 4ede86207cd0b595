//! Error taxonomy for A/B comparisons
//!
//! Statistical check failures are not errors: they are folded into the
//! verdict. Only structurally invalid input or configuration ends up here.

use thiserror::Error;

/// Errors produced while building or validating comparison inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbError {
    #[error("Insufficient samples for {group}: need at least {required}, got {actual}")]
    InsufficientSamples {
        group: String,
        required: usize,
        actual: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AbError>;
