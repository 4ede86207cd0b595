//! abstats - A/B performance regression testing for benchmark latencies
//!
//! This library decides whether a candidate build has regressed against a
//! baseline from two samples of execution latencies, using confidence
//! intervals and Welch's t-test, and renders an aligned histogram report.

pub mod cli;
pub mod comparison;
pub mod error;
pub mod input;
pub mod json_output;
pub mod terminal_output;

pub use error::AbError;
