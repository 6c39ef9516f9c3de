//! Unitary Core - Fundamental types
//!
//! This crate provides the core types used throughout Unitary:
//! - `Number`: Exact decimal numbers
//! - `NumericFormatter`, `Locale`: Parsing user input and rendering results
//! - `ConversionError`, `ErrorReport`: Conversion failures

mod number;
pub mod format;
mod error;

pub use number::{Number, NumberError, MAX_EXPONENT, WORK_PRECISION};
pub use format::{Locale, NumericFormatter};
pub use error::{ConversionError, ErrorReport, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, Locale, NumericFormatter, ConversionError, ErrorReport, Severity};
    pub use crate::error::codes;
}
