/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between `i64`, `f64`,
/// `char` and shift amounts without risking silent data loss. Every helper
/// takes the error to report on failure, so callers choose between a runtime
/// [`Fault`](crate::error::Fault) and any other error type.
pub mod num;
