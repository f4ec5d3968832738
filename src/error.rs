/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include unknown characters, unexpected tokens, invalid
/// assignment targets and dangling `elif`/`else` branches.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the [`Fault`] taxonomy carried in-band by runtime objects and the
/// [`RuntimeError`] that reports the first fault of a run with its location.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::{Fault, RuntimeError};
