use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Each variant records the line it was raised on; the message itself never
/// repeats the location, the driver prefixes `file:line:` when reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer met text that does not start any token.
    #[error("unrecognized input '{slice}'")]
    UnexpectedCharacter {
        /// The offending source text.
        slice: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Found an unexpected token while parsing.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("expected {expected}, found end of input")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of an assignment is not a plain variable.
    #[error("invalid assignment target")]
    InvalidLValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `elif` or `else` appeared without a preceding `if`.
    #[error("'{keyword}' without a preceding 'if'")]
    DanglingBranch {
        /// The orphaned keyword.
        keyword: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// The source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::InvalidLValue { line }
            | Self::DanglingBranch { line, .. } => *line,
        }
    }
}
