//! # yapl
//!
//! yapl is a small scripting language with type-annotated declarations,
//! functions, conditionals and loops. Source text is tokenized, parsed into a
//! syntax tree by a recursive-descent parser, and executed directly by a
//! tree-walking interpreter.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::{
    fmt,
    fs,
    io::{self, Write},
    path::Path,
};

use thiserror::Error;

use crate::{
    ast::TranslationUnit,
    error::{ParseError, RuntimeError},
    interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::core::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the expression and declaration types that represent
/// the syntactic structure of a source file as a tree. The tree is built by
/// the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression, statement and declaration nodes.
/// - Attaches the source line to every node for error reporting.
/// - Renders expressions in a canonical S-expression form.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// # Responsibilities
/// - Defines syntax errors raised by the lexer and parser.
/// - Defines the runtime fault codes and the located runtime error.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the runtime
/// value model.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Everything that can stop a program from running to completion.
#[derive(Debug, Error)]
pub enum YaplError {
    /// The source file could not be read, or output could not be flushed.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The program has syntax errors and was not executed.
    #[error("{0}")]
    Syntax(SyntaxErrors),
    /// Execution stopped at a runtime fault.
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

/// Every syntax error found in one file.
///
/// Displays one `file:line: message` line per error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrors {
    /// Name of the source file.
    pub file:   String,
    /// The errors, in source order.
    pub errors: Vec<ParseError>,
}

impl fmt::Display for SyntaxErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:{}: {err}", self.file, err.line())?;
        }
        Ok(())
    }
}

/// Tokenizes and parses `source` without running it.
///
/// # Errors
/// Returns [`YaplError::Syntax`] listing every syntax error if the source is
/// malformed.
pub fn parse_source(source: &str, file: &str) -> Result<TranslationUnit, YaplError> {
    let syntax = |errors: Vec<ParseError>| {
        YaplError::Syntax(SyntaxErrors { file: file.to_string(),
                                         errors })
    };

    let tokens = tokenize(source).map_err(|err| syntax(vec![err]))?;
    let parsed = parse(&tokens, file);
    if !parsed.errors.is_empty() {
        return Err(syntax(parsed.errors));
    }
    Ok(parsed.unit)
}

/// Parses and executes `source`, writing program output to `out`.
///
/// Nothing is executed when the source has syntax errors. Otherwise
/// declarations run in order until the first runtime fault.
///
/// # Errors
/// Returns the syntax errors, the runtime fault, or an I/O error from
/// flushing `out`.
///
/// # Examples
/// ```
/// let mut out = Vec::new();
/// yapl::run("x: int = 2;\nprint x * 3;", "demo.yapl", &mut out).unwrap();
/// assert_eq!(out, b"6\n");
///
/// // Reassigning a constant stops the run.
/// let err = yapl::run("c: constant int = 1;\nc = 2;", "demo.yapl", Vec::new()).unwrap_err();
/// assert_eq!(err.to_string(), "demo.yapl:2: cannot assign to a constant");
/// ```
pub fn run<W: Write>(source: &str, file: &str, mut out: W) -> Result<(), YaplError> {
    let unit = parse_source(source, file)?;
    let result = Interpreter::new(&mut out).interpret(&unit);
    out.flush()?;
    Ok(result?)
}

/// Reads a source file and runs it with [`run`].
///
/// Diagnostics name the file by the path as given.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, otherwise whatever
/// [`run`] returns.
pub fn run_file<W: Write>(path: &Path, out: W) -> Result<(), YaplError> {
    let source = fs::read_to_string(path)?;
    run(&source, &path.display().to_string(), out)
}
