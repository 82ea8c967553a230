//! Centralised error hierarchy for the **Imp interpreter**.
//!
//! Front-end stages (scanner, parser) and the JSON loader report through
//! [`ImpError`]. Evaluation failures live in [`RuntimeError`], which the
//! interpreter returns directly and which converts into [`ImpError`] with `?`.
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Failures raised while evaluating or executing a program.
///
/// None of these are recovered from inside the interpreter; each one aborts
/// the run and is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A `Var` expression named a variable with no current binding.
    #[error("Undefined variable '{0}'.")]
    UnboundVariable(String),

    /// An operator received an operand of the wrong value type.
    #[error("Type mismatch in {location}: expected {expected}, found {found}.")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        location: String,
    },

    /// The configured step budget ran out before the program finished.
    #[error("Step limit of {0} exceeded.")]
    StepLimitExceeded(u64),
}

impl RuntimeError {
    pub fn type_mismatch<S: Into<String>>(
        expected: &'static str,
        found: &'static str,
        location: S,
    ) -> Self {
        let location: String = location.into();

        info!(
            "Creating TypeMismatch error: expected={}, found={}, location={}",
            expected, found, location
        );

        RuntimeError::TypeMismatch {
            expected,
            found,
            location,
        }
    }
}

/// Canonical error type used throughout the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImpError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error: {message}")]
    Parse { message: String, line: usize },

    /// Runtime evaluation error.
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// A JSON program file could not be decoded into an AST.
    #[error("Invalid program JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ImpError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        ImpError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        ImpError::Parse { message, line }
    }

    /// Is this a front-end (lex or parse) failure?
    pub fn is_syntax(&self) -> bool {
        matches!(self, ImpError::Lex { .. } | ImpError::Parse { .. })
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, ImpError>;
