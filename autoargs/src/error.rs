//! Error types produced while deriving schemas and parsing tokens.
//!
//! Failures split into two phases. [`SchemaError`] covers construction-time
//! misconfiguration of the target type and indicates a programmer error.
//! [`ParseError`] covers bad user input; it always names the offending flag
//! or token and is never accompanied by a partially bound object.

use thiserror::Error;

/// Errors raised while deriving an [`ObjectSchema`](crate::ObjectSchema)
/// from a declared field table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// The declared field table yields no flags and no capture markers.
    #[error("object type declares no parseable fields")]
    NoFields,

    /// A list default was empty or carried an unusable element template.
    #[error("invalid list default for field '{field}': {reason}")]
    InvalidList {
        /// Field whose list default failed validation.
        field: &'static str,
        /// What was wrong with the default.
        reason: String,
    },

    /// A field default has a type that cannot be mapped onto a flag.
    #[error("unsupported default for field '{field}': {kind} values cannot become a flag")]
    UnsupportedField {
        /// Field whose default was rejected.
        field: &'static str,
        /// Kind name of the offending default value.
        kind: &'static str,
    },
}

/// Errors raised while parsing a token sequence against a derived schema.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A token could not be coerced or validated for its flag.
    #[error("invalid value for '{flag}': {reason}")]
    InvalidValue {
        /// Flag the token was supplied for.
        flag: String,
        /// Why the token was rejected, including valid choices where known.
        reason: String,
    },

    /// A mandatory flag was omitted, or received fewer tokens than its arity
    /// requires.
    #[error("missing required flag {flag}")]
    MissingRequired {
        /// The flag (or flags) that were not satisfied.
        flag: String,
    },

    /// A token was not recognized as any configured flag while parsing in
    /// strict mode.
    #[error("unrecognized argument '{token}'")]
    Unrecognized {
        /// The offending input token.
        token: String,
    },

    /// Any other failure reported by the parsing engine.
    #[error("failed to parse command-line arguments: {0}")]
    Engine(#[from] Box<clap::Error>),
}

/// Top-level error for the one-shot entry points, covering both phases.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Construction-time schema failure.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Parse-time input failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
