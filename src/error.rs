//! Error and warning types for tagdown operations.

use std::fmt;

use thiserror::Error;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The token source reported a fatal syntax condition.
    #[error("Tokenization failed: {message}")]
    Tokenization { message: String },

    #[error("Element name must not be empty")]
    EmptyTagName,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions recorded during a conversion.
///
/// Warnings never change the produced tree; they are collected so callers
/// can decide whether to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A complaint from the token source that did not stop tokenizing.
    Tokenizer(String),
    /// A configuration value that was normalized to its default.
    Config(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Tokenizer(msg) => write!(f, "parse warning: {msg}"),
            Warning::Config(msg) => write!(f, "configuration: {msg}"),
        }
    }
}
