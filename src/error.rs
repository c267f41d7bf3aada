//! # Error Handling
//!
//! This module defines the centralized error type for `viewtree`. It uses
//! `thiserror` to build one `Error` enum covering every failure mode of the
//! view tree and the render pipeline.
//!
//! ## Key Components
//!
//! - **`Error`**: every failure the library can report. Loading a view can
//!   fail with `NotFound`, `ParseFailure` or one of the parameter arity
//!   variants; saving can fail with `ValidationFailed` or `WriteFailure`;
//!   rendering can fail with `TransformFailed` or `Workspace`.
//! - **`ErrorKind`**: a coarse discriminant used by callers that only care
//!   about the category (for example, mapping to an HTTP status).
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.
//!
//! Per-producer failures during a render are *not* represented here. They
//! are values of [`crate::producer::ProducerError`] and degrade to an inline
//! error fragment instead of aborting the render.

use thiserror::Error;

use crate::view::Messages;

/// Main error type for viewtree operations
#[derive(Error, Debug)]
pub enum Error {
    /// A view, template or producer could not be found.
    #[error("{what} not found: {path}")]
    NotFound { what: String, path: String },

    /// A view definition exists but could not be parsed.
    #[error("Failed to load view configuration {path}: {message}")]
    ParseFailure { path: String, message: String },

    /// Positional parameters were supplied to a view that declares none.
    #[error("View {path} does not accept parameters")]
    DoesNotAcceptParameters { path: String },

    /// More positional parameters were supplied than the view declares.
    #[error("Too many parameters supplied to {path}: {supplied} given, {accepted} accepted")]
    TooManyParameters {
        path: String,
        supplied: usize,
        accepted: usize,
    },

    /// Save-time validation failed. Carries the field-level messages.
    #[error("View could not be saved. Validation failed: {messages}")]
    ValidationFailed { messages: Messages },

    /// A definition could not be written, renamed or removed.
    #[error("Failed to write {path}: {message}")]
    WriteFailure { path: String, message: String },

    /// The template engine reported an error.
    #[error("Transformation failed: {message}")]
    TransformFailed { message: String },

    /// An XML document could not be built or serialized.
    #[error("XML document error: {message}")]
    Xml { message: String },

    /// The working directory could not be switched to (or restored from)
    /// the workspace.
    #[error("Workspace error for {path}: {message}")]
    Workspace { path: String, message: String },

    /// The settings file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ParseFailure,
    ParameterArityMismatch,
    ValidationFailed,
    WriteFailure,
    TransformFailed,
    Other,
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] error.
    pub fn not_found(what: impl Into<String>, path: impl Into<String>) -> Self {
        Error::NotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Wrap an error raised while building or serializing an XML tree.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Error::Xml {
            message: err.to_string(),
        }
    }

    /// Shorthand for a [`Error::WriteFailure`] error.
    pub fn write_failure(path: impl Into<String>, message: impl ToString) -> Self {
        Error::WriteFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::ParseFailure { .. } => ErrorKind::ParseFailure,
            Error::DoesNotAcceptParameters { .. } | Error::TooManyParameters { .. } => {
                ErrorKind::ParameterArityMismatch
            }
            Error::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Error::WriteFailure { .. } => ErrorKind::WriteFailure,
            Error::TransformFailed { .. } => ErrorKind::TransformFailed,
            _ => ErrorKind::Other,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
