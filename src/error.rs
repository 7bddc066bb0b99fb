//! Error types for the color engine.
//!
//! Every failure surfaced by parse, format, or transform is a [`ColorError`]:
//! a kind, a stable machine-matchable code, a human message, and an optional
//! field name. Messages are padded with periods up to
//! [`MIN_MESSAGE_LENGTH`](crate::constants::MIN_MESSAGE_LENGTH) characters.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MIN_MESSAGE_LENGTH;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ColorError>;

/// Stable error codes.
pub mod code {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const INVALID_PRECISION: &str = "INVALID_PRECISION";
    pub const INVALID_MODEL: &str = "INVALID_MODEL";
    pub const UNSUPPORTED_TARGET: &str = "UNSUPPORTED_TARGET";
    pub const INVALID_STEPS: &str = "INVALID_STEPS";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const UNSUPPORTED_TRANSFORM: &str = "UNSUPPORTED_TRANSFORM";
}

/// Which pipeline stage produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Parse,
    Format,
    Transform,
    /// Reserved for plugin-defined failures; the default pipeline never raises it.
    Plugin,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "parse",
            Self::Format => "format",
            Self::Transform => "transform",
            Self::Plugin => "plugin",
        })
    }
}

/// A structured engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} error [{code}]: {message}")]
pub struct ColorError {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ColorError {
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: pad_message(message.into()),
            field: None,
        }
    }

    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, code, message)
    }

    pub fn format(code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, code, message)
    }

    pub fn transform(code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transform, code, message)
    }

    /// Constructor for extensions reporting their own failures.
    pub fn plugin(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Plugin, code, message)
    }

    /// Attach the name of the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

fn pad_message(mut message: String) -> String {
    let len = message.chars().count();
    if len < MIN_MESSAGE_LENGTH {
        message.extend(std::iter::repeat('.').take(MIN_MESSAGE_LENGTH - len));
    }
    message
}

/// Errors raised while populating a plugin registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A plugin with the same name is already registered.
    #[error("plugin with name \"{0}\" already registered")]
    DuplicateName(String),
}
