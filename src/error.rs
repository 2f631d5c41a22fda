//! Unified error types for the block signal controller.
//!
//! None of these ever reach the interlocking decision: degraded conditions
//! there are ordinary decision outcomes.  These types cover the edges of the
//! system (configuration loading, pin I/O reporting).  All variants
//! are `Copy` so they can be latched by drivers without allocation.

use core::fmt;

use crate::hal::Pin;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the decision core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A digital pin could not be read or written.
    Hal(HalError),
    /// Configuration is invalid or could not be decoded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hal(e) => write!(f, "hal: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// HAL errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Reading an input line failed; the caller substitutes "occupied".
    InputReadFailed { pin: Pin },
    /// Driving a lamp output failed.
    OutputWriteFailed { pin: Pin },
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputReadFailed { pin } => write!(f, "input read failed on pin {pin}"),
            Self::OutputWriteFailed { pin } => write!(f, "output write failed on pin {pin}"),
        }
    }
}

impl std::error::Error for HalError {}

impl From<HalError> for Error {
    fn from(e: HalError) -> Self {
        Self::Hal(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored or supplied config could not be decoded.
    Corrupted,
    /// A config field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
