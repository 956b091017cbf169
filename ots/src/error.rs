//! Error types for the OTS bindings.

use std::ffi::NulError;
use std::os::raw::c_char;

use ots_sys::ots_error_t;
use thiserror::Error;

/// Result type alias for OTS operations.
pub type OtsResult<T> = std::result::Result<T, OtsError>;

/// Errors returned by the safe OTS layer.
///
/// Library failures are carried verbatim in [`OtsError::Foreign`]. Misuse of
/// the ownership contract (wrong result kind, wrong handle type, use of a
/// released handle) is never reported here; it panics.
#[derive(Debug, Error)]
pub enum OtsError {
    /// The native library reported an error.
    #[error("{class} ({code}): {message}")]
    Foreign {
        code: i32,
        class: String,
        message: String,
    },

    /// A borrowed seed jar view whose entry has left the jar.
    #[error("Seed jar entry is no longer available")]
    StaleReference,

    #[error("Seed is not held by the seed jar")]
    NotInJar,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Library returned invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The native library context was already claimed in this process.
    #[error("The native OTS context is already in use")]
    ContextInUse,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl OtsError {
    /// Build a [`OtsError::Foreign`] from the error block of a failed result.
    pub(crate) fn from_native(error: &ots_error_t) -> Self {
        OtsError::Foreign {
            code: error.code,
            class: fixed_str(&error.cls),
            message: fixed_str(&error.message),
        }
    }

    /// Native error code, if the library reported this error.
    pub fn code(&self) -> Option<i32> {
        match self {
            OtsError::Foreign {
                code,
                ..
            } => Some(*code),
            _ => None,
        }
    }

    /// Native exception class name, if the library reported this error.
    pub fn class(&self) -> Option<&str> {
        match self {
            OtsError::Foreign {
                class,
                ..
            } => Some(class),
            _ => None,
        }
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self, OtsError::Foreign { .. })
    }
}

impl From<NulError> for OtsError {
    fn from(_: NulError) -> Self {
        OtsError::InvalidArgument("string contains an interior NUL byte".to_string())
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Text of a NUL padded fixed size C buffer.
fn fixed_str(buffer: &[c_char]) -> String {
    let bytes: Vec<u8> = buffer.iter().take_while(|c| **c != 0).map(|c| *c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
