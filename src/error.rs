//! Error types.
//!
//! Only two things can genuinely fail: building a reflector for a class or
//! method that does not exist, and loading an explicitly requested config
//! file.  Everything else (a missing docblock, a missing `@return` tag, a
//! value that does not conform) is an ordinary return value.

use std::path::PathBuf;

use thiserror::Error;

/// Raised when a reflector cannot be bound to the requested method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectionError {
    #[error("Class \"{0}\" does not exist")]
    ClassNotFound(String),
    #[error("Method {class}::{method}() does not exist")]
    MethodNotFound { class: String, method: String },
}

/// Raised when a configuration file cannot be read or parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
