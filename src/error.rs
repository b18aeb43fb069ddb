//! Unified error type for the alarm core.
//!
//! The core defines no failure modes of its own beyond an unknown sensor
//! name in a command.  Everything else is a collaborator error surfaced
//! unchanged from a port: the core never retries and never falls back.

use core::fmt;

use crate::app::ports::{AnalyzerError, ConfigError, RepositoryError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible core operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The security repository failed a read or write.
    Repository(RepositoryError),
    /// The image analyzer could not produce a verdict.
    Analyzer(AnalyzerError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A command named a sensor the repository does not know.
    UnknownSensor(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository(e) => write!(f, "repository: {e}"),
            Self::Analyzer(e) => write!(f, "image analyzer: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnknownSensor(name) => write!(f, "unknown sensor: {name}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<RepositoryError> for Error {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

impl From<AnalyzerError> for Error {
    fn from(e: AnalyzerError) -> Self {
        Self::Analyzer(e)
    }
}

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
