//! Port traits — the hexagonal boundary between the alarm core and its collaborators.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (repository, image analyzer, event sinks, config storage)
//! implement these traits.  The [`SecurityService`](super::service::SecurityService)
//! owns its repository and analyzer through generics and receives its event
//! sink at each call site, so the core never touches storage, cameras or
//! the GUI directly.
//!
//! ## Contract notes
//!
//! - Every repository call is synchronous and durable on return.
//! - Port errors are typed and propagated by the core unchanged.  Retries and
//!   backoff, if any, belong inside the adapter.

use crate::config::SecurityConfig;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

use super::events::SecurityEvent;

// ───────────────────────────────────────────────────────────────
// Repository port (driven adapter: domain ↔ durable state)
// ───────────────────────────────────────────────────────────────

/// Durable store of the sensor set and the two singleton statuses.
///
/// Pure get/set: implementations hold no business rules.  Sensors are keyed
/// by [`Sensor::name`].
pub trait SecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError>;

    /// Snapshot of every stored sensor, ordered by name.
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError>;

    /// Persist `sensor`, replacing the stored sensor with the same name.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    /// Add a sensor.  A sensor with the same name is replaced.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError>;

    /// Remove the sensor called `name`.  Unknown names are not an error.
    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError>;

    /// Look up a single sensor by name.
    fn sensor(&self, name: &str) -> Result<Option<Sensor>, RepositoryError> {
        Ok(self.sensors()?.into_iter().find(|s| s.name() == name))
    }
}

// ───────────────────────────────────────────────────────────────
// Image analyzer port (driven adapter: camera model → domain)
// ───────────────────────────────────────────────────────────────

/// Classifies camera frames.  The image type is opaque to the core.
pub trait ImageAnalyzer {
    type Image;

    /// Whether `image` shows a cat with at least `confidence_threshold`
    /// percent confidence.  `None` means no frame was available; the
    /// analyzer still decides what that means.
    fn contains_cat(
        &mut self,
        image: Option<&Self::Image>,
        confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → GUI / logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`SecurityEvent`]s through this port.
/// Adapters decide where they go (status panel, log, telemetry).
pub trait EventSink {
    fn emit(&mut self, event: &SecurityEvent);
}

/// Collecting sink, handy for callers that inspect events after the fact.
impl EventSink for Vec<SecurityEvent> {
    fn emit(&mut self, event: &SecurityEvent) {
        self.push(event.clone());
    }
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`SecurityConfig`].
///
/// Implementations MUST call [`SecurityConfig::validate`] before persisting.
pub trait ConfigPort {
    /// Load configuration.  Returns `ConfigError::NotFound` when nothing
    /// was stored yet.
    fn load(&self) -> Result<SecurityConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &SecurityConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backing store cannot be reached.
    Unavailable,
    /// Generic I/O error; the tag names the failing call.
    Io(&'static str),
}

/// Errors from [`ImageAnalyzer`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerError {
    /// The classification backend is not reachable.
    Unavailable,
    /// The frame could not be decoded.
    InvalidImage,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first start).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "repository unavailable"),
            Self::Io(op) => write!(f, "I/O error during {}", op),
        }
    }
}

impl core::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "analyzer unavailable"),
            Self::InvalidImage => write!(f, "invalid image"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl std::error::Error for AnalyzerError {}

impl std::error::Error for ConfigError {}
