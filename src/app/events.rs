//! Outbound security events.
//!
//! The [`SecurityService`](super::service::SecurityService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: refresh a status panel, write
//! a log line, push a notification.

use serde::Serialize;

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Structured events emitted by the alarm core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SecurityEvent {
    /// An alarm-status write happened.  `from == to` only when
    /// `emit_unchanged_events` is enabled.
    AlarmStatusChanged { from: AlarmStatus, to: AlarmStatus },

    /// The arming status was persisted.
    ArmingStatusChanged { from: ArmingStatus, to: ArmingStatus },

    /// Verdict of the latest camera analysis.
    CatDetected { detected: bool },

    /// A sensor's active flag was persisted, or the sensor was added.
    SensorStatusChanged { name: String, active: bool },

    /// A sensor was removed from the repository.
    SensorRemoved { name: String },
}

/// A point-in-time view of the system suitable for a status panel.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub alarm: AlarmStatus,
    pub arming: ArmingStatus,
    pub sensors: Vec<Sensor>,
}
