//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (control panel,
//! sensor hardware callbacks, camera pipeline) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts upon.

use serde::Deserialize;

use crate::fsm::ArmingStatus;
use crate::sensors::Sensor;

/// Commands that external adapters can send into the alarm core.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SecurityCommand {
    /// A sensor reported a new active state.
    SetSensorActive { name: String, active: bool },

    /// The user changed the arming mode.
    SetArmingStatus { status: ArmingStatus },

    /// Analyze the latest camera frame.  Frames never travel inside a
    /// command; the caller hands them over separately.
    ProcessImage,

    /// Register a new sensor.
    AddSensor { sensor: Sensor },

    /// Forget a sensor.
    RemoveSensor { name: String },
}
