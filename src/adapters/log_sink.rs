//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured security events through
//! the `log` facade.  A status panel or push-notification adapter would
//! implement the same trait.

use log::{info, warn};

use crate::app::events::SecurityEvent;
use crate::app::ports::EventSink;
use crate::fsm::AlarmStatus;

/// Adapter that logs every [`SecurityEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SecurityEvent) {
        match event {
            SecurityEvent::AlarmStatusChanged { from, to } => {
                if *to == AlarmStatus::Alarm {
                    warn!("ALARM | {} -> {} | {}", from, to, to.description());
                } else {
                    info!("ALARM | {} -> {} | {}", from, to, to.description());
                }
            }
            SecurityEvent::ArmingStatusChanged { from, to } => {
                info!("ARMING | {} -> {} | {}", from, to, to.description());
            }
            SecurityEvent::CatDetected { detected } => {
                info!("CAMERA | cat={}", if *detected { "YES" } else { "no" });
            }
            SecurityEvent::SensorStatusChanged { name, active } => {
                info!(
                    "SENSOR | {} {}",
                    name,
                    if *active { "active" } else { "inactive" }
                );
            }
            SecurityEvent::SensorRemoved { name } => {
                info!("SENSOR | {} removed", name);
            }
        }
    }
}
