//! Alarm state machine — status types and pure transition rules.
//!
//! ```text
//!  NO_ALARM ──[armed + sensor on]──▶ PENDING_ALARM ──[armed + sensor on]──▶ ALARM
//!     ▲  ▲                                │                                  ▲
//!     │  └──[last sensor off / all clear]─┘          [cat + ARMED_HOME] ─────┘
//!     │
//!     └──────────────────[disarm, from any state]────────────────────────────
//! ```
//!
//! The rules in [`transitions`] are plain functions over values.  They never
//! touch a repository; the [`SecurityService`](crate::app::service::SecurityService)
//! reads the current state, asks a rule what to write, and persists it.
//! A rule returns `Some(next)` when an alarm-status write is required and
//! `None` when the status must be left alone.

pub mod transitions;

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Threat escalation level reported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AlarmStatus {
    #[default]
    NoAlarm = 0,
    PendingAlarm = 1,
    Alarm = 2,
}

impl AlarmStatus {
    /// Human-readable description, as shown on the control panel.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }

    /// Escalation level, 0 (clear) to 2 (alarm).
    pub const fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlarm => write!(f, "NO_ALARM"),
            Self::PendingAlarm => write!(f, "PENDING_ALARM"),
            Self::Alarm => write!(f, "ALARM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arming status
// ---------------------------------------------------------------------------

/// Mode governing whether sensor and camera events are security-relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const ALL: [Self; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// Either of the armed modes.
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => write!(f, "DISARMED"),
            Self::ArmedHome => write!(f, "ARMED_HOME"),
            Self::ArmedAway => write!(f, "ARMED_AWAY"),
        }
    }
}
