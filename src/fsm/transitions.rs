//! Transition rules for the alarm state machine.
//!
//! Each rule takes the already-read state and returns the alarm status to
//! persist, or `None` to leave it untouched.  `Some(x)` where `x` equals the
//! current status is a legitimate answer: disarming and camera decisions
//! always write, even when the value is unchanged.

use super::{AlarmStatus, ArmingStatus};

/// A sensor reported active.
///
/// Escalates one step while armed.  `Alarm` stays where it is; a disarmed
/// system ignores sensors entirely.
pub fn on_sensor_activated(arming: ArmingStatus, alarm: AlarmStatus) -> Option<AlarmStatus> {
    if !arming.is_armed() {
        return None;
    }
    match alarm {
        AlarmStatus::NoAlarm => Some(AlarmStatus::PendingAlarm),
        AlarmStatus::PendingAlarm => Some(AlarmStatus::Alarm),
        AlarmStatus::Alarm => None,
    }
}

/// A previously active sensor reported inactive.
///
/// `any_active` is evaluated over the full sensor set *after* the sensor's
/// own flag has been cleared.  Only a pending alarm can be withdrawn here;
/// a triggered alarm is cleared by disarming only.
pub fn on_sensor_deactivated(alarm: AlarmStatus, any_active: bool) -> Option<AlarmStatus> {
    match alarm {
        AlarmStatus::PendingAlarm if !any_active => Some(AlarmStatus::NoAlarm),
        _ => None,
    }
}

/// The arming status is about to change to `next`.
pub fn on_arming_changed(next: ArmingStatus) -> Option<AlarmStatus> {
    match next {
        ArmingStatus::Disarmed => Some(AlarmStatus::NoAlarm),
        ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => None,
    }
}

/// The camera analyzer returned a verdict.
///
/// A cat seen while `ArmedHome` goes straight to `Alarm`, skipping the
/// pending step.  No cat and no active sensor is an all-clear, in any
/// arming mode.
pub fn on_image_analyzed(
    arming: ArmingStatus,
    cat_detected: bool,
    all_sensors_inactive: bool,
) -> Option<AlarmStatus> {
    if cat_detected {
        (arming == ArmingStatus::ArmedHome).then_some(AlarmStatus::Alarm)
    } else {
        all_sensors_inactive.then_some(AlarmStatus::NoAlarm)
    }
}
