//! Integration tests for the SecurityService alarm rules.
//!
//! Every test drives the service through its public API and checks both
//! the resulting state and the exact repository writes it caused.

use crate::mock_repo::RecordingRepository;

use catpoint::adapters::scripted::ScriptedAnalyzer;
use catpoint::app::commands::SecurityCommand;
use catpoint::app::events::SecurityEvent;
use catpoint::app::service::SecurityService;
use catpoint::fsm::{AlarmStatus, ArmingStatus};
use catpoint::sensors::{Sensor, SensorType};

type Service = SecurityService<RecordingRepository, ScriptedAnalyzer>;

const ARMED: [ArmingStatus; 2] = [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway];

fn door() -> Sensor {
    Sensor::new("SensorDoor", SensorType::Door)
}

fn window() -> Sensor {
    Sensor::new("SensorWindow", SensorType::Window)
}

fn make_service(sensors: Vec<Sensor>, arming: ArmingStatus, alarm: AlarmStatus) -> Service {
    SecurityService::new(
        RecordingRepository::new(sensors, arming, alarm),
        ScriptedAnalyzer::new(),
    )
}

fn events() -> Vec<SecurityEvent> {
    Vec::new()
}

// ── Sensor activation ────────────────────────────────────────

#[test]
fn armed_and_sensor_activated_goes_pending() {
    for arming in ARMED {
        let mut svc = make_service(vec![door()], arming, AlarmStatus::NoAlarm);
        svc.handle_sensor_activation(&door(), true, &mut events()).unwrap();

        assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::PendingAlarm]);
        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }
}

#[test]
fn armed_and_sensor_activated_while_pending_goes_alarm() {
    for arming in ARMED {
        let mut svc = make_service(vec![door()], arming, AlarmStatus::PendingAlarm);
        svc.handle_sensor_activation(&door(), true, &mut events()).unwrap();

        assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::Alarm]);
    }
}

#[test]
fn reactivating_active_sensor_while_pending_goes_alarm() {
    let active_door = door().with_active(true);
    let mut svc = make_service(
        vec![active_door.clone()],
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
    );
    svc.handle_sensor_activation(&active_door, true, &mut events()).unwrap();

    assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::Alarm]);
}

#[test]
fn reactivating_active_sensor_persists_without_sensor_event() {
    let active_door = door().with_active(true);
    let mut svc = make_service(
        vec![active_door.clone()],
        ArmingStatus::Disarmed,
        AlarmStatus::NoAlarm,
    );
    let mut sink = events();
    svc.handle_sensor_activation(&active_door, true, &mut sink).unwrap();

    assert_eq!(
        svc.repository().sensor_writes,
        vec![("SensorDoor".to_owned(), true)]
    );
    assert!(sink.is_empty(), "flag unchanged, got {sink:?}");
}

#[test]
fn activation_while_alarm_writes_nothing() {
    let mut svc = make_service(vec![door()], ArmingStatus::ArmedHome, AlarmStatus::Alarm);
    svc.handle_sensor_activation(&door(), true, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn activation_while_disarmed_only_updates_sensor() {
    let mut svc = make_service(vec![door()], ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
    svc.handle_sensor_activation(&door(), true, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(
        svc.repository().sensor_writes,
        vec![("SensorDoor".to_owned(), true)]
    );
    assert!(svc.repository().stored("SensorDoor").is_active());
}

// ── Sensor deactivation ──────────────────────────────────────

#[test]
fn last_active_sensor_deactivated_while_pending_goes_no_alarm() {
    let mut svc = make_service(
        vec![door().with_active(true)],
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
    );
    svc.handle_sensor_activation(&door(), false, &mut events()).unwrap();

    assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::NoAlarm]);
}

#[test]
fn deactivation_while_pending_keeps_pending_if_another_sensor_active() {
    let mut svc = make_service(
        vec![door().with_active(true), window().with_active(true)],
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
    );
    svc.handle_sensor_activation(&door(), false, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}

#[test]
fn deactivation_while_alarm_leaves_alarm() {
    let mut svc = make_service(
        vec![door().with_active(true)],
        ArmingStatus::ArmedHome,
        AlarmStatus::Alarm,
    );
    svc.handle_sensor_activation(&door(), false, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert!(!svc.repository().stored("SensorDoor").is_active());
}

#[test]
fn deactivating_inactive_sensor_is_a_no_op() {
    for alarm in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm, AlarmStatus::Alarm] {
        let mut svc = make_service(vec![door()], ArmingStatus::ArmedAway, alarm);
        let mut sink = events();
        svc.handle_sensor_activation(&door(), false, &mut sink).unwrap();

        assert!(svc.repository().alarm_writes.is_empty());
        assert!(svc.repository().sensor_writes.is_empty());
        assert!(sink.is_empty());
    }
}

#[test]
fn stored_flag_wins_over_stale_caller_copy() {
    // The caller still holds an "active" copy; the repository knows better.
    let stale = door().with_active(true);
    let mut svc = make_service(vec![door()], ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm);
    svc.handle_sensor_activation(&stale, false, &mut events()).unwrap();

    assert!(svc.repository().sensor_writes.is_empty());
    assert!(svc.repository().alarm_writes.is_empty());
}

// ── Camera ───────────────────────────────────────────────────

#[test]
fn cat_detected_while_armed_home_goes_alarm() {
    for start in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm] {
        let mut svc = make_service(vec![door()], ArmingStatus::ArmedHome, start);
        svc.analyzer_mut().push(Ok(true));

        let cat = svc.process_image(Some(&vec![1, 2, 3]), &mut events()).unwrap();
        assert!(cat);
        assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::Alarm]);
    }
}

#[test]
fn cat_detected_while_armed_away_changes_nothing() {
    let mut svc = make_service(vec![door()], ArmingStatus::ArmedAway, AlarmStatus::NoAlarm);
    svc.analyzer_mut().push(Ok(true));
    svc.process_image(None, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
}

#[test]
fn no_cat_and_all_sensors_inactive_goes_no_alarm() {
    let mut svc = make_service(
        vec![door(), window()],
        ArmingStatus::ArmedHome,
        AlarmStatus::Alarm,
    );
    svc.analyzer_mut().push(Ok(false));
    svc.process_image(None, &mut events()).unwrap();

    assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::NoAlarm]);
}

#[test]
fn no_cat_with_active_sensor_keeps_status() {
    let mut svc = make_service(
        vec![door().with_active(true), window()],
        ArmingStatus::ArmedAway,
        AlarmStatus::PendingAlarm,
    );
    svc.analyzer_mut().push(Ok(false));
    svc.process_image(None, &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}

#[test]
fn analyzer_receives_configured_threshold_and_event_is_emitted() {
    let mut svc = make_service(vec![], ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
    let mut cfg = svc.config().clone();
    cfg.cat_confidence_threshold = 72.5;
    svc.update_config(cfg).unwrap();

    svc.analyzer_mut().push(Ok(true));
    let mut sink = events();
    svc.process_image(None, &mut sink).unwrap();

    assert_eq!(svc.analyzer_mut().thresholds_seen(), &[72.5]);
    assert!(sink.contains(&SecurityEvent::CatDetected { detected: true }));
}

// ── Arming ───────────────────────────────────────────────────

#[test]
fn disarming_always_clears_alarm() {
    for start in [AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm, AlarmStatus::Alarm] {
        let mut svc = make_service(vec![], ArmingStatus::ArmedAway, start);
        svc.set_arming_status(ArmingStatus::Disarmed, &mut events()).unwrap();

        assert_eq!(svc.repository().alarm_writes, vec![AlarmStatus::NoAlarm]);
        assert_eq!(svc.repository().arming_writes, vec![ArmingStatus::Disarmed]);
    }
}

#[test]
fn arming_deactivates_every_sensor_without_alarm_writes() {
    for arming in ARMED {
        let mut svc = make_service(
            vec![door().with_active(true), window().with_active(true)],
            ArmingStatus::Disarmed,
            AlarmStatus::PendingAlarm,
        );
        svc.set_arming_status(arming, &mut events()).unwrap();

        let sensors = svc.sensors().unwrap();
        assert_eq!(sensors.len(), 2);
        assert!(sensors.iter().all(|s| !s.is_active()));
        assert!(
            svc.repository().alarm_writes.is_empty(),
            "bulk deactivation must not apply sensor rules"
        );
        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        assert_eq!(svc.arming_status().unwrap(), arming);
    }
}

#[test]
fn arming_emits_one_event_per_sensor_actually_changed() {
    let mut svc = make_service(
        vec![door().with_active(true), window()],
        ArmingStatus::Disarmed,
        AlarmStatus::NoAlarm,
    );
    let mut sink = events();
    svc.set_arming_status(ArmingStatus::ArmedHome, &mut sink).unwrap();

    assert_eq!(
        sink,
        vec![
            SecurityEvent::SensorStatusChanged {
                name: "SensorDoor".into(),
                active: false,
            },
            SecurityEvent::ArmingStatusChanged {
                from: ArmingStatus::Disarmed,
                to: ArmingStatus::ArmedHome,
            },
        ]
    );
}

// ── Full scenario ────────────────────────────────────────────

#[test]
fn away_intrusion_scenario() {
    let mut svc = make_service(
        vec![door(), window()],
        ArmingStatus::ArmedAway,
        AlarmStatus::NoAlarm,
    );
    let mut sink = events();

    svc.handle_sensor_activation(&door(), true, &mut sink).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    svc.handle_sensor_activation(&window(), true, &mut sink).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    svc.handle_sensor_activation(&door(), false, &mut sink).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    svc.set_arming_status(ArmingStatus::Disarmed, &mut sink).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert!(svc.repository().stored("SensorWindow").is_active());

    svc.set_arming_status(ArmingStatus::ArmedAway, &mut sink).unwrap();
    assert!(svc.sensors().unwrap().iter().all(|s| !s.is_active()));

    let transitions: Vec<_> = sink
        .iter()
        .filter_map(|e| match e {
            SecurityEvent::AlarmStatusChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm),
            (AlarmStatus::PendingAlarm, AlarmStatus::Alarm),
            (AlarmStatus::Alarm, AlarmStatus::NoAlarm),
        ]
    );
}

// ── Commands ─────────────────────────────────────────────────

#[test]
fn commands_dispatch_to_operations() {
    let mut svc = make_service(vec![], ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
    let mut sink = events();

    let script = [
        SecurityCommand::AddSensor { sensor: door() },
        SecurityCommand::SetArmingStatus {
            status: ArmingStatus::ArmedHome,
        },
        SecurityCommand::SetSensorActive {
            name: "SensorDoor".into(),
            active: true,
        },
        SecurityCommand::ProcessImage,
    ];
    svc.analyzer_mut().push(Ok(true));
    for cmd in script {
        svc.handle_command(cmd, None, &mut sink).unwrap();
    }
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    svc.handle_command(
        SecurityCommand::RemoveSensor {
            name: "SensorDoor".into(),
        },
        None,
        &mut sink,
    )
    .unwrap();
    assert!(svc.sensors().unwrap().is_empty());
    assert_eq!(
        sink.last(),
        Some(&SecurityEvent::SensorRemoved {
            name: "SensorDoor".into()
        })
    );
}

#[test]
fn adding_and_removing_sensors_never_touches_alarm() {
    let mut svc = make_service(vec![], ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm);
    svc.add_sensor(door().with_active(true), &mut events()).unwrap();
    svc.remove_sensor("SensorDoor", &mut events()).unwrap();
    svc.remove_sensor("NeverExisted", &mut events()).unwrap();

    assert!(svc.repository().alarm_writes.is_empty());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}
