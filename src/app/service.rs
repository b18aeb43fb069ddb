//! Security service — the hexagonal core.
//!
//! [`SecurityService`] owns its repository and image analyzer handles and
//! applies the alarm rules from [`crate::fsm::transitions`].  Every public
//! operation is a short read → decide → write sequence against the
//! repository; the service itself keeps no alarm state of its own.
//!
//! ```text
//!  SecurityRepository ◀──▶ ┌──────────────────────┐ ──▶ EventSink
//!                          │   SecurityService    │
//!      ImageAnalyzer ────▶ │  rules · dispatch    │
//!                          └──────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SecurityConfig;
use crate::error::{Error, Result};
use crate::fsm::transitions;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::{Sensor, all_inactive};

use super::commands::SecurityCommand;
use super::events::{SecurityEvent, StatusSnapshot};
use super::ports::{ConfigError, ConfigPort, EventSink, ImageAnalyzer, SecurityRepository};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The alarm decision engine for one security system instance.
pub struct SecurityService<R, A> {
    repository: R,
    analyzer: A,
    config: SecurityConfig,
}

impl<R, A> SecurityService<R, A>
where
    R: SecurityRepository,
    A: ImageAnalyzer,
{
    /// Construct the service with the default configuration.
    pub fn new(repository: R, analyzer: A) -> Self {
        Self {
            repository,
            analyzer,
            config: SecurityConfig::default(),
        }
    }

    /// Construct the service with an explicit configuration.
    pub fn with_config(repository: R, analyzer: A, config: SecurityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            analyzer,
            config,
        })
    }

    // ── Sensor events ─────────────────────────────────────────

    /// Apply a sensor's new active state.
    ///
    /// The stored sensor with the same name is the authority on the current
    /// flag; `sensor`'s own flag is only used when the repository does not
    /// know it yet.  Deactivating an already inactive sensor is a no-op.
    pub fn handle_sensor_activation(
        &mut self,
        sensor: &Sensor,
        active: bool,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let stored = self.repository.sensor(sensor.name())?;
        let was_active = stored.as_ref().map_or(sensor.is_active(), Sensor::is_active);

        if !active && !was_active {
            debug!("Sensor {} already inactive, ignoring", sensor.name());
            return Ok(());
        }

        let mut updated = stored.unwrap_or_else(|| sensor.clone());
        updated.set_active(active);
        self.repository.update_sensor(&updated)?;
        if was_active != active {
            sink.emit(&SecurityEvent::SensorStatusChanged {
                name: updated.name().to_owned(),
                active,
            });
        }

        let current = self.repository.alarm_status()?;
        let next = if active {
            let arming = self.repository.arming_status()?;
            transitions::on_sensor_activated(arming, current)
        } else {
            let any_active = !all_inactive(&self.repository.sensors()?);
            transitions::on_sensor_deactivated(current, any_active)
        };

        self.write_alarm(current, next, sink)
    }

    // ── Arming ────────────────────────────────────────────────

    /// Change the arming mode.
    ///
    /// Disarming always clears the alarm.  Arming resets every sensor to
    /// inactive by writing the flags directly; that reset does not go
    /// through [`handle_sensor_activation`](Self::handle_sensor_activation)
    /// and never moves the alarm status.
    ///
    /// The repository has no transactions.  If a sensor write fails partway
    /// through the reset, sensors written before it stay inactive and the
    /// arming status is left at its previous value.
    pub fn set_arming_status(
        &mut self,
        status: ArmingStatus,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let previous = self.repository.arming_status()?;

        if let Some(next) = transitions::on_arming_changed(status) {
            let current = self.repository.alarm_status()?;
            self.write_alarm(current, Some(next), sink)?;
        }

        if status.is_armed() {
            for mut sensor in self.repository.sensors()? {
                let was_active = sensor.is_active();
                sensor.set_active(false);
                self.repository.update_sensor(&sensor)?;
                if was_active {
                    sink.emit(&SecurityEvent::SensorStatusChanged {
                        name: sensor.name().to_owned(),
                        active: false,
                    });
                }
            }
        }

        self.repository.set_arming_status(status)?;
        info!("ARMING | {} -> {}", previous, status);
        sink.emit(&SecurityEvent::ArmingStatusChanged {
            from: previous,
            to: status,
        });
        Ok(())
    }

    // ── Camera ────────────────────────────────────────────────

    /// Run the analyzer on `image` and apply its verdict.
    ///
    /// Returns whether a cat was detected.
    pub fn process_image(
        &mut self,
        image: Option<&A::Image>,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        let cat = self
            .analyzer
            .contains_cat(image, self.config.cat_confidence_threshold)
            .inspect_err(|e| warn!("Image analysis failed: {}", e))?;

        let arming = self.repository.arming_status()?;
        let clear = all_inactive(&self.repository.sensors()?);

        if let Some(next) = transitions::on_image_analyzed(arming, cat, clear) {
            let current = self.repository.alarm_status()?;
            self.write_alarm(current, Some(next), sink)?;
        }

        sink.emit(&SecurityEvent::CatDetected { detected: cat });
        Ok(cat)
    }

    // ── Sensor management ─────────────────────────────────────

    /// Register a sensor.  No alarm rules are applied.
    pub fn add_sensor(&mut self, sensor: Sensor, sink: &mut impl EventSink) -> Result<()> {
        let event = SecurityEvent::SensorStatusChanged {
            name: sensor.name().to_owned(),
            active: sensor.is_active(),
        };
        info!("SENSOR | added {}", sensor);
        self.repository.add_sensor(sensor)?;
        sink.emit(&event);
        Ok(())
    }

    /// Remove a sensor by name.  No alarm rules are applied.
    pub fn remove_sensor(&mut self, name: &str, sink: &mut impl EventSink) -> Result<()> {
        self.repository.remove_sensor(name)?;
        info!("SENSOR | removed {}", name);
        sink.emit(&SecurityEvent::SensorRemoved {
            name: name.to_owned(),
        });
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.  `image` is only consulted by
    /// [`SecurityCommand::ProcessImage`].
    pub fn handle_command(
        &mut self,
        cmd: SecurityCommand,
        image: Option<&A::Image>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            SecurityCommand::SetSensorActive { name, active } => {
                let sensor = self
                    .repository
                    .sensor(&name)?
                    .ok_or(Error::UnknownSensor(name))?;
                self.handle_sensor_activation(&sensor, active, sink)
            }
            SecurityCommand::SetArmingStatus { status } => self.set_arming_status(status, sink),
            SecurityCommand::ProcessImage => self.process_image(image, sink).map(|_| ()),
            SecurityCommand::AddSensor { sensor } => self.add_sensor(sensor, sink),
            SecurityCommand::RemoveSensor { name } => self.remove_sensor(&name, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.repository.arming_status()?)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.repository.sensors()?)
    }

    /// Everything a status panel needs in one read.
    pub fn snapshot(&self) -> Result<StatusSnapshot> {
        Ok(StatusSnapshot {
            alarm: self.repository.alarm_status()?,
            arming: self.repository.arming_status()?,
            sensors: self.repository.sensors()?,
        })
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// Replace the live configuration after validating it.
    pub fn update_config(&mut self, config: SecurityConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        info!("Configuration updated at runtime");
        Ok(())
    }

    /// Load configuration from `store`.  A store with nothing saved yet
    /// leaves the current configuration in place.
    pub fn load_config(&mut self, store: &impl ConfigPort) -> Result<()> {
        match store.load() {
            Ok(config) => self.update_config(config),
            Err(ConfigError::NotFound) => {
                debug!("No stored config, keeping {:?}", self.config);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Collaborator access ───────────────────────────────────

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    pub fn into_parts(self) -> (R, A) {
        (self.repository, self.analyzer)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Persist a rule's decision.  `None` writes nothing.
    fn write_alarm(
        &mut self,
        current: AlarmStatus,
        next: Option<AlarmStatus>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let Some(next) = next else {
            debug!("ALARM | unchanged at {}", current);
            return Ok(());
        };

        self.repository.set_alarm_status(next)?;
        if next != current {
            info!("ALARM | {} -> {}", current, next);
        }
        if next != current || self.config.emit_unchanged_events {
            sink.emit(&SecurityEvent::AlarmStatusChanged {
                from: current,
                to: next,
            });
        }
        Ok(())
    }
}
