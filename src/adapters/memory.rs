//! In-memory adapters.
//!
//! [`MemoryRepository`] implements [`SecurityRepository`] over plain
//! collections, and [`MemoryConfigStore`] implements [`ConfigPort`] over a
//! serialized blob, the same way a flash-backed store would keep it.
//! Both are process-local: nothing survives a restart.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::app::ports::{ConfigError, ConfigPort, RepositoryError, SecurityRepository};
use crate::config::SecurityConfig;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

// ───────────────────────────────────────────────────────────────
// MemoryRepository
// ───────────────────────────────────────────────────────────────

/// Repository holding the sensor set and both statuses in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    sensors: BTreeMap<String, Sensor>,
    alarm: AlarmStatus,
    arming: ArmingStatus,
}

impl MemoryRepository {
    /// Empty repository: no sensors, `NoAlarm`, `Disarmed`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with a known state (setup / fixtures).
    pub fn with_state(
        sensors: impl IntoIterator<Item = Sensor>,
        arming: ArmingStatus,
        alarm: AlarmStatus,
    ) -> Self {
        let sensors = sensors
            .into_iter()
            .map(|s| (s.name().to_owned(), s))
            .collect();
        Self {
            sensors,
            alarm,
            arming,
        }
    }
}

impl SecurityRepository for MemoryRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.arming = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        Ok(self.sensors.values().cloned().collect())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.sensors.insert(sensor.name().to_owned(), sensor.clone());
        Ok(())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        if self.sensors.insert(sensor.name().to_owned(), sensor).is_some() {
            debug!("MemoryRepository: replaced existing sensor");
        }
        Ok(())
    }

    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError> {
        self.sensors.remove(name);
        Ok(())
    }

    fn sensor(&self, name: &str) -> Result<Option<Sensor>, RepositoryError> {
        Ok(self.sensors.get(name).cloned())
    }
}

// ───────────────────────────────────────────────────────────────
// MemoryConfigStore
// ───────────────────────────────────────────────────────────────

/// Config store keeping the last saved [`SecurityConfig`] as a JSON blob.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blob: Option<Vec<u8>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw bytes, as if read back from storage.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Some(bytes.into()),
        }
    }
}

impl ConfigPort for MemoryConfigStore {
    fn load(&self) -> Result<SecurityConfig, ConfigError> {
        let blob = self.blob.as_deref().ok_or(ConfigError::NotFound)?;
        let config: SecurityConfig =
            serde_json::from_slice(blob).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    fn save(&mut self, config: &SecurityConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let blob = serde_json::to_vec(config).map_err(|_| ConfigError::IoError)?;
        self.blob = Some(blob);
        info!("MemoryConfigStore: config saved");
        Ok(())
    }
}
