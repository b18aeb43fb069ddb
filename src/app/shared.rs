//! Thread-safe handle to a [`SecurityService`].
//!
//! Sensor callbacks and the control panel may call in from different
//! threads.  Every rule is a read-then-conditionally-write sequence against
//! the repository, so each operation runs start to finish under a single
//! lock scope per security system instance.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

use super::commands::SecurityCommand;
use super::events::StatusSnapshot;
use super::ports::{EventSink, ImageAnalyzer, SecurityRepository};
use super::service::SecurityService;

/// Cloneable, serialised handle to one security system instance.
pub struct SharedSecurityService<R, A> {
    inner: Arc<Mutex<SecurityService<R, A>>>,
}

impl<R, A> Clone for SharedSecurityService<R, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, A> SharedSecurityService<R, A>
where
    R: SecurityRepository,
    A: ImageAnalyzer,
{
    pub fn new(service: SecurityService<R, A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.  Use this to group
    /// several operations into one atomic step.
    pub fn with<T>(&self, f: impl FnOnce(&mut SecurityService<R, A>) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn handle_sensor_activation(
        &self,
        sensor: &Sensor,
        active: bool,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.inner.lock().handle_sensor_activation(sensor, active, sink)
    }

    pub fn set_arming_status(&self, status: ArmingStatus, sink: &mut impl EventSink) -> Result<()> {
        self.inner.lock().set_arming_status(status, sink)
    }

    pub fn process_image(&self, image: Option<&A::Image>, sink: &mut impl EventSink) -> Result<bool> {
        self.inner.lock().process_image(image, sink)
    }

    pub fn handle_command(
        &self,
        cmd: SecurityCommand,
        image: Option<&A::Image>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.inner.lock().handle_command(cmd, image, sink)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.inner.lock().alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.inner.lock().arming_status()
    }

    pub fn snapshot(&self) -> Result<StatusSnapshot> {
        self.inner.lock().snapshot()
    }
}
