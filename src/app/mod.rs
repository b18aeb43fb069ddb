//! Application core — the alarm decision layer, zero I/O.
//!
//! This module contains the business rules for the security system:
//! sensor activation handling, arming changes and camera verdicts.
//! All interaction with storage, cameras and the GUI happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;
