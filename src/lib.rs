//! CatPoint security library.
//!
//! Exposes the alarm core (sensors, alarm state machine, security service)
//! together with in-memory adapters for integration testing and host runs.
//! Storage engines, the image-classification model and the GUI live
//! outside this crate behind the traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod sensors;
