//! Platform-independent core of the color telemetry node.
//!
//! The hardware crates plug into the seams defined here: a
//! [`sensor::ColorSensorController`] produces readings, a
//! [`telemetry::TelemetryReporter`] delivers payloads, and the
//! [`sampler::Sampler`] drives both once per second. Everything in this
//! crate builds and tests on the host.

pub mod sampler;
pub mod sensor;
pub mod telemetry;

pub mod tcs34725;
