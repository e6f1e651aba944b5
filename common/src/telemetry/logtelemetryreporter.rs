use log::info;

use crate::telemetry::telemetryreporter::{TelemetryPayload, TelemetryReporter};

/// Reporter that only logs the payload instead of sending it.
///
/// Stands in for the network the way the dummy sensor stands in for the
/// hardware.
#[derive(Default)]
pub struct LogTelemetryReporter;

impl TelemetryReporter for LogTelemetryReporter {
    fn send(&mut self, payload: &TelemetryPayload) -> Result<(), Box<dyn std::error::Error>> {
        info!("telemetry (not sent): {}", payload.to_json()?);

        Ok(())
    }
}
