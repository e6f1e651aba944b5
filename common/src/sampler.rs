use std::time::Duration;

use chrono::Utc;
use log::{error, info};

use crate::sensor::ColorSensorController;
use crate::telemetry::{RunningAverages, TelemetryPayload, TelemetryReporter};

/// Pause between iterations. Doubles as the only rate limit towards the
/// telemetry endpoint (roughly one request per second).
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// The sampling loop: read the sensor, fold the reading into the running
/// averages, report the payload, sleep, repeat.
///
/// Owns all loop state so both seams can be swapped for doubles in tests.
pub struct Sampler<S, R> {
    sensor: S,
    reporter: R,
    averages: RunningAverages,
}

impl<S: ColorSensorController, R: TelemetryReporter> Sampler<S, R> {
    pub fn new(sensor: S, reporter: R) -> Self {
        Self {
            sensor,
            reporter,
            averages: RunningAverages::new(),
        }
    }

    /// Takes one sample and folds it into the averages.
    pub fn sample(&mut self) -> Result<TelemetryPayload, Box<dyn std::error::Error>> {
        let reading = self.sensor.read_rgb()?;
        self.averages.record(&reading);

        Ok(TelemetryPayload::new(&reading, &self.averages))
    }

    /// One loop iteration: sample, log, send.
    ///
    /// A sensor failure skips the iteration with the accumulators
    /// untouched; a transport failure discards the unsent payload. Both are
    /// logged and neither stops the loop.
    pub fn step(&mut self) {
        let payload = match self.sample() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Error reading color sensor: {e}");
                return;
            }
        };

        match payload.to_json() {
            Ok(json) => info!("[{}] --> Payload: {}", Utc::now().timestamp(), json),
            Err(e) => error!("Error serializing payload: {e}"),
        }

        if let Err(e) = self.reporter.send(&payload) {
            error!("Error sending telemetry: {e}");
        }
    }

    /// Runs forever at [`SAMPLE_INTERVAL`] pacing. The node has no terminal
    /// state; it stops when the process is killed.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
            std::thread::sleep(SAMPLE_INTERVAL);
        }
    }

    pub const fn averages(&self) -> &RunningAverages {
        &self.averages
    }
}
