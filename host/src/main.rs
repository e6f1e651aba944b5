//! Desktop simulator for the color telemetry node.
//!
//! Runs the same sampling loop as the device, with the canned dummy sensor
//! in place of the TCS34725. If the `COLORNODE_ENDPOINT` environment
//! variable is set at compile time, payloads are POSTed there; otherwise
//! they are only logged.

use colornode_common::sampler::Sampler;
use colornode_common::sensor::DummySensorController;
use colornode_common::telemetry::{
    HttpTelemetryReporter, LogTelemetryReporter, TelemetryReporterPointer,
};

use log::info;

/// Telemetry endpoint baked in at compile time, e.g.
/// `https://demo.thingsboard.io/api/v1/<token>/telemetry`.
const ENDPOINT: Option<&str> = std::option_env!("COLORNODE_ENDPOINT");

/// A minimal main function that wires the dummy sensor to a reporter and
/// runs the loop until the process is killed.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sensor = DummySensorController::new()?;

    let reporter: TelemetryReporterPointer = match ENDPOINT {
        Some(url) => {
            info!("Reporting to {url}");
            Box::new(HttpTelemetryReporter::new(url)?)
        }
        None => {
            info!("No endpoint configured, payloads are logged only");
            Box::new(LogTelemetryReporter)
        }
    };

    let mut sampler = Sampler::new(sensor, reporter);
    sampler.run()
}
