mod telemetryreporter;
mod logtelemetryreporter;

pub use telemetryreporter::RunningAverages;
pub use telemetryreporter::TelemetryPayload;
pub use telemetryreporter::TelemetryReporter;
pub use telemetryreporter::TelemetryReporterPointer;

pub use logtelemetryreporter::LogTelemetryReporter;

#[cfg(feature = "http")]
mod httptelemetryreporter;

#[cfg(feature = "http")]
pub use httptelemetryreporter::HttpTelemetryReporter;
