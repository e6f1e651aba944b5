use log::debug;

use crate::telemetry::telemetryreporter::{TelemetryPayload, TelemetryReporter};

/// Blocking HTTP reporter for host builds.
///
/// reqwest's client is driven through a private single-threaded tokio
/// runtime so the call site stays synchronous, like the reporter on the
/// device.
pub struct HttpTelemetryReporter {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    url: String,
}

impl HttpTelemetryReporter {
    pub fn new(url: impl Into<String>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            client: reqwest::Client::new(),
            url: url.into(),
        })
    }
}

impl TelemetryReporter for HttpTelemetryReporter {
    fn send(&mut self, payload: &TelemetryPayload) -> Result<(), Box<dyn std::error::Error>> {
        let response = self
            .runtime
            .block_on(self.client.post(&self.url).json(payload).send())?;

        let status = response.status();
        debug!("telemetry response: {status}");

        if !status.is_success() {
            return Err(format!("telemetry endpoint returned {status}").into());
        }

        Ok(())
    }
}
