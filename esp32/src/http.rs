use embedded_svc::http::client::Client as HttpClient;
use embedded_svc::io::Write;

use esp_idf_svc::http::client::EspHttpConnection;

use log::info;

use colornode_common::telemetry::{TelemetryPayload, TelemetryReporter};

/// Reporter that POSTs payloads through the ESP-IDF HTTP client.
///
/// A fresh connection is opened per send and torn down with the client
/// before returning, whatever the outcome.
pub struct EspTelemetryReporter {
    url: &'static str,
}

impl EspTelemetryReporter {
    pub fn new(url: &'static str) -> Self {
        Self { url }
    }
}

impl TelemetryReporter for EspTelemetryReporter {
    fn send(&mut self, payload: &TelemetryPayload) -> Result<(), Box<dyn std::error::Error>> {
        let connection = EspHttpConnection::new(&Default::default())?;
        let mut client = HttpClient::wrap(connection);

        let body = payload.to_json()?;

        let content_length = body.len().to_string();
        let headers = [
            ("content-type", "application/json"),
            ("content-length", content_length.as_str()),
        ];

        let mut request = client.post(self.url, &headers)?;
        request.write_all(body.as_bytes())?;
        request.flush()?;

        let response = request.submit()?;
        let status = response.status();
        info!("<- POST {}", status);

        if !(200..300).contains(&status) {
            return Err(format!("telemetry endpoint returned status {status}").into());
        }

        Ok(())
    }
}
