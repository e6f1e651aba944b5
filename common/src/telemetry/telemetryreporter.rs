use serde::{Deserialize, Serialize};

use crate::sensor::RgbReading;

/// Cumulative per-channel sums since process start.
///
/// The totals grow without bound for the lifetime of the process. With
/// 64-bit accumulators and 16-bit samples at one sample per second that is
/// nothing to worry about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunningAverages {
    total_red: u64,
    total_green: u64,
    total_blue: u64,
    count: u64,
}

impl RunningAverages {
    pub const fn new() -> Self {
        Self {
            total_red: 0,
            total_green: 0,
            total_blue: 0,
            count: 0,
        }
    }

    /// Folds one reading into the accumulators.
    pub fn record(&mut self, reading: &RgbReading) {
        self.total_red += u64::from(reading.red);
        self.total_green += u64::from(reading.green);
        self.total_blue += u64::from(reading.blue);
        self.count += 1;
    }

    /// Number of readings recorded so far.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Integer-truncated mean of the red channel; zero before any sample.
    pub const fn red(&self) -> u64 {
        mean(self.total_red, self.count)
    }

    /// Integer-truncated mean of the green channel; zero before any sample.
    pub const fn green(&self) -> u64 {
        mean(self.total_green, self.count)
    }

    /// Integer-truncated mean of the blue channel; zero before any sample.
    pub const fn blue(&self) -> u64 {
        mean(self.total_blue, self.count)
    }
}

const fn mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        total / count
    }
}

/// The wire payload. Field names and order are part of the endpoint
/// contract, so this struct is the single source of the schema.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TelemetryPayload {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub red_avg: u64,
    pub green_avg: u64,
    pub blue_avg: u64,
}

impl TelemetryPayload {
    /// Combines the current reading with the averages accumulated so far.
    pub fn new(reading: &RgbReading, averages: &RunningAverages) -> Self {
        Self {
            red: reading.red,
            green: reading.green,
            blue: reading.blue,
            red_avg: averages.red(),
            green_avg: averages.green(),
            blue_avg: averages.blue(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub type TelemetryReporterPointer = Box<dyn TelemetryReporter + Send>;

/// Delivers one payload to the telemetry endpoint.
pub trait TelemetryReporter {
    fn send(&mut self, payload: &TelemetryPayload) -> Result<(), Box<dyn std::error::Error>>;
}

impl<T: TelemetryReporter + ?Sized> TelemetryReporter for Box<T> {
    fn send(&mut self, payload: &TelemetryPayload) -> Result<(), Box<dyn std::error::Error>> {
        (**self).send(payload)
    }
}

#[test]
fn test_running_averages_truncate() {
    let mut averages = RunningAverages::new();

    averages.record(&RgbReading {
        red: 10,
        green: 20,
        blue: 30,
    });
    assert_eq!((averages.red(), averages.green(), averages.blue()), (10, 20, 30));

    averages.record(&RgbReading {
        red: 20,
        green: 20,
        blue: 20,
    });
    assert_eq!((averages.red(), averages.green(), averages.blue()), (15, 20, 25));

    // 10 + 20 + 5 = 35, 35 / 3 truncates to 11
    averages.record(&RgbReading {
        red: 5,
        green: 20,
        blue: 1,
    });
    assert_eq!(averages.red(), 11);
    assert_eq!(averages.count(), 3);
}

#[test]
fn test_payload_shape() {
    let mut averages = RunningAverages::new();
    let reading = RgbReading {
        red: 10,
        green: 20,
        blue: 30,
    };
    averages.record(&reading);

    let payload = TelemetryPayload::new(&reading, &averages);
    assert_eq!(
        payload.to_json().unwrap(),
        r#"{"red":10,"green":20,"blue":30,"red_avg":10,"green_avg":20,"blue_avg":30}"#
    );
}

#[test]
fn test_payload_second_iteration() {
    let mut averages = RunningAverages::new();
    averages.record(&RgbReading {
        red: 10,
        green: 20,
        blue: 30,
    });

    let second = RgbReading {
        red: 20,
        green: 20,
        blue: 20,
    };
    averages.record(&second);

    let payload = TelemetryPayload::new(&second, &averages);
    assert_eq!(
        payload.to_json().unwrap(),
        r#"{"red":20,"green":20,"blue":20,"red_avg":15,"green_avg":20,"blue_avg":25}"#
    );
}
