use serde::Deserialize;

use crate::sensor::sensorcontroller::{ColorSensorController, RgbReading};

/// Replays a canned sequence of readings, cycling when it runs out.
///
/// Stands in for the hardware sensor on the host, the same way the real
/// controller stands behind the trait on the device.
#[derive(Deserialize)]
pub struct DummySensorController {
    readings: Vec<RgbReading>,

    #[serde(skip)]
    next: usize,
}

impl DummySensorController {
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummyreadings.json");

        serde_json::from_str::<Self>(json_data)
    }
}

impl ColorSensorController for DummySensorController {
    fn read_rgb(&mut self) -> Result<RgbReading, Box<dyn std::error::Error>> {
        let reading = self.readings[self.next % self.readings.len()];
        self.next += 1;

        Ok(reading)
    }
}

#[test]
fn test_dummy_sensor_controller() {
    let mut controller = DummySensorController::new().unwrap();

    let first = controller.read_rgb().unwrap();
    assert_eq!(
        first,
        RgbReading {
            red: 10,
            green: 20,
            blue: 30
        }
    );

    let second = controller.read_rgb().unwrap();
    assert_eq!(
        second,
        RgbReading {
            red: 20,
            green: 20,
            blue: 20
        }
    );
}

#[test]
fn test_dummy_sensor_controller_cycles() {
    let mut controller = DummySensorController::new().unwrap();

    let first = controller.read_rgb().unwrap();
    let mut last = first;
    // one full lap lands back on the first canned reading
    for _ in 0..5 {
        last = controller.read_rgb().unwrap();
    }
    assert_eq!(first, last);
}
