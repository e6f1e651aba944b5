use colornode_common::sensor::{ColorSensorController, RgbReading};
use colornode_common::tcs34725::{Channel, Error, Tcs34725};

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::i2c::I2cDriver;

/// The hardware sensor behind the controller seam.
pub struct EspColorSensor {
    driver: Tcs34725<I2cDriver<'static>>,
}

impl EspColorSensor {
    /// Opens and configures the sensor. An error here is fatal for the node.
    pub fn new(i2c: I2cDriver<'static>) -> anyhow::Result<Self> {
        let mut driver = Tcs34725::new(i2c);
        let mut delay = Delay::new_default();
        driver
            .init(&mut delay)
            .map_err(|e| anyhow::anyhow!("TCS34725 init failed: {e:?}"))?;

        Ok(Self { driver })
    }
}

impl ColorSensorController for EspColorSensor {
    fn read_rgb(&mut self) -> Result<RgbReading, Box<dyn std::error::Error>> {
        Ok(RgbReading {
            red: self.driver.read_channel(Channel::Red).map_err(describe)?,
            green: self.driver.read_channel(Channel::Green).map_err(describe)?,
            blue: self.driver.read_channel(Channel::Blue).map_err(describe)?,
        })
    }
}

fn describe<E: core::fmt::Debug>(e: Error<E>) -> Box<dyn std::error::Error> {
    format!("TCS34725 read failed: {e:?}").into()
}
