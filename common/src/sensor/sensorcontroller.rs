use serde::{Deserialize, Serialize};

/// One sample of the three color channels.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RgbReading {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

pub type ColorSensorControllerPointer = Box<dyn ColorSensorController + Send>;

/// The sensor controller trait that provides color samples.
pub trait ColorSensorController {
    /// Reads one sample of the red, green and blue channels.
    fn read_rgb(&mut self) -> Result<RgbReading, Box<dyn std::error::Error>>;
}

impl<T: ColorSensorController + ?Sized> ColorSensorController for Box<T> {
    fn read_rgb(&mut self) -> Result<RgbReading, Box<dyn std::error::Error>> {
        (**self).read_rgb()
    }
}
