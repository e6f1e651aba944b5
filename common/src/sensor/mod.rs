mod sensorcontroller;
mod dummysensorcontroller;

pub use sensorcontroller::ColorSensorController;
pub use sensorcontroller::ColorSensorControllerPointer;
pub use sensorcontroller::RgbReading;

pub use dummysensorcontroller::DummySensorController;
