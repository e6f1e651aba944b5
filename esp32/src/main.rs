use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::i2c::I2cDriver;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use log::info;

use colornode_common::sampler::Sampler;

mod http;
mod sensor;
mod wifi;

use http::EspTelemetryReporter;
use sensor::EspColorSensor;

/// Telemetry endpoint with the device token in the path, e.g.
/// `https://srv-iot.example.org/api/v1/<token>/telemetry`.
const TELEMETRY_URL: &str = env!("TELEMETRY_URL");

fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // Bring up the I2C bus and the sensor. Failure here is fatal.
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &esp_idf_svc::hal::i2c::config::Config::new().baudrate(400_000.Hz()),
    )?;

    info!("Initializing sensor: TCS34725");
    let sensor = EspColorSensor::new(i2c)?;

    let mut wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;
    wifi::connect(&mut wifi)?;

    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    info!("Wifi DHCP info: {:?}", ip_info);

    let reporter = EspTelemetryReporter::new(TELEMETRY_URL);

    let mut sampler = Sampler::new(sensor, reporter);
    sampler.run()
}
