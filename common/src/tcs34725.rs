//! Register-level driver for the AMS TCS34725 RGB color sensor.
//!
//! The sensor sits on I2C at address 0x29. Every register access goes
//! through the command register, so the register offset is OR'd with the
//! command bit before it is put on the bus. Channel data is exposed as
//! paired low/high byte registers that combine into one 16-bit value.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Fixed 7-bit bus address of the part.
pub const ADDRESS: u8 = 0x29;

const COMMAND_BIT: u8 = 0x80;

const REG_ENABLE: u8 = 0x00;
const REG_ATIME: u8 = 0x01;
const REG_CONTROL: u8 = 0x0F;
const REG_ID: u8 = 0x12;
const REG_CDATAL: u8 = 0x14;
const REG_RDATAL: u8 = 0x16;
const REG_GDATAL: u8 = 0x18;
const REG_BDATAL: u8 = 0x1A;

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

/// Default RGBC integration time (ATIME register value, ~50 ms).
pub const DEFAULT_ATIME: u8 = 0xEB;

/// Errors raised by the driver.
#[derive(Debug)]
pub enum Error<E> {
    /// The underlying bus transaction failed.
    I2c(E),
    /// The ID register did not identify a TCS3472x part. Carries the value
    /// that was read instead.
    NotDetected(u8),
}

/// One of the four photodiode channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Clear,
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Offset of the channel's low data byte; the high byte follows it.
    const fn data_register(self) -> u8 {
        match self {
            Channel::Clear => REG_CDATAL,
            Channel::Red => REG_RDATAL,
            Channel::Green => REG_GDATAL,
            Channel::Blue => REG_BDATAL,
        }
    }
}

/// RGBC analog gain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gain {
    #[default]
    X1 = 0x00,
    X4 = 0x01,
    X16 = 0x02,
    X60 = 0x03,
}

pub struct Tcs34725<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Tcs34725<I2C> {
    /// Wraps the bus. The sensor is not touched until [`Self::init`].
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Powers the sensor on and enables the RGBC ADC.
    ///
    /// Verifies the ID register, sets the power-on bit, waits one second
    /// for the oscillator to stabilize, then enables the ADC and programs
    /// the default integration time.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I2C::Error>> {
        let id = self.read_register(REG_ID)?;
        // 0x44 identifies the TCS34721/34725, 0x4D the TCS34723/34727
        if id != 0x44 && id != 0x4D {
            return Err(Error::NotDetected(id));
        }

        self.write_register(REG_ENABLE, ENABLE_PON)?;
        delay.delay_ms(1000);
        self.write_register(REG_ENABLE, ENABLE_PON | ENABLE_AEN)?;
        self.write_register(REG_ATIME, DEFAULT_ATIME)?;

        Ok(())
    }

    /// Programs the RGBC integration time (raw ATIME register value).
    pub fn set_integration_time(&mut self, atime: u8) -> Result<(), Error<I2C::Error>> {
        self.write_register(REG_ATIME, atime)
    }

    /// Programs the RGBC analog gain.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<I2C::Error>> {
        self.write_register(REG_CONTROL, gain as u8)
    }

    /// Reads one 16-bit channel from its low/high register pair.
    pub fn read_channel(&mut self, channel: Channel) -> Result<u16, Error<I2C::Error>> {
        let register = channel.data_register();
        let low = self.read_register(register)?;
        let high = self.read_register(register + 1)?;
        Ok(combine(low, high))
    }

    /// Releases the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(ADDRESS, &[COMMAND_BIT | register, value])
            .map_err(Error::I2c)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(ADDRESS, &[COMMAND_BIT | register], &mut buffer)
            .map_err(Error::I2c)?;
        Ok(buffer[0])
    }
}

const fn combine(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::Operation;

    /// Byte-addressed register file standing in for the sensor.
    struct FakeBus {
        registers: [u8; 0x20],
        writes: Vec<(u8, u8)>,
    }

    impl FakeBus {
        fn new() -> Self {
            let mut registers = [0u8; 0x20];
            registers[REG_ID as usize] = 0x44;
            Self {
                registers,
                writes: Vec::new(),
            }
        }
    }

    impl embedded_hal::i2c::ErrorType for FakeBus {
        type Error = core::convert::Infallible;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, ADDRESS);
            let mut pointer = None;
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => match *bytes {
                        &[command] => {
                            assert_ne!(command & COMMAND_BIT, 0, "command bit missing");
                            pointer = Some(command & !COMMAND_BIT);
                        }
                        &[command, value] => {
                            assert_ne!(command & COMMAND_BIT, 0, "command bit missing");
                            let register = command & !COMMAND_BIT;
                            self.registers[register as usize] = value;
                            self.writes.push((register, value));
                        }
                        _ => panic!("unexpected write of {} bytes", bytes.len()),
                    },
                    Operation::Read(buffer) => {
                        let register = pointer.expect("read without a register pointer");
                        for (offset, byte) in buffer.iter_mut().enumerate() {
                            *byte = self.registers[register as usize + offset];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    /// Delay double that only counts what was requested.
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn combine_matches_high_shift_or_low() {
        for high in 0..=u8::MAX {
            for low in [0x00, 0x01, 0x7F, 0x80, 0xAB, 0xFF] {
                assert_eq!(combine(low, high), (u16::from(high) << 8) | u16::from(low));
            }
        }
    }

    #[test]
    fn read_channel_combines_low_and_high_bytes() {
        let mut bus = FakeBus::new();
        bus.registers[REG_RDATAL as usize] = 0x34;
        bus.registers[REG_RDATAL as usize + 1] = 0x12;
        bus.registers[REG_GDATAL as usize] = 0xFF;
        bus.registers[REG_GDATAL as usize + 1] = 0x00;
        bus.registers[REG_BDATAL as usize] = 0x00;
        bus.registers[REG_BDATAL as usize + 1] = 0xFF;
        bus.registers[REG_CDATAL as usize] = 0x01;
        bus.registers[REG_CDATAL as usize + 1] = 0x80;

        let mut sensor = Tcs34725::new(bus);
        assert_eq!(sensor.read_channel(Channel::Red).unwrap(), 0x1234);
        assert_eq!(sensor.read_channel(Channel::Green).unwrap(), 0x00FF);
        assert_eq!(sensor.read_channel(Channel::Blue).unwrap(), 0xFF00);
        assert_eq!(sensor.read_channel(Channel::Clear).unwrap(), 0x8001);
    }

    #[test]
    fn init_powers_on_waits_then_enables_adc() {
        let mut sensor = Tcs34725::new(FakeBus::new());
        let mut delay = CountingDelay::default();

        sensor.init(&mut delay).unwrap();

        assert_eq!(delay.total_ns, 1_000_000_000);
        let bus = sensor.release();
        assert_eq!(
            bus.writes,
            vec![
                (REG_ENABLE, ENABLE_PON),
                (REG_ENABLE, ENABLE_PON | ENABLE_AEN),
                (REG_ATIME, DEFAULT_ATIME),
            ]
        );
    }

    #[test]
    fn init_rejects_unknown_part() {
        let mut bus = FakeBus::new();
        bus.registers[REG_ID as usize] = 0x12;

        let mut sensor = Tcs34725::new(bus);
        let mut delay = CountingDelay::default();

        match sensor.init(&mut delay) {
            Err(Error::NotDetected(0x12)) => {}
            other => panic!("expected NotDetected, got {other:?}"),
        }
        // nothing may have been written to an unidentified part
        assert!(sensor.release().writes.is_empty());
    }

    #[test]
    fn gain_and_integration_time_hit_their_registers() {
        let mut sensor = Tcs34725::new(FakeBus::new());
        sensor.set_gain(Gain::X16).unwrap();
        sensor.set_integration_time(0xC0).unwrap();

        let bus = sensor.release();
        assert_eq!(bus.writes, vec![(REG_CONTROL, 0x02), (REG_ATIME, 0xC0)]);
    }
}
