use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

use crate::{
    Error,
    address::SlaveAddress,
    register::{
        self, Cadence, ConfigShadow, HumidityResolution, InterruptEnable, Polarity, Reading,
        Register, Status, TemperatureResolution,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle state of an [`Hdc2021`] instance.
pub enum State {
    /// No bus traffic has happened yet.
    Uninitialized,
    /// Soft reset issued, waiting out the settle time.
    Resetting,
    /// Reset acknowledged, identity not verified yet.
    Identifying,
    /// Identity verified, no measurement running.
    Idle,
    /// Trigger bit set, the device samples at the configured cadence.
    Measuring,
    /// Initialization failed; only a new [`Hdc2021::initialize`] leaves
    /// this state.
    Faulted,
}

/// Represents the HDC2021 sensor.
pub struct Hdc2021<I2C> {
    i2c: I2C,
    address: u8,
    config: ConfigShadow,
    state: State,
}

impl<I2C> Hdc2021<I2C> {
    /// Create a driver for the sensor at `address`. No bus traffic happens
    /// until [`Hdc2021::initialize`].
    pub fn new(i2c: I2C, address: SlaveAddress) -> Self {
        Self {
            i2c,
            address: address.into_bits(),
            config: ConfigShadow::default(),
            state: State::Uninitialized,
        }
    }

    /// Get the lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the 7-bit address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Get the configuration the driver intends to be on the device.
    pub fn config(&self) -> &ConfigShadow {
        &self.config
    }

    /// Release the I2C handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Select which status flags raise the interrupt pin and the pin's
    /// active level. A non-empty mask enables the pin, the empty mask
    /// disables it.
    ///
    /// Mutates only the local shadow; the next [`Hdc2021::start`] or
    /// [`Hdc2021::stop`] writes it to the device.
    pub fn set_interrupt(&mut self, enable: InterruptEnable, polarity: Polarity) {
        self.config.interrupt_enable = enable;
        self.config.device_config.set_interrupt_polarity(polarity);
        self.config
            .device_config
            .set_drdy_enable(enable.into_bits() != 0);
    }

    /// Set the measurement resolutions. Mutates only the local shadow.
    pub fn set_resolution(
        &mut self,
        temperature: TemperatureResolution,
        humidity: HumidityResolution,
    ) {
        self.config
            .measurement_config
            .set_temperature_resolution(temperature);
        self.config
            .measurement_config
            .set_humidity_resolution(humidity);
    }

    /// Enable or disable the integrated heater. Mutates only the local
    /// shadow.
    pub fn set_heater(&mut self, enable: bool) {
        self.config.device_config.set_heater_enable(enable);
    }

    /// Set the offset adjustment bytes in the device's raw register
    /// encoding. Mutates only the local shadow.
    pub fn set_offsets(&mut self, temperature: u8, humidity: u8) {
        self.config.temperature_offset = temperature;
        self.config.humidity_offset = humidity;
    }

    /// Set the threshold bytes in the device's raw register encoding.
    /// Mutates only the local shadow.
    pub fn set_thresholds(
        &mut self,
        temperature_low: u8,
        temperature_high: u8,
        humidity_low: u8,
        humidity_high: u8,
    ) {
        self.config.temperature_threshold_low = temperature_low;
        self.config.temperature_threshold_high = temperature_high;
        self.config.humidity_threshold_low = humidity_low;
        self.config.humidity_threshold_high = humidity_high;
    }
}

impl<I2C: I2c<SevenBitAddress>> Hdc2021<I2C> {
    /// Reset the device and verify its identity.
    ///
    /// Resets the local shadow to the documented power-on defaults, writes
    /// the device configuration register with the soft-reset strobe set,
    /// waits the fixed settle time, then reads the four identity bytes in
    /// one transaction and compares them against the HDC2021's manufacturer
    /// and device IDs. Callable from any state; a re-initialization
    /// overwrites all prior configuration.
    ///
    /// # Errors:
    /// - [`Error::NotConnected`]: the reset write was not acknowledged.
    /// - [`Error::NotResponding`]: the identity read failed.
    /// - [`Error::IdMismatch`]: the device reported foreign identity words.
    ///
    /// Any failure leaves the driver in [`State::Faulted`], where every
    /// operation other than another `initialize` is refused.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.config = ConfigShadow::default();
        self.state = State::Resetting;
        let reset = self.config.device_config.with_soft_reset(true);
        let res = self
            .i2c
            .write(self.address, &[Register::DeviceConfig.addr(), reset.into_bits()]);
        // The settle time applies whether or not the device acknowledged.
        delay.delay_ms(register::RESET_SETTLE_MS);
        if res.is_err() {
            self.state = State::Faulted;
            return Err(Error::NotConnected);
        }
        self.state = State::Identifying;
        let mut id = [0u8; 4];
        if let Err(e) = self
            .i2c
            .write_read(self.address, &[Register::MfrIdLow.addr()], &mut id)
        {
            self.state = State::Faulted;
            return Err(Error::NotResponding(e));
        }
        let manufacturer = u16::from_le_bytes([id[0], id[1]]);
        let device = u16::from_le_bytes([id[2], id[3]]);
        if manufacturer != register::MANUFACTURER_ID || device != register::DEVICE_ID {
            self.state = State::Faulted;
            return Err(Error::IdMismatch {
                manufacturer,
                device,
            });
        }
        self.state = State::Idle;
        Ok(())
    }

    /// Start measuring at the given cadence.
    ///
    /// Sets the cadence and the trigger bit in the shadow and writes the
    /// whole configuration block. With [`Cadence::OneShot`] the device
    /// samples once and clears its trigger copy itself; calling `start`
    /// again issues the next sample.
    pub fn start(&mut self, cadence: Cadence) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;
        self.config.device_config.set_cadence(cadence);
        self.config.measurement_config.set_trigger(true);
        self.write_config_block()?;
        self.state = State::Measuring;
        Ok(())
    }

    /// Stop measuring. Clears the trigger bit, leaving the rest of the
    /// configuration as is, and writes the whole configuration block.
    pub fn stop(&mut self) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;
        self.config.measurement_config.set_trigger(false);
        self.write_config_block()?;
        self.state = State::Idle;
        Ok(())
    }

    /// Read the latest sample pair, converted to tenths of a degree Celsius
    /// and tenths of a percent relative humidity.
    ///
    /// One four-byte read starting at the temperature LSB; the device
    /// returns both little-endian words in a single transaction. A failed
    /// read leaves the lifecycle state unchanged, retrying is the caller's
    /// choice.
    pub fn read_data(&mut self) -> Result<Reading, Error<I2C::Error>> {
        self.ensure_ready()?;
        let mut buf = [0u8; 4];
        self.i2c
            .write_read(self.address, &[Register::TempLow.addr()], &mut buf)
            .map_err(Error::NotResponding)?;
        Ok(Reading::from_raw(
            u16::from_le_bytes([buf[0], buf[1]]),
            u16::from_le_bytes([buf[2], buf[3]]),
        ))
    }

    /// Read the status register. Latched flags clear on the device side as
    /// part of the read.
    pub fn read_status(&mut self) -> Result<Status, Error<I2C::Error>> {
        self.ensure_ready()?;
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[Register::Status.addr()], &mut buf)
            .map_err(Error::NotResponding)?;
        Ok(Status::from_bits(buf[0]))
    }

    /// Read the peak temperature seen since the register was cleared, in
    /// tenths of a degree Celsius.
    pub fn read_temperature_max(&mut self) -> Result<i16, Error<I2C::Error>> {
        self.ensure_ready()?;
        let raw = self.read_peak(Register::TempMax)?;
        Ok(register::temperature_tenths(raw))
    }

    /// Read the peak humidity seen since the register was cleared, in
    /// tenths of a percent.
    pub fn read_humidity_max(&mut self) -> Result<i16, Error<I2C::Error>> {
        self.ensure_ready()?;
        let raw = self.read_peak(Register::HumMax)?;
        Ok(register::humidity_tenths(raw))
    }

    // The peak registers hold the high byte of the measured word.
    fn read_peak(&mut self, reg: Register) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg.addr()], &mut buf)
            .map_err(Error::NotResponding)?;
        Ok((buf[0] as u16) << 8)
    }

    fn ensure_ready(&self) -> Result<(), Error<I2C::Error>> {
        match self.state {
            State::Idle | State::Measuring => Ok(()),
            _ => Err(Error::NotConnected),
        }
    }

    fn write_config_block(&mut self) -> Result<(), Error<I2C::Error>> {
        let block = self.config.to_bytes();
        let mut frame = [0u8; 12];
        frame[0] = Register::TempMax.addr();
        frame[1..].copy_from_slice(&block);
        self.i2c
            .write(self.address, &frame)
            .map_err(Error::NotResponding)
    }
}
