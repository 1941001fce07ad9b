use bitfield_struct::bitfield;

/// Manufacturer ID word, little endian. Reads as ASCII "TI".
pub const MANUFACTURER_ID: u16 = 0x5449; // Texas Instruments
/// Device ID word, little endian.
pub const DEVICE_ID: u16 = 0x07D0; // HDC2021 Device ID

/// Sensor counts per degree Celsius, scaled by ten (65535 counts over the
/// -40 to 125 degree range).
pub(crate) const TEMP_PER_BIT: u32 = 3972;
/// Sensor counts per percent relative humidity, scaled by ten (65535 counts
/// over 0 to 100 percent).
pub(crate) const HUM_PER_BIT: u32 = 6553;
/// Settle time after a soft reset, in milliseconds.
pub(crate) const RESET_SETTLE_MS: u32 = 10;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Register addresses of the HDC2021.
///
/// 0x05..=0x0F form a contiguous writable block that the device expects to
/// be written in a single transaction (see [`ConfigShadow`]).
pub enum Register {
    /// Temperature data LSB.
    TempLow = 0x00,
    /// Temperature data MSB.
    TempHigh = 0x01,
    /// Humidity data LSB.
    HumLow = 0x02,
    /// Humidity data MSB.
    HumHigh = 0x03,
    /// Data-ready and threshold interrupt flags.
    Status = 0x04,
    /// Peak temperature, high byte of the measured word.
    TempMax = 0x05,
    /// Peak humidity, high byte of the measured word.
    HumMax = 0x06,
    /// Interrupt enable mask.
    IntEnable = 0x07,
    /// Temperature offset adjustment.
    TempOffset = 0x08,
    /// Humidity offset adjustment.
    HumOffset = 0x09,
    /// Temperature threshold, low bound.
    TempThrLow = 0x0A,
    /// Temperature threshold, high bound.
    TempThrHigh = 0x0B,
    /// Humidity threshold, low bound.
    RhThrLow = 0x0C,
    /// Humidity threshold, high bound.
    RhThrHigh = 0x0D,
    /// Reset, heater, interrupt pin and cadence configuration.
    DeviceConfig = 0x0E,
    /// Trigger, mode and resolution configuration.
    MeasConfig = 0x0F,
    /// Manufacturer ID LSB.
    MfrIdLow = 0xFC,
    /// Manufacturer ID MSB.
    MfrIdHigh = 0xFD,
    /// Device ID LSB.
    DeviceIdLow = 0xFE,
    /// Device ID MSB.
    DeviceIdHigh = 0xFF,
}

impl Register {
    pub(crate) const fn addr(self) -> u8 {
        self as u8
    }
}

#[bitfield(u8)]
/// Reset, heater, interrupt pin and measurement cadence configuration
/// (register 0x0E).
pub struct DeviceConfig {
    #[bits(1, default = InterruptMode::Level)]
    pub interrupt_mode: InterruptMode,
    #[bits(1, default = Polarity::ActiveLow)]
    pub interrupt_polarity: Polarity,
    #[bits(1, default = false)]
    pub drdy_enable: bool,
    #[bits(1, default = false)]
    pub heater_enable: bool,
    #[bits(3, default = Cadence::OneShot)]
    pub cadence: Cadence,
    /// Self-clearing strobe; the device reboots when it is written as 1.
    #[bits(1, default = false)]
    pub soft_reset: bool,
}

#[bitfield(u8)]
/// Measurement trigger, mode and resolution configuration (register 0x0F).
pub struct MeasurementConfig {
    /// Starts a measurement when written as 1; self-clearing in one-shot
    /// cadence, held by the device while a periodic cadence runs.
    #[bits(1, default = false)]
    pub trigger: bool,
    #[bits(2, default = MeasurementMode::Both)]
    pub mode: MeasurementMode,
    #[bits(1, access = RO)]
    rsvd: bool,
    #[bits(2, default = HumidityResolution::FourteenBit)]
    pub humidity_resolution: HumidityResolution,
    #[bits(2, default = TemperatureResolution::FourteenBit)]
    pub temperature_resolution: TemperatureResolution,
}

#[bitfield(u8)]
/// Data-ready and threshold flags (register 0x04). Latched flags clear on
/// the device side as part of the read transaction.
pub struct Status {
    #[bits(3, access = RO)]
    rsvd: u8,
    #[bits(1, access = RO)]
    pub humidity_low: bool,
    #[bits(1, access = RO)]
    pub humidity_high: bool,
    #[bits(1, access = RO)]
    pub temperature_low: bool,
    #[bits(1, access = RO)]
    pub temperature_high: bool,
    /// A new sample pair is ready to read.
    #[bits(1, access = RO)]
    pub drdy: bool,
}

#[bitfield(u8)]
/// Interrupt enable mask (register 0x07), one bit per [`Status`] flag.
pub struct InterruptEnable {
    #[bits(3, access = RO)]
    rsvd: u8,
    #[bits(1, default = false)]
    pub humidity_low: bool,
    #[bits(1, default = false)]
    pub humidity_high: bool,
    #[bits(1, default = false)]
    pub temperature_low: bool,
    #[bits(1, default = false)]
    pub temperature_high: bool,
    #[bits(1, default = false)]
    pub drdy: bool,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Measurement cadence for the HDC2021 sensor.
pub enum Cadence {
    #[default]
    /// One measurement per trigger.
    OneShot = 0b000,
    /// One measurement every two minutes.
    TwoMinutes = 0b001,
    /// One measurement every minute.
    OneMinute = 0b010,
    /// One measurement every ten seconds.
    TenSeconds = 0b011,
    /// One measurement every five seconds.
    FiveSeconds = 0b100,
    /// One measurement every second.
    OneSecond = 0b101,
    /// Two measurements per second.
    Ms500 = 0b110,
    /// Five measurements per second.
    Ms200 = 0b111,
}

impl Cadence {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b000 => Cadence::OneShot,
            0b001 => Cadence::TwoMinutes,
            0b010 => Cadence::OneMinute,
            0b011 => Cadence::TenSeconds,
            0b100 => Cadence::FiveSeconds,
            0b101 => Cadence::OneSecond,
            0b110 => Cadence::Ms500,
            0b111 => Cadence::Ms200,
            _ => panic!("Invalid Cadence bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which quantities a measurement samples.
pub enum MeasurementMode {
    #[default]
    /// Temperature and humidity.
    Both = 0b00,
    /// Temperature only.
    TemperatureOnly = 0b01,
    /// Humidity only.
    HumidityOnly = 0b10,
}

impl MeasurementMode {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b00 => MeasurementMode::Both,
            0b01 => MeasurementMode::TemperatureOnly,
            0b10 => MeasurementMode::HumidityOnly,
            _ => panic!("Invalid MeasurementMode bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Humidity measurement resolution for the HDC2021 sensor.
pub enum HumidityResolution {
    /// 9-bit resolution.
    NineBit = 0b10,
    /// 11-bit resolution.
    ElevenBit = 0b01,
    #[default]
    /// 14-bit resolution.
    FourteenBit = 0b00,
}

impl HumidityResolution {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b10 => HumidityResolution::NineBit,
            0b01 => HumidityResolution::ElevenBit,
            0b00 => HumidityResolution::FourteenBit,
            _ => panic!("Invalid HumidityResolution bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Temperature measurement resolution for the HDC2021 sensor.
pub enum TemperatureResolution {
    /// 9-bit resolution.
    NineBit = 0b10,
    /// 11-bit resolution.
    ElevenBit = 0b01,
    #[default]
    /// 14-bit resolution.
    FourteenBit = 0b00,
}

impl TemperatureResolution {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b10 => TemperatureResolution::NineBit,
            0b01 => TemperatureResolution::ElevenBit,
            0b00 => TemperatureResolution::FourteenBit,
            _ => panic!("Invalid TemperatureResolution bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Level of the interrupt pin while an interrupt is pending.
pub enum Polarity {
    #[default]
    /// Pin pulled low on interrupt.
    ActiveLow = 0b0,
    /// Pin driven high on interrupt.
    ActiveHigh = 0b1,
}

impl Polarity {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => Polarity::ActiveLow,
            0b1 => Polarity::ActiveHigh,
            _ => panic!("Invalid Polarity bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Behavior of the interrupt pin.
pub enum InterruptMode {
    #[default]
    /// Pin held at the active level until the status register is read.
    Level = 0b0,
    /// Pin follows the comparator output.
    Comparator = 0b1,
}

impl InterruptMode {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => InterruptMode::Level,
            0b1 => InterruptMode::Comparator,
            _ => panic!("Invalid InterruptMode bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy)]
/// In-memory mirror of the writable register block 0x05..=0x0F.
///
/// The device expects the block to be written atomically, so local changes
/// accumulate here until the driver flushes all eleven bytes in one
/// transaction starting at [`Register::TempMax`].
pub struct ConfigShadow {
    /// Peak temperature byte (0x05).
    pub temperature_max: u8,
    /// Peak humidity byte (0x06).
    pub humidity_max: u8,
    /// Interrupt enable mask (0x07).
    pub interrupt_enable: InterruptEnable,
    /// Temperature offset adjustment (0x08).
    pub temperature_offset: u8,
    /// Humidity offset adjustment (0x09).
    pub humidity_offset: u8,
    /// Temperature low threshold (0x0A).
    pub temperature_threshold_low: u8,
    /// Temperature high threshold (0x0B).
    pub temperature_threshold_high: u8,
    /// Humidity low threshold (0x0C).
    pub humidity_threshold_low: u8,
    /// Humidity high threshold (0x0D).
    pub humidity_threshold_high: u8,
    /// Device configuration byte (0x0E).
    pub device_config: DeviceConfig,
    /// Measurement configuration byte (0x0F).
    pub measurement_config: MeasurementConfig,
}

impl Default for ConfigShadow {
    fn default() -> Self {
        Self {
            temperature_max: 0x00,
            humidity_max: 0x00,
            interrupt_enable: InterruptEnable::new(),
            temperature_offset: 0x00,
            humidity_offset: 0x00,
            temperature_threshold_low: 0x01,
            temperature_threshold_high: 0xFF,
            humidity_threshold_low: 0x00,
            humidity_threshold_high: 0xFF,
            device_config: DeviceConfig::new(),
            measurement_config: MeasurementConfig::new(),
        }
    }
}

impl ConfigShadow {
    /// Serializes the block in register order, [`Register::TempMax`] first.
    pub const fn to_bytes(&self) -> [u8; 11] {
        [
            self.temperature_max,
            self.humidity_max,
            self.interrupt_enable.into_bits(),
            self.temperature_offset,
            self.humidity_offset,
            self.temperature_threshold_low,
            self.temperature_threshold_high,
            self.humidity_threshold_low,
            self.humidity_threshold_high,
            self.device_config.into_bits(),
            self.measurement_config.into_bits(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A converted temperature and humidity sample pair.
pub struct Reading {
    /// Temperature in tenths of a degree Celsius.
    pub temperature: i16,
    /// Relative humidity in tenths of a percent.
    pub humidity: i16,
}

impl Reading {
    /// Converts a raw little-endian register word pair to tenths.
    pub const fn from_raw(raw_temperature: u16, raw_humidity: u16) -> Self {
        Self {
            temperature: temperature_tenths(raw_temperature),
            humidity: humidity_tenths(raw_humidity),
        }
    }

    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.temperature as f32 / 10.0
    }

    /// Relative humidity in percent (0-100).
    pub fn percentage(&self) -> f32 {
        self.humidity as f32 / 10.0
    }
}

/// Converts a raw temperature word to tenths of a degree Celsius, rounding
/// to the nearest tenth.
pub(crate) const fn temperature_tenths(raw: u16) -> i16 {
    let scaled = raw as u32 * 100;
    ((scaled + TEMP_PER_BIT / 2) / TEMP_PER_BIT) as i16 - 400
}

/// Converts a raw humidity word to tenths of a percent, rounding to the
/// nearest tenth.
pub(crate) const fn humidity_tenths(raw: u16) -> i16 {
    let scaled = raw as u32 * 100;
    ((scaled + HUM_PER_BIT / 2) / HUM_PER_BIT) as i16
}
