#![no_std]
#![deny(missing_docs)]
//!# HDC2021 - Driver for the Texas Instruments HDC2021 Humidity and Temperature Sensor
//! This crate provides a driver for the HDC2021 sensor: soft reset and identity
//! verification, one-shot and periodic measurements, interrupt pin configuration,
//! and conversion of raw samples to tenths of a degree Celsius and tenths of a
//! percent relative humidity.
mod address;
mod core;
mod error;
mod register;

pub use address::SlaveAddress;
pub use core::{Hdc2021, State};
pub use error::Error;
pub use register::{
    Cadence, ConfigShadow, DEVICE_ID, DeviceConfig, HumidityResolution, InterruptEnable,
    InterruptMode, MANUFACTURER_ID, MeasurementConfig, MeasurementMode, Polarity, Reading,
    Register, Status, TemperatureResolution,
};
