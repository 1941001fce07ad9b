use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use hdc2021::{
    Cadence, ConfigShadow, DeviceConfig, Error, Hdc2021, HumidityResolution, InterruptEnable,
    MeasurementConfig, Polarity, Reading, SlaveAddress, State, TemperatureResolution,
};

const ADDR: u8 = 0x40;

fn init_transactions() -> Vec<I2cTransaction> {
    vec![
        I2cTransaction::write(ADDR, vec![0x0E, 0x80]),
        I2cTransaction::write_read(ADDR, vec![0xFC], vec![0x49, 0x54, 0xD0, 0x07]),
    ]
}

fn block_write(
    interrupt: u8,
    device: DeviceConfig,
    measurement: MeasurementConfig,
) -> I2cTransaction {
    I2cTransaction::write(
        ADDR,
        vec![
            0x05,
            0x00,
            0x00,
            interrupt,
            0x00,
            0x00,
            0x01,
            0xFF,
            0x00,
            0xFF,
            device.into_bits(),
            measurement.into_bits(),
        ],
    )
}

#[test]
fn start_stop_covers_every_cadence() {
    let cadences = [
        Cadence::OneShot,
        Cadence::TwoMinutes,
        Cadence::OneMinute,
        Cadence::TenSeconds,
        Cadence::FiveSeconds,
        Cadence::OneSecond,
        Cadence::Ms500,
        Cadence::Ms200,
    ];
    for cadence in cadences {
        let device = DeviceConfig::new().with_cadence(cadence);
        let mut expectations = init_transactions();
        expectations.push(block_write(
            0x00,
            device,
            MeasurementConfig::new().with_trigger(true),
        ));
        expectations.push(block_write(0x00, device, MeasurementConfig::new()));
        let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
        sensor.initialize(&mut NoopDelay::new()).unwrap();
        sensor.start(cadence).unwrap();
        assert_eq!(sensor.state(), State::Measuring);
        assert!(sensor.config().measurement_config.trigger());
        assert_eq!(sensor.config().device_config.cadence(), cadence);
        sensor.stop().unwrap();
        assert_eq!(sensor.state(), State::Idle);
        assert!(!sensor.config().measurement_config.trigger());
        assert_eq!(sensor.config().device_config.cadence(), cadence);
        sensor.release().done();
    }
}

#[test]
fn set_interrupt_is_local_and_idempotent() {
    let expectations: &[I2cTransaction] = &[];
    let mut sensor = Hdc2021::new(I2cMock::new(expectations), SlaveAddress::default());
    let mask = InterruptEnable::new()
        .with_drdy(true)
        .with_temperature_high(true);
    sensor.set_interrupt(mask, Polarity::ActiveHigh);
    sensor.set_interrupt(mask, Polarity::ActiveHigh);
    assert_eq!(
        sensor.config().interrupt_enable.into_bits(),
        mask.into_bits()
    );
    assert!(sensor.config().device_config.drdy_enable());
    assert_eq!(
        sensor.config().device_config.interrupt_polarity(),
        Polarity::ActiveHigh
    );
    sensor.set_interrupt(InterruptEnable::new(), Polarity::ActiveHigh);
    assert!(!sensor.config().device_config.drdy_enable());
    sensor.release().done();
}

#[test]
fn initialize_flags_wrong_identity() {
    let expectations = vec![
        I2cTransaction::write(ADDR, vec![0x0E, 0x80]),
        I2cTransaction::write_read(ADDR, vec![0xFC], vec![0x00, 0x30, 0x00, 0x10]),
    ];
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    let err = sensor.initialize(&mut NoopDelay::new()).unwrap_err();
    match err {
        Error::IdMismatch {
            manufacturer,
            device,
        } => {
            assert_eq!(manufacturer, 0x3000);
            assert_eq!(device, 0x1000);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sensor.state(), State::Faulted);
    assert!(matches!(
        sensor.start(Cadence::OneShot),
        Err(Error::NotConnected)
    ));
    sensor.release().done();
}

#[test]
fn initialize_not_connected_without_ack() {
    let expectations =
        vec![I2cTransaction::write(ADDR, vec![0x0E, 0x80]).with_error(ErrorKind::Other)];
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    assert!(matches!(
        sensor.initialize(&mut NoopDelay::new()),
        Err(Error::NotConnected)
    ));
    assert_eq!(sensor.state(), State::Faulted);
    assert!(matches!(sensor.read_status(), Err(Error::NotConnected)));
    sensor.release().done();
}

#[test]
fn initialize_not_responding_on_identity_read() {
    let expectations = vec![
        I2cTransaction::write(ADDR, vec![0x0E, 0x80]),
        I2cTransaction::write_read(ADDR, vec![0xFC], vec![0x00, 0x00, 0x00, 0x00])
            .with_error(ErrorKind::Other),
    ];
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    assert!(matches!(
        sensor.initialize(&mut NoopDelay::new()),
        Err(Error::NotResponding(_))
    ));
    assert_eq!(sensor.state(), State::Faulted);
    assert!(matches!(sensor.read_data(), Err(Error::NotConnected)));
    sensor.release().done();
}

#[test]
fn failed_read_leaves_state_unchanged() {
    let device = DeviceConfig::new().with_cadence(Cadence::OneSecond);
    let mut expectations = init_transactions();
    expectations.push(block_write(
        0x00,
        device,
        MeasurementConfig::new().with_trigger(true),
    ));
    expectations.push(
        I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00, 0x00, 0x00, 0x00])
            .with_error(ErrorKind::Other),
    );
    expectations.push(block_write(0x00, device, MeasurementConfig::new()));
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    sensor.start(Cadence::OneSecond).unwrap();
    assert!(matches!(sensor.read_data(), Err(Error::NotResponding(_))));
    assert_eq!(sensor.state(), State::Measuring);
    sensor.stop().unwrap();
    sensor.release().done();
}

#[test]
fn failed_start_keeps_state_and_shadow() {
    let device = DeviceConfig::new().with_cadence(Cadence::OneSecond);
    let mut expectations = init_transactions();
    expectations.push(
        block_write(0x00, device, MeasurementConfig::new().with_trigger(true))
            .with_error(ErrorKind::Other),
    );
    expectations.push(block_write(0x00, device, MeasurementConfig::new()));
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    assert!(matches!(
        sensor.start(Cadence::OneSecond),
        Err(Error::NotResponding(_))
    ));
    assert_eq!(sensor.state(), State::Idle);
    assert!(sensor.config().measurement_config.trigger());
    assert_eq!(sensor.config().device_config.cadence(), Cadence::OneSecond);
    sensor.stop().unwrap();
    assert_eq!(sensor.state(), State::Idle);
    assert!(!sensor.config().measurement_config.trigger());
    assert_eq!(sensor.config().device_config.cadence(), Cadence::OneSecond);
    sensor.release().done();
}

#[test]
fn operations_refused_before_initialize() {
    let expectations: &[I2cTransaction] = &[];
    let mut sensor = Hdc2021::new(I2cMock::new(expectations), SlaveAddress::default());
    assert_eq!(sensor.state(), State::Uninitialized);
    assert!(matches!(
        sensor.start(Cadence::OneShot),
        Err(Error::NotConnected)
    ));
    assert!(matches!(sensor.read_data(), Err(Error::NotConnected)));
    assert!(matches!(sensor.stop(), Err(Error::NotConnected)));
    assert!(matches!(
        sensor.read_temperature_max(),
        Err(Error::NotConnected)
    ));
    sensor.release().done();
}

#[test]
fn reinitialize_restores_defaults() {
    let mut expectations = init_transactions();
    expectations.extend(init_transactions());
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    sensor.set_heater(true);
    sensor.set_thresholds(0x10, 0x20, 0x30, 0x40);
    sensor.set_resolution(TemperatureResolution::NineBit, HumidityResolution::ElevenBit);
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    assert_eq!(sensor.config().to_bytes(), ConfigShadow::default().to_bytes());
    assert_eq!(sensor.state(), State::Idle);
    sensor.release().done();
}

#[test]
fn expansion_setters_land_in_flushed_block() {
    let mut expectations = init_transactions();
    expectations.push(I2cTransaction::write(
        ADDR,
        vec![
            0x05, 0x00, 0x00, 0x00, 0x12, 0x34, 0x0A, 0xF0, 0x05, 0xE0, 0x08, 0x61,
        ],
    ));
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    sensor.set_resolution(TemperatureResolution::ElevenBit, HumidityResolution::NineBit);
    sensor.set_heater(true);
    sensor.set_offsets(0x12, 0x34);
    sensor.set_thresholds(0x0A, 0xF0, 0x05, 0xE0);
    sensor.start(Cadence::OneShot).unwrap();
    sensor.release().done();
}

#[test]
fn peak_registers_convert_like_samples() {
    let mut expectations = init_transactions();
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x05], vec![0xFF]));
    expectations.push(I2cTransaction::write_read(ADDR, vec![0x06], vec![0xFF]));
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    assert_eq!(sensor.read_temperature_max().unwrap(), 1244);
    assert_eq!(sensor.read_humidity_max().unwrap(), 996);
    sensor.release().done();
}

#[test]
fn full_lifecycle_on_the_wire() {
    let expectations = vec![
        I2cTransaction::write(ADDR, vec![0x0E, 0x80]),
        I2cTransaction::write_read(ADDR, vec![0xFC], vec![0x49, 0x54, 0xD0, 0x07]),
        I2cTransaction::write(
            ADDR,
            vec![
                0x05, 0x00, 0x00, 0x80, 0x00, 0x00, 0x01, 0xFF, 0x00, 0xFF, 0x24, 0x01,
            ],
        ),
        I2cTransaction::write_read(ADDR, vec![0x04], vec![0x80]),
        I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00, 0x40, 0x00, 0x20]),
        I2cTransaction::write(
            ADDR,
            vec![
                0x05, 0x00, 0x00, 0x80, 0x00, 0x00, 0x01, 0xFF, 0x00, 0xFF, 0x24, 0x00,
            ],
        ),
    ];
    let mut sensor = Hdc2021::new(I2cMock::new(&expectations), SlaveAddress::default());
    sensor.initialize(&mut NoopDelay::new()).unwrap();
    sensor.set_interrupt(InterruptEnable::new().with_drdy(true), Polarity::ActiveLow);
    sensor.start(Cadence::OneMinute).unwrap();
    assert!(sensor.read_status().unwrap().drdy());
    assert_eq!(
        sensor.read_data().unwrap(),
        Reading {
            temperature: 12,
            humidity: 125
        }
    );
    sensor.stop().unwrap();
    assert_eq!(sensor.state(), State::Idle);
    sensor.release().done();
}
