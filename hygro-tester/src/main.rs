use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use clap::{Parser, ValueEnum};
use hdc2021::{Cadence, Hdc2021, InterruptEnable, Polarity, SlaveAddress};
use linux_embedded_hal::{Delay, I2cdev};

/// Exercises an HDC2021 sensor on a Linux I2C bus.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long)]
    path: String,
    /// ADDR pin pulled high (device at 0x41 instead of 0x40)
    #[arg(long, default_value_t = false)]
    addr_high: bool,
    /// Measurement cadence
    #[arg(short, long, value_enum, default_value = "one-minute")]
    cadence: Period,
    /// Status poll interval in milliseconds
    #[arg(long, default_value_t = 200)]
    poll_ms: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Period {
    OneShot,
    TwoMinutes,
    OneMinute,
    TenSeconds,
    FiveSeconds,
    OneSecond,
    Ms500,
    Ms200,
}

impl From<Period> for Cadence {
    fn from(period: Period) -> Self {
        match period {
            Period::OneShot => Cadence::OneShot,
            Period::TwoMinutes => Cadence::TwoMinutes,
            Period::OneMinute => Cadence::OneMinute,
            Period::TenSeconds => Cadence::TenSeconds,
            Period::FiveSeconds => Cadence::FiveSeconds,
            Period::OneSecond => Cadence::OneSecond,
            Period::Ms500 => Cadence::Ms500,
            Period::Ms200 => Cadence::Ms200,
        }
    }
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Handle Ctrl+C to stop the poll loop gracefully
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            log::info!("[HYG] Received Ctrl+C, stopping...");
            running.store(false, Ordering::Relaxed);
        })
        .expect("Error setting Ctrl-C handler");
    }
    run(args, running);
}

fn run(args: Args, running: Arc<AtomicBool>) {
    println!("[HYG] Opening bus: {}", args.path);
    // Open the I2C bus
    let i2c = I2cdev::new(&args.path).expect("Failed to open I2C device");
    let mut delay = Delay;
    let address = SlaveAddress::default().with_addr_pin(args.addr_high);
    let addr = address.into_bits();
    let mut sensor = Hdc2021::new(i2c, address);
    if let Err(e) = sensor.initialize(&mut delay) {
        panic!("[HYG] Sensor 0x{addr:02x}: {e}");
    }
    println!("[HYG] Device found at address 0x{addr:02x}");
    // Data-ready on the interrupt pin; the loop below polls the same flag
    // through the status register.
    sensor.set_interrupt(InterruptEnable::new().with_drdy(true), Polarity::ActiveLow);
    let cadence = Cadence::from(args.cadence);
    sensor
        .start(cadence)
        .unwrap_or_else(|e| panic!("[HYG] Sensor 0x{addr:02x}: Could not start: {e}"));
    while running.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(args.poll_ms));
        let status = match sensor.read_status() {
            Ok(status) => status,
            Err(e) => {
                log::warn!("[HYG] Sensor 0x{addr:02x}: Error reading status: {e}");
                continue;
            }
        };
        if !status.drdy() {
            continue;
        }
        match sensor.read_data() {
            Ok(r) => log::info!(
                "[HYG] Sensor 0x{addr:02x}: {:.1} degC, {:.1} %RH",
                r.celsius(),
                r.percentage()
            ),
            Err(e) => log::warn!("[HYG] Sensor 0x{addr:02x}: Error reading: {e}"),
        }
        if cadence == Cadence::OneShot {
            if let Err(e) = sensor.start(cadence) {
                log::warn!("[HYG] Sensor 0x{addr:02x}: Could not retrigger: {e}");
            }
        }
    }
    match sensor.stop() {
        Ok(()) => println!("[HYG] Sensor 0x{addr:02x}: Stopped."),
        Err(e) => log::warn!("[HYG] Sensor 0x{addr:02x}: Error stopping: {e}"),
    }
}
