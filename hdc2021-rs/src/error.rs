use core::fmt;

#[derive(Debug)]
/// Represents errors that can occur while interacting with the HDC2021 sensor.
pub enum Error<E> {
    /// The device did not acknowledge the reset that begins initialization,
    /// or an operation was attempted without a successful initialization.
    NotConnected,
    /// A bus transaction failed after the device had acknowledged its reset.
    NotResponding(E),
    /// The device answered the identity read with words other than the
    /// HDC2021's manufacturer and device IDs.
    IdMismatch {
        /// Manufacturer ID word the device reported.
        manufacturer: u16,
        /// Device ID word the device reported.
        device: u16,
    },
}

impl<E> Error<E> {
    /// Fixed diagnostic description of the error kind.
    pub const fn description(&self) -> &'static str {
        match self {
            Error::NotConnected => "HDC2021 not connected",
            Error::NotResponding(_) => "HDC2021 not responding",
            Error::IdMismatch { .. } => "HDC2021 ID mismatch",
        }
    }
}

impl<E> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IdMismatch {
                manufacturer,
                device,
            } => write!(
                f,
                "{} (manufacturer 0x{manufacturer:04X}, device 0x{device:04X})",
                self.description()
            ),
            _ => f.write_str(self.description()),
        }
    }
}
