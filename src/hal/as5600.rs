//! AS5600 magnetic absolute encoder over I2C.
//!
//! The AS5600 reports a 12-bit angle (4096 counts per turn) and a status
//! byte telling whether a magnet is present at a usable distance.

use embedded_hal::i2c::{self, I2c};

use crate::config::units::Degrees;

use super::{AbsoluteEncoder, ErrorKind, ErrorType};

/// Factory I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x36;

/// Counts per full turn.
pub const COUNTS_PER_TURN: u16 = 4096;

const REG_STATUS: u8 = 0x0B;
const REG_RAW_ANGLE: u8 = 0x0C;

const STATUS_MAGNET_HIGH: u8 = 1 << 3;
const STATUS_MAGNET_LOW: u8 = 1 << 4;
const STATUS_MAGNET_DETECTED: u8 = 1 << 5;

/// AS5600 errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum As5600Error<E> {
    /// Underlying bus error.
    I2c(E),
    /// No magnet in range.
    NoMagnet,
    /// Magnet too far away.
    MagnetTooWeak,
    /// Magnet too close.
    MagnetTooStrong,
}

impl<E: i2c::Error> super::Error for As5600Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            As5600Error::I2c(e) => match e.kind() {
                i2c::ErrorKind::NoAcknowledge(_) => ErrorKind::Disconnected,
                i2c::ErrorKind::Bus
                | i2c::ErrorKind::ArbitrationLoss
                | i2c::ErrorKind::Overrun => ErrorKind::Bus,
                _ => ErrorKind::Other,
            },
            As5600Error::NoMagnet | As5600Error::MagnetTooWeak | As5600Error::MagnetTooStrong => {
                ErrorKind::Signal
            }
        }
    }
}

/// AS5600 absolute encoder.
pub struct As5600<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> As5600<I2C> {
    /// Create a driver at the factory address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom address (behind a translator or mux).
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Release the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check magnet placement.
    pub fn check_magnet(&mut self) -> Result<(), As5600Error<I2C::Error>> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(self.address, &[REG_STATUS], &mut status)
            .map_err(As5600Error::I2c)?;

        let status = status[0];
        if status & STATUS_MAGNET_DETECTED == 0 {
            Err(As5600Error::NoMagnet)
        } else if status & STATUS_MAGNET_LOW != 0 {
            Err(As5600Error::MagnetTooWeak)
        } else if status & STATUS_MAGNET_HIGH != 0 {
            Err(As5600Error::MagnetTooStrong)
        } else {
            Ok(())
        }
    }

    /// Read the unscaled angle register.
    ///
    /// The upper nibble is not masked: a value above 4095 means the read was
    /// corrupted and is left for the caller to reject.
    pub fn raw_angle(&mut self) -> Result<u16, As5600Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[REG_RAW_ANGLE], &mut buf)
            .map_err(As5600Error::I2c)?;

        Ok(u16::from_be_bytes(buf))
    }
}

impl<I2C: I2c> ErrorType for As5600<I2C> {
    type Error = As5600Error<I2C::Error>;
}

impl<I2C: I2c> AbsoluteEncoder for As5600<I2C> {
    fn absolute_position(&mut self) -> Result<Degrees, Self::Error> {
        self.check_magnet()?;
        let raw = self.raw_angle()?;
        Ok(Degrees(raw as f32 * 360.0 / COUNTS_PER_TURN as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::Error as _;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const MAGNET_OK: u8 = STATUS_MAGNET_DETECTED;

    #[test]
    fn test_reads_quarter_turn() {
        let expectations = [
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![REG_STATUS], vec![MAGNET_OK]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![REG_RAW_ANGLE], vec![0x04, 0x00]),
        ];
        let mut encoder = As5600::new(I2cMock::new(&expectations));

        let angle = encoder.absolute_position().unwrap();
        assert!((angle.0 - 90.0).abs() < 1e-4);

        encoder.release().done();
    }

    #[test]
    fn test_missing_magnet_is_signal_fault() {
        let expectations = [I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![REG_STATUS],
            vec![0x00],
        )];
        let mut encoder = As5600::new(I2cMock::new(&expectations));

        let err = encoder.absolute_position().unwrap_err();
        assert_eq!(err, As5600Error::NoMagnet);
        assert_eq!(err.kind(), ErrorKind::Signal);

        encoder.release().done();
    }

    #[test]
    fn test_weak_magnet_rejected() {
        let expectations = [I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![REG_STATUS],
            vec![MAGNET_OK | STATUS_MAGNET_LOW],
        )];
        let mut encoder = As5600::new(I2cMock::new(&expectations));

        assert_eq!(
            encoder.absolute_position().unwrap_err(),
            As5600Error::MagnetTooWeak
        );

        encoder.release().done();
    }

    #[test]
    fn test_corrupt_high_nibble_reads_past_full_turn() {
        let expectations = [
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![REG_STATUS], vec![MAGNET_OK]),
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![REG_RAW_ANGLE], vec![0xF0, 0x00]),
        ];
        let mut encoder = As5600::new(I2cMock::new(&expectations));

        let angle = encoder.absolute_position().unwrap();
        assert!(angle.0 > 360.0);

        encoder.release().done();
    }

    #[test]
    fn test_bus_error_maps_to_kind() {
        let expectations = [I2cTransaction::write_read(
            0x40,
            vec![REG_STATUS],
            vec![MAGNET_OK],
        )
        .with_error(i2c::ErrorKind::Bus)];
        let mut encoder = As5600::with_address(I2cMock::new(&expectations), 0x40);

        let err = encoder.absolute_position().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bus);

        encoder.release().done();
    }
}
