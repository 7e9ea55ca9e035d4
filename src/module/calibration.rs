//! Heading calibration.
//!
//! The angle motor's relative encoder boots with an arbitrary zero. The
//! absolute encoder keeps true heading across power cycles but is offset
//! from the module's forward direction by a fixed mechanical amount.
//! Calibration writes `absolute - offset` into the relative encoder so that
//! its reading of 0 means true forward.

use crate::config::units::Degrees;
use crate::error::{Axis, Error, ModuleError, Result, SensorError};
use crate::hal::{AbsoluteEncoder, Error as _, RelativeEncoder};

/// Outcome of the most recent calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// Never calibrated.
    Uncalibrated,
    /// Relative encoder zero derived from the absolute encoder.
    Calibrated {
        /// Absolute reading used (after inversion).
        absolute: Degrees,
        /// Value written into the relative encoder.
        zero: Degrees,
    },
    /// The last attempt could not read a usable absolute heading.
    ///
    /// Heading accuracy of closed-loop angle commands is undefined until
    /// calibration succeeds.
    Faulted(SensorError),
}

/// Reconciles the absolute encoder with the relative encoder.
#[derive(Debug, Clone)]
pub struct Calibrator {
    offset: Degrees,
    invert: bool,
    status: CalibrationStatus,
}

impl Calibrator {
    /// Create a calibrator for a module with the given offset.
    pub fn new(offset: Degrees, invert: bool) -> Self {
        Self {
            offset,
            invert,
            status: CalibrationStatus::Uncalibrated,
        }
    }

    /// Calibration offset.
    #[inline]
    pub fn offset(&self) -> Degrees {
        self.offset
    }

    /// Result of the last attempt.
    #[inline]
    pub fn status(&self) -> CalibrationStatus {
        self.status
    }

    /// Whether the relative encoder currently reflects true heading.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        matches!(self.status, CalibrationStatus::Calibrated { .. })
    }

    /// Read the absolute encoder and validate the reading.
    ///
    /// # Errors
    ///
    /// `SensorError::Read` if the device fails, `SensorError::OutOfRange` if
    /// it returns something outside `[0, 360]`.
    pub fn read_absolute<A: AbsoluteEncoder>(
        &self,
        sensor: &mut A,
    ) -> core::result::Result<Degrees, SensorError> {
        let raw = sensor
            .absolute_position()
            .map_err(|e| SensorError::Read(e.kind()))?;

        if !raw.is_finite() || !(0.0..=360.0).contains(&raw.0) {
            return Err(SensorError::OutOfRange(raw.0));
        }

        Ok(if self.invert {
            (-raw).normalized()
        } else {
            raw.normalized()
        })
    }

    /// Set the relative encoder zero from the absolute encoder.
    ///
    /// Returns the value written into the relative encoder.
    ///
    /// # Errors
    ///
    /// - `Error::Sensor` if the absolute reading is unusable. The relative
    ///   encoder is left untouched and the status becomes `Faulted`.
    /// - `Error::Module(ZeroWriteFailed)` if the encoder rejects the write.
    ///   The status is left as it was.
    pub fn calibrate<A, E>(&mut self, sensor: &mut A, encoder: &mut E) -> Result<Degrees>
    where
        A: AbsoluteEncoder,
        E: RelativeEncoder,
    {
        let absolute = match self.read_absolute(sensor) {
            Ok(absolute) => absolute,
            Err(fault) => {
                self.status = CalibrationStatus::Faulted(fault);
                return Err(Error::Sensor(fault));
            }
        };

        let zero = (absolute - self.offset).normalized();

        encoder
            .set_position(zero.0)
            .map_err(|_| ModuleError::ZeroWriteFailed(Axis::Angle))?;

        self.status = CalibrationStatus::Calibrated { absolute, zero };
        Ok(zero)
    }
}
