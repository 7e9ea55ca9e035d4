//! Module state and position value types.

use libm::{cosf, sinf};

use crate::config::units::{Degrees, Meters, MetersPerSec};

/// Wheel speed and heading.
///
/// The heading is always stored in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModuleState {
    speed: MetersPerSec,
    heading: Degrees,
}

impl ModuleState {
    /// Create a state, normalizing the heading.
    #[inline]
    pub fn new(speed: MetersPerSec, heading: Degrees) -> Self {
        Self {
            speed,
            heading: heading.normalized(),
        }
    }

    /// Signed wheel speed.
    #[inline]
    pub fn speed(&self) -> MetersPerSec {
        self.speed
    }

    /// Heading in `[0, 360)`.
    #[inline]
    pub fn heading(&self) -> Degrees {
        self.heading
    }

    /// Wheel contact velocity in the module frame, `(x, y)` in m/s.
    pub fn velocity(&self) -> (f32, f32) {
        let theta = self.heading.to_radians();
        (self.speed.0 * cosf(theta), self.speed.0 * sinf(theta))
    }
}

/// Distance travelled and heading, for odometry.
///
/// `distance` is whatever the drive encoder accumulated since it was last
/// zeroed and may go backwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModulePosition {
    distance: Meters,
    heading: Degrees,
}

impl ModulePosition {
    /// Create a position, normalizing the heading.
    #[inline]
    pub fn new(distance: Meters, heading: Degrees) -> Self {
        Self {
            distance,
            heading: heading.normalized(),
        }
    }

    /// Cumulative wheel travel.
    #[inline]
    pub fn distance(&self) -> Meters {
        self.distance
    }

    /// Heading in `[0, 360)`.
    #[inline]
    pub fn heading(&self) -> Degrees {
        self.heading
    }
}
