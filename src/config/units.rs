//! Unit types for physical quantities.
//!
//! Provides type-safe representations of headings, distances and wheel
//! speeds to prevent unit confusion at compile time.

use core::ops::{Add, Mul, Neg, Sub};

use libm::fmodf;
use serde::Deserialize;

/// Angle in degrees.
///
/// Headings are periodic with period 360. Raw values may be unbounded (a
/// relative encoder accumulates past one turn); use [`Degrees::normalized`]
/// or [`Degrees::wrapped`] before comparing two headings.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Zero heading (true forward).
    pub const ZERO: Self = Self(0.0);

    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Create from radians.
    #[inline]
    pub fn from_radians(radians: f32) -> Self {
        Self(radians.to_degrees())
    }

    /// Map into the canonical heading range `[0, 360)`.
    pub fn normalized(self) -> Self {
        let mut d = fmodf(self.0, 360.0);
        if d < 0.0 {
            d += 360.0;
        }
        // -1e-6 % 360 + 360 rounds to exactly 360.0 in f32
        if d >= 360.0 {
            d -= 360.0;
        }
        Self(d)
    }

    /// Map into the signed range `(-180, 180]`.
    pub fn wrapped(self) -> Self {
        let mut d = fmodf(self.0, 360.0);
        if d <= -180.0 {
            d += 360.0;
        } else if d > 180.0 {
            d -= 360.0;
        }
        Self(d)
    }

    /// Signed shortest rotation from `from` to `self`, in `(-180, 180]`.
    #[inline]
    pub fn delta_from(self, from: Degrees) -> Self {
        (self - from).wrapped()
    }

    /// Check whether the value is a usable number.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Linear distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f32);

impl Meters {
    /// Create a new Meters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Wheel surface speed in meters per second (signed).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct MetersPerSec(pub f32);

impl MetersPerSec {
    /// Stationary.
    pub const ZERO: Self = Self(0.0);

    /// Create a new MetersPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Magnitude regardless of direction.
    #[inline]
    pub fn abs(self) -> f32 {
        libm::fabsf(self.0)
    }
}

impl Neg for MetersPerSec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<f32> for MetersPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
    /// Convert to Meters.
    fn meters(self) -> Meters;
    /// Convert to MetersPerSec.
    fn meters_per_sec(self) -> MetersPerSec;
}

impl UnitExt for f32 {
    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }

    #[inline]
    fn meters(self) -> Meters {
        Meters(self)
    }

    #[inline]
    fn meters_per_sec(self) -> MetersPerSec {
        MetersPerSec(self)
    }
}
