//! Minimal-rotation state optimization.

use libm::fabsf;

use crate::config::units::Degrees;

use super::state::ModuleState;

/// Largest steering move before reversing the wheel is cheaper.
///
/// A difference of exactly this many degrees is not flipped.
pub const FLIP_THRESHOLD: Degrees = Degrees(90.0);

/// Result of [`optimize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimized {
    /// Equivalent state with the heading normalized.
    pub state: ModuleState,
    /// The same heading expressed next to `current`: `current + delta`
    /// with `|delta| <= 90`. This is what goes to the angle motor.
    pub setpoint: Degrees,
    flipped: bool,
}

impl Optimized {
    /// Whether the wheel direction was reversed.
    ///
    /// Set from the steering decision, so it holds at zero speed too.
    pub fn flipped(&self) -> bool {
        self.flipped
    }
}

/// Pick the equivalent of `desired` that needs the least steering from
/// `current`.
///
/// `current` may be unbounded (a relative encoder that has wound past one
/// turn); the returned setpoint stays in that continuous domain so the
/// angle loop never unwinds.
pub fn optimize(desired: ModuleState, current: Degrees) -> Optimized {
    let mut delta = desired.heading().delta_from(current).0;
    let mut speed = desired.speed();
    let flipped = fabsf(delta) > FLIP_THRESHOLD.0;

    if flipped {
        delta = if delta > 0.0 { delta - 180.0 } else { delta + 180.0 };
        speed = -speed;
    }

    let setpoint = Degrees(current.0 + delta);

    Optimized {
        state: ModuleState::new(speed, setpoint),
        setpoint,
        flipped,
    }
}
