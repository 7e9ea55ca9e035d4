//! Angle and drive control loops.
//!
//! Both loops run on the motor controllers themselves; this side only picks
//! the setpoint and the feedforward term for each cycle.

use crate::config::units::{Degrees, MetersPerSec};
use crate::config::FeedforwardGains;
use crate::error::{ActuatorError, Axis, Result};
use crate::hal::{ControlMode, Error as _, MotorController};

use super::optimize::Optimized;

/// How the drive motor is commanded on a given cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Output fraction `speed / max_speed`, no feedback. Teleop driving.
    OpenLoop,
    /// Onboard velocity loop plus feedforward. Path following.
    ClosedLoop,
}

/// `ks * sign(v) + kv * v + ka * a`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimpleMotorFeedforward {
    /// Static friction term.
    pub ks: f32,
    /// Velocity term.
    pub kv: f32,
    /// Acceleration term.
    pub ka: f32,
}

impl SimpleMotorFeedforward {
    /// Create a feedforward model.
    pub const fn new(ks: f32, kv: f32, ka: f32) -> Self {
        Self { ks, kv, ka }
    }

    /// Feedforward at constant `velocity`.
    #[inline]
    pub fn calculate(&self, velocity: f32) -> f32 {
        self.calculate_with_acceleration(velocity, 0.0)
    }

    /// Feedforward at `velocity` while accelerating at `acceleration`.
    pub fn calculate_with_acceleration(&self, velocity: f32, acceleration: f32) -> f32 {
        // f32::signum(0.0) is 1.0; a stopped wheel needs no static term
        let sign = if velocity > 0.0 {
            1.0
        } else if velocity < 0.0 {
            -1.0
        } else {
            0.0
        };

        self.ks * sign + self.kv * velocity + self.ka * acceleration
    }
}

impl From<FeedforwardGains> for SimpleMotorFeedforward {
    fn from(gains: FeedforwardGains) -> Self {
        Self::new(gains.ks, gains.kv, gains.ka)
    }
}

/// Steering position loop with anti-jitter hold.
#[derive(Debug, Clone)]
pub struct AngleLoop {
    jitter_speed: f32,
    last_commanded: Degrees,
}

impl AngleLoop {
    /// Create the loop. `jitter_speed` is the speed magnitude at or below
    /// which steering holds; `initial` seeds the held heading.
    pub fn new(jitter_speed: f32, initial: Degrees) -> Self {
        Self {
            jitter_speed,
            last_commanded: initial,
        }
    }

    /// Most recent heading actually sent to the angle motor.
    #[inline]
    pub fn last_commanded(&self) -> Degrees {
        self.last_commanded
    }

    /// Speed threshold of the anti-jitter hold.
    #[inline]
    pub fn jitter_speed(&self) -> f32 {
        self.jitter_speed
    }

    /// Re-seed the held heading (after the encoder zero moved).
    pub fn reset(&mut self, heading: Degrees) {
        self.last_commanded = heading;
    }

    /// Heading this cycle should command.
    pub fn target(&self, optimized: &Optimized) -> Degrees {
        if optimized.state.speed().abs() <= self.jitter_speed {
            self.last_commanded
        } else {
            optimized.setpoint
        }
    }

    /// Send the position setpoint. The held heading only moves once the
    /// motor has accepted the command.
    pub fn command<M: MotorController>(
        &mut self,
        motor: &mut M,
        optimized: &Optimized,
    ) -> Result<Degrees> {
        let target = self.target(optimized);

        motor
            .set_reference(target.0, ControlMode::Position, 0.0)
            .map_err(|e| ActuatorError {
                axis: Axis::Angle,
                kind: e.kind(),
            })?;

        self.last_commanded = target;
        Ok(target)
    }
}

/// Wheel velocity loop.
#[derive(Debug, Clone)]
pub struct DriveLoop {
    max_speed: MetersPerSec,
    feedforward: SimpleMotorFeedforward,
}

impl DriveLoop {
    /// Create the loop.
    pub fn new(max_speed: MetersPerSec, feedforward: SimpleMotorFeedforward) -> Self {
        Self {
            max_speed,
            feedforward,
        }
    }

    /// Feedforward model used in closed loop.
    #[inline]
    pub fn feedforward(&self) -> &SimpleMotorFeedforward {
        &self.feedforward
    }

    /// Open-loop output for `speed`. Not clamped; the controller saturates.
    #[inline]
    pub fn percent_output(&self, speed: MetersPerSec) -> f32 {
        speed.0 / self.max_speed.0
    }

    /// Command the drive motor for this cycle.
    pub fn command<M: MotorController>(
        &self,
        motor: &mut M,
        speed: MetersPerSec,
        mode: DriveMode,
    ) -> Result<()> {
        let result = match mode {
            DriveMode::OpenLoop => motor.set_percent_output(self.percent_output(speed)),
            DriveMode::ClosedLoop => motor.set_reference(
                speed.0,
                ControlMode::Velocity,
                self.feedforward.calculate(speed.0),
            ),
        };

        result.map_err(|e| {
            ActuatorError {
                axis: Axis::Drive,
                kind: e.kind(),
            }
            .into()
        })
    }
}
