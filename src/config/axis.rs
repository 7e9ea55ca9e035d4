//! Per-axis motor tuning: gains, current limits and neutral behavior.

use serde::Deserialize;

/// What the motor does when commanded to zero output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeutralMode {
    /// Short the windings; the wheel resists motion.
    #[default]
    Brake,
    /// Let the rotor spin freely.
    Coast,
}

/// Closed-loop gains loaded onto the motor controller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    #[serde(default)]
    pub kp: f32,
    /// Integral gain.
    #[serde(default)]
    pub ki: f32,
    /// Derivative gain.
    #[serde(default)]
    pub kd: f32,
    /// Controller-side velocity feedforward gain.
    #[serde(default)]
    pub kf: f32,
}

impl PidGains {
    /// Create a gain set.
    pub const fn new(kp: f32, ki: f32, kd: f32, kf: f32) -> Self {
        Self { kp, ki, kd, kf }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = f32> {
        [self.kp, self.ki, self.kd, self.kf].into_iter()
    }
}

/// Static / velocity / acceleration friction model coefficients.
///
/// Expressed in percent output (volts divided by the compensation voltage).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct FeedforwardGains {
    /// Output needed to overcome static friction.
    #[serde(default)]
    pub ks: f32,
    /// Output per m/s.
    #[serde(default)]
    pub kv: f32,
    /// Output per m/s².
    #[serde(default)]
    pub ka: f32,
}

/// Motor current limiting.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurrentLimit {
    /// Continuous current limit in amps.
    pub continuous_amps: f32,
    /// Peak current allowed for `peak_duration_s`.
    #[serde(default)]
    pub peak_amps: f32,
    /// Time the peak may be sustained, in seconds.
    #[serde(default)]
    pub peak_duration_s: f32,
    /// Whether limiting is enabled at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Drive (wheel) motor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DriveConfig {
    /// Motor turns per wheel turn.
    pub gear_ratio: f32,
    /// Invert motor direction.
    #[serde(default)]
    pub invert: bool,
    /// Neutral behavior.
    #[serde(default)]
    pub neutral_mode: NeutralMode,
    /// Current limiting.
    pub current_limit: CurrentLimit,
    /// Velocity loop gains.
    #[serde(default)]
    pub pid: PidGains,
    /// Closed-loop feedforward model.
    #[serde(default)]
    pub feedforward: FeedforwardGains,
    /// Seconds from zero to full output in open loop.
    #[serde(default)]
    pub open_loop_ramp_s: f32,
    /// Seconds from zero to full output in closed loop.
    #[serde(default)]
    pub closed_loop_ramp_s: f32,
}

/// Angle (steering) motor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AngleConfig {
    /// Motor turns per module turn.
    pub gear_ratio: f32,
    /// Invert motor direction.
    #[serde(default)]
    pub invert: bool,
    /// Neutral behavior.
    #[serde(default = "default_angle_neutral")]
    pub neutral_mode: NeutralMode,
    /// Current limiting.
    pub current_limit: CurrentLimit,
    /// Position loop gains.
    #[serde(default)]
    pub pid: PidGains,
}

fn default_angle_neutral() -> NeutralMode {
    NeutralMode::Coast
}
