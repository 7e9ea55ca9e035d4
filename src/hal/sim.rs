//! Simulated hardware for host-side tests and demos.
//!
//! [`SimMotor`] stands in for a smart motor controller: it records the last
//! command and, unless frozen, jumps straight to whatever setpoint it was
//! given. [`SimAbsoluteEncoder`] returns a fixed reading or a fixed fault.

use crate::config::units::Degrees;

use super::{
    AbsoluteEncoder, ControlMode, ErrorKind, ErrorType, MotorController, MotorSettings,
    RelativeEncoder,
};

/// Last command received by a [`SimMotor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Nothing commanded yet.
    None,
    /// Open-loop output fraction.
    PercentOutput(f32),
    /// Closed-loop position setpoint.
    Position {
        /// Target position
        setpoint: f32,
        /// Feedforward term
        feedforward: f32,
    },
    /// Closed-loop velocity setpoint.
    Velocity {
        /// Target velocity
        setpoint: f32,
        /// Feedforward term
        feedforward: f32,
    },
}

/// Simulated smart motor controller.
#[derive(Debug, Clone)]
pub struct SimMotor {
    position: f32,
    velocity: f32,
    settings: Option<MotorSettings>,
    last_command: Command,
    command_count: u32,
    fault: Option<ErrorKind>,
    follow_setpoints: bool,
    free_speed: f32,
}

impl Default for SimMotor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimMotor {
    /// A motor that reaches every setpoint instantly.
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            settings: None,
            last_command: Command::None,
            command_count: 0,
            fault: None,
            follow_setpoints: true,
            free_speed: 0.0,
        }
    }

    /// A motor whose measurements only change through `set_measured_*`.
    pub fn frozen() -> Self {
        Self {
            follow_setpoints: false,
            ..Self::new()
        }
    }

    /// Velocity reached at full open-loop output.
    pub fn with_free_speed(mut self, free_speed: f32) -> Self {
        self.free_speed = free_speed;
        self
    }

    /// Inject a measured position.
    pub fn set_measured_position(&mut self, position: f32) {
        self.position = position;
    }

    /// Inject a measured velocity.
    pub fn set_measured_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Make every following write fail with `kind`.
    pub fn inject_fault(&mut self, kind: ErrorKind) {
        self.fault = Some(kind);
    }

    /// Accept writes again.
    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// Settings applied by the last `configure`.
    pub fn settings(&self) -> Option<&MotorSettings> {
        self.settings.as_ref()
    }

    /// Last accepted command.
    pub fn last_command(&self) -> Command {
        self.last_command
    }

    /// Number of accepted commands.
    pub fn command_count(&self) -> u32 {
        self.command_count
    }

    fn check(&self) -> Result<(), ErrorKind> {
        match self.fault {
            Some(kind) => Err(kind),
            None => Ok(()),
        }
    }

    fn accept(&mut self, command: Command) {
        self.last_command = command;
        self.command_count += 1;

        if !self.follow_setpoints {
            return;
        }

        match command {
            Command::PercentOutput(output) => self.velocity = output.clamp(-1.0, 1.0) * self.free_speed,
            Command::Position { setpoint, .. } => self.position = setpoint,
            Command::Velocity { setpoint, .. } => self.velocity = setpoint,
            Command::None => {}
        }
    }
}

impl ErrorType for SimMotor {
    type Error = ErrorKind;
}

impl RelativeEncoder for SimMotor {
    fn position(&self) -> f32 {
        self.position
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn set_position(&mut self, position: f32) -> Result<(), Self::Error> {
        self.check()?;
        self.position = position;
        Ok(())
    }
}

impl MotorController for SimMotor {
    fn configure(&mut self, settings: &MotorSettings) -> Result<(), Self::Error> {
        self.check()?;
        self.settings = Some(*settings);
        Ok(())
    }

    fn set_percent_output(&mut self, output: f32) -> Result<(), Self::Error> {
        self.check()?;
        self.accept(Command::PercentOutput(output));
        Ok(())
    }

    fn set_reference(
        &mut self,
        setpoint: f32,
        mode: ControlMode,
        feedforward: f32,
    ) -> Result<(), Self::Error> {
        self.check()?;
        let command = match mode {
            ControlMode::Position => Command::Position {
                setpoint,
                feedforward,
            },
            ControlMode::Velocity => Command::Velocity {
                setpoint,
                feedforward,
            },
        };
        self.accept(command);
        Ok(())
    }
}

/// Simulated absolute encoder.
#[derive(Debug, Clone, Copy)]
pub struct SimAbsoluteEncoder {
    reading: Result<f32, ErrorKind>,
}

impl SimAbsoluteEncoder {
    /// An encoder that reads `degrees`.
    pub fn new(degrees: f32) -> Self {
        Self {
            reading: Ok(degrees),
        }
    }

    /// An encoder that fails every read with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self { reading: Err(kind) }
    }

    /// Change the reading (the wheel was turned by hand).
    pub fn set_reading(&mut self, degrees: f32) {
        self.reading = Ok(degrees);
    }

    /// Make reads fail.
    pub fn set_fault(&mut self, kind: ErrorKind) {
        self.reading = Err(kind);
    }
}

impl ErrorType for SimAbsoluteEncoder {
    type Error = ErrorKind;
}

impl AbsoluteEncoder for SimAbsoluteEncoder {
    fn absolute_position(&mut self) -> Result<Degrees, Self::Error> {
        self.reading.map(Degrees)
    }
}
