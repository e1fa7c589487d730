//! Scripted input standing in for the board's sensors

use board_physics::demos::DemoKind;
use board_physics::input::{AccelSample, Buttons, InputSample};

/// Accelerometer magnitude used by the tilt sweep, in sensor counts
const TILT_COUNTS: f32 = 48.0;

/// Input pattern replayed frame by frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// Gravity circles around the board, with a constant downward component
    TiltSweep {
        /// Frames per full circle
        period: u32,
    },
    /// Run right then left, jumping and double-jumping on a cycle
    RunAndJump {
        /// Frames spent running in one direction
        leg: u32,
        /// Frames between jumps
        jump_every: u32,
        /// Frames from a jump to its double jump
        double_after: u32,
    },
}

/// A pattern plus an optional exit press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputScript {
    pattern: Pattern,
    reference: f32,
    exit_at: Option<u32>,
}

impl InputScript {
    /// Script with a centred-stick reference of `reference` volts
    pub const fn new(pattern: Pattern, reference: f32) -> Self {
        Self {
            pattern,
            reference,
            exit_at: None,
        }
    }

    /// Default script for a demo
    pub const fn for_demo(kind: DemoKind, reference: f32) -> Self {
        let pattern = match kind {
            DemoKind::Cube => Pattern::TiltSweep { period: 240 },
            DemoKind::Platformer => Pattern::RunAndJump {
                leg: 90,
                jump_every: 45,
                double_after: 12,
            },
        };
        Self::new(pattern, reference)
    }

    /// Press exit on `frame`
    pub const fn with_exit_at(mut self, frame: Option<u32>) -> Self {
        self.exit_at = frame;
        self
    }

    /// Input for `frame`
    pub fn sample(&self, frame: u32) -> InputSample {
        let mut input = InputSample::idle(self.reference);

        match self.pattern {
            Pattern::TiltSweep { period } => {
                let period = period.max(1);
                let angle = std::f32::consts::TAU * (frame % period) as f32 / period as f32;
                input.accel = AccelSample::new(
                    (angle.cos() * TILT_COUNTS) as i16,
                    (angle.sin() * TILT_COUNTS) as i16,
                    TILT_COUNTS as i16 / 2,
                );
            }
            Pattern::RunAndJump {
                leg,
                jump_every,
                double_after,
            } => {
                // low stick runs right, high stick runs left
                let going_right = (frame / leg.max(1)) % 2 == 0;
                input.joystick[0] = if going_right { 0.0 } else { self.reference };

                let phase = frame % jump_every.max(1);
                if phase == 0 || phase == double_after {
                    input.buttons |= Buttons::JUMP;
                }
            }
        }

        if self.exit_at == Some(frame) {
            input.buttons |= Buttons::EXIT;
        }
        input
    }
}
