//! Per-frame input samples
//!
//! The host polls its devices once per frame and hands the kernel a plain
//! [`InputSample`]. Nothing here touches hardware.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// Gravity magnitudes at or below this are treated as no reading
pub const GRAVITY_EPSILON: f32 = 0.001;

/// Raw three-axis accelerometer reading in sensor counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelSample {
    /// Sensor X
    pub x: i16,
    /// Sensor Y
    pub y: i16,
    /// Sensor Z
    pub z: i16,
}

impl AccelSample {
    /// Create a sample
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Reading expressed in body axes
    ///
    /// The sensor is mounted rotated: body X is sensor Y, body Y is
    /// negated sensor Z, body Z is negated sensor X.
    pub fn body_vector(&self) -> Vec3 {
        Vec3::new(
            f32::from(self.y),
            -f32::from(self.z),
            -f32::from(self.x),
        )
    }

    /// Unit gravity direction in body axes, `None` for a null reading
    pub fn gravity_direction(&self) -> Option<Vec3> {
        utils::try_normalize(self.body_vector(), GRAVITY_EPSILON)
    }
}

bitflags! {
    /// Momentary buttons sampled this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        /// Jump (platformer)
        const JUMP = 1 << 0;
        /// Leave the running demo; only the host reads this
        const EXIT = 1 << 1;
    }
}

/// Everything the kernel reads from the outside world in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Accelerometer reading
    pub accel: AccelSample,
    /// Joystick axes in volts
    pub joystick: [f32; 2],
    /// Button states
    pub buttons: Buttons,
}

impl InputSample {
    /// Sample with a centred stick and no buttons
    pub fn idle(reference: f32) -> Self {
        Self {
            joystick: [reference / 2.0; 2],
            ..Self::default()
        }
    }

    /// Joystick axis `index` scaled to `[0, 1]`; out-of-range indices read as centred
    pub fn joystick_axis(&self, index: usize, reference: f32) -> f32 {
        self.joystick
            .get(index)
            .map_or(0.5, |volts| volts / reference)
    }

    /// Whether a button is held
    pub const fn pressed(&self, button: Buttons) -> bool {
        self.buttons.contains(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gravity_remap() {
        let g = AccelSample::new(0, 0, 64).gravity_direction().unwrap();
        assert_relative_eq!(g, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);

        let g = AccelSample::new(0, 10, 0).gravity_direction().unwrap();
        assert_relative_eq!(g, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

        let g = AccelSample::new(5, 0, 0).gravity_direction().unwrap();
        assert_relative_eq!(g, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_null_reading_has_no_direction() {
        assert!(AccelSample::default().gravity_direction().is_none());
    }

    #[test]
    fn test_joystick_axis_normalises() {
        let input = InputSample {
            joystick: [1.4, 0.7],
            ..InputSample::default()
        };
        assert_relative_eq!(input.joystick_axis(0, 1.4), 1.0);
        assert_relative_eq!(input.joystick_axis(1, 1.4), 0.5);
        assert_relative_eq!(input.joystick_axis(7, 1.4), 0.5);
        assert_relative_eq!(InputSample::idle(1.4).joystick_axis(0, 1.4), 0.5);
    }

    #[test]
    fn test_buttons() {
        let input = InputSample {
            buttons: Buttons::JUMP,
            ..InputSample::default()
        };
        assert!(input.pressed(Buttons::JUMP));
        assert!(!input.pressed(Buttons::EXIT));
    }
}
