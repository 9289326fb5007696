//! Analog axis and 8-way hat state

use glam::Vec2;

use crate::error::{InputError, Result};

/// Magnitude of the raw signed 16-bit joystick axis range
pub const JOYSTICK_AXIS_RANGE: f32 = 32767.0;

/// Raw hat codes reported by the platform (bitmask of up/right/down/left)
pub mod hat {
    pub const CENTERED: u8 = 0x00;
    pub const UP: u8 = 0x01;
    pub const RIGHT: u8 = 0x02;
    pub const DOWN: u8 = 0x04;
    pub const LEFT: u8 = 0x08;
    pub const RIGHT_UP: u8 = RIGHT | UP;
    pub const RIGHT_DOWN: u8 = RIGHT | DOWN;
    pub const LEFT_UP: u8 = LEFT | UP;
    pub const LEFT_DOWN: u8 = LEFT | DOWN;
}

/// Converts a raw axis reading into `[-1.0, 1.0]`
pub fn normalize_axis(raw: i16) -> f32 {
    (raw as f32 / JOYSTICK_AXIS_RANGE).clamp(-1.0, 1.0)
}

/// Maps a raw hat code to a direction vector (y grows downward)
pub fn hat_to_vector(code: u8) -> Result<Vec2> {
    let direction = match code {
        hat::LEFT_UP => Vec2::new(-1.0, -1.0),
        hat::UP => Vec2::new(0.0, -1.0),
        hat::RIGHT_UP => Vec2::new(1.0, -1.0),
        hat::LEFT => Vec2::new(-1.0, 0.0),
        hat::CENTERED => Vec2::ZERO,
        hat::RIGHT => Vec2::new(1.0, 0.0),
        hat::LEFT_DOWN => Vec2::new(-1.0, 1.0),
        hat::DOWN => Vec2::new(0.0, 1.0),
        hat::RIGHT_DOWN => Vec2::new(1.0, 1.0),
        other => return Err(InputError::UnknownHat(other)),
    };
    Ok(direction)
}

/// A single analog axis with the previous frame's value kept for deltas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickAxis {
    value: f32,
    previous_value: f32,
}

impl JoystickAxis {
    pub fn update(&mut self, value: f32) {
        self.value = value;
    }

    pub fn advance_frame(&mut self) {
        self.previous_value = self.value;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn previous_value(&self) -> f32 {
        self.previous_value
    }

    /// Change since the previous frame
    pub fn delta(&self) -> f32 {
        self.value - self.previous_value
    }
}

/// An 8-direction hat switch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickHat {
    value: Vec2,
    previous_value: Vec2,
}

impl JoystickHat {
    pub fn update(&mut self, value: Vec2) {
        self.value = value;
    }

    pub fn advance_frame(&mut self) {
        self.previous_value = self.value;
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    pub fn previous_value(&self) -> Vec2 {
        self.previous_value
    }

    pub fn delta(&self) -> Vec2 {
        self.value - self.previous_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_normalization_extremes() {
        assert!((normalize_axis(32767) - 1.0).abs() < 1e-6);
        assert!((normalize_axis(-32768) + 1.0).abs() < 1e-6);
        assert_eq!(normalize_axis(0), 0.0);
    }

    #[test]
    fn test_axis_normalization_stays_in_range() {
        for raw in [i16::MIN, -16384, -1, 1, 16384, i16::MAX] {
            let value = normalize_axis(raw);
            assert!((-1.0..=1.0).contains(&value), "{raw} -> {value}");
        }
    }

    #[test]
    fn test_hat_codes_map_to_documented_vectors() {
        let table = [
            (hat::LEFT_UP, [-1.0, -1.0]),
            (hat::UP, [0.0, -1.0]),
            (hat::RIGHT_UP, [1.0, -1.0]),
            (hat::LEFT, [-1.0, 0.0]),
            (hat::CENTERED, [0.0, 0.0]),
            (hat::RIGHT, [1.0, 0.0]),
            (hat::LEFT_DOWN, [-1.0, 1.0]),
            (hat::DOWN, [0.0, 1.0]),
            (hat::RIGHT_DOWN, [1.0, 1.0]),
        ];

        for (code, expected) in table {
            let vector = hat_to_vector(code).expect("known hat code");
            assert_eq!(vector, Vec2::from_array(expected), "hat code {code:#x}");
        }
    }

    #[test]
    fn test_unknown_hat_code_is_an_error() {
        // UP | DOWN is not a physical direction
        let err = hat_to_vector(hat::UP | hat::DOWN).unwrap_err();
        assert!(matches!(err, InputError::UnknownHat(0x05)));
        assert!(hat_to_vector(0xff).is_err());
    }

    #[test]
    fn test_axis_delta_tracks_previous_frame() {
        let mut axis = JoystickAxis::default();
        axis.update(0.5);
        assert_eq!(axis.delta(), 0.5);

        axis.advance_frame();
        assert_eq!(axis.delta(), 0.0);

        axis.update(-0.25);
        assert_eq!(axis.previous_value(), 0.5);
        assert_eq!(axis.delta(), -0.75);
    }

    #[test]
    fn test_hat_delta_tracks_previous_frame() {
        let mut hat = JoystickHat::default();
        hat.update(Vec2::new(1.0, 0.0));
        hat.advance_frame();
        hat.update(Vec2::new(1.0, 1.0));
        assert_eq!(hat.delta(), Vec2::new(0.0, 1.0));
    }
}
