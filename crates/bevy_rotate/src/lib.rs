//! Minimal rotation state for UI entities.
//!
//! [`Rotation`] stores an accumulated angle in degrees on an entity. The
//! angle is plain data: whoever animates it decides when and how much it
//! advances, and a projection layer turns it into a transform via
//! [`Rotation::to_quat`] when drawing. Angles are not normalized, so a
//! long-running spin keeps counting past 360.

use bevy_app::{App, Plugin};
use bevy_ecs::prelude::*;
use bevy_math::Quat;

/// Accumulated rotation of an entity, in degrees.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    /// Advance the angle by `delta` degrees.
    pub fn rotate_by(&mut self, delta: f32) {
        self.degrees += delta;
    }

    /// Snap the angle to an absolute value in degrees.
    pub fn rotate_to(&mut self, degrees: f32) {
        self.degrees = degrees;
    }

    #[must_use]
    pub fn as_radians(&self) -> f32 {
        self.degrees.to_radians()
    }

    /// Quaternion about the Z axis for the current angle.
    #[must_use]
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_z(self.as_radians())
    }
}

/// Lightweight plugin marker for rotation support.
///
/// The crate registers no systems of its own: integrators advance
/// [`Rotation`] from their own animation systems so stepping lands exactly
/// where they need in schedule ordering.
#[derive(Default)]
pub struct RotatePlugin;

impl Plugin for RotatePlugin {
    fn build(&self, _app: &mut App) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_by_accumulates_without_wraparound() {
        let mut rotation = Rotation::default();
        for _ in 0..30 {
            rotation.rotate_by(15.0);
        }
        assert_eq!(rotation.degrees, 450.0);
    }

    #[test]
    fn rotate_to_is_absolute() {
        let mut rotation = Rotation::new(123.0);
        rotation.rotate_to(0.0);
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn to_quat_matches_radian_conversion() {
        let rotation = Rotation::new(90.0);
        let quat = rotation.to_quat();
        assert!((quat.to_axis_angle().1 - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
