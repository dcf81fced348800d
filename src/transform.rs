//! Model and projection matrices for the spinning object.

use std::time::Duration;

use glam::{Mat4, Vec3};

/// Rotation angle in radians after `elapsed` at `speed` radians per second.
///
/// The angle grows without bound; the trigonometry in the rotation handles wrapping.
pub fn rotation_angle(elapsed: Duration, speed: f32) -> f32 {
    elapsed.as_secs_f32() * speed
}

/// Pushes the object `distance` units away from the camera, then rotates it about the Y axis
/// by `angle` and about the X axis by half of it.
pub fn model_matrix(angle: f32, distance: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -distance))
        * Mat4::from_rotation_y(angle)
        * Mat4::from_rotation_x(angle * 0.5)
}

/// Right-handed GL perspective projection. `fov` is the vertical field of view in degrees.
pub fn projection_matrix(fov: f32, width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    Mat4::perspective_rh_gl(fov.to_radians(), aspect, 0.1, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rotation_at_start() {
        let angle = rotation_angle(Duration::ZERO, 3.0);
        assert_eq!(angle, 0.0);
        let model = model_matrix(angle, 4.0);
        assert!(model.abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)), 1e-6));
    }

    #[test]
    fn test_angle_is_monotonic() {
        let mut last = 0.0;
        for ms in (0..5000).step_by(16) {
            let angle = rotation_angle(Duration::from_millis(ms), 0.75);
            assert!(angle >= last);
            last = angle;
        }
    }

    #[test]
    fn test_doubling_speed_doubles_angle() {
        let t = Duration::from_millis(2750);
        let a = rotation_angle(t, 1.3);
        let b = rotation_angle(t, 2.6);
        assert!((b - 2.0 * a).abs() < 1e-5);
    }

    #[test]
    fn test_translation_survives_rotation() {
        let model = model_matrix(1.234, 6.0);
        let origin = model.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -6.0), 1e-6));
    }

    #[test]
    fn test_second_axis_uses_half_angle() {
        // At angle 2π the Y rotation is a full turn while the X rotation is a half turn.
        let model = model_matrix(std::f32::consts::TAU, 0.0);
        let up = model.transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn test_projection_survives_zero_height() {
        let projection = projection_matrix(45.0, 640, 0);
        assert!(projection.is_finite());
    }
}
