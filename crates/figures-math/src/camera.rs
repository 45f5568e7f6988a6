//! Camera (view) transform.
//!
//! A camera is a position plus an orthonormal basis. The view matrix is
//! `C1 * C2`, where `C2` translates the world so the camera sits at the origin
//! and `C1` rotates the world into the camera basis (rows `right`, `up`,
//! `forward`). View-space `+z` is the viewing direction.

use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Camera {
    /// Creates a camera from an explicit basis. The basis is not normalized.
    pub fn from_basis(position: Vec3, right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self { position, right, up, forward }
    }

    /// Creates a camera from a heading `phi` and an elevation `theta`, both in
    /// radians.
    ///
    /// `right = (-cos phi, 0, sin phi)`,
    /// `forward = (sin phi cos theta, sin theta, cos theta cos phi)`,
    /// `up = right x forward`.
    pub fn from_angles(position: Vec3, phi: f32, theta: f32) -> Self {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let right = Vec3::new(-cos_phi, 0.0, sin_phi);
        let forward = Vec3::new(sin_phi * cos_theta, sin_theta, cos_theta * cos_phi);
        let up = right.cross(forward);

        Self { position, right, up, forward }
    }

    /// `C1`: rows 0..3 hold `right`, `up`, `forward`.
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            Vec4::W,
        )
        .transpose()
    }

    /// `C2`: moves the camera position to the origin.
    pub fn translation(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// `C1 * C2`.
    pub fn view_matrix(&self) -> Mat4 {
        self.rotation() * self.translation()
    }

    /// Transforms a homogeneous world-space point into view space.
    pub fn to_view(&self, world: Vec4) -> Vec4 {
        self.rotation() * (self.translation() * world)
    }

    /// Whether the basis vectors are unit length and mutually perpendicular
    /// within `eps`.
    pub fn is_orthonormal(&self, eps: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() <= eps;
        unit(self.right)
            && unit(self.up)
            && unit(self.forward)
            && self.right.dot(self.up).abs() <= eps
            && self.right.dot(self.forward).abs() <= eps
            && self.up.dot(self.forward).abs() <= eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec4(a: Vec4, b: Vec4) {
        for i in 0..4 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-5);
        }
    }

    fn front() -> Camera {
        Camera::from_basis(Vec3::new(6.0, 0.0, 6.0), Vec3::X, Vec3::Y, Vec3::NEG_Z)
    }

    #[test]
    fn rotation_rows_are_the_basis() {
        let cam = front();
        let c1 = cam.rotation();
        assert_eq!(c1.row(0), Vec4::X);
        assert_eq!(c1.row(1), Vec4::Y);
        assert_eq!(c1.row(2), Vec4::NEG_Z);
        assert_eq!(c1.row(3), Vec4::W);
    }

    #[test]
    fn translation_negates_position() {
        let c2 = front().translation();
        assert_eq!(c2.col(3), Vec4::new(-6.0, 0.0, -6.0, 1.0));
        assert_eq!(c2.col(0), Vec4::X);
    }

    #[test]
    fn camera_position_maps_to_origin() {
        let cam = front();
        let origin = cam.to_view(cam.position.extend(1.0));
        assert_vec4(origin, Vec4::W);
    }

    #[test]
    fn world_point_in_front_of_camera_has_positive_depth() {
        let v = front().to_view(Vec4::new(2.0, -3.0, 2.0, 1.0));
        assert_vec4(v, Vec4::new(-4.0, -3.0, 4.0, 1.0));
    }

    #[test]
    fn view_matrix_matches_two_step_transform() {
        let cam = Camera::from_angles(
            Vec3::new(13.0, 0.0, 6.0),
            210f32.to_radians(),
            10f32.to_radians(),
        );
        let world = Vec4::new(6.0, 3.0, 2.0, 1.0);
        assert_vec4(cam.view_matrix() * world, cam.to_view(world));
    }

    #[test]
    fn angle_basis_is_orthonormal() {
        let cam = Camera::from_angles(Vec3::ZERO, 210f32.to_radians(), 10f32.to_radians());
        assert!(cam.is_orthonormal(1e-5));
        assert_relative_eq!(cam.right.x, 210f32.to_radians().cos() * -1.0, epsilon = 1e-6);
        assert_relative_eq!(cam.forward.y, 10f32.to_radians().sin(), epsilon = 1e-6);
    }

    #[test]
    fn angles_zero_look_down_positive_z() {
        let cam = Camera::from_angles(Vec3::ZERO, 0.0, 0.0);
        assert_vec4(cam.forward.extend(0.0), Vec4::Z);
        assert_vec4(cam.right.extend(0.0), Vec4::NEG_X);
        // right x forward = (-x) x z = y
        assert_vec4(cam.up.extend(0.0), Vec4::Y);
    }

    #[test]
    fn skewed_basis_is_not_orthonormal() {
        let cam = Camera::from_basis(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Z);
        assert!(!cam.is_orthonormal(1e-4));
    }
}
