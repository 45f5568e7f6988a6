//! Perspective projection.
//!
//! Follows the OpenGL clip-space convention: view-space depth `near` maps to
//! NDC depth `-1`, depth `far` maps to `+1`, and the camera looks down `+z`
//! in view space (the fourth row copies `z` into `w`).

use glam::{Mat4, Vec3, Vec4};

/// Vertical field of view used by both figure programs (90 degrees).
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_2;
/// Near plane distance used by both figure programs.
pub const DEFAULT_NEAR: f32 = 0.5;
/// Far plane distance used by both figure programs.
pub const DEFAULT_FAR: f32 = 10.5;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width divided by height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Creates a projection.
    ///
    /// `near` must be positive and smaller than `far`; `fov_y` must lie in
    /// `(0, PI)`.
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(fov_y > 0.0 && fov_y < std::f32::consts::PI);
        debug_assert!(near > 0.0 && near < far);
        debug_assert!(aspect > 0.0);
        Self { fov_y, aspect, near, far }
    }

    /// Creates a projection whose aspect ratio matches a `width` x `height`
    /// drawable.
    pub fn from_window(fov_y: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Self::new(fov_y, aspect, near, far)
    }

    /// The three rows of the 3x4 projection used for the manual divide.
    ///
    /// ```text
    /// | h/(w tan(fov/2))  0             0              0            |
    /// | 0                 1/tan(fov/2)  0              0            |
    /// | 0                 0             (f+n)/(f-n)   -2fn/(f-n)    |
    /// ```
    pub fn rows_3x4(&self) -> [Vec4; 3] {
        let t = (self.fov_y / 2.0).tan();
        let (n, f) = (self.near, self.far);

        [
            Vec4::new(1.0 / (self.aspect * t), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0 / t, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (f + n) / (f - n), -2.0 * f * n / (f - n)),
        ]
    }

    /// The full 4x4 projection: the 3x4 rows plus `P[3][2] = 1`.
    pub fn matrix(&self) -> Mat4 {
        let [r0, r1, r2] = self.rows_3x4();
        // glam is column-major; build from rows and transpose.
        Mat4::from_cols(r0, r1, r2, Vec4::Z).transpose()
    }

    /// Projects a view-space point with the 3x4 matrix and divides by its
    /// depth, yielding normalized device coordinates.
    ///
    /// Returns `None` for points on the `z = 0` plane.
    pub fn project_direct(&self, v: Vec4) -> Option<Vec3> {
        if v.z == 0.0 {
            return None;
        }

        let [r0, r1, r2] = self.rows_3x4();
        let ndc = Vec3::new(r0.dot(v), r1.dot(v), r2.dot(v)) / v.z;
        ndc.is_finite().then_some(ndc)
    }

    /// Transforms a view-space point into clip space. The perspective divide
    /// is left to the rasterizer.
    pub fn to_clip(&self, v: Vec4) -> Vec4 {
        self.matrix() * v
    }
}

impl Default for Projection {
    /// 90 degree FOV, 640x480 aspect, planes at 0.5 and 10.5.
    fn default() -> Self {
        Self::from_window(DEFAULT_FOV_Y, 640, 480, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec3(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-5);
        }
    }

    #[test]
    fn default_rows_match_hand_derivation() {
        let [r0, r1, r2] = Projection::default().rows_3x4();

        // tan(45 deg) = 1, so only the aspect ratio remains in P[0][0].
        assert_relative_eq!(r0.x, 480.0 / 640.0, epsilon = 1e-6);
        assert_relative_eq!(r1.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(r2.z, 1.1, epsilon = 1e-6);
        assert_relative_eq!(r2.w, -1.05, epsilon = 1e-6);

        assert_eq!([r0.y, r0.z, r0.w], [0.0; 3]);
        assert_eq!([r1.x, r1.z, r1.w], [0.0; 3]);
        assert_eq!([r2.x, r2.y], [0.0; 2]);
    }

    #[test]
    fn matrix_copies_depth_into_w() {
        let p = Projection::default();
        let m = p.matrix();

        assert_eq!(m.row(3), Vec4::Z);
        let [r0, r1, r2] = p.rows_3x4();
        assert_eq!(m.row(0), r0);
        assert_eq!(m.row(1), r1);
        assert_eq!(m.row(2), r2);
    }

    #[test]
    fn near_and_far_planes_map_to_ndc_bounds() {
        let p = Projection::default();

        let near = p.project_direct(Vec4::new(0.0, 0.0, p.near, 1.0)).unwrap();
        let far = p.project_direct(Vec4::new(0.0, 0.0, p.far, 1.0)).unwrap();

        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn project_direct_divides_by_depth() {
        let p = Projection::default();

        let at_one = p.project_direct(Vec4::new(-1.0, -1.0, 1.0, 1.0)).unwrap();
        assert_vec3(at_one, Vec3::new(-0.75, -1.0, 0.05));

        let at_nine = p.project_direct(Vec4::new(-1.0, -1.0, 9.0, 1.0)).unwrap();
        assert_vec3(at_nine, Vec3::new(-0.75 / 9.0, -1.0 / 9.0, 8.85 / 9.0));
    }

    #[test]
    fn project_direct_rejects_zero_depth() {
        let p = Projection::default();
        assert!(p.project_direct(Vec4::new(1.0, 1.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn clip_then_divide_matches_direct_projection() {
        let p = Projection::default();
        let v = Vec4::new(0.3, -0.7, 4.0, 1.0);

        let clip = p.to_clip(v);
        assert_relative_eq!(clip.w, v.z, epsilon = 1e-6);

        let direct = p.project_direct(v).unwrap();
        assert_vec3(clip.truncate() / clip.w, direct);
    }

    #[test]
    fn from_window_guards_zero_height() {
        let p = Projection::from_window(DEFAULT_FOV_Y, 640, 0, DEFAULT_NEAR, DEFAULT_FAR);
        assert_relative_eq!(p.aspect, 640.0, epsilon = 1e-6);
    }

    #[test]
    fn wider_aspect_squeezes_x() {
        let square = Projection::from_window(DEFAULT_FOV_Y, 480, 480, DEFAULT_NEAR, DEFAULT_FAR);
        let wide = Projection::from_window(DEFAULT_FOV_Y, 960, 480, DEFAULT_NEAR, DEFAULT_FAR);
        assert!(wide.rows_3x4()[0].x < square.rows_3x4()[0].x);
        assert_eq!(wide.rows_3x4()[1], square.rows_3x4()[1]);
    }
}
