//! Figure presets.
//!
//! A figure is one triangle plus the transform stage that turns its vertices
//! into the positions handed to the GPU.

use glam::{Vec3, Vec4};

use crate::camera::Camera;
use crate::projection::Projection;

/// Per-vertex colors (red, green, blue) shared by every figure.
pub const TRIANGLE_COLORS: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Which of the two figure programs a preset belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Variant {
    /// Vertices are already in view space; projected with the 3x4 matrix.
    ClipSpace,
    /// Vertices are in world space; transformed by a camera first.
    Camera,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::ClipSpace => "clip space",
            Variant::Camera => "camera",
        }
    }
}

/// How a figure's vertices reach clip space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stage {
    /// `P3x4 * v / v.z` on the CPU; uploaded with `w = 1`.
    ClipSpace,
    /// `P4x4 * C1 * C2 * v`; the GPU performs the divide.
    Camera(Camera),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub name: &'static str,
    pub description: &'static str,
    pub vertices: [Vec4; 3],
    pub stage: Stage,
}

impl Figure {
    pub fn variant(&self) -> Variant {
        match self.stage {
            Stage::ClipSpace => Variant::ClipSpace,
            Stage::Camera(_) => Variant::Camera,
        }
    }

    /// Homogeneous positions ready for upload.
    ///
    /// Returns `None` if a clip-space vertex sits on the `z = 0` plane.
    pub fn clip_positions(&self, projection: &Projection) -> Option<[Vec4; 3]> {
        match &self.stage {
            Stage::ClipSpace => {
                let mut out = [Vec4::ZERO; 3];
                for (dst, v) in out.iter_mut().zip(self.vertices) {
                    *dst = projection.project_direct(v)?.extend(1.0);
                }
                Some(out)
            }
            Stage::Camera(camera) => {
                let p = projection.matrix();
                Some(self.vertices.map(|v| p * camera.to_view(v)))
            }
        }
    }
}

const CLIP_XY: [[f32; 2]; 3] = [[-1.0, -1.0], [1.0, -1.0], [0.0, 1.0]];

fn clip_space(name: &'static str, description: &'static str, depths: [f32; 3]) -> Figure {
    let mut vertices = [Vec4::ZERO; 3];
    for ((dst, [x, y]), z) in vertices.iter_mut().zip(CLIP_XY).zip(depths) {
        *dst = Vec4::new(x, y, z, 1.0);
    }

    Figure { name, description, vertices, stage: Stage::ClipSpace }
}

const WORLD_TRIANGLE: [Vec4; 3] = [
    Vec4::new(2.0, -3.0, 2.0, 1.0),
    Vec4::new(6.0, 3.0, 2.0, 1.0),
    Vec4::new(10.0, -3.0, 2.0, 1.0),
];

fn camera(name: &'static str, description: &'static str, camera: Camera) -> Figure {
    Figure {
        name,
        description,
        vertices: WORLD_TRIANGLE,
        stage: Stage::Camera(camera),
    }
}

/// All presets of a variant. The first entry is the default.
pub fn presets(variant: Variant) -> Vec<Figure> {
    match variant {
        Variant::ClipSpace => vec![
            clip_space("near", "triangle at depth 1", [1.0, 1.0, 1.0]),
            clip_space("far", "triangle at depth 9", [9.0, 9.0, 9.0]),
            clip_space("slanted", "apex pushed back to depth 9", [1.0, 1.0, 9.0]),
        ],
        Variant::Camera => {
            let far_side = Vec3::new(13.0, 0.0, 6.0);
            vec![
                camera(
                    "front",
                    "axis-aligned camera at (6, 0, 6) looking down -z",
                    Camera::from_basis(Vec3::new(6.0, 0.0, 6.0), Vec3::X, Vec3::Y, Vec3::NEG_Z),
                ),
                camera(
                    "oblique",
                    "camera at (13, 0, 6) turned 45 degrees towards the triangle",
                    Camera::from_basis(
                        far_side,
                        Vec3::new(1.0, 0.0, -1.0) / 2f32.sqrt(),
                        Vec3::Y,
                        Vec3::new(-1.0, 0.0, -1.0) / 2f32.sqrt(),
                    ),
                ),
                camera(
                    "orbit",
                    "camera at (13, 0, 6) with heading 210 and elevation 10 degrees",
                    Camera::from_angles(far_side, 210f32.to_radians(), 10f32.to_radians()),
                ),
            ]
        }
    }
}

/// Looks up a preset by name.
pub fn find(variant: Variant, name: &str) -> Option<Figure> {
    presets(variant).into_iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec4(a: Vec4, b: Vec4) {
        for i in 0..4 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-4);
        }
    }

    #[test]
    fn every_variant_has_a_default() {
        assert_eq!(presets(Variant::ClipSpace)[0].name, "near");
        assert_eq!(presets(Variant::Camera)[0].name, "front");
    }

    #[test]
    fn preset_names_are_unique_per_variant() {
        for variant in [Variant::ClipSpace, Variant::Camera] {
            let names: Vec<_> = presets(variant).iter().map(|f| f.name).collect();
            let mut dedup = names.clone();
            dedup.sort_unstable();
            dedup.dedup();
            assert_eq!(names.len(), dedup.len());
            assert!(presets(variant).iter().all(|f| f.variant() == variant));
        }
    }

    #[test]
    fn find_is_scoped_to_variant() {
        assert!(find(Variant::ClipSpace, "far").is_some());
        assert!(find(Variant::Camera, "far").is_none());
        assert!(find(Variant::Camera, "orbit").is_some());
    }

    #[test]
    fn camera_bases_are_orthonormal() {
        for fig in presets(Variant::Camera) {
            let Stage::Camera(cam) = fig.stage else { unreachable!() };
            assert!(cam.is_orthonormal(1e-5), "{} basis", fig.name);
        }
    }

    #[test]
    fn near_figure_positions() {
        let fig = find(Variant::ClipSpace, "near").unwrap();
        let pos = fig.clip_positions(&Projection::default()).unwrap();

        assert_vec4(pos[0], Vec4::new(-0.75, -1.0, 0.05, 1.0));
        assert_vec4(pos[1], Vec4::new(0.75, -1.0, 0.05, 1.0));
        assert_vec4(pos[2], Vec4::new(0.0, 1.0, 0.05, 1.0));
    }

    #[test]
    fn slanted_apex_is_deeper() {
        let fig = find(Variant::ClipSpace, "slanted").unwrap();
        let pos = fig.clip_positions(&Projection::default()).unwrap();
        assert!(pos[2].z > pos[0].z);
        assert_relative_eq!(pos[2].y, 1.0 / 9.0, epsilon = 1e-6);
    }

    #[test]
    fn front_figure_positions() {
        let fig = find(Variant::Camera, "front").unwrap();
        let pos = fig.clip_positions(&Projection::default()).unwrap();

        // view space: (-4, -3, 4), (0, 3, 4), (4, -3, 4)
        assert_vec4(pos[0], Vec4::new(-3.0, -3.0, 3.35, 4.0));
        assert_vec4(pos[1], Vec4::new(0.0, 3.0, 3.35, 4.0));
        assert_vec4(pos[2], Vec4::new(3.0, -3.0, 3.35, 4.0));
    }

    #[test]
    fn oblique_figure_positions() {
        let fig = find(Variant::Camera, "oblique").unwrap();
        let pos = fig.clip_positions(&Projection::default()).unwrap();

        // view space: (-4.94975, -3, 10.6066), (-2.12132, 3, 7.77817), (0.70711, -3, 4.94975)
        assert_vec4(pos[0], Vec4::new(-3.71231, -3.0, 10.61726, 10.6066));
        assert_vec4(pos[1], Vec4::new(-1.59099, 3.0, 7.50599, 7.77817));
        assert_vec4(pos[2], Vec4::new(0.53033, -3.0, 4.39472, 4.94975));
    }

    #[test]
    fn orbit_figure_positions() {
        let fig = find(Variant::Camera, "orbit").unwrap();
        let pos = fig.clip_positions(&Projection::default()).unwrap();

        assert_vec4(pos[0], Vec4::new(-5.64471, -4.51102, 8.08767, 8.30697));
        assert_vec4(pos[1], Vec4::new(-3.04663, 1.74512, 7.06717, 7.37925));
        assert_vec4(pos[2], Vec4::new(-0.44856, -3.81643, 3.75452, 4.36774));
    }

    #[test]
    fn camera_figures_stay_in_front_of_camera() {
        let p = Projection::default();
        for fig in presets(Variant::Camera) {
            let pos = fig.clip_positions(&p).unwrap();
            assert!(pos.iter().all(|v| v.w > p.near), "{}", fig.name);
        }
    }

    #[test]
    fn clip_space_figure_with_zero_depth_has_no_positions() {
        let fig = clip_space("flat", "", [1.0, 0.0, 1.0]);
        assert!(fig.clip_positions(&Projection::default()).is_none());
    }
}
