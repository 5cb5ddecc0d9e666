use crate::core::geometry::Vertex;
use crate::core::pipeline::{Interpolatable, Shader};
use crate::scene::light::Light;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Data that needs to be interpolated across the triangle surface.
/// Passed from Vertex Shader -> Rasterizer -> Fragment Shader.
#[derive(Clone, Copy, Debug)]
pub struct LambertVarying {
    /// Normal vector in World Space.
    pub normal: Vector3<f32>,
    /// Position in World Space (needed for point-light attenuation).
    pub world_pos: Point3<f32>,
    /// Interpolated vertex color.
    pub color: Vector3<f32>,
}

// Math operations required for barycentric interpolation. nalgebra's Point3
// has no Point + Point addition, so the position goes through its coords.
impl Add for LambertVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
            color: self.color + other.color,
        }
    }
}

impl Mul<f32> for LambertVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
            color: self.color * scalar,
        }
    }
}

impl Interpolatable for LambertVarying {}

/// Diffuse-only lighting over the interpolated vertex colors:
/// ambient + sum of per-light N.L terms. The look of the gradient material
/// in the refined-sphere scene.
pub struct LambertShader {
    pub model_matrix: Matrix4<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,

    pub lights: Vec<Light>,
    pub ambient_light: Vector3<f32>,
}

impl LambertShader {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            lights: Vec::new(),
            ambient_light: Vector3::new(0.4, 0.4, 0.4),
        }
    }
}

impl Shader for LambertShader {
    type Varying = LambertVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let world_pos_homo = self.model_matrix * vertex.position.to_homogeneous();
        let world_pos = Point3::from_homogeneous(world_pos_homo).unwrap_or(vertex.position);

        // The upper-left 3x3 of the model matrix is enough for rotations and
        // uniform scaling; normals are renormalized after interpolation anyway.
        let normal_matrix = self.model_matrix.fixed_view::<3, 3>(0, 0);
        let world_normal = (normal_matrix * vertex.normal).normalize();

        let mvp = self.projection_matrix * self.view_matrix * self.model_matrix;
        let clip_pos = mvp * vertex.position.to_homogeneous();

        let varying = LambertVarying {
            normal: world_normal,
            world_pos,
            color: vertex.color,
        };

        (clip_pos, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        let normal = varying.normal.normalize();

        let mut result = self.ambient_light.component_mul(&varying.color);

        for light in &self.lights {
            let light_dir = light.get_direction_to_light(&varying.world_pos);
            let diff = normal.dot(&light_dir).max(0.0);
            let intensity = light.get_intensity(&varying.world_pos);
            result += intensity.component_mul(&varying.color) * diff;
        }

        Vector3::new(result.x.min(1.0), result.y.min(1.0), result.z.min(1.0))
    }
}
