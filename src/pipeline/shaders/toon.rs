use crate::core::geometry::Vertex;
use crate::core::pipeline::{Interpolatable, Shader};
use crate::scene::light::Light;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

#[derive(Clone, Copy, Debug)]
pub struct ToonVarying {
    pub normal: Vector3<f32>,
    pub world_pos: Point3<f32>,
    pub color: Vector3<f32>,
}

impl Add for ToonVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
            color: self.color + other.color,
        }
    }
}

impl Mul<f32> for ToonVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
            color: self.color * scalar,
        }
    }
}

impl Interpolatable for ToonVarying {}

/// Cel shading: Blinn-Phong terms quantized into a few flat bands.
pub struct ToonShader {
    pub model_matrix: Matrix4<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,
    pub camera_pos: Point3<f32>,

    pub lights: Vec<Light>,
    /// Flat ambient factor applied to the base color.
    pub ambient: f32,
    pub diffuse_steps: u32,
    pub specular_steps: u32,
    pub shininess: f32,
}

impl ToonShader {
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        camera_pos: Point3<f32>,
    ) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            camera_pos,
            lights: Vec::new(),
            ambient: 0.15,
            diffuse_steps: 3,
            specular_steps: 3,
            shininess: 32.0,
        }
    }
}

/// Quantizes a 0..1 intensity into `steps` flat bands.
/// The small bias keeps values sitting exactly on a band edge stable.
pub(crate) fn quantize(value: f32, steps: u32) -> f32 {
    let steps = steps.max(1) as f32;
    (value * steps + 1e-4).floor() / steps
}

impl Shader for ToonShader {
    type Varying = ToonVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let world_pos_homo = self.model_matrix * vertex.position.to_homogeneous();
        let world_pos = Point3::from_homogeneous(world_pos_homo).unwrap_or(vertex.position);

        let normal_matrix = self.model_matrix.fixed_view::<3, 3>(0, 0);
        let world_normal = (normal_matrix * vertex.normal).normalize();

        let mvp = self.projection_matrix * self.view_matrix * self.model_matrix;
        let clip_pos = mvp * vertex.position.to_homogeneous();

        let varying = ToonVarying {
            normal: world_normal,
            world_pos,
            color: vertex.color,
        };

        (clip_pos, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        let normal = varying.normal.normalize();
        let view_dir = (self.camera_pos - varying.world_pos).normalize();
        let base = varying.color;

        let mut result = base * self.ambient;

        for light in &self.lights {
            let light_dir = light.get_direction_to_light(&varying.world_pos);
            let half_vector = (light_dir + view_dir).normalize();

            let diff = normal.dot(&light_dir).max(0.0);
            let spec = if diff > 0.0 {
                normal.dot(&half_vector).max(0.0).powf(self.shininess)
            } else {
                0.0
            };

            let diff_banded = quantize(diff, self.diffuse_steps);
            let spec_banded = quantize(spec, self.specular_steps);

            let intensity = light.get_intensity(&varying.world_pos);
            result +=
                (base * diff_banded + Vector3::new(1.0, 1.0, 1.0) * spec_banded)
                    .component_mul(&intensity);
        }

        Vector3::new(result.x.min(1.0), result.y.min(1.0), result.z.min(1.0))
    }
}
