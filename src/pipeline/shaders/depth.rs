use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// Visualizes depth as grayscale: near fragments are dark, far fragments are
/// light. Useful for checking the depth buffer and projection setup.
pub struct DepthShader {
    /// Model-View-Projection matrix.
    pub mvp_matrix: Matrix4<f32>,
}

impl DepthShader {
    pub fn new(mvp_matrix: Matrix4<f32>) -> Self {
        Self { mvp_matrix }
    }
}

impl Shader for DepthShader {
    /// Clip-space (z, w). Interpolated with perspective correction, z/w
    /// reconstructs the screen-linear NDC depth a GPU depth buffer stores.
    type Varying = Vector2<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let clip_pos = self.mvp_matrix * vertex.position.to_homogeneous();
        (clip_pos, Vector2::new(clip_pos.z, clip_pos.w))
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        let ndc_z = if varying.y.abs() > 1e-6 {
            varying.x / varying.y
        } else {
            1.0
        };
        // NDC z in [-1, 1] -> gray in [0, 1].
        let gray = (ndc_z * 0.5 + 0.5).clamp(0.0, 1.0);
        Vector3::new(gray, gray, gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use nalgebra::Point3;

    #[test]
    fn near_is_dark_far_is_light() {
        let shader = DepthShader::new(Matrix4::identity());

        let near = shader.fragment(Vector2::new(-1.0, 1.0));
        assert!(near.norm() < 1e-6);

        let far = shader.fragment(Vector2::new(1.0, 1.0));
        assert!((far.x - 1.0).abs() < 1e-6);

        let mid = shader.fragment(Vector2::new(0.0, 1.0));
        assert!((mid.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_depth_is_clamped() {
        let shader = DepthShader::new(Matrix4::identity());
        assert_eq!(shader.fragment(Vector2::new(5.0, 1.0)).x, 1.0);
        assert_eq!(shader.fragment(Vector2::new(-5.0, 1.0)).x, 0.0);
    }

    #[test]
    fn projected_vertices_shade_by_distance() {
        let proj = TransformFactory::perspective(1.0, 45.0f32.to_radians(), 0.1, 100.0);
        let shader = DepthShader::new(proj);

        let near_vertex = Vertex::new(
            Point3::new(0.0, 0.0, -0.2),
            Vector3::y(),
            Vector3::zeros(),
        );
        let far_vertex = Vertex::new(
            Point3::new(0.0, 0.0, -50.0),
            Vector3::y(),
            Vector3::zeros(),
        );

        let (_, near_var) = shader.vertex(&near_vertex);
        let (_, far_var) = shader.vertex(&far_vertex);

        assert!(shader.fragment(near_var).x < shader.fragment(far_var).x);
    }
}
