use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use nalgebra::{Matrix4, Vector3, Vector4};

/// Draws the interpolated vertex colors without any lighting.
/// This is the mode the parametric-surface scenes use for filled rendering.
pub struct UnlitShader {
    /// Model-View-Projection matrix.
    pub mvp_matrix: Matrix4<f32>,
}

impl UnlitShader {
    pub fn new(mvp_matrix: Matrix4<f32>) -> Self {
        Self { mvp_matrix }
    }
}

impl Shader for UnlitShader {
    type Varying = Vector3<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let clip_pos = self.mvp_matrix * vertex.position.to_homogeneous();
        (clip_pos, vertex.color)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        varying
    }
}
