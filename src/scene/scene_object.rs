use crate::scene::mesh::Mesh;
use nalgebra::Matrix4;

/// A mesh placed in the scene with its own transformation.
pub struct SceneObject {
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(mesh: Mesh, transform: Matrix4<f32>) -> Self {
        Self { mesh, transform }
    }

    /// Swaps in freshly generated geometry; the previous mesh is dropped
    /// here, releasing its buffers before the new ones are used.
    pub fn replace_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }
}
