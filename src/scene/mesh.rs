use crate::core::color::height_hue;
use crate::core::geometry::Vertex;
use crate::procedural::subdivision::TriMesh;
use crate::scene::utils::compute_smooth_normals;
use nalgebra::Point3;

/// A collection of vertices and indices representing a 3D object.
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Builds a render-ready mesh from an indexed triangle mesh.
    ///
    /// Colors are derived from each vertex's height (hue gradient over the
    /// sphere); normals are recomputed from the faces, which for a unit
    /// sphere reproduces the position vector.
    pub fn from_tri_mesh(tri: &TriMesh) -> Self {
        let vertices = tri
            .vertices
            .iter()
            .map(|v| Vertex::new(Point3::from(*v), nalgebra::Vector3::zeros(), height_hue(v.y)))
            .collect();
        let indices = tri.faces.iter().flatten().copied().collect();

        let mut mesh = Self::new(vertices, indices);
        compute_smooth_normals(&mut mesh);
        mesh
    }
}
