use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// Recomputes smooth per-vertex normals from face geometry.
///
/// Every triangle contributes its (area-weighted) face normal to its three
/// vertices; the accumulated sums are normalized at the end. Vertices not
/// referenced by any face keep a +Y fallback normal.
pub fn compute_smooth_normals(mesh: &mut Mesh) {
    let mut accumulated = vec![Vector3::zeros(); mesh.vertices.len()];

    for triangle in mesh.indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let p0 = mesh.vertices[i0].position;
        let p1 = mesh.vertices[i1].position;
        let p2 = mesh.vertices[i2].position;

        // Unnormalized cross product: larger faces weigh more.
        let face_normal = (p1 - p0).cross(&(p2 - p0));

        accumulated[i0] += face_normal;
        accumulated[i1] += face_normal;
        accumulated[i2] += face_normal;
    }

    for (vertex, sum) in mesh.vertices.iter_mut().zip(accumulated) {
        vertex.normal = if sum.norm_squared() > 1e-12 {
            sum.normalize()
        } else {
            Vector3::y()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use nalgebra::Point3;

    #[test]
    fn single_triangle_gets_face_normal() {
        // CCW triangle in the XY plane, normal must point +Z.
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Vector3::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), Vector3::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::zeros(), Vector3::zeros()),
        ];
        let mut mesh = Mesh::new(vertices, vec![0, 1, 2]);

        compute_smooth_normals(&mut mesh);

        for vertex in &mesh.vertices {
            assert!((vertex.normal - Vector3::z()).norm() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_fallback() {
        let vertices = vec![Vertex::new(
            Point3::origin(),
            Vector3::zeros(),
            Vector3::zeros(),
        )];
        let mut mesh = Mesh::new(vertices, vec![]);

        compute_smooth_normals(&mut mesh);
        assert!((mesh.vertices[0].normal - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn shared_vertex_averages_adjacent_faces() {
        // Two triangles folded along the Y axis; the shared edge's normals
        // average the two face normals.
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Vector3::zeros()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::zeros(), Vector3::zeros()),
            Vertex::new(Point3::new(1.0, 0.0, -1.0), Vector3::zeros(), Vector3::zeros()),
            Vertex::new(Point3::new(-1.0, 0.0, -1.0), Vector3::zeros(), Vector3::zeros()),
        ];
        let mut mesh = Mesh::new(vertices, vec![0, 2, 1, 0, 1, 3]);

        compute_smooth_normals(&mut mesh);

        let shared = mesh.vertices[0].normal;
        assert!(shared.z > 0.5, "folded faces should average toward +Z");
        assert!(shared.x.abs() < 1e-5, "x components should cancel");
    }
}
