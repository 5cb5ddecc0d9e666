use crate::core::geometry::Vertex;
use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use std::f32::consts::PI;

/// An axis-aligned cube of half-extent 1 with hard edges: four vertices per
/// face so every face keeps its own normal.
pub fn cube(color: Vector3<f32>) -> Mesh {
    let face_axes: [(Vector3<f32>, Vector3<f32>, Vector3<f32>); 6] = [
        (Vector3::x(), Vector3::y(), Vector3::z()),
        (-Vector3::x(), Vector3::y(), -Vector3::z()),
        (Vector3::y(), Vector3::z(), Vector3::x()),
        (-Vector3::y(), Vector3::z(), -Vector3::x()),
        (Vector3::z(), Vector3::x(), Vector3::y()),
        (-Vector3::z(), Vector3::x(), -Vector3::y()),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, tangent, bitangent) in face_axes {
        let base = vertices.len() as u32;
        let corners = [
            normal - tangent - bitangent,
            normal + tangent - bitangent,
            normal + tangent + bitangent,
            normal - tangent + bitangent,
        ];
        for corner in corners {
            vertices.push(Vertex::new(Point3::from(corner), normal, color));
        }
        // Counter-clockwise seen from outside the face.
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices)
}

/// How the wheel disc picks its segment colors.
pub enum DiscColoring {
    Uniform(Vector3<f32>),
    /// Random green intensity per segment, the classic debug wheel.
    RandomGreens,
}

/// A flat disc in the XY plane built as a triangle fan of `segments` slices.
pub fn disc(radius: f32, segments: usize, coloring: DiscColoring) -> Mesh {
    let mut rng = rand::rng();
    let mut vertices = Vec::with_capacity(segments * 3);
    let mut indices = Vec::with_capacity(segments * 3);

    for i in 0..segments {
        let angle1 = i as f32 / segments as f32 * 2.0 * PI;
        let angle2 = (i + 1) as f32 / segments as f32 * 2.0 * PI;

        let color = match &coloring {
            DiscColoring::Uniform(c) => *c,
            DiscColoring::RandomGreens => Vector3::new(0.0, rng.random_range(0.2..1.0), 0.0),
        };

        let base = vertices.len() as u32;
        let slice = [
            Point3::origin(),
            Point3::new(radius * angle1.cos(), radius * angle1.sin(), 0.0),
            Point3::new(radius * angle2.cos(), radius * angle2.sin(), 0.0),
        ];
        for position in slice {
            vertices.push(Vertex::new(position, Vector3::z(), color));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    Mesh::new(vertices, indices)
}
