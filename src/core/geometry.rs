use nalgebra::{Point3, Vector3};

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Per-vertex color in linear RGB (0.0..1.0).
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}
