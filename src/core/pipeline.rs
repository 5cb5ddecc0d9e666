use crate::core::geometry::Vertex;
use nalgebra::{Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheaply duplicable values for per-vertex storage and interpolation.
/// - Add + Mul<f32>: support linear combination (a + b * t) used by barycentric interpolation.
/// - Send + Sync: safe to use from multiple threads during parallel rasterization.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl Interpolatable for f32 {}
impl Interpolatable for Vector2<f32> {}
impl Interpolatable for Vector3<f32> {}

/// Shader represents the programmable stages of the pipeline.
///
/// Implementations must be thread-safe (Send + Sync) because shading may be invoked
/// concurrently across fragments.
pub trait Shader: Send + Sync {
    /// Per-vertex varying data to be interpolated and provided to the fragment shader.
    type Varying: Interpolatable;

    /// Vertex shader stage.
    ///
    /// Transforms the given vertex into homogeneous clip space used by clipping and
    /// perspective divide, and returns the varying data associated with that vertex.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Fragment shader stage.
    ///
    /// Computes the final linear RGB color for the current fragment from the
    /// interpolated varying. The pipeline expects a Vector3<f32> in 0.0..1.0.
    fn fragment(&self, varying: Self::Varying) -> Vector3<f32>;
}
