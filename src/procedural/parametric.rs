use crate::core::geometry::Vertex;
use crate::scene::mesh::Mesh;
use crate::scene::utils::compute_smooth_normals;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// Samples a parametric surface on an (u_steps+1) x (v_steps+1) grid and
/// triangulates it with two triangles per cell.
///
/// `sample` maps normalized grid coordinates (u, v in 0.0..=1.0) to a
/// position and a vertex color. Normals are recomputed from the triangles.
pub fn grid_surface<F>(u_steps: usize, v_steps: usize, sample: F) -> Mesh
where
    F: Fn(f32, f32) -> (Point3<f32>, Vector3<f32>),
{
    let mut vertices = Vec::with_capacity((u_steps + 1) * (v_steps + 1));

    for i in 0..=u_steps {
        for j in 0..=v_steps {
            let u = i as f32 / u_steps as f32;
            let v = j as f32 / v_steps as f32;
            let (position, color) = sample(u, v);
            vertices.push(Vertex::new(position, Vector3::zeros(), color));
        }
    }

    let indices = grid_indices(u_steps, v_steps);

    let mut mesh = Mesh::new(vertices, indices);
    compute_smooth_normals(&mut mesh);
    mesh
}

/// Triangle indices for a grid of (u_steps+1) x (v_steps+1) vertices laid out
/// row-major in u.
pub fn grid_indices(u_steps: usize, v_steps: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(u_steps * v_steps * 6);
    let stride = (v_steps + 1) as u32;

    for i in 0..u_steps as u32 {
        for j in 0..v_steps as u32 {
            let a = i * stride + j;
            let b = a + stride;

            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    indices
}

/// A classical torus: a circle of radius `minor` swept around an axis at
/// distance `major`.
pub fn torus(major: f32, minor: f32, u_steps: usize, v_steps: usize) -> Mesh {
    grid_surface(u_steps, v_steps, |u, v| {
        let u = u * 2.0 * PI;
        let v = v * 2.0 * PI;

        let x = (major + minor * v.cos()) * u.cos();
        let y = (major + minor * v.cos()) * u.sin();
        let z = minor * v.sin();

        // Blue-to-cyan gradient over the tube height.
        let t = (z + minor) / (2.0 * minor);
        let color = Vector3::new(0.93, 0.85 - t * 0.3, 0.5 - t * 0.2);

        (Point3::new(x, y, z), color)
    })
}

/// The teardrop surface ("Tropfen"): x = a(b - cos u) sin u cos v, with
/// u in [0, pi] closing the shape at both poles.
pub fn teardrop(a: f32, b: f32, u_steps: usize, v_steps: usize) -> Mesh {
    grid_surface(u_steps, v_steps, |u, v| {
        let u = u * PI;
        let v = v * 2.0 * PI;

        let radial = a * (b - u.cos()) * u.sin();
        let position = Point3::new(radial * v.cos(), radial * v.sin(), u.cos());

        let t = (position.z + 1.0) / 2.0;
        let color = Vector3::new(0.2 + 0.6 * t, 0.3 * (1.0 - t), 0.5 * (1.0 - t));

        (position, color)
    })
}

/// Two mirrored teardrops joined at the tip: the upper half in blues, the
/// lower half in reds.
pub fn double_teardrop(a: f32, b: f32, u_steps: usize, v_steps: usize) -> Mesh {
    let upper = grid_surface(u_steps, v_steps, |u, v| {
        let u = u * PI;
        let v = v * 2.0 * PI;

        let radial = a * (b - u.cos()) * u.sin();
        let position = Point3::new(radial * v.cos(), radial * v.sin(), u.cos());

        let t = (position.z + 1.0) / 2.0;
        let color = Vector3::new(0.1 + 0.2 * t, 0.3 + 0.4 * t, 0.8);

        (position, color)
    });

    let lower = grid_surface(u_steps, v_steps, |u, v| {
        let u = (1.0 - u) * PI; // mirrored parameter runs the seam in reverse
        let v = v * 2.0 * PI;

        let radial = a * (b - u.cos()) * u.sin();
        let position = Point3::new(radial * v.cos(), radial * v.sin(), -u.cos());

        let t = (-position.z + 1.0) / 2.0;
        let color = Vector3::new(0.8, 0.1 + 0.3 * t, 0.1 + 0.2 * t);

        (position, color)
    });

    merge(upper, lower)
}

/// A seashell-like spiral surface.
pub fn seashell(u_steps: usize, v_steps: usize) -> Mesh {
    let (a, b, c, n) = (0.4, 0.6, 0.2, 2.0);

    grid_surface(u_steps, v_steps, |u, v| {
        let u = u * 2.0;
        let v = v * 2.0;
        let h = 1.0 - 0.5 * v;
        let winding = n * v * PI;

        let x = a * h * winding.cos() * (1.0 + (u * PI).cos()) + c * winding.cos();
        let y = a * h * winding.sin() * (1.0 + (u * PI).cos()) + c * winding.sin();
        let z = b * 0.5 * v + a * h * (u * PI).sin();

        let t = (z + b) / (2.0 * b);
        let color = Vector3::new(0.8 * t + 0.2, 0.5 * (1.0 - t), 0.3);

        (Point3::new(x, y, z), color)
    })
}

/// A latitude/longitude sphere with analytic normals and a uniform base color.
pub fn uv_sphere(radius: f32, lat_bands: usize, long_bands: usize, color: Vector3<f32>) -> Mesh {
    let mut vertices = Vec::with_capacity((lat_bands + 1) * (long_bands + 1));

    for lat in 0..=lat_bands {
        let theta = lat as f32 * PI / lat_bands as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for long in 0..=long_bands {
            let phi = long as f32 * 2.0 * PI / long_bands as f32;
            let (sin_p, cos_p) = phi.sin_cos();

            let normal = Vector3::new(cos_p * sin_t, cos_t, sin_p * sin_t);
            vertices.push(Vertex::new(Point3::from(normal * radius), normal, color));
        }
    }

    let indices = grid_indices(lat_bands, long_bands);
    Mesh::new(vertices, indices)
}

fn merge(mut first: Mesh, second: Mesh) -> Mesh {
    let offset = first.vertices.len() as u32;
    first.vertices.extend(second.vertices);
    first
        .indices
        .extend(second.indices.iter().map(|i| i + offset));
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts() {
        let mesh = torus(0.4, 0.2, 50, 30);
        assert_eq!(mesh.vertices.len(), 51 * 31);
        assert_eq!(mesh.triangle_count(), 50 * 30 * 2);
    }

    #[test]
    fn torus_stays_in_tube_range() {
        let mesh = torus(0.4, 0.2, 20, 20);
        for vertex in &mesh.vertices {
            let p = vertex.position;
            let ring_distance = ((p.x * p.x + p.y * p.y).sqrt() - 0.4).abs();
            assert!(ring_distance <= 0.2 + 1e-5);
            assert!(p.z.abs() <= 0.2 + 1e-5);
        }
    }

    #[test]
    fn teardrop_spans_unit_height() {
        let mesh = teardrop(0.5, 1.7, 40, 40);
        let min_z = mesh
            .vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f32::INFINITY, f32::min);
        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((min_z + 1.0).abs() < 1e-5);
        assert!((max_z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn double_teardrop_is_two_sheets() {
        let single = teardrop(0.5, 1.7, 20, 20);
        let double = double_teardrop(0.5, 1.7, 20, 20);
        assert_eq!(double.vertices.len(), 2 * single.vertices.len());
        assert_eq!(double.triangle_count(), 2 * single.triangle_count());

        // Sheets are colored apart: blues above, reds below.
        for vertex in &double.vertices {
            if vertex.position.z > 0.5 {
                let is_blue = vertex.color.z > vertex.color.x;
                let is_red = vertex.color.x > 0.7 && vertex.color.z < 0.5;
                assert!(is_blue || is_red);
            }
        }
    }

    #[test]
    fn uv_sphere_normals_are_radial_unit_vectors() {
        let mesh = uv_sphere(1.0, 16, 16, Vector3::new(0.5, 0.5, 0.5));
        for vertex in &mesh.vertices {
            assert!((vertex.normal.norm() - 1.0).abs() < 1e-5);
            assert!((vertex.position.coords - vertex.normal).norm() < 1e-5);
        }
    }

    #[test]
    fn seashell_generates_valid_indices() {
        let mesh = seashell(30, 30);
        let max_index = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max_index < mesh.vertices.len());
    }
}
