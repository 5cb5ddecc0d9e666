use nalgebra::Vector3;
use std::collections::HashMap;

/// Largest subdivision depth the application exposes.
/// Depth 6 refines the octahedron to 8 * 4^6 = 32768 faces, which still
/// rebuilds well below a frame interval on one core.
pub const MAX_SUBDIVISION_DEPTH: u32 = 6;

/// An indexed triangle mesh: unit-direction vertices plus faces referencing
/// them by index. Faces wind counter-clockwise seen from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Vector3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn new(vertices: Vec<Vector3<f32>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }
}

/// Deduplication table for edge midpoints, scoped to a single subdivision pass.
///
/// Maps the unordered pair of endpoint indices to the index of their
/// normalized midpoint, so the midpoint of an edge shared by two faces is
/// created exactly once. Must be cleared between passes: indices from pass N
/// refer to a different mesh than indices from pass N+1.
#[derive(Debug, Default)]
pub struct MidpointCache {
    map: HashMap<(u32, u32), u32>,
}

impl MidpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the index of the midpoint vertex for edge (a, b), appending a
    /// newly computed midpoint to `vertices` on the first query of the edge.
    ///
    /// The midpoint is the average of the endpoint directions projected back
    /// onto the unit sphere. Antipodal endpoints (zero-length sum) are a
    /// precondition violation and do not occur for the supported bases.
    pub fn midpoint_index(&mut self, a: u32, b: u32, vertices: &mut Vec<Vector3<f32>>) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&idx) = self.map.get(&key) {
            return idx;
        }

        let midpoint = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
        let idx = vertices.len() as u32;
        vertices.push(midpoint);
        self.map.insert(key, idx);
        idx
    }
}

/// The fixed base polyhedron: a unit octahedron with outward-wound faces.
pub fn octahedron() -> TriMesh {
    let vertices = vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    TriMesh::new(vertices, faces)
}

/// Refines `base` by `depth` passes of 4-way triangle subdivision, projecting
/// every new vertex onto the unit sphere.
///
/// Each pass splits every face into three corner triangles plus the central
/// midpoint triangle, preserving winding. Face count grows by 4x per pass;
/// shared-edge midpoints are deduplicated through a per-pass cache.
///
/// `depth = 0` returns the input unchanged. Face indices must be in range for
/// the vertex list; violations panic (programmer error, not a runtime
/// condition). Callers validate user-supplied depth beforehand.
pub fn subdivide(base: &TriMesh, depth: u32) -> TriMesh {
    let mut vertices = base.vertices.clone();
    let mut faces = base.faces.clone();
    let mut cache = MidpointCache::new();

    for _ in 0..depth {
        cache.clear();
        faces = subdivide_pass(&mut vertices, &faces, &mut cache);
    }

    TriMesh::new(vertices, faces)
}

/// Runs a single subdivision pass, appending midpoint vertices to `vertices`
/// and returning the refined face list.
///
/// The caller owns the cache so its behavior stays observable; it must be
/// empty (freshly cleared) when the pass starts.
pub fn subdivide_pass(
    vertices: &mut Vec<Vector3<f32>>,
    faces: &[[u32; 3]],
    cache: &mut MidpointCache,
) -> Vec<[u32; 3]> {
    let mut refined = Vec::with_capacity(faces.len() * 4);

    for &[v1, v2, v3] in faces {
        let a = cache.midpoint_index(v1, v2, vertices);
        let b = cache.midpoint_index(v2, v3, vertices);
        let c = cache.midpoint_index(v3, v1, vertices);

        refined.push([v1, a, c]);
        refined.push([v2, b, a]);
        refined.push([v3, c, b]);
        refined.push([a, b, c]);
    }

    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_identity() {
        let base = octahedron();
        let result = subdivide(&base, 0);
        assert_eq!(result, base);
    }

    #[test]
    fn face_count_quadruples_per_pass() {
        let base = octahedron();
        for depth in 0..=MAX_SUBDIVISION_DEPTH {
            let result = subdivide(&base, depth);
            assert_eq!(result.faces.len(), 8 * 4usize.pow(depth));
        }
    }

    #[test]
    fn all_vertices_stay_on_unit_sphere() {
        let base = octahedron();
        for depth in 0..=4 {
            let result = subdivide(&base, depth);
            for v in &result.vertices {
                assert!(
                    (v.norm() - 1.0).abs() < 1e-6,
                    "vertex off the unit sphere at depth {depth}: norm {}",
                    v.norm()
                );
            }
        }
    }

    #[test]
    fn shared_edge_midpoints_are_deduplicated() {
        // The octahedron has 12 distinct edges, so one pass must add exactly
        // 12 midpoints: 6 + 12 = 18 vertices, not 6 + 24.
        let result = subdivide(&octahedron(), 1);
        assert_eq!(result.vertices.len(), 18);
    }

    #[test]
    fn cache_is_cleared_between_passes() {
        // A closed triangle mesh satisfies V - E + F = 2 with E = 3F/2, so
        // depth 2 must have V = 2 + 192 - 128 = 66 vertices. A cache leaking
        // midpoint indices across passes would miss or alias midpoints and
        // break this count.
        let result = subdivide(&octahedron(), 2);
        assert_eq!(result.faces.len(), 128);
        assert_eq!(result.vertices.len(), 66);

        let result = subdivide(&octahedron(), 3);
        assert_eq!(result.faces.len(), 512);
        assert_eq!(result.vertices.len(), 2 + 3 * 512 / 2 - 512);
    }

    #[test]
    fn cache_returns_same_index_for_repeated_queries() {
        let mut vertices = octahedron().vertices;
        let mut cache = MidpointCache::new();

        let first = cache.midpoint_index(0, 2, &mut vertices);
        let swapped = cache.midpoint_index(2, 0, &mut vertices);
        assert_eq!(first, swapped);
        assert_eq!(cache.len(), 1);
        assert_eq!(vertices.len(), 7);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn winding_is_preserved() {
        // Every face of the refined sphere must keep the outward orientation
        // of its ancestors: the cross product of two edges points to the same
        // side as the face centroid.
        let result = subdivide(&octahedron(), 2);
        for face in &result.faces {
            let a = result.vertices[face[0] as usize];
            let b = result.vertices[face[1] as usize];
            let c = result.vertices[face[2] as usize];

            let normal = (b - a).cross(&(c - b));
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(&centroid) > 0.0,
                "face {face:?} winds inward"
            );
        }
    }

    #[test]
    fn subdivision_is_deterministic() {
        let base = octahedron();
        let first = subdivide(&base, 3);
        let second = subdivide(&base, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn works_for_other_closed_bases() {
        // A regular tetrahedron with unit-length vertices.
        let s = 1.0 / 3.0f32.sqrt();
        let base = TriMesh::new(
            vec![
                Vector3::new(s, s, s),
                Vector3::new(s, -s, -s),
                Vector3::new(-s, s, -s),
                Vector3::new(-s, -s, s),
            ],
            vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        );

        let result = subdivide(&base, 2);
        assert_eq!(result.faces.len(), 4 * 16);
        // V = 2 + E - F with E = 3F/2.
        assert_eq!(result.vertices.len(), 2 + 3 * 64 / 2 - 64);
        for v in &result.vertices {
            assert!((v.norm() - 1.0).abs() < 1e-6);
        }
    }
}
