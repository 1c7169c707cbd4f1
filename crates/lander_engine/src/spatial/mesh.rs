//! Indexed triangle mesh for static terrain

use super::{SpatialError, AABB};
use crate::foundation::math::Vec3;
use crate::physics::primitives::Triangle;

/// Immutable triangle soup the terrain index is built from
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl TerrainMesh {
    /// Build a mesh from vertex positions and index triples.
    ///
    /// Fails on out-of-range indices or non-finite vertices. An empty mesh is
    /// accepted here; building an index over it is what fails.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, SpatialError> {
        if let Some(index) = vertices.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
            return Err(SpatialError::NonFiniteVertex { index });
        }

        let vertex_count = vertices.len();
        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SpatialError::InvalidIndex { triangle, index, vertex_count });
            }
        }

        Ok(Self { vertices, triangles })
    }

    /// Build a mesh from unindexed triangles
    pub fn from_triangles(triangles: &[Triangle]) -> Result<Self, SpatialError> {
        let vertices = triangles.iter().flat_map(Triangle::vertices).collect();
        let indices = (0..triangles.len() as u32)
            .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
            .collect();
        Self::new(vertices, indices)
    }

    /// Vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Index triples
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex position by index
    pub fn vertex(&self, index: u32) -> Vec3 {
        self.vertices[index as usize]
    }

    /// Triangle by index
    pub fn triangle(&self, index: usize) -> Triangle {
        let [a, b, c] = self.triangles[index];
        Triangle::new(self.vertex(a), self.vertex(b), self.vertex(c))
    }

    /// Corner positions of a triangle
    pub fn triangle_points(&self, index: usize) -> [Vec3; 3] {
        self.triangle(index).vertices()
    }

    /// Bounds of the referenced vertices, `None` when there are no triangles
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.triangles.iter().flatten().map(|&i| &self.vertices[i as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_rejected() {
        let vertices = vec![Vec3::zeros(), Vec3::x(), Vec3::z()];
        let result = TerrainMesh::new(vertices, vec![[0, 1, 3]]);
        assert!(matches!(
            result,
            Err(SpatialError::InvalidIndex { triangle: 0, index: 3, vertex_count: 3 })
        ));
    }

    #[test]
    fn test_non_finite_vertex_rejected() {
        let vertices = vec![Vec3::zeros(), Vec3::new(f32::NAN, 0.0, 0.0), Vec3::z()];
        let result = TerrainMesh::new(vertices, vec![[0, 1, 2]]);
        assert!(matches!(result, Err(SpatialError::NonFiniteVertex { index: 1 })));
    }

    #[test]
    fn test_bounds_ignore_unreferenced_vertices() {
        let vertices = vec![
            Vec3::zeros(),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(100.0, 100.0, 100.0),
        ];
        let mesh = TerrainMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::zeros());
        assert_eq!(bounds.max, Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_from_triangles() {
        let tri = Triangle::new(Vec3::zeros(), Vec3::x(), Vec3::z());
        let mesh = TerrainMesh::from_triangles(&[tri, tri]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices()[1], [3, 4, 5]);
        assert!(TerrainMesh::default().bounds().is_none());
    }
}
