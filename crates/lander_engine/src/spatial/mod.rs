//! Spatial partitioning data structures
//!
//! Provides the static terrain index used for altitude ray casts and
//! broad-phase collision against the lander's bounding box.

mod aabb;
mod mesh;
mod octree;

pub use aabb::AABB;
pub use mesh::TerrainMesh;
pub use octree::{NodeKind, Octree, OctreeConfig, OctreeNode, OctreeRayHit, OctreeStats};

use thiserror::Error;

/// Errors raised while building the terrain index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// The mesh has no triangles
    #[error("Cannot index an empty mesh")]
    EmptyMesh,

    /// A triangle references a vertex that does not exist
    #[error("Triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// Offending triangle
        triangle: usize,
        /// Out-of-range vertex index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// A vertex has a NaN or infinite coordinate
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Offending vertex
        index: usize,
    },

    /// Octree parameters out of range
    #[error("Invalid octree configuration: {0}")]
    InvalidConfig(String),
}
