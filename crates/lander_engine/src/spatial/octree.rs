//! Octree spatial partitioning over a static terrain mesh
//!
//! The tree is built once, top-down, from the full mesh and is read-only
//! afterwards. Each node covers one octant of its parent; a node holding more
//! than `max_primitives_per_leaf` triangles is split by bisecting each axis.
//! A triangle is handed to every child octant that contains at least one of
//! its corners, so triangles straddling a split are shared. Octants that
//! receive nothing are never created.
//!
//! Two queries are answered:
//! - [`Octree::intersect_ray`]: closest triangle hit along a ray
//! - [`Octree::intersect_aabb`]: broad-phase overlap against leaf bounds

use serde::{Deserialize, Serialize};

use super::{SpatialError, TerrainMesh, AABB};
use crate::foundation::math::Vec3;
use crate::physics::primitives::Ray;

/// Configuration for octree construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum triangles per node before subdivision
    pub max_primitives_per_leaf: usize,

    /// Maximum subdivision depth (root is depth 0)
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_primitives_per_leaf: 16,
            max_depth: 10,
        }
    }
}

impl OctreeConfig {
    /// Deepest tree the builder will accept
    pub const DEPTH_LIMIT: u32 = 20;

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_primitives_per_leaf == 0 {
            return Err("max_primitives_per_leaf must be at least 1".to_string());
        }
        if self.max_depth > Self::DEPTH_LIMIT {
            return Err(format!("max_depth must not exceed {}", Self::DEPTH_LIMIT));
        }
        Ok(())
    }
}

/// Payload of an octree node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Non-empty child octants (between 1 and 8)
    Branch(Vec<OctreeNode>),
    /// Triangle indices stored directly in this node
    Leaf(Vec<u32>),
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// Octant volume of this node
    pub bounds: AABB,

    /// Hull of every triangle assigned to this subtree.
    ///
    /// Shared triangles can stick out of the octant, so ray pruning tests
    /// this box rather than `bounds`.
    pub content_bounds: AABB,

    /// Depth in the tree (0 = root)
    pub depth: u32,

    /// Children or triangles
    pub kind: NodeKind,
}

impl OctreeNode {
    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Triangle indices if this node is a leaf
    pub fn triangles(&self) -> Option<&[u32]> {
        match &self.kind {
            NodeKind::Leaf(triangles) => Some(triangles),
            NodeKind::Branch(_) => None,
        }
    }

    /// Child nodes (empty for a leaf)
    pub fn children(&self) -> &[OctreeNode] {
        match &self.kind {
            NodeKind::Branch(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    fn build(
        mesh: &TerrainMesh,
        bounds: AABB,
        depth: u32,
        triangles: Vec<u32>,
        config: &OctreeConfig,
    ) -> Self {
        let content_bounds = triangles
            .iter()
            .map(|&t| {
                let [a, b, c] = mesh.triangle_points(t as usize);
                AABB::new(a, a).expanded_to(b).expanded_to(c)
            })
            .reduce(|acc, tri| acc.union(&tri))
            .unwrap_or(bounds);

        if triangles.len() <= config.max_primitives_per_leaf || depth >= config.max_depth {
            return Self { bounds, content_bounds, depth, kind: NodeKind::Leaf(triangles) };
        }

        // A zero-thickness axis (flat terrain) is not bisected; both halves
        // would be the same slab.
        let extents = bounds.extents();
        let flat_axes = (0..3).fold(0usize, |mask, axis| {
            if extents[axis] > 0.0 { mask } else { mask | (1 << axis) }
        });

        let children: Vec<OctreeNode> = (0..8)
            .filter(|octant| octant & flat_axes == 0)
            .filter_map(|octant| {
                let child_bounds = bounds.octant(octant);
                let members: Vec<u32> = triangles
                    .iter()
                    .copied()
                    .filter(|&t| {
                        mesh.triangle_points(t as usize)
                            .iter()
                            .any(|&p| child_bounds.contains_point(p))
                    })
                    .collect();

                if members.is_empty() {
                    None
                } else {
                    Some(Self::build(mesh, child_bounds, depth + 1, members, config))
                }
            })
            .collect();

        Self { bounds, content_bounds, depth, kind: NodeKind::Branch(children) }
    }

    /// Depth-first closest-hit search.
    ///
    /// Children are visited in octant order, not ray order, so every child the
    /// ray reaches is searched and only a strictly closer hit replaces `best`.
    fn intersect_ray<'a>(&'a self, ray: &Ray, mesh: &TerrainMesh, best: &mut Option<OctreeRayHit<'a>>) {
        let Some(t_enter) = self.content_bounds.intersect_ray(ray.origin, ray.direction) else {
            return;
        };

        // Nothing in this subtree can beat a hit closer than its entry point
        if best.as_ref().map_or(false, |hit| t_enter > hit.distance) {
            return;
        }

        match &self.kind {
            NodeKind::Leaf(triangles) => {
                for &triangle in triangles {
                    let Some(t) = mesh.triangle(triangle as usize).intersect_ray(ray) else {
                        continue;
                    };
                    if best.as_ref().map_or(true, |hit| t < hit.distance) {
                        *best = Some(OctreeRayHit {
                            leaf: self,
                            triangle: triangle as usize,
                            distance: t,
                            point: ray.point_at(t),
                        });
                    }
                }
            }
            NodeKind::Branch(children) => {
                for child in children {
                    child.intersect_ray(ray, mesh, best);
                }
            }
        }
    }

    /// Collect every leaf whose bounds overlap `query`
    fn intersect_aabb(&self, query: &AABB, hits: &mut Vec<AABB>) -> bool {
        if !self.bounds.intersects(query) {
            return false;
        }

        match &self.kind {
            NodeKind::Leaf(_) => {
                hits.push(self.bounds);
                true
            }
            NodeKind::Branch(children) => {
                let mut overlapped = false;
                for child in children {
                    overlapped |= child.intersect_aabb(query, hits);
                }
                overlapped
            }
        }
    }

    /// Get all leaf nodes
    pub fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a OctreeNode>) {
        match &self.kind {
            NodeKind::Leaf(_) => leaves.push(self),
            NodeKind::Branch(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    /// Get all nodes at a specific depth
    pub fn collect_at_depth<'a>(&'a self, target_depth: u32, nodes: &mut Vec<&'a OctreeNode>) {
        if self.depth == target_depth {
            nodes.push(self);
            return;
        }
        for child in self.children() {
            child.collect_at_depth(target_depth, nodes);
        }
    }

    fn accumulate_stats(&self, stats: &mut OctreeStats) {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(self.depth);
        match &self.kind {
            NodeKind::Leaf(triangles) => {
                stats.leaf_count += 1;
                stats.stored_primitives += triangles.len();
                stats.largest_leaf = stats.largest_leaf.max(triangles.len());
            }
            NodeKind::Branch(children) => {
                for child in children {
                    child.accumulate_stats(stats);
                }
            }
        }
    }
}

/// Closest triangle hit returned by a ray query
#[derive(Debug, Clone, Copy)]
pub struct OctreeRayHit<'a> {
    /// Leaf holding the hit triangle
    pub leaf: &'a OctreeNode,
    /// Index of the hit triangle in the mesh
    pub triangle: usize,
    /// Parametric distance along the ray
    pub distance: f32,
    /// World-space hit point (`origin + distance * direction`)
    pub point: Vec3,
}

/// Shape summary gathered after a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    /// Total nodes including the root
    pub node_count: usize,
    /// Nodes holding triangles
    pub leaf_count: usize,
    /// Deepest node depth
    pub max_depth: u32,
    /// Triangle references across all leaves (shared triangles count once per leaf)
    pub stored_primitives: usize,
    /// Most triangles held by a single leaf
    pub largest_leaf: usize,
}

/// Octree over a static terrain mesh
///
/// The default value is an unbuilt index: every query on it misses.
#[derive(Debug, Clone, Default)]
pub struct Octree {
    mesh: TerrainMesh,
    root: Option<OctreeNode>,
    config: OctreeConfig,
    stats: OctreeStats,
}

impl Octree {
    /// Build the index over `mesh`.
    ///
    /// The root covers the mesh's bounding box. Fails with
    /// [`SpatialError::EmptyMesh`] when the mesh has no triangles.
    pub fn build(mesh: TerrainMesh, config: OctreeConfig) -> Result<Self, SpatialError> {
        config.validate().map_err(SpatialError::InvalidConfig)?;
        let root_bounds = mesh.bounds().ok_or(SpatialError::EmptyMesh)?;

        let triangles: Vec<u32> = (0..mesh.triangle_count() as u32).collect();
        let root = OctreeNode::build(&mesh, root_bounds, 0, triangles, &config);

        let mut stats = OctreeStats::default();
        root.accumulate_stats(&mut stats);

        log::info!(
            "Built terrain octree: {} triangles, {} nodes, {} leaves, depth {}",
            mesh.triangle_count(),
            stats.node_count,
            stats.leaf_count,
            stats.max_depth
        );
        log::debug!("Octree config {:?}, largest leaf {}", config, stats.largest_leaf);

        Ok(Self { mesh, root: Some(root), config, stats })
    }

    /// Whether a mesh has been indexed
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Root node, `None` when unbuilt
    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.as_ref()
    }

    /// Root bounds, `None` when unbuilt
    pub fn bounds(&self) -> Option<AABB> {
        self.root.as_ref().map(|root| root.bounds)
    }

    /// The indexed mesh
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Build configuration
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Shape summary
    pub fn stats(&self) -> OctreeStats {
        self.stats
    }

    /// Closest triangle hit along `ray`, `None` on a miss or an unbuilt index
    pub fn intersect_ray(&self, ray: &Ray) -> Option<OctreeRayHit<'_>> {
        let root = self.root.as_ref()?;
        let mut best = None;
        root.intersect_ray(ray, &self.mesh, &mut best);
        best
    }

    /// Broad-phase overlap test.
    ///
    /// Appends the bounds of every leaf overlapping `query` to `hits` and
    /// returns whether there was any. No per-triangle test is done.
    pub fn intersect_aabb(&self, query: &AABB, hits: &mut Vec<AABB>) -> bool {
        match &self.root {
            Some(root) => root.intersect_aabb(query, hits),
            None => false,
        }
    }

    /// Get all leaf nodes
    pub fn leaves(&self) -> Vec<&OctreeNode> {
        let mut leaves = Vec::new();
        if let Some(root) = &self.root {
            root.collect_leaves(&mut leaves);
        }
        leaves
    }

    /// Get all nodes at a specific depth (for level-by-level display)
    pub fn nodes_at_depth(&self, depth: u32) -> Vec<&OctreeNode> {
        let mut nodes = Vec::new();
        if let Some(root) = &self.root {
            root.collect_at_depth(depth, &mut nodes);
        }
        nodes
    }

    /// Corner positions of every triangle stored in `node` (empty for a branch)
    pub fn leaf_points(&self, node: &OctreeNode) -> Vec<Vec3> {
        node.triangles()
            .unwrap_or_default()
            .iter()
            .flat_map(|&t| self.mesh.triangle_points(t as usize))
            .collect()
    }
}
