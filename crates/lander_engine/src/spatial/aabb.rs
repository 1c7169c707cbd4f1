//! Axis-aligned bounding boxes
//!
//! Used both as octree node volumes and as the lander's world-space
//! collision volume.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// Axis-Aligned Bounding Box for spatial queries
///
/// Invariant: `min <= max` component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from two corners, ordering them component-wise
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: utils::min_components(a, b),
            max: utils::max_components(a, b),
        }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let extents = extents.abs();
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box enclosing every point, `None` for an empty set
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self { min: first, max: first }, |acc, p| acc.expanded_to(*p)))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow to include a point
    pub fn expanded_to(&self, point: Vec3) -> Self {
        Self {
            min: utils::min_components(self.min, point),
            max: utils::max_components(self.max, point),
        }
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> Self {
        Self {
            min: utils::min_components(self.min, other.min),
            max: utils::max_components(self.max, other.max),
        }
    }

    /// The same box moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The octant of this box selected by the low three bits of `octant`.
    ///
    /// Bit 0 selects +X, bit 1 +Y, bit 2 +Z.
    pub fn octant(&self, octant: usize) -> Self {
        let center = self.center();
        let pick = |bit: usize, low: f32, mid: f32, high: f32| {
            if octant & bit != 0 { (mid, high) } else { (low, mid) }
        };
        let (min_x, max_x) = pick(1, self.min.x, center.x, self.max.x);
        let (min_y, max_y) = pick(2, self.min.y, center.y, self.max.y);
        let (min_z, max_z) = pick(4, self.min.z, center.z, self.max.z);
        Self {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    /// Check if this AABB contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB fully contains another
    pub fn contains(&self, other: &AABB) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the parametric entry distance (0 when the origin is inside),
    /// or `None` if the ray misses or the box is entirely behind the origin.
    /// Axis-parallel rays are handled without dividing by zero, so flat
    /// boxes (zero thickness on one axis) are still hit.
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray_origin[axis];
            let dir = ray_dir[axis];
            let (low, high) = (self.min[axis], self.max[axis]);

            if dir == 0.0 {
                if origin < low || origin > high {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t1 = (low - origin) * inv;
            let t2 = (high - origin) * inv;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        if t_exit >= t_enter && t_exit >= 0.0 {
            Some(t_enter.max(0.0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_orders_corners() {
        let aabb = AABB::new(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 1.0, 0.0));
        assert_eq!(aabb.min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 1.0, 5.0));
    }

    #[test]
    fn test_octants_partition_parent() {
        let parent = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 8.0));
        let mut volume = 0.0;
        for octant in 0..8 {
            let child = parent.octant(octant);
            assert!(parent.contains(&child));
            let size = child.max - child.min;
            assert_eq!(size, Vec3::new(2.0, 1.0, 4.0));
            volume += size.x * size.y * size.z;
        }
        assert_eq!(volume, 64.0);
        assert_eq!(parent.octant(7).min, parent.center());
        assert_eq!(parent.octant(0).max, parent.center());
    }

    #[test]
    fn test_ray_hits_from_outside() {
        let t = unit_box().intersect_ray(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_ray_inside_reports_zero() {
        let t = unit_box().intersect_ray(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn test_ray_behind_misses() {
        let t = unit_box().intersect_ray(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(t, None);
    }

    #[test]
    fn test_ray_parallel_outside_slab_misses() {
        let t = unit_box().intersect_ray(Vec3::new(0.0, 5.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t, None);
    }

    #[test]
    fn test_ray_hits_flat_box() {
        let flat = AABB::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let t = flat.intersect_ray(Vec3::new(1.0, 3.0, 1.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t, Some(3.0));
    }

    #[test]
    fn test_intersects_touching_boxes() {
        let a = unit_box();
        let b = unit_box().translated(Vec3::new(2.0, 0.0, 0.0));
        let c = unit_box().translated(Vec3::new(2.5, 0.0, 0.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_from_points() {
        let points = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 5.0, 0.0)];
        let aabb = AABB::from_points(points.iter()).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 5.0, 3.0));
        assert!(AABB::from_points(std::iter::empty()).is_none());
    }
}
