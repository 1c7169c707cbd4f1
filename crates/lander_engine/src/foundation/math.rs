//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the heading helpers used by the flight model.
//! Headings are measured in degrees about the +Y (vertical) axis.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Unit vector in the XZ plane for a heading of `degrees` about +Y.
    ///
    /// A heading of 0 points along +Z, 90 along +X.
    pub fn planar_heading(degrees: f32) -> Vec3 {
        let radians = deg_to_rad(degrees);
        Vec3::new(radians.sin(), 0.0, radians.cos()).normalize()
    }

    /// Distance between two points ignoring the vertical axis
    pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
        let dx = a.x - b.x;
        let dz = a.z - b.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Component-wise minimum
    pub fn min_components(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
    }

    /// Component-wise maximum
    pub fn max_components(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
    }
}
