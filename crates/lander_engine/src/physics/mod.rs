//! Lander flight physics and terrain collision
//!
//! Provides the lander rigid body, its per-tick integrator, the landing pad
//! evaluation and the collision system that couples the body to the terrain
//! octree.

pub mod body;
pub mod collision_system;
pub mod integrator;
pub mod landing;
pub mod primitives;

pub use body::{FlightIntent, FlightParams, LanderBody};
pub use collision_system::{
    CollisionParams,
    CollisionState,
    ContactPhase,
    ContactResponse,
    TerrainCollisionSystem,
};
pub use integrator::{compute_acceleration, compute_angular_acceleration};
pub use landing::{Landing, LandingPad, LandingZone};
pub use primitives::{Ray, Triangle};
