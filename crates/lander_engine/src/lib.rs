//! # Lander Engine
//!
//! Simulation core for a lunar lander game: a static terrain octree, the
//! lander's flight model and terrain collision with landing evaluation.
//!
//! ## Features
//!
//! - **Terrain Index**: Octree over a triangle mesh with closest-hit ray and
//!   broad-phase box queries
//! - **Flight Model**: Semi-implicit Euler integration with thrust, fuel,
//!   directional intents, turbulence and damping
//! - **Collision**: Debounced bounce response, crash detection and pad scoring
//! - **Assets**: Wavefront OBJ terrain loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lander_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mesh = ObjLoader::load_terrain("assets/moon.obj")?;
//!     let terrain = Octree::build(mesh, OctreeConfig::default())?;
//!
//!     let mut body = LanderBody::new(Vec3::new(37.0, 30.0, 57.0), 120.0, FlightParams::default());
//!     let mut collision = TerrainCollisionSystem::new(CollisionParams::default());
//!     let pads = LandingZone::default();
//!
//!     body.integrate(1.0 / 60.0);
//!     collision.ray_altitude(&body, &terrain);
//!     collision.check_collide(&body, &terrain);
//!     collision.apply_collide(&mut body, &pads);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod spatial;
pub mod physics;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ObjError, ObjLoader},
        config::{Config, ConfigError, ConfigFormat},
        foundation::{
            math::Vec3,
            time::{step_delta, FrameTimer},
        },
        physics::{
            CollisionParams, CollisionState, FlightIntent, FlightParams, Landing, LandingPad,
            LandingZone, LanderBody, Ray, TerrainCollisionSystem, Triangle,
        },
        spatial::{Octree, OctreeConfig, SpatialError, TerrainMesh, AABB},
    };
}
