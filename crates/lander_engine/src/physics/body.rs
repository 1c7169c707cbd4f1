//! Lander rigid body state
//!
//! Kinematic state of the craft plus the tuning constants of its flight model.
//! The input layer sets [`FlightIntent`] flags before each integration step
//! and clears them itself on key release; the body never clears them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};
use crate::spatial::AABB;

bitflags! {
    /// Movement intents written by the input layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlightIntent: u8 {
        /// Main engine, consumes fuel
        const THRUST = 1 << 0;
        /// Push downward
        const DESCEND = 1 << 1;
        /// Move along the heading
        const FORWARD = 1 << 2;
        /// Move against the heading
        const BACKWARD = 1 << 3;
        /// Strafe left
        const LEFT = 1 << 4;
        /// Strafe right
        const RIGHT = 1 << 5;
        /// Yaw counter-clockwise (increasing heading)
        const ROTATE_LEFT = 1 << 6;
        /// Yaw clockwise
        const ROTATE_RIGHT = 1 << 7;
    }
}

impl Default for FlightIntent {
    fn default() -> Self {
        Self::empty()
    }
}

/// Flight model constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParams {
    /// Vertical gravity acceleration (negative is down)
    pub gravity: f32,
    /// Acceleration from the main engine
    pub thrust_force: Vec3,
    /// Acceleration while descending
    pub descend_force: Vec3,
    /// Magnitude of forward/backward/strafe acceleration
    pub move_force: f32,
    /// Angular acceleration from a yaw intent, degrees per second squared
    pub angular_force: f32,
    /// Per-tick multiplier on linear and angular velocity (1 = no drag)
    pub damping: f32,
    /// Collision volume relative to the body's position
    pub local_bounds: AABB,
    /// Half the footprint length, used for landing precision
    pub footprint_half_length: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            gravity: -0.3,
            thrust_force: Vec3::new(0.0, 2.0, 0.0),
            descend_force: Vec3::new(0.0, -2.0, 0.0),
            move_force: 3.0,
            angular_force: 12.0,
            damping: 0.99,
            local_bounds: AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.5, 1.0)),
            footprint_half_length: 1.0,
        }
    }
}

impl FlightParams {
    /// Gravity as a vector
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity, 0.0)
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(format!("damping must be in (0, 1], got {}", self.damping));
        }
        let scalars = [self.gravity, self.move_force, self.angular_force, self.footprint_half_length];
        let vectors = [self.thrust_force, self.descend_force, self.local_bounds.min, self.local_bounds.max];
        if !scalars.iter().all(|s| s.is_finite()) || !vectors.iter().flatten().all(|c| c.is_finite()) {
            return Err("flight parameters must be finite".to_string());
        }
        if self.footprint_half_length < 0.0 {
            return Err("footprint_half_length cannot be negative".to_string());
        }
        let bounds = &self.local_bounds;
        if (0..3).any(|axis| bounds.min[axis] > bounds.max[axis]) {
            return Err(format!(
                "local_bounds min {:?} exceeds max {:?}",
                bounds.min, bounds.max
            ));
        }
        Ok(())
    }
}

/// Rigid body state of the lander
#[derive(Debug, Clone)]
pub struct LanderBody {
    /// World position
    pub position: Vec3,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Environment acceleration accumulator.
    ///
    /// Seeded with gravity after every integration step; collision response
    /// may scale it before the next step consumes it.
    pub acceleration: Vec3,

    /// Heading about +Y in degrees
    pub rotation: f32,

    /// Angular velocity in degrees per second
    pub angular_velocity: f32,

    /// Base angular acceleration, degrees per second squared
    pub angular_acceleration: f32,

    /// One-tick turbulence impulse, cleared by every integration step
    pub turbulence: Vec3,

    /// Remaining fuel in time units
    pub fuel: f32,

    /// Active movement intents
    pub intents: FlightIntent,

    /// Flight model constants
    pub params: FlightParams,
}

impl LanderBody {
    /// Create a body at rest
    pub fn new(position: Vec3, fuel: f32, params: FlightParams) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            acceleration: params.gravity_vector(),
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            turbulence: Vec3::zeros(),
            fuel: fuel.max(0.0),
            intents: FlightIntent::empty(),
            params,
        }
    }

    /// Put the body back at rest at `position` with a full tank
    pub fn reset(&mut self, position: Vec3, rotation: f32, fuel: f32) {
        *self = Self {
            rotation,
            ..Self::new(position, fuel, self.params.clone())
        };
    }

    /// Set or clear one or more intents
    pub fn set_intent(&mut self, intent: FlightIntent, active: bool) {
        self.intents.set(intent, active);
    }

    /// Accumulate a turbulence impulse for the next step
    pub fn add_turbulence(&mut self, force: Vec3) {
        self.turbulence += force;
    }

    /// Forward direction for the current heading
    pub fn heading(&self) -> Vec3 {
        utils::planar_heading(self.rotation + 180.0)
    }

    /// Strafe direction for the current heading (heading turned 90 degrees)
    pub fn lateral_heading(&self) -> Vec3 {
        utils::planar_heading(self.rotation - 90.0)
    }

    /// Whether the tank is empty
    pub fn fuel_exhausted(&self) -> bool {
        self.fuel <= 0.0
    }

    /// Whether the main engine is producing thrust
    pub fn thrust_active(&self) -> bool {
        self.intents.contains(FlightIntent::THRUST) && self.fuel > 0.0
    }

    /// World-space collision volume
    pub fn world_bounds(&self) -> AABB {
        self.params.local_bounds.translated(self.position)
    }
}
