//! Lander versus terrain collision
//!
//! Couples the lander body to the terrain octree: altitude by downward ray
//! cast, contact by broad-phase box overlap, and a debounced bounce response.
//!
//! Contact is a two-state latch. The bounce fires on the first tick of an
//! overlap episode only; while the overlap persists the body is left alone,
//! and the latch re-arms the moment the overlap clears. Without it a body
//! resting on terrain would receive a fresh impulse every tick.

use serde::{Deserialize, Serialize};

use super::body::LanderBody;
use super::landing::{Landing, LandingZone};
use super::primitives::Ray;
use crate::spatial::{Octree, AABB};

/// Collision response constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Any velocity component above this magnitude on contact is a crash
    pub crash_speed: f32,
    /// Velocity multiplier on bounce (applied negated)
    pub restitution: f32,
    /// Acceleration multiplier on bounce (applied negated)
    pub push_out: f32,
    /// X velocity forced on bounce when it would not separate
    pub min_separation_speed: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            crash_speed: 1.8,
            restitution: 0.5,
            push_out: 6.0,
            min_separation_speed: 0.1,
        }
    }
}

impl CollisionParams {
    /// Validate the parameters
    pub fn validate(&self) -> Result<(), String> {
        let values = [self.crash_speed, self.restitution, self.push_out, self.min_separation_speed];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("collision parameters must be finite and non-negative".to_string());
        }
        Ok(())
    }
}

/// Contact latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactPhase {
    /// Not touching terrain; the next contact bounces
    #[default]
    Clear,
    /// Touching terrain and already bounced this episode
    Clipped,
}

/// Collision signals read by the game-state layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionState {
    /// Overlapping terrain this tick
    pub colliding: bool,
    /// Bounce latch
    pub phase: ContactPhase,
    /// Latched once a contact exceeded the crash speed
    pub crashed: bool,
    /// Latched on the first contact inside a pad
    pub landing: Option<Landing>,
    /// Height above the ground directly below, `None` with no ground below
    pub altitude: Option<f32>,
}

/// What the response did on a contact tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResponse {
    /// Whether the contact was fast enough to crash
    pub crashed: bool,
    /// Landing result evaluated at the contact position
    pub landing: Option<Landing>,
}

/// Terrain collision for a single lander
#[derive(Debug, Clone, Default)]
pub struct TerrainCollisionSystem {
    params: CollisionParams,
    state: CollisionState,
    contacts: Vec<AABB>,
}

impl TerrainCollisionSystem {
    /// Create a system in the clear state
    pub fn new(params: CollisionParams) -> Self {
        Self {
            params,
            state: CollisionState::default(),
            contacts: Vec::new(),
        }
    }

    /// Current signals
    pub fn state(&self) -> &CollisionState {
        &self.state
    }

    /// Response constants
    pub fn params(&self) -> &CollisionParams {
        &self.params
    }

    /// Leaf bounds overlapped by the last [`check_collide`](Self::check_collide)
    pub fn contacts(&self) -> &[AABB] {
        &self.contacts
    }

    /// Forget all contact, crash and landing state
    pub fn reset(&mut self) {
        self.state = CollisionState::default();
        self.contacts.clear();
    }

    /// Cast a ray straight down from the body and measure the gap to the
    /// surface it hits.
    pub fn ray_altitude(&mut self, body: &LanderBody, index: &Octree) -> Option<f32> {
        let ray = Ray::downward(body.position);
        let altitude = index
            .intersect_ray(&ray)
            .map(|hit| body.position.y - hit.point.y);
        self.state.altitude = altitude;
        altitude
    }

    /// Overlap the body's world bounds against terrain leaves
    pub fn check_collide(&mut self, body: &LanderBody, index: &Octree) -> bool {
        self.contacts.clear();
        let bounds = body.world_bounds();
        self.state.colliding = index.intersect_aabb(&bounds, &mut self.contacts);
        self.state.colliding
    }

    /// React to the overlap found by the last
    /// [`check_collide`](Self::check_collide).
    ///
    /// Only the first tick of an overlap episode responds: a crash check, the
    /// bounce, and landing evaluation against `pads`. The crash check does
    /// not suppress the bounce. Returns `Some` exactly on those ticks.
    pub fn apply_collide(&mut self, body: &mut LanderBody, pads: &LandingZone) -> Option<ContactResponse> {
        if !self.state.colliding {
            if self.state.phase == ContactPhase::Clipped {
                log::debug!("Contact cleared at {:?}", body.position);
            }
            self.state.phase = ContactPhase::Clear;
            return None;
        }

        if self.state.phase == ContactPhase::Clipped {
            return None;
        }

        let crashed = body.velocity.iter().any(|v| v.abs() > self.params.crash_speed);
        if crashed {
            log::info!("Crash on contact, velocity {:?}", body.velocity);
            self.state.crashed = true;
        }

        body.velocity *= -self.params.restitution;
        body.acceleration *= -self.params.push_out;
        if body.velocity.x <= 0.0 {
            body.velocity.x = self.params.min_separation_speed;
        }

        let landing = pads.check_landing(body.position, body.params.footprint_half_length);
        if let Some(landing) = landing {
            log::info!("Landed on pad {} for {} points", landing.pad, landing.score);
            self.state.landing = Some(landing);
        }

        log::debug!("Bounce at {:?}, {} leaves in contact", body.position, self.contacts.len());
        self.state.phase = ContactPhase::Clipped;

        Some(ContactResponse { crashed, landing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::body::FlightParams;
    use crate::physics::landing::LandingPad;
    use crate::physics::primitives::Triangle;
    use crate::spatial::{OctreeConfig, TerrainMesh};
    use approx::assert_relative_eq;

    /// A 40 x 40 floor at y = 0 centered on the origin
    fn floor() -> Octree {
        let (a, b, c, d) = (
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(-20.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, -20.0),
        );
        let mesh = TerrainMesh::from_triangles(&[Triangle::new(a, b, c), Triangle::new(a, c, d)]).unwrap();
        Octree::build(mesh, OctreeConfig::default()).unwrap()
    }

    fn body_at(y: f32) -> LanderBody {
        LanderBody::new(Vec3::new(5.0, y, 3.0), 120.0, FlightParams::default())
    }

    fn no_pads() -> LandingZone {
        LandingZone::new(Vec::new(), 2.5)
    }

    #[test]
    fn test_altitude_over_floor() {
        let mut system = TerrainCollisionSystem::default();
        let altitude = system.ray_altitude(&body_at(12.5), &floor()).unwrap();
        assert_relative_eq!(altitude, 12.5);
        assert_eq!(system.state().altitude, Some(altitude));
    }

    #[test]
    fn test_altitude_without_ground() {
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(10.0);
        body.position.x = 100.0;
        assert!(system.ray_altitude(&body, &floor()).is_none());
        assert!(system.ray_altitude(&body_at(10.0), &Octree::default()).is_none());
    }

    #[test]
    fn test_check_collide() {
        let index = floor();
        let mut system = TerrainCollisionSystem::default();
        assert!(!system.check_collide(&body_at(3.0), &index));
        assert!(system.contacts().is_empty());

        assert!(system.check_collide(&body_at(0.0), &index));
        assert!(!system.contacts().is_empty());
        assert!(system.check_collide(&body_at(-0.5), &index));
    }

    #[test]
    fn test_bounce_on_first_contact_only() {
        let index = floor();
        let pads = no_pads();
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(0.0);
        body.velocity = Vec3::new(0.4, -1.0, 0.2);

        assert!(system.check_collide(&body, &index));
        let response = system.apply_collide(&mut body, &pads).unwrap();
        assert!(!response.crashed);
        assert_relative_eq!(body.velocity, Vec3::new(0.1, 0.5, -0.1));
        assert_relative_eq!(body.acceleration, Vec3::new(0.0, 1.8, 0.0), epsilon = 1e-6);
        assert_eq!(system.state().phase, ContactPhase::Clipped);

        // Still overlapping: no further response
        for _ in 0..5 {
            let before = body.velocity;
            assert!(system.check_collide(&body, &index));
            assert!(system.apply_collide(&mut body, &pads).is_none());
            assert_eq!(body.velocity, before);
        }

        // Clear re-arms the latch
        body.position.y = 5.0;
        assert!(!system.check_collide(&body, &index));
        assert!(system.apply_collide(&mut body, &pads).is_none());
        assert_eq!(system.state().phase, ContactPhase::Clear);

        body.position.y = 0.0;
        body.velocity = Vec3::new(1.0, -1.0, 1.0);
        assert!(system.check_collide(&body, &index));
        assert!(system.apply_collide(&mut body, &pads).is_some());
        assert_relative_eq!(body.velocity, Vec3::new(0.1, 0.5, -0.5));
    }

    #[test]
    fn test_negative_x_gets_separation_speed() {
        let index = floor();
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(0.0);
        body.velocity = Vec3::new(-0.6, -0.5, 0.0);
        system.check_collide(&body, &index);
        system.apply_collide(&mut body, &no_pads());
        // -0.5 * -0.6 = 0.3 is already separating
        assert_relative_eq!(body.velocity.x, 0.3);
    }

    #[test]
    fn test_fast_contact_crashes_and_still_bounces() {
        let index = floor();
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(0.0);
        body.velocity = Vec3::new(0.0, -2.0, 0.0);

        system.check_collide(&body, &index);
        let response = system.apply_collide(&mut body, &no_pads()).unwrap();
        assert!(response.crashed);
        assert!(system.state().crashed);
        assert_relative_eq!(body.velocity.y, 1.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let index = floor();
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(0.0);
        body.velocity = Vec3::new(1.8, -1.8, 1.8);
        system.check_collide(&body, &index);
        assert!(!system.apply_collide(&mut body, &no_pads()).unwrap().crashed);
    }

    #[test]
    fn test_contact_evaluates_landing() {
        let index = floor();
        let pads = LandingZone::new(vec![LandingPad::new(Vec3::new(5.0, 0.0, 5.0), 200.0)], 2.5);
        let mut system = TerrainCollisionSystem::default();
        let mut body = body_at(0.0);
        body.velocity = Vec3::new(0.0, -0.5, 0.0);

        system.check_collide(&body, &index);
        let response = system.apply_collide(&mut body, &pads).unwrap();
        let landing = response.landing.unwrap();
        assert_eq!(landing.score, 100.0);
        assert_eq!(system.state().landing, Some(landing));

        system.reset();
        assert_eq!(system.state(), &CollisionState::default());
    }
}
