//! Scripted descent controller for headless runs
//!
//! Holds a hover altitude while flying toward the target pad, then descends
//! once it is over the pad. Yaw is left alone; steering maps the wanted
//! velocity change onto the body's heading and strafe directions.

use lander_engine::foundation::math::{utils, Vec3};
use lander_engine::physics::{FlightIntent, LanderBody};

/// Bang-bang pilot that steers toward a single landing point
#[derive(Debug, Clone)]
pub struct Autopilot {
    target: Vec3,
    /// Altitude held while still travelling
    pub hover_altitude: f32,
    /// Horizontal cruise speed cap
    pub max_horizontal_speed: f32,
    /// Descent starts inside this planar distance from the target
    pub capture_radius: f32,
    /// Fastest allowed descent
    pub max_descent_speed: f32,
    /// Descent speed close to the ground
    pub touchdown_speed: f32,
}

impl Autopilot {
    /// Fly to `target` (only X and Z matter)
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            hover_altitude: 8.0,
            max_horizontal_speed: 1.2,
            capture_radius: 1.0,
            max_descent_speed: 0.8,
            touchdown_speed: 0.3,
        }
    }

    /// Target point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Intents for the next tick
    pub fn command(&self, body: &LanderBody, altitude: Option<f32>) -> FlightIntent {
        let mut intents = FlightIntent::empty();

        let offset = Vec3::new(self.target.x - body.position.x, 0.0, self.target.z - body.position.z);
        let distance = utils::planar_distance(body.position, self.target);

        let desired = if distance > f32::EPSILON {
            offset / distance * (distance * 0.3).min(self.max_horizontal_speed)
        } else {
            Vec3::zeros()
        };
        let error = desired - Vec3::new(body.velocity.x, 0.0, body.velocity.z);

        let along = error.dot(&body.heading());
        let across = error.dot(&body.lateral_heading());
        let deadband = 0.05;
        if along.abs() >= across.abs() {
            if along > deadband {
                intents |= FlightIntent::FORWARD;
            } else if along < -deadband {
                intents |= FlightIntent::BACKWARD;
            }
        } else if across > deadband {
            intents |= FlightIntent::LEFT;
        } else if across < -deadband {
            intents |= FlightIntent::RIGHT;
        }

        let altitude = altitude.unwrap_or(body.position.y - self.target.y);
        let wanted_vy = if distance > self.capture_radius {
            ((self.hover_altitude - altitude) * 0.5).clamp(-self.max_descent_speed, self.max_descent_speed)
        } else {
            -(altitude * 0.2).clamp(self.touchdown_speed, self.max_descent_speed)
        };
        if body.velocity.y < wanted_vy {
            intents |= FlightIntent::THRUST;
        }

        intents
    }
}
