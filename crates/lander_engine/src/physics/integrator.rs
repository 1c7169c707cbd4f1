//! Per-tick flight integration
//!
//! Semi-implicit Euler: the position advances with the previous tick's
//! velocity before this tick's acceleration is applied.

use super::body::{FlightIntent, LanderBody};
use crate::foundation::math::Vec3;
use crate::foundation::time::sanitize_step;

/// Linear acceleration for the coming step.
///
/// Sum of the environment accumulator (gravity, possibly scaled by collision
/// response), thrust while fuel remains, descend, at most one directional
/// term and the turbulence impulse. Directional intents resolve in
/// forward > backward > left > right order.
pub fn compute_acceleration(body: &LanderBody) -> Vec3 {
    let params = &body.params;
    let intents = body.intents;
    let mut accel = body.acceleration;

    if body.thrust_active() {
        accel += params.thrust_force;
    }
    if intents.contains(FlightIntent::DESCEND) {
        accel += params.descend_force;
    }

    if intents.contains(FlightIntent::FORWARD) {
        accel += body.heading() * params.move_force;
    } else if intents.contains(FlightIntent::BACKWARD) {
        accel -= body.heading() * params.move_force;
    } else if intents.contains(FlightIntent::LEFT) {
        accel += body.lateral_heading() * params.move_force;
    } else if intents.contains(FlightIntent::RIGHT) {
        accel -= body.lateral_heading() * params.move_force;
    }

    accel + body.turbulence
}

/// Angular acceleration for the coming step; left wins over right
pub fn compute_angular_acceleration(body: &LanderBody) -> f32 {
    let base = body.angular_acceleration;
    if body.intents.contains(FlightIntent::ROTATE_LEFT) {
        base + body.params.angular_force
    } else if body.intents.contains(FlightIntent::ROTATE_RIGHT) {
        base - body.params.angular_force
    } else {
        base
    }
}

impl LanderBody {
    /// Advance the body by one tick.
    ///
    /// A zero, negative or non-finite `dt` is replaced by a fixed step of 1.
    /// Fuel drains by `dt` (never below zero) while thrust is producing force.
    /// The turbulence impulse is consumed and the acceleration accumulator is
    /// re-seeded with gravity. Returns the angular displacement of this tick.
    pub fn integrate(&mut self, dt: f32) -> f32 {
        let step = sanitize_step(dt);
        if step != dt {
            log::warn!("Degenerate frame step {dt}, integrating with {step}");
        }

        self.position += self.velocity * step;

        let accel = compute_acceleration(self);
        if self.thrust_active() {
            self.fuel = (self.fuel - step).max(0.0);
            if self.fuel == 0.0 {
                log::info!("Fuel exhausted");
            }
        }

        let damping = self.params.damping;
        self.velocity += accel * step;
        self.velocity *= damping;

        self.rotation += self.angular_velocity * step;
        let angular_accel = compute_angular_acceleration(self);
        self.angular_velocity += angular_accel * step;
        self.angular_velocity *= damping;

        self.turbulence = Vec3::zeros();
        self.acceleration = self.params.gravity_vector();

        self.angular_velocity * step
    }
}
