//! Time management utilities
//!
//! The simulation samples frame time rather than having it pushed. A stalled
//! or zero-reporting source must never stall the simulation, so every
//! conversion from a frame rate to a step goes through [`step_delta`].

use std::time::Instant;

/// Step used when the frame-time source reports nothing usable
pub const FALLBACK_STEP: f32 = 1.0;

/// Convert a sampled frame rate into a simulation step.
///
/// Zero, negative or non-finite rates yield [`FALLBACK_STEP`].
pub fn step_delta(frame_rate: f32) -> f32 {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        1.0 / frame_rate
    } else {
        FALLBACK_STEP
    }
}

/// Sanitize a step that is about to be integrated.
///
/// Mirrors [`step_delta`] for callers that already hold a step.
pub fn sanitize_step(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        FALLBACK_STEP
    }
}

/// High-precision timer for frame timing
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current frame rate (based on last frame time), 0 before the first update
    pub fn frame_rate(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }

    /// Simulation step for the last measured frame
    pub fn step(&self) -> f32 {
        step_delta(self.frame_rate())
    }
}
