//! Landing pad evaluation

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// A circular landing target on the terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    /// Pad center; only X and Z matter
    pub center: Vec3,
    /// Score for a precise landing on this pad
    pub score: f32,
}

impl LandingPad {
    /// Create a pad
    pub fn new(center: Vec3, score: f32) -> Self {
        Self { center, score }
    }
}

/// Result of a successful landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the pad landed on
    pub pad: usize,
    /// Awarded score
    pub score: f32,
    /// Whether the whole footprint was on the pad
    pub precise: bool,
    /// Planar distance from the pad center
    pub distance: f32,
}

/// The set of pads sharing one radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingZone {
    /// Pads in evaluation order
    pub pads: Vec<LandingPad>,
    /// Radius shared by every pad
    pub radius: f32,
}

impl Default for LandingZone {
    fn default() -> Self {
        Self {
            pads: vec![
                LandingPad::new(Vec3::new(0.129794, 0.0, 17.3758), 100.0),
                LandingPad::new(Vec3::new(2.80003, 0.0, -76.8603), 200.0),
                LandingPad::new(Vec3::new(-43.1438, 0.0, 96.1508), 300.0),
            ],
            radius: 2.5,
        }
    }
}

impl LandingZone {
    /// Create a zone
    pub fn new(pads: Vec<LandingPad>, radius: f32) -> Self {
        Self { pads, radius }
    }

    /// Validate the zone
    pub fn validate(&self) -> Result<(), String> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(format!("landing radius must be positive, got {}", self.radius));
        }
        if self.pads.iter().any(|pad| !pad.score.is_finite() || !pad.center.iter().all(|c| c.is_finite())) {
            return Err("landing pads must have finite centers and scores".to_string());
        }
        Ok(())
    }

    /// Evaluate a touchdown at `position`.
    ///
    /// Within `radius` of a pad center (in X/Z) the landing counts. Within
    /// `radius - footprint_half_length` it scores the pad's full value,
    /// otherwise half. Every pad is checked and the last match is kept, so
    /// with overlapping pads the later one decides.
    pub fn check_landing(&self, position: Vec3, footprint_half_length: f32) -> Option<Landing> {
        let mut landing = None;

        for (index, pad) in self.pads.iter().enumerate() {
            let distance = utils::planar_distance(position, pad.center);
            if distance > self.radius {
                continue;
            }

            let precise = distance <= self.radius - footprint_half_length;
            let score = if precise { pad.score } else { pad.score / 2.0 };
            landing = Some(Landing { pad: index, score, precise, distance });
        }

        landing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pad() -> LandingZone {
        LandingZone::new(vec![LandingPad::new(Vec3::zeros(), 100.0)], 2.5)
    }

    #[test]
    fn test_center_scores_full() {
        let landing = single_pad().check_landing(Vec3::new(0.0, 3.0, 0.0), 1.0).unwrap();
        assert_eq!(landing.pad, 0);
        assert_eq!(landing.score, 100.0);
        assert!(landing.precise);
    }

    #[test]
    fn test_off_center_scores_half() {
        let landing = single_pad().check_landing(Vec3::new(2.0, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(landing.score, 50.0);
        assert!(!landing.precise);
    }

    #[test]
    fn test_precision_edge_is_inclusive() {
        let zone = single_pad();
        assert_eq!(zone.check_landing(Vec3::new(1.5, 0.0, 0.0), 1.0).unwrap().score, 100.0);
        assert_eq!(zone.check_landing(Vec3::new(0.0, 0.0, 2.5), 1.0).unwrap().score, 50.0);
    }

    #[test]
    fn test_outside_radius_misses() {
        assert!(single_pad().check_landing(Vec3::new(2.6, 0.0, 0.0), 1.0).is_none());
        assert!(LandingZone::new(Vec::new(), 2.5).check_landing(Vec3::zeros(), 1.0).is_none());
    }

    #[test]
    fn test_height_is_ignored() {
        let landing = single_pad().check_landing(Vec3::new(0.0, -40.0, 1.0), 1.0).unwrap();
        assert_eq!(landing.score, 100.0);
        assert_eq!(landing.distance, 1.0);
    }

    #[test]
    fn test_overlapping_pads_last_match_wins() {
        // Loop order decides, not proximity: the body sits on pad 0's center
        // but pad 1 is also in range.
        let zone = LandingZone::new(
            vec![
                LandingPad::new(Vec3::new(0.0, 0.0, 0.0), 100.0),
                LandingPad::new(Vec3::new(2.0, 0.0, 0.0), 300.0),
            ],
            2.5,
        );
        let landing = zone.check_landing(Vec3::zeros(), 1.0).unwrap();
        assert_eq!(landing.pad, 1);
        assert_eq!(landing.score, 150.0);
    }

    #[test]
    fn test_default_pads() {
        let zone = LandingZone::default();
        assert!(zone.validate().is_ok());
        let landing = zone.check_landing(Vec3::new(2.80003, 10.0, -76.8603), 1.0).unwrap();
        assert_eq!(landing.pad, 1);
        assert_eq!(landing.score, 200.0);
    }
}
