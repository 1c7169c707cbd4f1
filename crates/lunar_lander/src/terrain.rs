//! Procedural terrain for headless runs
//!
//! A square heightfield of rolling hills built from a few seeded sine waves,
//! flattened to y = 0 around every landing pad so the pads sit on level
//! ground.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lander_engine::foundation::math::{utils, Vec3};
use lander_engine::physics::LandingZone;
use lander_engine::spatial::{SpatialError, TerrainMesh};

use crate::config::HeightfieldConfig;

/// One sine wave of the height function
#[derive(Debug, Clone, Copy)]
struct Wave {
    frequency_x: f32,
    frequency_z: f32,
    phase: f32,
    weight: f32,
}

/// Seeded height function over the XZ plane
#[derive(Debug, Clone)]
pub struct Heightfield {
    waves: Vec<Wave>,
    amplitude: f32,
    clearings: Vec<Vec3>,
    clearing_radius: f32,
}

impl Heightfield {
    /// Create the height function for `config`, clearing the area around `pads`
    pub fn new(config: &HeightfieldConfig, pads: &LandingZone, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let waves = [0.04f32, 0.09, 0.21]
            .into_iter()
            .zip([0.6f32, 0.3, 0.1])
            .map(|(base, weight)| Wave {
                frequency_x: base * rng.gen_range(0.7f32..1.3),
                frequency_z: base * rng.gen_range(0.7f32..1.3),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                weight,
            })
            .collect();

        Self {
            waves,
            amplitude: config.amplitude,
            clearings: pads.pads.iter().map(|pad| pad.center).collect(),
            clearing_radius: config.pad_clearing.max(pads.radius),
        }
    }

    /// Terrain height at `(x, z)`
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let rolling: f32 = self
            .waves
            .iter()
            .map(|w| w.weight * (x * w.frequency_x + w.phase).sin() * (z * w.frequency_z + w.phase).cos())
            .sum();
        // Keep hills above the pad plane so pads are never buried
        let hills = self.amplitude * (rolling + 1.0) * 0.5;

        let point = Vec3::new(x, 0.0, z);
        let blend = self
            .clearings
            .iter()
            .map(|&center| {
                let distance = utils::planar_distance(point, center);
                // 0 inside the clearing, ramping to 1 over another radius
                ((distance - self.clearing_radius) / self.clearing_radius).clamp(0.0, 1.0)
            })
            .fold(1.0f32, f32::min);

        hills * blend
    }
}

/// Build a terrain mesh from a heightfield
pub fn generate(config: &HeightfieldConfig, pads: &LandingZone, seed: u64) -> Result<TerrainMesh, SpatialError> {
    let field = Heightfield::new(config, pads, seed);
    let cells = config.cells;
    let row = cells + 1;
    let spacing = config.size / cells as f32;
    let origin = -config.size * 0.5;

    let vertices = (0..row)
        .flat_map(|iz| (0..row).map(move |ix| (ix, iz)))
        .map(|(ix, iz)| {
            let x = origin + ix as f32 * spacing;
            let z = origin + iz as f32 * spacing;
            Vec3::new(x, field.height(x, z), z)
        })
        .collect();

    let mut triangles = Vec::with_capacity((cells * cells * 2) as usize);
    for iz in 0..cells {
        for ix in 0..cells {
            let i = iz * row + ix;
            triangles.push([i, i + row, i + 1]);
            triangles.push([i + 1, i + row, i + row + 1]);
        }
    }

    log::debug!("Generated {}x{} heightfield, spacing {spacing}", cells, cells);
    TerrainMesh::new(vertices, triangles)
}
