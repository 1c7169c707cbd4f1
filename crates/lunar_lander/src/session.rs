//! Game session
//!
//! Owns the terrain index, the lander and its collision system, and runs them
//! in a fixed per-tick order:
//!
//! 1. apply the input intents (thrust is dropped once the tank is empty)
//! 2. add a turbulence impulse
//! 3. integrate the body
//! 4. measure altitude
//! 5. overlap against terrain and run the contact response
//! 6. decide whether the run is over
//!
//! Once an outcome is reached further ticks do nothing until [`GameSession::reset`].

use thiserror::Error;

use lander_engine::assets::{ObjError, ObjLoader};
use lander_engine::config::{Config, ConfigError};
use lander_engine::foundation::math::Vec3;
use lander_engine::foundation::time::step_delta;
use lander_engine::physics::{
    CollisionState, ContactResponse, FlightIntent, LanderBody, LandingZone, TerrainCollisionSystem,
};
use lander_engine::spatial::{Octree, SpatialError, TerrainMesh};

use crate::config::GameConfig;
use crate::terrain;
use crate::turbulence::TurbulenceSource;

/// Errors raised while setting up a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Terrain mesh could not be loaded
    #[error("Terrain load error: {0}")]
    Obj(#[from] ObjError),

    /// Terrain index could not be built
    #[error("Terrain index error: {0}")]
    Spatial(#[from] SpatialError),
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Touched terrain too fast
    Crashed,
    /// Sitting on terrain with an empty tank and no pad under the lander
    OutOfFuel,
    /// Touched down on a pad
    Landed {
        /// Pad index
        pad: usize,
        /// Awarded score
        score: f32,
    },
}

impl Outcome {
    /// Final score; only a landing scores
    pub fn score(&self) -> f32 {
        match self {
            Self::Landed { score, .. } => *score,
            Self::Crashed | Self::OutOfFuel => 0.0,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Altitude measured this tick, `None` with no ground below
    pub altitude: Option<f32>,
    /// Set on the first tick of a terrain contact
    pub contact: Option<ContactResponse>,
    /// Set once the run is over
    pub outcome: Option<Outcome>,
}

/// A single lander run over one terrain
pub struct GameSession {
    terrain: Octree,
    pads: LandingZone,
    body: LanderBody,
    collision: TerrainCollisionSystem,
    turbulence: TurbulenceSource,
    config: GameConfig,
    outcome: Option<Outcome>,
    last_altitude: Option<f32>,
    ticks: u64,
}

impl GameSession {
    /// Create a session, loading or generating terrain as configured
    pub fn new(config: &GameConfig) -> Result<Self, SessionError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let mesh = match &config.terrain.obj_path {
            Some(path) => ObjLoader::load_terrain(path)?,
            None => terrain::generate(&config.terrain.heightfield, &config.landing, config.session.seed)?,
        };
        Self::with_mesh(config, mesh)
    }

    /// Create a session over an existing mesh
    pub fn with_mesh(config: &GameConfig, mesh: TerrainMesh) -> Result<Self, SessionError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let terrain = Octree::build(mesh, config.octree.clone())?;
        let session = &config.session;
        let mut body = LanderBody::new(session.start_position, session.fuel, config.flight.clone());
        body.rotation = session.start_rotation;

        log::info!(
            "Session ready: start {:?}, fuel {}, {} landing pads",
            session.start_position,
            session.fuel,
            config.landing.pads.len()
        );

        Ok(Self {
            terrain,
            pads: config.landing.clone(),
            body,
            collision: TerrainCollisionSystem::new(config.collision.clone()),
            turbulence: TurbulenceSource::new(config.turbulence.clone(), session.seed),
            config: config.clone(),
            outcome: None,
            last_altitude: None,
            ticks: 0,
        })
    }

    /// Advance one tick with the given input
    pub fn tick(&mut self, frame_rate: f32, intents: FlightIntent) -> TickReport {
        if self.outcome.is_some() {
            return TickReport { altitude: self.last_altitude, contact: None, outcome: self.outcome };
        }

        let mut intents = intents;
        if self.body.fuel_exhausted() && intents.contains(FlightIntent::THRUST) {
            intents.remove(FlightIntent::THRUST);
        }
        self.body.intents = intents;

        self.body.add_turbulence(self.turbulence.sample());
        self.body.integrate(step_delta(frame_rate));
        self.ticks += 1;

        let altitude = self.collision.ray_altitude(&self.body, &self.terrain);
        if altitude.is_some() {
            self.last_altitude = altitude;
        }

        self.collision.check_collide(&self.body, &self.terrain);
        let contact = self.collision.apply_collide(&mut self.body, &self.pads);

        self.outcome = self.evaluate();
        if let Some(outcome) = self.outcome {
            log::info!("Run over after {} ticks: {:?}, score {}", self.ticks, outcome, outcome.score());
        }

        TickReport { altitude, contact, outcome: self.outcome }
    }

    fn evaluate(&self) -> Option<Outcome> {
        let state = self.collision.state();
        if state.crashed {
            return Some(Outcome::Crashed);
        }
        if let Some(landing) = state.landing {
            return Some(Outcome::Landed { pad: landing.pad, score: landing.score });
        }
        if state.colliding && self.body.fuel_exhausted() {
            return Some(Outcome::OutOfFuel);
        }
        None
    }

    /// Put the lander back at the start with a full tank and forget the run
    pub fn reset(&mut self) {
        let session = &self.config.session;
        self.body.reset(session.start_position, session.start_rotation, session.fuel);
        self.collision.reset();
        self.turbulence.reseed(session.seed);
        self.outcome = None;
        self.last_altitude = None;
        self.ticks = 0;
        log::info!("Session reset");
    }

    /// The lander
    pub fn body(&self) -> &LanderBody {
        &self.body
    }

    /// Mutable lander access for scripted setups
    pub fn body_mut(&mut self) -> &mut LanderBody {
        &mut self.body
    }

    /// Collision signals
    pub fn collision_state(&self) -> &CollisionState {
        self.collision.state()
    }

    /// Terrain index
    pub fn terrain(&self) -> &Octree {
        &self.terrain
    }

    /// Landing pads
    pub fn pads(&self) -> &LandingZone {
        &self.pads
    }

    /// Outcome once the run is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Current score, 0 until a landing
    pub fn score(&self) -> f32 {
        self.outcome.map_or(0.0, |outcome| outcome.score())
    }

    /// Most recent altitude that had ground below it
    pub fn last_altitude(&self) -> Option<f32> {
        self.last_altitude
    }

    /// Ticks since start or reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Lander position
    pub fn position(&self) -> Vec3 {
        self.body.position
    }
}
