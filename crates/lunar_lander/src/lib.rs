//! # Lunar Lander
//!
//! Game layer over `lander_engine`: configuration, terrain setup, turbulence
//! and the per-tick session that decides crashes, landings and running out
//! of fuel. The `lunar_lander` binary flies a scripted descent headlessly.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod autopilot;
pub mod config;
pub mod session;
pub mod terrain;
pub mod turbulence;

pub use autopilot::Autopilot;
pub use config::GameConfig;
pub use session::{GameSession, Outcome, SessionError, TickReport};
