//! Particle Swarm Optimization (PSO) global optimizer in pure Rust using ndarray
//!
//! Minimises a black-box objective over a box given by per-variable
//! `(lower, upper)` bounds. The bounds seed the initial positions only; after
//! that particles move freely unless [`Boundary::Clamp`] is configured.
//!
//! Supported features:
//! - Fixed inertia / cognitive / social weights (defaults 0.5 / 1.5 / 1.5)
//! - Seeded, reproducible runs from a single random stream
//! - Single-step iteration for callers that want to observe every iteration
//! - Optional trajectory history with CSV/JSON export and a read-only replay view
//! - Per-iteration observer callback, used by the CSV convergence recorder
//!
//! ```
//! use ndarray::Array1;
//! use swarmopt_pso::{particle_swarm, PSOConfigBuilder};
//!
//! let f = |x: &Array1<f64>| (x[0] - 2.0).powi(2) + (x[1] - 2.0).powi(2);
//! let config = PSOConfigBuilder::new().seed(7).num_particles(20).max_iterations(200).build();
//! let report = particle_swarm(&f, &[(-10.0, 10.0), (-10.0, 10.0)], config).unwrap();
//! assert!(report.fun < 1e-3);
//! ```

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub mod env_utils;
pub mod error;
pub mod history;
pub mod optimization_recorder;
pub mod particle;
pub mod particle_swarm;
pub mod replay;
pub mod run_recorded;
pub mod swarm;


pub use env_utils::{EnvError, get_records_dir};
pub use error::PsoError;
pub use history::{GlobalBestRecord, SwarmHistory};
pub use optimization_recorder::{OptimizationRecord, OptimizationRecorder};
pub use particle::{Coefficients, Particle, ParticleId};
pub use particle_swarm::particle_swarm;
pub use replay::{Frame, Replay, ScreenPoint, Viewport};
pub use run_recorded::run_recorded_particle_swarm;
pub use swarm::ParticleSwarm;

/// What happens to a particle that flies out of the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
	/// Bounds only shape the initial swarm
	#[default]
	Unbounded,
	/// Positions are clamped back into the box after every move
	Clamp,
}

/// Information passed to the callback after each iteration
pub struct PSOIntermediate {
	/// Global best position after the iteration
	pub x: Array1<f64>,
	pub fun: f64,
	/// Zero-based index of the iteration that just finished
	pub iter: usize,
	/// Particles that improved their personal best during the iteration
	pub improvements: usize,
}

/// Configuration for the particle swarm optimizer
pub struct PSOConfig {
	pub num_particles: usize,
	pub max_iterations: usize,
	pub inertia_weight: f64,
	pub cognitive_weight: f64,
	pub social_weight: f64,
	/// Initial velocities are drawn uniformly from `[-initial_velocity, initial_velocity]`
	pub initial_velocity: f64,
	pub boundary: Boundary,
	pub seed: Option<u64>,
	/// Keep per-particle trajectories and the global best trajectory
	pub record_history: bool,
	/// Log progress at info level
	pub disp: bool,
	/// Optional per-iteration observer
	pub callback: Option<Box<dyn FnMut(&PSOIntermediate)>>,
}

impl Default for PSOConfig {
	fn default() -> Self {
		Self {
			num_particles: 30,
			max_iterations: 1000,
			inertia_weight: 0.5,
			cognitive_weight: 1.5,
			social_weight: 1.5,
			initial_velocity: 1.0,
			boundary: Boundary::default(),
			seed: None,
			record_history: false,
			disp: false,
			callback: None,
		}
	}
}

impl PSOConfig {
	pub fn coefficients(&self) -> Coefficients {
		Coefficients {
			inertia: self.inertia_weight,
			cognitive: self.cognitive_weight,
			social: self.social_weight,
		}
	}
}

impl fmt::Debug for PSOConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PSOConfig")
			.field("num_particles", &self.num_particles)
			.field("max_iterations", &self.max_iterations)
			.field("inertia_weight", &self.inertia_weight)
			.field("cognitive_weight", &self.cognitive_weight)
			.field("social_weight", &self.social_weight)
			.field("initial_velocity", &self.initial_velocity)
			.field("boundary", &self.boundary)
			.field("seed", &self.seed)
			.field("record_history", &self.record_history)
			.field("disp", &self.disp)
			.field("callback", &self.callback.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

/// Fluent builder for `PSOConfig`.
pub struct PSOConfigBuilder {
	cfg: PSOConfig,
}

impl Default for PSOConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl PSOConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: PSOConfig::default() }
	}
	pub fn num_particles(mut self, v: usize) -> Self {
		self.cfg.num_particles = v;
		self
	}
	pub fn max_iterations(mut self, v: usize) -> Self {
		self.cfg.max_iterations = v;
		self
	}
	pub fn inertia_weight(mut self, v: f64) -> Self {
		self.cfg.inertia_weight = v;
		self
	}
	pub fn cognitive_weight(mut self, v: f64) -> Self {
		self.cfg.cognitive_weight = v;
		self
	}
	pub fn social_weight(mut self, v: f64) -> Self {
		self.cfg.social_weight = v;
		self
	}
	pub fn initial_velocity(mut self, v: f64) -> Self {
		self.cfg.initial_velocity = v;
		self
	}
	pub fn boundary(mut self, v: Boundary) -> Self {
		self.cfg.boundary = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn record_history(mut self, v: bool) -> Self {
		self.cfg.record_history = v;
		self
	}
	pub fn disp(mut self, v: bool) -> Self {
		self.cfg.disp = v;
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&PSOIntermediate)>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> PSOConfig {
		self.cfg
	}
}

/// Result of a PSO run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PSOReport {
	/// Global best position
	pub x: Array1<f64>,
	/// Global best fitness, +inf if nothing finite was ever evaluated
	pub fun: f64,
	pub message: String,
	/// Iterations performed
	pub nit: usize,
	/// Objective evaluations performed
	pub nfev: usize,
}
