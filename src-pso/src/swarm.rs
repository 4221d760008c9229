use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{PsoError, validate_bounds};
use crate::history::SwarmHistory;
use crate::particle::{Coefficients, Particle, ParticleId};
use crate::{Boundary, PSOConfig, PSOIntermediate, PSOReport};

/// Particle swarm optimizer
///
/// Each iteration first evaluates every particle in id order, updating
/// personal and global bests as it goes, then moves every particle. A particle
/// evaluated later in the pass sees any global best found earlier in the same
/// pass.
pub struct ParticleSwarm<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	func: &'a F,
	bounds: Vec<(f64, f64)>,
	config: PSOConfig,
	coeffs: Coefficients,
	particles: Vec<Particle>,
	global_best_position: Array1<f64>,
	global_best_fitness: f64,
	history: Option<SwarmHistory>,
	rng: StdRng,
	iteration: usize,
	nfev: usize,
}

impl<'a, F> ParticleSwarm<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	/// Build a swarm of `config.num_particles` particles over `num_variables`
	/// variables.
	///
	/// # Errors
	/// Fails when there are no particles or no variables, when `bounds` does not
	/// hold exactly one pair per variable, or when a bound is not finite or has
	/// `upper < lower`.
	pub fn new(
		func: &'a F,
		num_variables: usize,
		bounds: &[(f64, f64)],
		config: PSOConfig,
	) -> Result<Self, PsoError> {
		if config.num_particles == 0 {
			return Err(PsoError::NoParticles);
		}
		validate_bounds(num_variables, bounds)?;

		let mut rng: StdRng = match config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};

		let particles: Vec<Particle> = (0..config.num_particles)
			.map(|k| Particle::new(ParticleId(k), bounds, config.initial_velocity, &mut rng))
			.collect();
		let history = config
			.record_history
			.then(|| SwarmHistory::new(config.num_particles, num_variables));

		log::debug!(
			"PSO init: {} particles, {} variables, maxiter={}, w={}, c1={}, c2={}, boundary={:?}",
			config.num_particles,
			num_variables,
			config.max_iterations,
			config.inertia_weight,
			config.cognitive_weight,
			config.social_weight,
			config.boundary
		);

		Ok(Self {
			func,
			bounds: bounds.to_vec(),
			coeffs: config.coefficients(),
			config,
			particles,
			global_best_position: Array1::zeros(num_variables),
			global_best_fitness: f64::INFINITY,
			history,
			rng,
			iteration: 0,
			nfev: 0,
		})
	}

	pub fn num_variables(&self) -> usize {
		self.bounds.len()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn global_best_position(&self) -> &Array1<f64> {
		&self.global_best_position
	}

	pub fn global_best_fitness(&self) -> f64 {
		self.global_best_fitness
	}

	/// Iterations performed so far
	pub fn iteration(&self) -> usize {
		self.iteration
	}

	pub fn nfev(&self) -> usize {
		self.nfev
	}

	/// Recorded trajectories, if `record_history` was set
	pub fn history(&self) -> Option<&SwarmHistory> {
		self.history.as_ref()
	}

	pub fn into_history(self) -> Option<SwarmHistory> {
		self.history
	}

	/// Run one evaluation pass followed by one update pass.
	pub fn iterate(&mut self) {
		let iter = self.iteration;

		// Evaluation and best tracking. No particle moves during this pass.
		let mut improvements = 0usize;
		for particle in self.particles.iter_mut() {
			let fitness = particle.evaluate(self.func);
			if let Some(history) = self.history.as_mut() {
				history.record_position(particle.id(), particle.position());
			}
			if particle.observe(fitness) {
				improvements += 1;
			}
			if fitness < self.global_best_fitness {
				self.global_best_fitness = fitness;
				self.global_best_position.assign(particle.position());
				if let Some(history) = self.history.as_mut() {
					history.record_global_best(iter, particle.id(), particle.position(), fitness);
				}
			}
		}
		self.nfev += self.particles.len();

		for particle in self.particles.iter_mut() {
			particle.advance(&self.global_best_position, &self.coeffs, &mut self.rng);
			if self.config.boundary == Boundary::Clamp {
				particle.clamp_to(&self.bounds);
			}
		}
		self.iteration += 1;

		if self.config.disp {
			log::info!(
				"PSO iter {:4}/{}  best_f={:.6e}  improved={}/{}",
				iter + 1,
				self.config.max_iterations,
				self.global_best_fitness,
				improvements,
				self.particles.len()
			);
		} else {
			log::debug!(
				"PSO iter {:4}  best_f={:.6e}  improved={}",
				iter,
				self.global_best_fitness,
				improvements
			);
		}

		if let Some(ref mut cb) = self.config.callback {
			let intermediate = PSOIntermediate {
				x: self.global_best_position.clone(),
				fun: self.global_best_fitness,
				iter,
				improvements,
			};
			cb(&intermediate);
		}
	}

	/// Run exactly `max_iterations` iterations and report the global best.
	///
	/// Calling it again continues from the current state for another
	/// `max_iterations` iterations.
	pub fn optimize(&mut self) -> PSOReport {
		let maxiter = self.config.max_iterations;
		if self.config.disp {
			log::info!(
				"PSO start: {} particles, {} variables, maxiter={}",
				self.particles.len(),
				self.num_variables(),
				maxiter
			);
		}
		for _ in 0..maxiter {
			self.iterate();
		}

		let message = format!("Maximum iterations reached: {}", maxiter);
		if self.config.disp {
			log::info!("PSO finished: {}, best_f={:.6e}", message, self.global_best_fitness);
		}
		self.report(message)
	}

	fn report(&self, message: String) -> PSOReport {
		PSOReport {
			x: self.global_best_position.clone(),
			fun: self.global_best_fitness,
			message,
			nit: self.iteration,
			nfev: self.nfev,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::PSOConfigBuilder;

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	#[test]
	fn test_rejects_bad_configuration() {
		let cfg = || PSOConfigBuilder::new().seed(1).build();
		assert!(matches!(
			ParticleSwarm::new(&sphere, 2, &[(0.0, 1.0)], cfg()),
			Err(PsoError::BoundsLengthMismatch { .. })
		));
		assert!(matches!(ParticleSwarm::new(&sphere, 0, &[], cfg()), Err(PsoError::NoVariables)));
		assert!(matches!(
			ParticleSwarm::new(&sphere, 1, &[(0.0, 1.0)], PSOConfigBuilder::new().num_particles(0).build()),
			Err(PsoError::NoParticles)
		));
		assert!(matches!(
			ParticleSwarm::new(&sphere, 1, &[(2.0, 1.0)], cfg()),
			Err(PsoError::InvalidBound { index: 0, .. })
		));
	}

	#[test]
	fn test_initial_state() {
		let cfg = PSOConfigBuilder::new().seed(3).num_particles(4).build();
		let swarm = ParticleSwarm::new(&sphere, 3, &[(-1.0, 1.0); 3], cfg).unwrap();
		assert_eq!(swarm.particles().len(), 4);
		assert_eq!(swarm.global_best_fitness(), f64::INFINITY);
		assert_eq!(swarm.global_best_position(), &Array1::<f64>::zeros(3));
		assert_eq!(swarm.iteration(), 0);
		assert!(swarm.history().is_none());
		for (k, p) in swarm.particles().iter().enumerate() {
			assert_eq!(p.id(), ParticleId(k));
		}
	}

	#[test]
	fn test_first_pass_matches_best_particle() {
		let cfg = PSOConfigBuilder::new().seed(11).num_particles(8).build();
		let mut swarm = ParticleSwarm::new(&sphere, 2, &[(-5.0, 5.0); 2], cfg).unwrap();
		let initial: Vec<Array1<f64>> = swarm.particles().iter().map(|p| p.position().clone()).collect();
		swarm.iterate();

		// the global best after one pass is the best initial position
		let (best_idx, best_f) = initial
			.iter()
			.map(sphere)
			.enumerate()
			.fold((0, f64::INFINITY), |acc, (i, f)| if f < acc.1 { (i, f) } else { acc });
		assert_eq!(swarm.global_best_fitness(), best_f);
		assert_eq!(swarm.global_best_position(), &initial[best_idx]);
		assert_eq!(swarm.nfev(), 8);
	}

	#[test]
	fn test_history_records_every_iteration() {
		let cfg = PSOConfigBuilder::new().seed(5).num_particles(3).max_iterations(7).record_history(true).build();
		let mut swarm = ParticleSwarm::new(&sphere, 2, &[(-5.0, 5.0); 2], cfg).unwrap();
		swarm.optimize();
		let history = swarm.history().unwrap();
		assert_eq!(history.len(), 7);
		assert_eq!(history.num_particles(), 3);
		let last = history.global_best().last().unwrap();
		assert_eq!(last.fitness, swarm.global_best_fitness());
		assert_eq!(last.position, swarm.global_best_position().to_vec());
		// chronological, strictly improving
		for pair in history.global_best().windows(2) {
			assert!(pair[0].iteration <= pair[1].iteration);
			assert!(pair[1].fitness < pair[0].fitness);
		}
	}

	#[test]
	fn test_clamp_keeps_particles_in_box() {
		let far = |x: &Array1<f64>| (x[0] - 50.0).powi(2);
		let cfg = PSOConfigBuilder::new()
			.seed(9)
			.num_particles(5)
			.max_iterations(30)
			.boundary(Boundary::Clamp)
			.build();
		let mut swarm = ParticleSwarm::new(&far, 1, &[(-1.0, 1.0)], cfg).unwrap();
		swarm.optimize();
		for p in swarm.particles() {
			assert!((-1.0..=1.0).contains(&p.position()[0]));
		}
		assert!(swarm.global_best_position()[0] > 0.99);
	}
}
