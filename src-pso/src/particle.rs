//! A single swarm member: current position, velocity and personal best.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable identity of a particle, its index in the swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

/// Velocity update coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
	pub inertia: f64,
	pub cognitive: f64,
	pub social: f64,
}

#[derive(Debug, Clone)]
pub struct Particle {
	id: ParticleId,
	position: Array1<f64>,
	velocity: Array1<f64>,
	best_position: Array1<f64>,
	best_fitness: f64,
}

impl Particle {
	/// Draw a particle uniformly inside `bounds`, with each velocity
	/// component uniform in `[-velocity_span, velocity_span]`.
	///
	/// All positions are drawn before any velocity.
	pub(crate) fn new<R: Rng + ?Sized>(
		id: ParticleId,
		bounds: &[(f64, f64)],
		velocity_span: f64,
		rng: &mut R,
	) -> Self {
		let position: Array1<f64> =
			bounds.iter().map(|&(lo, hi)| uniform(lo, hi, rng)).collect();
		let velocity: Array1<f64> =
			(0..bounds.len()).map(|_| uniform(-velocity_span, velocity_span, rng)).collect();
		let best_position = position.clone();
		Self { id, position, velocity, best_position, best_fitness: f64::INFINITY }
	}

	pub fn id(&self) -> ParticleId {
		self.id
	}

	pub fn position(&self) -> &Array1<f64> {
		&self.position
	}

	pub fn velocity(&self) -> &Array1<f64> {
		&self.velocity
	}

	pub fn best_position(&self) -> &Array1<f64> {
		&self.best_position
	}

	pub fn best_fitness(&self) -> f64 {
		self.best_fitness
	}

	/// Objective value at the current position. Does not touch particle state.
	pub fn evaluate<F>(&self, func: &F) -> f64
	where
		F: Fn(&Array1<f64>) -> f64,
	{
		func(&self.position)
	}

	/// Record `fitness` (taken at the current position) as personal best if it is
	/// strictly lower. NaN never passes the comparison.
	pub(crate) fn observe(&mut self, fitness: f64) -> bool {
		if fitness < self.best_fitness {
			self.best_fitness = fitness;
			self.best_position.assign(&self.position);
			true
		} else {
			false
		}
	}

	/// Velocity then position update, one variable at a time, drawing `r1`
	/// before `r2` for each variable.
	pub(crate) fn advance<R: Rng + ?Sized>(
		&mut self,
		global_best: &Array1<f64>,
		coeffs: &Coefficients,
		rng: &mut R,
	) {
		for i in 0..self.position.len() {
			let r1: f64 = rng.random();
			let r2: f64 = rng.random();
			let x = self.position[i];
			self.velocity[i] = coeffs.inertia * self.velocity[i]
				+ coeffs.cognitive * r1 * (self.best_position[i] - x)
				+ coeffs.social * r2 * (global_best[i] - x);
			self.position[i] = x + self.velocity[i];
		}
	}

	/// Pull every coordinate back inside `bounds`.
	pub(crate) fn clamp_to(&mut self, bounds: &[(f64, f64)]) {
		for (x, &(lo, hi)) in self.position.iter_mut().zip(bounds) {
			*x = x.clamp(lo, hi);
		}
	}
}

/// Uniform draw in `[lo, hi]`; a zero-width interval yields `lo`.
///
/// Interpolates between the ends so spans wider than `f64::MAX` stay finite.
fn uniform<R: Rng + ?Sized>(lo: f64, hi: f64, rng: &mut R) -> f64 {
	let u: f64 = rng.random();
	(lo * (1.0 - u) + hi * u).max(lo).min(hi)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn coeffs() -> Coefficients {
		Coefficients { inertia: 0.5, cognitive: 1.5, social: 1.5 }
	}

	#[test]
	fn test_new_particle_within_bounds() {
		let mut rng = StdRng::seed_from_u64(7);
		let bounds = vec![(-3.0, -1.0), (0.0, 10.0), (4.0, 4.0)];
		for k in 0..200 {
			let p = Particle::new(ParticleId(k), &bounds, 1.0, &mut rng);
			for (i, &(lo, hi)) in bounds.iter().enumerate() {
				assert!(p.position()[i] >= lo && p.position()[i] <= hi);
				assert!(p.velocity()[i].abs() <= 1.0);
			}
			assert_eq!(p.position()[2], 4.0);
			assert_eq!(p.best_position(), p.position());
			assert_eq!(p.best_fitness(), f64::INFINITY);
			assert_eq!(p.id(), ParticleId(k));
		}
	}

	#[test]
	fn test_evaluate_is_pure() {
		let mut rng = StdRng::seed_from_u64(1);
		let p = Particle::new(ParticleId(0), &[(-1.0, 1.0), (-1.0, 1.0)], 1.0, &mut rng);
		let f = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
		let before = p.clone();
		let a = p.evaluate(&f);
		let b = p.evaluate(&f);
		assert_eq!(a, b);
		assert_eq!(p.position(), before.position());
		assert_eq!(p.best_fitness(), before.best_fitness());
	}

	#[test]
	fn test_observe_strict_and_nan() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut p = Particle::new(ParticleId(0), &[(0.0, 1.0)], 1.0, &mut rng);
		assert!(!p.observe(f64::NAN));
		assert_eq!(p.best_fitness(), f64::INFINITY);
		assert!(!p.observe(f64::INFINITY));
		assert!(p.observe(3.0));
		assert!(!p.observe(3.0));
		assert!(p.observe(2.5));
		assert_eq!(p.best_fitness(), 2.5);
	}

	#[test]
	fn test_advance_without_pull_is_inertial() {
		// pbest == gbest == position: only inertia moves the particle
		let mut rng = StdRng::seed_from_u64(3);
		let mut p = Particle::new(ParticleId(0), &[(2.0, 2.0)], 1.0, &mut rng);
		let v0 = p.velocity()[0];
		let gbest = p.position().clone();
		p.advance(&gbest, &coeffs(), &mut rng);
		assert!((p.velocity()[0] - 0.5 * v0).abs() < 1e-15);
		assert!((p.position()[0] - (2.0 + 0.5 * v0)).abs() < 1e-15);
	}

	#[test]
	fn test_uniform_over_huge_span() {
		let mut rng = StdRng::seed_from_u64(6);
		let draws: Vec<f64> = (0..100).map(|_| uniform(-1e308, 1e308, &mut rng)).collect();
		assert!(draws.iter().all(|x| x.is_finite() && x.abs() <= 1e308));
		assert!(draws.iter().any(|&x| x < 0.0));
		assert!(draws.iter().any(|&x| x > 0.0 && x < 1e308));

		let p = Particle::new(ParticleId(0), &[(-f64::MAX, f64::MAX)], 1.0, &mut rng);
		assert!(p.position()[0].is_finite());
		assert!(p.position()[0] < f64::MAX);
	}

	#[test]
	fn test_uniform_degenerate_interval() {
		let mut rng = StdRng::seed_from_u64(8);
		for _ in 0..100 {
			assert_eq!(uniform(0.1, 0.1, &mut rng), 0.1);
		}
	}

	#[test]
	fn test_clamp_to_bounds() {
		let mut rng = StdRng::seed_from_u64(4);
		let bounds = [(0.0, 1.0), (0.0, 1.0)];
		let mut p = Particle::new(ParticleId(0), &bounds, 1.0, &mut rng);
		let far = Array1::from(vec![50.0, -50.0]);
		for _ in 0..5 {
			p.advance(&far, &coeffs(), &mut rng);
		}
		p.clamp_to(&bounds);
		assert!(p.position().iter().all(|&x| (0.0..=1.0).contains(&x)));
	}
}
