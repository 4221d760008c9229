use crate::{PSOConfig, PSOReport, ParticleSwarm, PsoError};
use ndarray::Array1;

/// Convenience function in the shape of the usual global optimizers:
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs, one per variable
/// - `config`: PSO configuration
pub fn particle_swarm<F>(func: &F, bounds: &[(f64, f64)], config: PSOConfig) -> Result<PSOReport, PsoError>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let mut pso = ParticleSwarm::new(func, bounds.len(), bounds, config)?;
	Ok(pso.optimize())
}
