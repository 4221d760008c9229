use std::path::{Path, PathBuf};

use ndarray::Array1;

use crate::{OptimizationRecorder, PSOConfig, PSOReport, ParticleSwarm, PsoError};

/// Paths written by a recorded run
#[derive(Debug, Clone)]
pub struct RecordedPaths {
	/// Per-iteration convergence trace
	pub convergence: PathBuf,
	/// Particle trajectories and global best trajectory, when history was recorded
	pub trajectories: Option<(PathBuf, PathBuf)>,
}

/// Run a particle swarm with recording of per-iteration progress to CSV
///
/// The convergence trace lands in `<output_dir>/<function_name>.csv`. When
/// `config.record_history` is set the trajectories are saved next to it.
/// Any callback already in `config` is replaced by the recorder.
pub fn run_recorded_particle_swarm<F>(
	function_name: &str,
	func: F,
	bounds: &[(f64, f64)],
	mut config: PSOConfig,
	output_dir: &Path,
) -> Result<(PSOReport, RecordedPaths), PsoError>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let recorder = OptimizationRecorder::new(function_name.to_string());
	config.callback = Some(recorder.create_callback());

	let mut pso = ParticleSwarm::new(&func, bounds.len(), bounds, config)?;
	let report = pso.optimize();

	let convergence = recorder.save_to_csv(output_dir)?;
	let trajectories = match pso.history() {
		Some(history) => Some(history.save_to_csv(output_dir, function_name)?),
		None => None,
	};
	log::info!("{}: f={:.6e}, trace saved to {}", function_name, report.fun, convergence.display());

	Ok((report, RecordedPaths { convergence, trajectories }))
}
