use std::path::PathBuf;

use clap::Parser;

use swarmopt_pso::{
	Boundary, OptimizationRecorder, PSOConfigBuilder, ParticleSwarm, get_records_dir,
};
use swarmopt_testfunctions::{get_function, get_function_bounds_vec, get_function_metadata};

/// CLI arguments for running the swarm on a test function
#[derive(Parser, Debug)]
#[command(name = "run_pso")]
#[command(about = "Minimise a test function with particle swarm optimisation")]
struct Args {
	/// Test function to minimise
	#[arg(short, long, default_value = "offset_quadratic")]
	function: String,

	/// Number of variables
	#[arg(short, long, default_value_t = 2)]
	dims: usize,

	/// Bounds applied to every variable (min,max); defaults to the function metadata
	#[arg(short, long, allow_hyphen_values = true)]
	bounds: Option<String>,

	/// Number of particles
	#[arg(short = 'n', long, default_value_t = 20)]
	particles: usize,

	/// Number of iterations
	#[arg(short = 'i', long, default_value_t = 500)]
	iterations: usize,

	/// Inertia weight
	#[arg(long, default_value_t = 0.5)]
	inertia: f64,

	/// Cognitive weight (pull towards the personal best)
	#[arg(long, default_value_t = 1.5)]
	cognitive: f64,

	/// Social weight (pull towards the global best)
	#[arg(long, default_value_t = 1.5)]
	social: f64,

	/// Random seed for reproducible runs
	#[arg(short, long)]
	seed: Option<u64>,

	/// Clamp particles back into the bounds after each move
	#[arg(long)]
	clamp: bool,

	/// Save convergence trace and trajectories as CSV
	#[arg(long)]
	record: bool,

	/// Output directory for CSV files (defaults to SWARMOPT_RECORDS_DIR or data_generated/records)
	#[arg(short, long)]
	output_dir: Option<PathBuf>,

	/// Save the full trajectory history as JSON
	#[arg(long)]
	history_json: Option<PathBuf>,

	/// Log progress every iteration
	#[arg(long)]
	disp: bool,

	/// List available test functions and exit
	#[arg(long)]
	list: bool,
}

fn parse_bounds(s: &str) -> Result<(f64, f64), String> {
	let parts: Vec<&str> = s.split(',').map(str::trim).collect();
	if parts.len() != 2 {
		return Err(format!("bounds must be 'min,max', got '{}'", s));
	}
	let lo = parts[0].parse::<f64>().map_err(|e| format!("bad lower bound '{}': {}", parts[0], e))?;
	let hi = parts[1].parse::<f64>().map_err(|e| format!("bad upper bound '{}': {}", parts[1], e))?;
	Ok((lo, hi))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	if args.list {
		let metadata = get_function_metadata();
		let mut names: Vec<&String> = metadata.keys().collect();
		names.sort();
		for name in names {
			let meta = &metadata[name];
			println!("{:<18} {:?}  {}", name, meta.bounds[0], meta.description);
		}
		return Ok(());
	}

	let func = get_function(&args.function)
		.ok_or_else(|| format!("unknown function '{}', use --list", args.function))?;
	if let Some(meta) = get_function_metadata().get(&args.function) {
		if meta.dimensions == [2] && args.dims != 2 {
			return Err(format!("{} is only defined in 2 dimensions", args.function).into());
		}
	}
	let bounds = match &args.bounds {
		Some(s) => vec![parse_bounds(s)?; args.dims],
		None => get_function_bounds_vec(&args.function, args.dims, (-5.0, 5.0)),
	};

	let mut builder = PSOConfigBuilder::new()
		.num_particles(args.particles)
		.max_iterations(args.iterations)
		.inertia_weight(args.inertia)
		.cognitive_weight(args.cognitive)
		.social_weight(args.social)
		.boundary(if args.clamp { Boundary::Clamp } else { Boundary::Unbounded })
		.record_history(args.record || args.history_json.is_some())
		.disp(args.disp);
	if let Some(seed) = args.seed {
		builder = builder.seed(seed);
	}

	let recorder = OptimizationRecorder::new(args.function.clone());
	if args.record {
		builder = builder.callback(recorder.create_callback());
	}

	log::info!(
		"{}: {} particles, {} iterations, bounds {:?}",
		args.function,
		args.particles,
		args.iterations,
		bounds.first()
	);
	let mut pso = ParticleSwarm::new(&func, args.dims, &bounds, builder.build())?;
	let report = pso.optimize();

	println!("Global Best Position: {:?}", report.x.to_vec());
	println!("Global Best Fitness: {:.10e}", report.fun);
	println!("{} ({} evaluations)", report.message, report.nfev);

	if args.record {
		let dir = match &args.output_dir {
			Some(dir) => swarmopt_pso::env_utils::ensure_dir(dir)?,
			None => get_records_dir()?,
		};
		let trace = recorder.save_to_csv(&dir)?;
		log::info!("{} convergence trace saved to {}", recorder.function_name(), trace.display());
		if let Some(history) = pso.history() {
			let (particles, best) = history.save_to_csv(&dir, &args.function)?;
			log::info!("trajectories saved to {} and {}", particles.display(), best.display());
		}
	}
	if let (Some(path), Some(history)) = (&args.history_json, pso.history()) {
		history.save_json(path)?;
		log::info!("history saved to {}", path.display());
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_bounds() {
		assert_eq!(parse_bounds("-100,100").unwrap(), (-100.0, 100.0));
		assert_eq!(parse_bounds(" -1.5 , 2 ").unwrap(), (-1.5, 2.0));
		assert!(parse_bounds("1").is_err());
		assert!(parse_bounds("a,b").is_err());
	}

	#[test]
	fn test_args_defaults() {
		let args = Args::parse_from(["run_pso"]);
		assert_eq!(args.function, "offset_quadratic");
		assert_eq!(args.particles, 20);
		assert_eq!(args.iterations, 500);
		assert_eq!(args.inertia, 0.5);
		assert!(!args.clamp);
	}
}
