use swarmopt_pso::{PSOConfigBuilder, ParticleSwarm, particle_swarm};
use swarmopt_testfunctions::{get_function_bounds_vec, offset_quadratic};

#[test]
fn test_pso_offset_quadratic_converges() {
	// (x-2)^2 + (y-2)^2 over [-100, 100]^2, 20 particles, 500 iterations
	let bounds = vec![(-100.0, 100.0), (-100.0, 100.0)];
	let config = PSOConfigBuilder::new().seed(2024).num_particles(20).max_iterations(500).build();
	let report = particle_swarm(&offset_quadratic, &bounds, config).unwrap();

	assert!(report.fun < 1e-2, "fitness too high: {}", report.fun);
	assert!((report.x[0] - 2.0).abs() < 0.1, "x[0] should be close to 2.0: {}", report.x[0]);
	assert!((report.x[1] - 2.0).abs() < 0.1, "x[1] should be close to 2.0: {}", report.x[1]);
	assert_eq!(report.nit, 500);
}

#[test]
fn test_pso_offset_quadratic_many_seeds() {
	let bounds = get_function_bounds_vec("offset_quadratic", 2, (-100.0, 100.0));
	for seed in 0..5 {
		let config = PSOConfigBuilder::new().seed(seed).num_particles(20).max_iterations(500).build();
		let report = particle_swarm(&offset_quadratic, &bounds, config).unwrap();
		assert!(report.fun < 1e-8, "seed {}: f = {:.3e}", seed, report.fun);
	}
}

#[test]
fn test_pso_offset_quadratic_leaves_box_when_optimum_outside() {
	// Bounds only seed the swarm: the optimum at (2, 2) lies outside [-1, 0]^2
	let bounds = vec![(-1.0, 0.0), (-1.0, 0.0)];
	let config = PSOConfigBuilder::new().seed(6).num_particles(20).max_iterations(300).build();
	let mut swarm = ParticleSwarm::new(&offset_quadratic, 2, &bounds, config).unwrap();
	let report = swarm.optimize();
	assert!(report.fun < 1e-6, "f = {:.3e}", report.fun);
	assert!(report.x[0] > 0.0 && report.x[1] > 0.0);
}
