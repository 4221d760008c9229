//! Optimization test functions library
//!
//! Objectives for exercising the swarm optimizer, grouped by category:
//!
//! - **Unimodal**: single global optimum (sphere, offset quadratic, rosenbrock, ...)
//! - **Multimodal**: several local or global minima (gaussian dipole, rastrigin, ...)
//!
//! Every function takes the position as `&Array1<f64>` and returns the value to
//! minimise. Metadata gives default bounds and known minima per function.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use swarmopt_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![2.0, 2.0]);
//! assert_eq!(offset_quadratic(&x), 0.0);
//!
//! let f = get_function("offset_quadratic").unwrap();
//! assert_eq!(f(&x), 0.0);
//! let bounds = get_function_bounds("offset_quadratic").unwrap();
//! assert_eq!(bounds, vec![(-100.0, 100.0); 2]);
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Signature shared by every test function
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    pub name: String,
    /// Default bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    pub description: String,
    pub multimodal: bool,
    /// Dimensions the function is usually run in
    pub dimensions: Vec<usize>,
}

fn entry(
    name: &str,
    bounds: Vec<(f64, f64)>,
    global_minima: Vec<(Vec<f64>, f64)>,
    description: &str,
    multimodal: bool,
    dimensions: Vec<usize>,
) -> (String, FunctionMetadata) {
    (
        name.to_string(),
        FunctionMetadata {
            name: name.to_string(),
            bounds,
            global_minima,
            description: description.to_string(),
            multimodal,
            dimensions,
        },
    )
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let dipole_x = -std::f64::consts::FRAC_1_SQRT_2;
    let dipole_f = dipole_x * (-0.5f64).exp();

    HashMap::from([
        entry(
            "sphere",
            vec![(-5.12, 5.12); 2],
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional unimodal bowl",
            false,
            vec![2, 5, 10],
        ),
        entry(
            "quadratic",
            vec![(-5.0, 5.0); 2],
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional unimodal bowl",
            false,
            vec![2, 5],
        ),
        entry(
            "offset_quadratic",
            vec![(-100.0, 100.0); 2],
            vec![(vec![2.0, 2.0], 0.0)],
            "2D bowl centred at (2, 2)",
            false,
            vec![2],
        ),
        entry(
            "booth",
            vec![(-10.0, 10.0); 2],
            vec![(vec![1.0, 3.0], 0.0)],
            "2D plate-shaped unimodal function",
            false,
            vec![2],
        ),
        entry(
            "rosenbrock",
            vec![(-5.0, 10.0); 2],
            vec![(vec![1.0, 1.0], 0.0)],
            "N-dimensional banana-shaped valley",
            false,
            vec![2, 5, 10],
        ),
        entry(
            "gaussian_dipole",
            vec![(-2.0, 2.0); 2],
            vec![(vec![dipole_x, 0.0], dipole_f)],
            "2D x*exp(-x^2-y^2), one well and one peak",
            true,
            vec![2],
        ),
        entry(
            "rastrigin",
            vec![(-5.12, 5.12); 2],
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional regularly spaced local minima",
            true,
            vec![2, 5, 10],
        ),
        entry(
            "ackley",
            vec![(-32.768, 32.768); 2],
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional nearly flat outer region with a central hole",
            true,
            vec![2, 5, 10],
        ),
        entry(
            "himmelblau",
            vec![(-5.0, 5.0); 2],
            vec![
                (vec![3.0, 2.0], 0.0),
                (vec![-2.805118, 3.131312], 0.0),
                (vec![-3.779310, -3.283186], 0.0),
                (vec![3.584428, -1.848126], 0.0),
            ],
            "2D multimodal function with 4 global minima",
            true,
            vec![2],
        ),
    ])
}

/// Look a test function up by name
pub fn get_function(function_name: &str) -> Option<TestFunction> {
    let f: TestFunction = match function_name {
        "sphere" => sphere,
        "quadratic" => quadratic,
        "offset_quadratic" => offset_quadratic,
        "booth" => booth,
        "rosenbrock" => rosenbrock,
        "gaussian_dipole" => gaussian_dipole,
        "rastrigin" => rastrigin,
        "ackley" => ackley,
        "himmelblau" => himmelblau,
        _ => return None,
    };
    Some(f)
}

/// Default bounds of a function, if it is known
pub fn get_function_bounds(function_name: &str) -> Option<Vec<(f64, f64)>> {
    let metadata = get_function_metadata();
    metadata.get(function_name).map(|meta| meta.bounds.clone())
}

/// Bounds for `dims` dimensions: the function's own default range repeated,
/// or `default_bounds` for unknown functions
pub fn get_function_bounds_vec(
    function_name: &str,
    dims: usize,
    default_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    let range = get_function_bounds(function_name)
        .and_then(|b| b.first().copied())
        .unwrap_or(default_bounds);
    vec![range; dims]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_metadata() {
        let metadata = get_function_metadata();
        for name in metadata.keys() {
            assert!(get_function(name).is_some(), "{} has metadata but no function", name);
        }
        assert!(get_function("no_such_function").is_none());
    }

    #[test]
    fn test_known_minima() {
        let tolerance = 1e-5;
        for (name, meta) in get_function_metadata() {
            let f = get_function(&name).unwrap();
            for (location, expected) in &meta.global_minima {
                let value = f(&Array1::from(location.clone()));
                assert!(
                    (value - expected).abs() < tolerance,
                    "{} at {:?}: expected {}, got {}",
                    name,
                    location,
                    expected,
                    value
                );
            }
        }
    }

    #[test]
    fn test_the_two_demo_objectives() {
        let x = Array1::from_vec(vec![0.0, 0.0]);
        assert_eq!(offset_quadratic(&x), 8.0);
        assert_eq!(gaussian_dipole(&x), 0.0);

        // dipole is odd in x
        let a = gaussian_dipole(&Array1::from_vec(vec![0.3, 0.1]));
        let b = gaussian_dipole(&Array1::from_vec(vec![-0.3, 0.1]));
        assert!((a + b).abs() < 1e-15);
        assert!((gaussian_dipole(&Array1::from_vec(vec![-0.7071067811865476, 0.0])) + 0.428881942).abs() < 1e-8);
    }

    #[test]
    fn test_metadata_completeness() {
        for (name, meta) in get_function_metadata() {
            assert_eq!(name, meta.name);
            assert!(!meta.description.is_empty());
            assert!(!meta.dimensions.is_empty());
            for (lower, upper) in &meta.bounds {
                assert!(lower < upper, "{} has invalid bounds", name);
            }
        }
    }

    #[test]
    fn test_bounds_vec() {
        assert_eq!(get_function_bounds_vec("rastrigin", 3, (-1.0, 1.0)), vec![(-5.12, 5.12); 3]);
        assert_eq!(get_function_bounds_vec("unknown", 2, (-1.0, 1.0)), vec![(-1.0, 1.0); 2]);
    }
}
