use thiserror::Error;

use crate::env_utils::EnvError;

/// Errors raised while configuring a swarm or persisting its records
#[derive(Error, Debug)]
pub enum PsoError {
	#[error("swarm needs at least one particle")]
	NoParticles,

	#[error("search space needs at least one variable")]
	NoVariables,

	#[error("expected {expected} bounds (one per variable), got {got}")]
	BoundsLengthMismatch { expected: usize, got: usize },

	#[error("bound[{index}] has upper < lower: [{lower}, {upper}]")]
	InvalidBound { index: usize, lower: f64, upper: f64 },

	#[error("bound[{index}] is not finite")]
	NonFiniteBound { index: usize },

	#[error("position has {got} coordinates, need at least {expected}")]
	DimensionMismatch { expected: usize, got: usize },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Env(#[from] EnvError),
}

/// Check a bound list against the declared number of variables.
pub(crate) fn validate_bounds(num_variables: usize, bounds: &[(f64, f64)]) -> Result<(), PsoError> {
	if num_variables == 0 {
		return Err(PsoError::NoVariables);
	}
	if bounds.len() != num_variables {
		return Err(PsoError::BoundsLengthMismatch { expected: num_variables, got: bounds.len() });
	}
	for (index, &(lower, upper)) in bounds.iter().enumerate() {
		if !lower.is_finite() || !upper.is_finite() {
			return Err(PsoError::NonFiniteBound { index });
		}
		if upper < lower {
			return Err(PsoError::InvalidBound { index, lower, upper });
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validate_bounds_accepts_zero_width() {
		assert!(validate_bounds(2, &[(5.0, 5.0), (-1.0, 1.0)]).is_ok());
	}

	#[test]
	fn test_validate_bounds_rejects_bad_input() {
		assert!(matches!(validate_bounds(0, &[]), Err(PsoError::NoVariables)));
		assert!(matches!(
			validate_bounds(2, &[(0.0, 1.0)]),
			Err(PsoError::BoundsLengthMismatch { expected: 2, got: 1 })
		));
		assert!(matches!(
			validate_bounds(1, &[(1.0, 0.0)]),
			Err(PsoError::InvalidBound { index: 0, .. })
		));
		assert!(matches!(
			validate_bounds(2, &[(0.0, 1.0), (f64::NAN, 1.0)]),
			Err(PsoError::NonFiniteBound { index: 1 })
		));
		assert!(matches!(
			validate_bounds(1, &[(f64::NEG_INFINITY, 1.0)]),
			Err(PsoError::NonFiniteBound { index: 0 })
		));
	}
}
