//! Environment variable utilities for swarm records
//!
//! Recorded runs write CSV/JSON files under a records directory. By default this
//! is `data_generated/records` relative to the working directory; the
//! `SWARMOPT_RECORDS_DIR` environment variable overrides it.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the records directory
pub const RECORDS_DIR_VAR: &str = "SWARMOPT_RECORDS_DIR";

/// Records directory used when the environment does not name one
pub const DEFAULT_RECORDS_DIR: &str = "data_generated/records";

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("SWARMOPT_RECORDS_DIR is set but empty")]
	RecordsDirEmpty,

	#[error("SWARMOPT_RECORDS_DIR points to a file, not a directory: {}", .0.display())]
	RecordsDirNotADirectory(PathBuf),

	#[error("failed to create records directory {}: {}", .0.display(), .1)]
	RecordsDirCreationFailed(PathBuf, std::io::Error),
}

/// Pick the records directory from an optional override value.
pub fn resolve_records_dir(value: Option<&str>) -> Result<PathBuf, EnvError> {
	match value {
		Some(v) if v.trim().is_empty() => Err(EnvError::RecordsDirEmpty),
		Some(v) => Ok(PathBuf::from(v)),
		None => Ok(PathBuf::from(DEFAULT_RECORDS_DIR)),
	}
}

/// Create `dir` if needed and return it.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf, EnvError> {
	if dir.exists() {
		if !dir.is_dir() {
			return Err(EnvError::RecordsDirNotADirectory(dir.to_path_buf()));
		}
		return Ok(dir.to_path_buf());
	}
	std::fs::create_dir_all(dir)
		.map_err(|e| EnvError::RecordsDirCreationFailed(dir.to_path_buf(), e))?;
	Ok(dir.to_path_buf())
}

/// Get the records directory from the environment, creating it if necessary
///
/// # Errors
///
/// Returns an error if:
/// - `SWARMOPT_RECORDS_DIR` is set to an empty string
/// - the path exists but is not a directory
/// - the directory cannot be created
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
	let value = env::var(RECORDS_DIR_VAR).ok();
	let dir = resolve_records_dir(value.as_deref())?;
	ensure_dir(&dir)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_default_and_override() {
		assert_eq!(resolve_records_dir(None).unwrap(), PathBuf::from(DEFAULT_RECORDS_DIR));
		assert_eq!(resolve_records_dir(Some("/tmp/runs")).unwrap(), PathBuf::from("/tmp/runs"));
		assert!(matches!(resolve_records_dir(Some("  ")), Err(EnvError::RecordsDirEmpty)));
	}

	#[test]
	fn test_ensure_dir_creates_nested() {
		let tmp = tempfile::tempdir().unwrap();
		let nested = tmp.path().join("a").join("b");
		let created = ensure_dir(&nested).unwrap();
		assert!(created.is_dir());
		// second call is a no-op
		assert_eq!(ensure_dir(&nested).unwrap(), nested);
	}

	#[test]
	fn test_ensure_dir_rejects_file() {
		let file = tempfile::NamedTempFile::new().unwrap();
		assert!(matches!(
			ensure_dir(file.path()),
			Err(EnvError::RecordsDirNotADirectory(_))
		));
	}
}
