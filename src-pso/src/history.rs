//! Trajectory recording for swarm replay.
//!
//! Positions are recorded during the evaluation pass, so entry `k` of a
//! particle trajectory is the position evaluated at iteration `k`. The global
//! best trajectory is kept apart from the per-particle ones and only grows when
//! a particle beats the swarm best.

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::Array1;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PsoError;
use crate::particle::ParticleId;

/// A position that became the new global best
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalBestRecord {
	/// Iteration during which the improvement happened
	pub iteration: usize,
	/// Particle that produced it
	pub particle: ParticleId,
	#[serde(with = "float_repr::flat")]
	pub position: Vec<f64>,
	#[serde(with = "float_repr")]
	pub fitness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwarmHistory {
	num_variables: usize,
	#[serde(with = "float_repr::nested")]
	trajectories: Vec<Vec<Vec<f64>>>,
	global_best: Vec<GlobalBestRecord>,
}

impl SwarmHistory {
	pub fn new(num_particles: usize, num_variables: usize) -> Self {
		Self { num_variables, trajectories: vec![Vec::new(); num_particles], global_best: Vec::new() }
	}

	pub(crate) fn record_position(&mut self, id: ParticleId, position: &Array1<f64>) {
		self.trajectories[id.0].push(position.to_vec());
	}

	pub(crate) fn record_global_best(
		&mut self,
		iteration: usize,
		particle: ParticleId,
		position: &Array1<f64>,
		fitness: f64,
	) {
		self.global_best.push(GlobalBestRecord {
			iteration,
			particle,
			position: position.to_vec(),
			fitness,
		});
	}

	pub fn num_particles(&self) -> usize {
		self.trajectories.len()
	}

	pub fn num_variables(&self) -> usize {
		self.num_variables
	}

	/// Number of recorded iterations
	pub fn len(&self) -> usize {
		self.trajectories.first().map_or(0, Vec::len)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Full trajectory of one particle, one position per iteration
	pub fn trajectory(&self, id: ParticleId) -> Option<&[Vec<f64>]> {
		self.trajectories.get(id.0).map(Vec::as_slice)
	}

	/// Position of `id` evaluated at `iteration`
	pub fn position_at(&self, id: ParticleId, iteration: usize) -> Option<&[f64]> {
		self.trajectories.get(id.0)?.get(iteration).map(Vec::as_slice)
	}

	/// Global best improvements in chronological order
	pub fn global_best(&self) -> &[GlobalBestRecord] {
		&self.global_best
	}

	/// Latest global best recorded at or before `iteration`
	pub fn global_best_at(&self, iteration: usize) -> Option<&GlobalBestRecord> {
		self.global_best.iter().take_while(|r| r.iteration <= iteration).last()
	}

	/// Write `<name>_particles.csv` and `<name>_global_best.csv` into `output_dir`.
	///
	/// Returns the two paths, particles first.
	pub fn save_to_csv(&self, output_dir: &Path, name: &str) -> Result<(PathBuf, PathBuf), PsoError> {
		std::fs::create_dir_all(output_dir)?;
		let coords: Vec<String> = (0..self.num_variables).map(|i| format!("x{}", i)).collect();

		let particles_path = output_dir.join(format!("{}_particles.csv", name));
		let mut wtr = csv::Writer::from_path(&particles_path)?;
		let mut header = vec!["iteration".to_string(), "particle".to_string()];
		header.extend(coords.iter().cloned());
		wtr.write_record(&header)?;
		for (id, trajectory) in self.trajectories.iter().enumerate() {
			for (iteration, position) in trajectory.iter().enumerate() {
				let mut row = vec![iteration.to_string(), id.to_string()];
				row.extend(position.iter().map(|x| format!("{:.16}", x)));
				wtr.write_record(&row)?;
			}
		}
		wtr.flush()?;

		let best_path = output_dir.join(format!("{}_global_best.csv", name));
		let mut wtr = csv::Writer::from_path(&best_path)?;
		let mut header = vec!["iteration".to_string(), "particle".to_string()];
		header.extend(coords);
		header.push("fitness".to_string());
		wtr.write_record(&header)?;
		for record in &self.global_best {
			let mut row = vec![record.iteration.to_string(), record.particle.0.to_string()];
			row.extend(record.position.iter().map(|x| format!("{:.16}", x)));
			row.push(format!("{:.16}", record.fitness));
			wtr.write_record(&row)?;
		}
		wtr.flush()?;

		Ok((particles_path, best_path))
	}

	pub fn save_json(&self, path: &Path) -> Result<(), PsoError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		let file = File::create(path)?;
		serde_json::to_writer(file, self)?;
		Ok(())
	}

	pub fn load_json(path: &Path) -> Result<Self, PsoError> {
		let file = File::open(path)?;
		Ok(serde_json::from_reader(file)?)
	}
}

/// JSON has no literal for infinities or NaN, so those are written as the
/// strings `"inf"`, `"-inf"` and `"NaN"`. Finite values stay plain numbers.
mod float_repr {
	use std::fmt;

	use serde::de::{self, Visitor};

	use super::{Deserialize, Deserializer, Serialize, Serializer};

	#[derive(Clone, Copy)]
	struct Repr(f64);

	impl Serialize for Repr {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			let v = self.0;
			if v.is_finite() {
				serializer.serialize_f64(v)
			} else if v.is_nan() {
				serializer.serialize_str("NaN")
			} else if v > 0.0 {
				serializer.serialize_str("inf")
			} else {
				serializer.serialize_str("-inf")
			}
		}
	}

	struct ReprVisitor;

	impl Visitor<'_> for ReprVisitor {
		type Value = Repr;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a number or one of \"inf\", \"-inf\", \"NaN\"")
		}

		fn visit_f64<E: de::Error>(self, v: f64) -> Result<Repr, E> {
			Ok(Repr(v))
		}

		fn visit_i64<E: de::Error>(self, v: i64) -> Result<Repr, E> {
			Ok(Repr(v as f64))
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<Repr, E> {
			Ok(Repr(v as f64))
		}

		fn visit_str<E: de::Error>(self, v: &str) -> Result<Repr, E> {
			match v {
				"inf" => Ok(Repr(f64::INFINITY)),
				"-inf" => Ok(Repr(f64::NEG_INFINITY)),
				"NaN" => Ok(Repr(f64::NAN)),
				_ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
			}
		}
	}

	impl<'de> Deserialize<'de> for Repr {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			deserializer.deserialize_any(ReprVisitor)
		}
	}

	pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
		Repr(*v).serialize(serializer)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
		Ok(Repr::deserialize(deserializer)?.0)
	}

	pub mod flat {
		use super::{Deserialize, Deserializer, Repr, Serializer};

		pub fn serialize<S: Serializer>(v: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
			serializer.collect_seq(v.iter().map(|&x| Repr(x)))
		}

		pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
			let raw = Vec::<Repr>::deserialize(deserializer)?;
			Ok(raw.into_iter().map(|r| r.0).collect())
		}
	}

	pub mod nested {
		use super::{Deserialize, Deserializer, Repr, Serializer};

		pub fn serialize<S: Serializer>(v: &[Vec<Vec<f64>>], serializer: S) -> Result<S::Ok, S::Error> {
			serializer.collect_seq(v.iter().map(|trajectory| {
				trajectory
					.iter()
					.map(|position| position.iter().map(|&x| Repr(x)).collect::<Vec<_>>())
					.collect::<Vec<_>>()
			}))
		}

		pub fn deserialize<'de, D: Deserializer<'de>>(
			deserializer: D,
		) -> Result<Vec<Vec<Vec<f64>>>, D::Error> {
			let raw = Vec::<Vec<Vec<Repr>>>::deserialize(deserializer)?;
			Ok(raw
				.into_iter()
				.map(|trajectory| {
					trajectory.into_iter().map(|p| p.into_iter().map(|r| r.0).collect()).collect()
				})
				.collect())
		}
	}
}
