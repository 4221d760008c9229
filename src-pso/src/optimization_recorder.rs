use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::PSOIntermediate;
use crate::error::PsoError;

/// Records optimization progress via PSO callbacks
#[derive(Debug, Clone)]
pub struct OptimizationRecorder {
	/// Function name (used for CSV filename)
	function_name: String,
	/// Shared with the callback handed to the swarm
	records: Rc<RefCell<Vec<OptimizationRecord>>>,
}

/// A single optimization iteration record
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRecord {
	pub iteration: usize,
	/// Global best position after the iteration
	pub x: Vec<f64>,
	pub best_result: f64,
	/// Particles that improved their personal best
	pub improvements: usize,
	/// Whether this iteration improved the global best
	pub is_improvement: bool,
}

impl OptimizationRecorder {
	pub fn new(function_name: String) -> Self {
		Self { function_name, records: Rc::new(RefCell::new(Vec::new())) }
	}

	pub fn function_name(&self) -> &str {
		&self.function_name
	}

	/// Create a callback that appends one record per iteration
	pub fn create_callback(&self) -> Box<dyn FnMut(&PSOIntermediate)> {
		let records = Rc::clone(&self.records);
		Box::new(move |intermediate: &PSOIntermediate| {
			let mut records = records.borrow_mut();
			let is_improvement = match records.last() {
				Some(prev) => intermediate.fun < prev.best_result,
				None => intermediate.fun < f64::INFINITY,
			};
			records.push(OptimizationRecord {
				iteration: intermediate.iter,
				x: intermediate.x.to_vec(),
				best_result: intermediate.fun,
				improvements: intermediate.improvements,
				is_improvement,
			});
		})
	}

	/// Save all recorded iterations to `<output_dir>/<function_name>.csv`
	pub fn save_to_csv(&self, output_dir: &Path) -> Result<PathBuf, PsoError> {
		std::fs::create_dir_all(output_dir)?;
		let path = output_dir.join(format!("{}.csv", self.function_name()));
		let records = self.records.borrow();
		let mut wtr = csv::Writer::from_path(&path)?;

		let num_dimensions = records.first().map_or(0, |r| r.x.len());
		let mut header = vec!["iteration".to_string()];
		header.extend((0..num_dimensions).map(|i| format!("x{}", i)));
		header.extend(["best_result", "improvements", "is_improvement"].map(String::from));
		wtr.write_record(&header)?;

		for record in records.iter() {
			let mut row = vec![record.iteration.to_string()];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			row.push(format!("{:.16}", record.best_result));
			row.push(record.improvements.to_string());
			row.push(record.is_improvement.to_string());
			wtr.write_record(&row)?;
		}
		wtr.flush()?;
		Ok(path)
	}

	pub fn get_records(&self) -> Vec<OptimizationRecord> {
		self.records.borrow().clone()
	}

	pub fn num_iterations(&self) -> usize {
		self.records.borrow().len()
	}

	pub fn clear(&self) {
		self.records.borrow_mut().clear();
	}

	/// Best solution from the last recorded iteration
	pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
		self.records.borrow().last().map(|r| (r.x.clone(), r.best_result))
	}
}
