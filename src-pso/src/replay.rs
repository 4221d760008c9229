//! Read-only replay of a recorded swarm for 2-D display.
//!
//! The viewport is a plain value owned by whoever draws; nothing here touches
//! optimizer state or a display surface. A caller pulls [`Frame`]s at whatever
//! rate it renders.

use crate::error::PsoError;
use crate::history::SwarmHistory;
use crate::particle::ParticleId;

/// A point on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
	pub x: f64,
	pub y: f64,
}

/// Affine map from search space to screen:
/// `screen_x = position[0] * scale + origin_x`, same for y with `position[1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
	pub scale: f64,
	pub origin_x: f64,
	pub origin_y: f64,
}

impl Viewport {
	pub fn new(scale: f64, origin_x: f64, origin_y: f64) -> Self {
		Self { scale, origin_x, origin_y }
	}

	/// Largest uniform scale that fits `x_range` x `y_range` in a
	/// `width` x `height` surface, with the range minima on the surface origin.
	pub fn fit(x_range: (f64, f64), y_range: (f64, f64), width: f64, height: f64) -> Self {
		let span_x = (x_range.1 - x_range.0).max(f64::EPSILON);
		let span_y = (y_range.1 - y_range.0).max(f64::EPSILON);
		let scale = (width / span_x).min(height / span_y);
		Self { scale, origin_x: -x_range.0 * scale, origin_y: -y_range.0 * scale }
	}

	/// Project a position; a 1-D position lands on `origin_y`.
	pub fn to_screen(&self, position: &[f64]) -> Result<ScreenPoint, PsoError> {
		let x = *position.first().ok_or(PsoError::DimensionMismatch { expected: 1, got: 0 })?;
		let y = position.get(1).copied().unwrap_or(0.0);
		Ok(ScreenPoint { x: x * self.scale + self.origin_x, y: y * self.scale + self.origin_y })
	}
}

/// Everything to draw for one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
	pub iteration: usize,
	pub particles: Vec<(ParticleId, ScreenPoint)>,
	/// Best position known once this iteration's evaluation pass finished
	pub global_best: Option<ScreenPoint>,
}

pub struct Replay<'a> {
	history: &'a SwarmHistory,
	viewport: Viewport,
}

impl<'a> Replay<'a> {
	pub fn new(history: &'a SwarmHistory, viewport: Viewport) -> Result<Self, PsoError> {
		if history.num_variables() == 0 {
			return Err(PsoError::DimensionMismatch { expected: 1, got: 0 });
		}
		Ok(Self { history, viewport })
	}

	pub fn len(&self) -> usize {
		self.history.len()
	}

	pub fn is_empty(&self) -> bool {
		self.history.is_empty()
	}

	pub fn frame(&self, iteration: usize) -> Option<Frame> {
		if iteration >= self.history.len() {
			return None;
		}
		let mut particles = Vec::with_capacity(self.history.num_particles());
		for k in 0..self.history.num_particles() {
			let id = ParticleId(k);
			let position = self.history.position_at(id, iteration)?;
			particles.push((id, self.viewport.to_screen(position).ok()?));
		}
		let global_best = self
			.history
			.global_best_at(iteration)
			.and_then(|r| self.viewport.to_screen(&r.position).ok());
		Some(Frame { iteration, particles, global_best })
	}

	/// Frames in iteration order
	pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
		(0..self.len()).filter_map(move |k| self.frame(k))
	}
}
