//! Pan and zoom transform between screen and layout coordinates.

use super::config::ViewConfig;
use super::types::Point;

/// Pan and zoom transform applied to the entire graph view.
///
/// `screen = layout * k + (x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to the configured extent.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, screen: Point) -> Point {
		Point::new((screen.x - self.x) / self.k, (screen.y - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, graph: Point) -> Point {
		Point::new(graph.x * self.k + self.x, graph.y * self.k + self.y)
	}

	/// Zoom by `factor` keeping the layout point under `screen` fixed.
	pub fn zoom_at(&mut self, screen: Point, factor: f64, config: &ViewConfig) {
		let new_k = (self.k * factor).clamp(config.min_zoom, config.max_zoom);
		let ratio = new_k / self.k;
		self.x = screen.x - (screen.x - self.x) * ratio;
		self.y = screen.y - (screen.y - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start: Point,
	pub transform_start: Point,
}

impl PanState {
	pub fn begin(&mut self, screen: Point, transform: &ViewTransform) {
		self.active = true;
		self.start = screen;
		self.transform_start = Point::new(transform.x, transform.y);
	}

	/// Move the transform so the grabbed point follows the pointer.
	pub fn update(&self, screen: Point, transform: &mut ViewTransform) {
		if !self.active {
			return;
		}
		transform.x = self.transform_start.x + (screen.x - self.start.x);
		transform.y = self.transform_start.y + (screen.y - self.start.y);
	}

	pub fn end(&mut self) {
		self.active = false;
	}
}
