//! Tunable parameters for layout, view, and tooltip behavior.
//!
//! Every section deserializes from partial JSON; missing keys fall back to the
//! defaults below.

use serde::Deserialize;

/// Force solver parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength. Negative values repel.
	pub charge_strength: f64,
	/// Added to the visual radius to get the collision radius.
	pub collision_padding: f64,
	/// The solver stops once alpha falls below this.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed each tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	/// Alpha target held while any node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			link_distance: 100.0,
			charge_strength: -300.0,
			collision_padding: 20.0,
			alpha_min,
			// Reaches alpha_min after ~300 ticks from a hot start.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

/// Pan and zoom limits.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Zoom multiplier per wheel notch.
	pub zoom_step: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.5,
			max_zoom: 2.0,
			zoom_step: 1.1,
		}
	}
}

/// Hover tooltip timing and placement.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TooltipConfig {
	pub fade_in_ms: f64,
	pub fade_out_ms: f64,
	/// Opacity when fully shown.
	pub opacity: f64,
	/// Offset from the pointer, in screen pixels.
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for TooltipConfig {
	fn default() -> Self {
		Self {
			fade_in_ms: 200.0,
			fade_out_ms: 500.0,
			opacity: 0.9,
			offset_x: 10.0,
			offset_y: -28.0,
		}
	}
}

/// Complete editor configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MindMapConfig {
	pub layout: LayoutConfig,
	pub view: ViewConfig,
	pub tooltip: TooltipConfig,
}

impl MindMapConfig {
	/// Parse a (possibly partial) JSON configuration document.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
