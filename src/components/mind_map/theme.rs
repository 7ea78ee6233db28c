//! Visual theming for the mind map.
//!
//! Colors and stroke sizes for nodes, links, labels, and the hover tooltip.

use super::types::Group;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill of the central topic node.
	pub central_fill: Color,
	/// Fill of every other node.
	pub category_fill: Color,
	/// Outline drawn around each circle (0 = none).
	pub border_width: f64,
	pub label_color: Color,
	pub label_font: String,
	/// Vertical label offset from the node center.
	pub label_dy: f64,
}

/// Link line and arrowhead style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub width: f64,
	/// Arrowhead length along the link.
	pub arrow_size: f64,
}

/// Hover tooltip box style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	pub background: Color,
	pub text_color: Color,
	pub title_font: String,
	pub body_font: String,
	pub padding: f64,
	pub line_height: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// Fill color for a node of the given group.
	pub fn fill_for(&self, group: &Group) -> Color {
		if group.is_central() {
			self.node.central_fill
		} else {
			self.node.category_fill
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(250, 250, 250),
			node: NodeStyle {
				central_fill: Color::rgb(0xff, 0x98, 0x00),
				category_fill: Color::rgb(0x4f, 0xc3, 0xf7),
				border_width: 1.5,
				label_color: Color::rgb(33, 33, 33),
				label_font: "12px sans-serif".to_string(),
				label_dy: -10.0,
			},
			edge: EdgeStyle {
				color: Color::rgb(0x99, 0x99, 0x99),
				width: 2.0,
				arrow_size: 10.0,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(255, 255, 255, 1.0),
				text_color: Color::rgb(33, 33, 33),
				title_font: "bold 12px sans-serif".to_string(),
				body_font: "12px sans-serif".to_string(),
				padding: 6.0,
				line_height: 16.0,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::Category;

	#[test]
	fn central_node_is_orange_and_others_blue() {
		let theme = Theme::default();
		assert_eq!(theme.fill_for(&Group::Central).to_css(), "#ff9800");
		assert_eq!(
			theme.fill_for(&Group::Category(Category::Genre)).to_css(),
			"#4fc3f7"
		);
		assert_eq!(theme.fill_for(&Group::Other("x".into())).to_css(), "#4fc3f7");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(
			Color::rgb(10, 20, 30).with_alpha(0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}
}
