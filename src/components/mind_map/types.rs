//! Mind-map data structures: nodes, links, and the fixed category table.

use std::fmt;
use std::str::FromStr;

/// Group tag carried by the central node.
pub const CENTRAL_GROUP: &str = "Central Node";

/// Description attached to the central node when a topic is set.
pub const CENTRAL_DESCRIPTION: &str = "The main concept or topic of the graph.";

/// A 2-D point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Compass side of the central node a category clusters towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	Top,
	Bottom,
	Left,
	Right,
}

impl Direction {
	/// Unit vector in canvas coordinates (y grows downwards).
	pub const fn unit(self) -> (f64, f64) {
		match self {
			Direction::Top => (0.0, -1.0),
			Direction::Bottom => (0.0, 1.0),
			Direction::Left => (-1.0, 0.0),
			Direction::Right => (1.0, 0.0),
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Direction::Top => "top",
			Direction::Bottom => "bottom",
			Direction::Left => "left",
			Direction::Right => "right",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The four concept categories a non-central node can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Genre,
	Species,
	Genos,
	Telos,
}

impl Category {
	/// All categories, in the order they are offered to the user.
	pub const ALL: [Category; 4] = [
		Category::Genre,
		Category::Species,
		Category::Genos,
		Category::Telos,
	];

	/// Fixed category-to-direction table.
	pub const fn direction(self) -> Direction {
		match self {
			Category::Genre => Direction::Top,
			Category::Species => Direction::Bottom,
			Category::Genos => Direction::Left,
			Category::Telos => Direction::Right,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Category::Genre => "Genre",
			Category::Species => "Species",
			Category::Genos => "Genos",
			Category::Telos => "Telos",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string does not name one of the four categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
	type Err = UnknownCategory;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Category::ALL
			.into_iter()
			.find(|c| c.as_str() == s)
			.ok_or_else(|| UnknownCategory(s.to_string()))
	}
}

/// Node group: the central topic, one of the categories, or anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Group {
	Central,
	Category(Category),
	/// Unrecognized group tag. Never produced by the command surface.
	Other(String),
}

impl Group {
	pub fn is_central(&self) -> bool {
		matches!(self, Group::Central)
	}

	pub fn as_str(&self) -> &str {
		match self {
			Group::Central => CENTRAL_GROUP,
			Group::Category(c) => c.as_str(),
			Group::Other(s) => s,
		}
	}
}

impl From<&str> for Group {
	fn from(tag: &str) -> Self {
		if tag == CENTRAL_GROUP {
			return Group::Central;
		}
		tag.parse()
			.map(Group::Category)
			.unwrap_or_else(|_| Group::Other(tag.to_string()))
	}
}

/// Visual and collision radius for a node of the given group.
pub fn node_radius(group: &Group) -> f64 {
	match group {
		Group::Central => 30.0,
		Group::Category(_) => 20.0,
		Group::Other(_) => 10.0,
	}
}

/// A concept in the mind map.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// User-supplied name, unique across the store.
	pub id: String,
	pub group: Group,
	/// Shown in the hover tooltip.
	pub description: String,
	/// Fixed position. Only the central node carries one.
	pub position: Option<Point>,
}

/// Stable identity of a link, rendered as `"source-target"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkKey {
	pub source: String,
	pub target: String,
}

impl fmt::Display for LinkKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.source, self.target)
	}
}

/// A directed edge from the central node to a category node.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Source node ID (always the central node).
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Fixed at creation from the target's category.
	pub direction: Direction,
}

impl Link {
	pub fn key(&self) -> LinkKey {
		LinkKey {
			source: self.source.clone(),
			target: self.target.clone(),
		}
	}
}
