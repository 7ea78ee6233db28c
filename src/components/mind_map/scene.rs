//! Keyed reconciliation of graph data against the rendered scene.
//!
//! The scene keeps one element per node (keyed by id) and per link (keyed by
//! `source-target`) in insertion order. [`Scene::reconcile`] adds elements for
//! entering data and drops elements whose data is gone. [`Scene::frame`]
//! pairs each element with its live layout position for drawing.

use indexmap::IndexMap;

use super::simulation::Simulation;
use super::theme::{Color, Theme};
use super::types::{Direction, Link, LinkKey, Node, node_radius};

/// Rendered representation of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeElement {
	pub id: String,
	pub radius: f64,
	pub fill: Color,
	pub label: String,
}

/// Rendered representation of a link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkElement {
	pub key: LinkKey,
	pub direction: Direction,
	/// Always drawn with an arrowhead at the target end.
	pub arrowhead: bool,
}

/// Keys of the elements added and removed by one reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDiff {
	pub entered_nodes: Vec<String>,
	pub exited_nodes: Vec<String>,
	pub entered_links: Vec<LinkKey>,
	pub exited_links: Vec<LinkKey>,
}

impl SceneDiff {
	pub fn is_empty(&self) -> bool {
		self.entered_nodes.is_empty()
			&& self.exited_nodes.is_empty()
			&& self.entered_links.is_empty()
			&& self.exited_links.is_empty()
	}
}

/// Node record for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub fill: Color,
	pub label: String,
}

/// Link record for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameLink {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	/// Radius of the target node, so the arrowhead can stop at its edge.
	pub target_radius: f64,
	pub arrowhead: bool,
}

/// Everything the renderer draws in one frame, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub nodes: Vec<FrameNode>,
	pub links: Vec<FrameLink>,
}

/// The rendered scene.
#[derive(Clone, Debug)]
pub struct Scene {
	theme: Theme,
	nodes: IndexMap<String, NodeElement>,
	links: IndexMap<LinkKey, LinkElement>,
}

impl Scene {
	pub fn new(theme: Theme) -> Self {
		Self {
			theme,
			nodes: IndexMap::new(),
			links: IndexMap::new(),
		}
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn node(&self, id: &str) -> Option<&NodeElement> {
		self.nodes.get(id)
	}

	pub fn nodes(&self) -> impl Iterator<Item = &NodeElement> {
		self.nodes.values()
	}

	pub fn links(&self) -> impl Iterator<Item = &LinkElement> {
		self.links.values()
	}

	/// Bring the scene in line with `nodes` and `links`.
	pub fn reconcile(&mut self, nodes: &[Node], links: &[Link]) -> SceneDiff {
		let mut diff = SceneDiff::default();

		let link_keys: Vec<LinkKey> = links.iter().map(Link::key).collect();
		self.links.retain(|key, _| {
			let kept = link_keys.contains(key);
			if !kept {
				diff.exited_links.push(key.clone());
			}
			kept
		});
		for (link, key) in links.iter().zip(link_keys) {
			if self.links.contains_key(&key) {
				continue;
			}
			diff.entered_links.push(key.clone());
			self.links.insert(
				key.clone(),
				LinkElement {
					key,
					direction: link.direction,
					arrowhead: true,
				},
			);
		}

		self.nodes.retain(|id, _| {
			let kept = nodes.iter().any(|n| &n.id == id);
			if !kept {
				diff.exited_nodes.push(id.clone());
			}
			kept
		});
		for node in nodes {
			if self.nodes.contains_key(&node.id) {
				continue;
			}
			diff.entered_nodes.push(node.id.clone());
			self.nodes.insert(
				node.id.clone(),
				NodeElement {
					id: node.id.clone(),
					radius: node_radius(&node.group),
					fill: self.theme.fill_for(&node.group),
					label: node.id.clone(),
				},
			);
		}

		diff
	}

	/// Pair every element with its current layout position.
	///
	/// Elements without a body in `simulation` are skipped.
	pub fn frame(&self, simulation: &Simulation) -> Frame {
		let links = self
			.links
			.values()
			.filter_map(|link| {
				let source = simulation.body(&link.key.source)?;
				let target = simulation.body(&link.key.target)?;
				Some(FrameLink {
					x1: source.x,
					y1: source.y,
					x2: target.x,
					y2: target.y,
					target_radius: self.nodes.get(&link.key.target)?.radius,
					arrowhead: link.arrowhead,
				})
			})
			.collect();

		let nodes = self
			.nodes
			.values()
			.filter_map(|node| {
				let body = simulation.body(&node.id)?;
				Some(FrameNode {
					id: node.id.clone(),
					x: body.x,
					y: body.y,
					radius: node.radius,
					fill: node.fill,
					label: node.label.clone(),
				})
			})
			.collect();

		Frame { nodes, links }
	}
}
