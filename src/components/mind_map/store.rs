//! Authoritative node and link collections.
//!
//! The store only grows: nodes and links are appended and never removed.

use super::error::StoreError;
use super::types::{Category, Group, Link, Node, Point};

/// Holds every node and link of one editor instance.
#[derive(Clone, Debug)]
pub struct GraphStore {
	nodes: Vec<Node>,
	links: Vec<Link>,
	/// Where the central node is pinned.
	center: Point,
}

impl GraphStore {
	pub fn new(center: Point) -> Self {
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			center,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	pub fn central(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.group.is_central())
	}

	/// Insert the central node, pinned to the canvas center.
	///
	/// Fails if `name` is taken or a central node already exists.
	pub fn set_central_node(&mut self, name: &str, description: &str) -> Result<(), StoreError> {
		if self.contains(name) {
			return Err(StoreError::AlreadyExists(name.to_string()));
		}
		if let Some(central) = self.central() {
			return Err(StoreError::AlreadyExists(central.id.clone()));
		}

		self.nodes.push(Node {
			id: name.to_string(),
			group: Group::Central,
			description: description.to_string(),
			position: Some(self.center),
		});
		Ok(())
	}

	/// Insert a category node together with its link from the central node.
	pub fn add_category_node(
		&mut self,
		name: &str,
		category: Category,
		description: &str,
	) -> Result<(), StoreError> {
		let source = self
			.central()
			.map(|c| c.id.clone())
			.ok_or(StoreError::NoCentralNode)?;
		if self.contains(name) {
			return Err(StoreError::AlreadyExists(name.to_string()));
		}

		self.nodes.push(Node {
			id: name.to_string(),
			group: Group::Category(category),
			description: description.to_string(),
			position: None,
		});
		self.links.push(Link {
			source,
			target: name.to_string(),
			direction: category.direction(),
		});
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::Direction;
	use super::*;

	fn store() -> GraphStore {
		GraphStore::new(Point::new(400.0, 300.0))
	}

	#[test]
	fn central_node_is_pinned_to_center() {
		let mut s = store();
		s.set_central_node("Coffee", "topic").unwrap();
		let central = s.central().unwrap();
		assert_eq!(central.id, "Coffee");
		assert_eq!(central.group, Group::Central);
		assert_eq!(central.position, Some(Point::new(400.0, 300.0)));
	}

	#[test]
	fn second_central_node_is_rejected() {
		let mut s = store();
		s.set_central_node("Coffee", "topic").unwrap();
		assert_eq!(
			s.set_central_node("Coffee", "again"),
			Err(StoreError::AlreadyExists("Coffee".into()))
		);
		assert_eq!(
			s.set_central_node("Tea", "other"),
			Err(StoreError::AlreadyExists("Coffee".into()))
		);
		assert_eq!(s.nodes().len(), 1);
	}

	#[test]
	fn category_node_requires_central_node() {
		let mut s = store();
		assert_eq!(
			s.add_category_node("Espresso", Category::Genre, "strong"),
			Err(StoreError::NoCentralNode)
		);
		assert!(s.nodes().is_empty());
		assert!(s.links().is_empty());
	}

	#[test]
	fn category_node_is_linked_from_central() {
		let mut s = store();
		s.set_central_node("Coffee", "topic").unwrap();
		s.add_category_node("Espresso", Category::Genre, "strong").unwrap();
		s.add_category_node("Arabica", Category::Genos, "plant").unwrap();

		assert_eq!(s.links().len(), 2);
		assert_eq!(s.links()[0].direction, Direction::Top);
		assert_eq!(s.links()[1].direction, Direction::Left);
		assert!(s.links().iter().all(|l| l.source == "Coffee"));
		assert_eq!(s.node("Espresso").unwrap().position, None);
	}

	#[test]
	fn duplicate_category_name_leaves_store_unchanged() {
		let mut s = store();
		s.set_central_node("Coffee", "topic").unwrap();
		s.add_category_node("X", Category::Genre, "first").unwrap();
		assert_eq!(
			s.add_category_node("X", Category::Telos, "second"),
			Err(StoreError::AlreadyExists("X".into()))
		);
		assert_eq!(s.nodes().iter().filter(|n| n.id == "X").count(), 1);
		assert_eq!(s.links().len(), 1);
		assert_eq!(s.node("X").unwrap().description, "first");
	}

	#[test]
	fn category_name_may_not_shadow_central() {
		let mut s = store();
		s.set_central_node("Coffee", "topic").unwrap();
		assert_eq!(
			s.add_category_node("Coffee", Category::Species, "dup"),
			Err(StoreError::AlreadyExists("Coffee".into()))
		);
	}
}
