//! One editor instance: graph store, scene, layout, and interaction state.
//!
//! Commands mutate the store and then synchronously reconcile the scene and
//! reheat the layout, so the next frame never shows stale node or link sets.
//! Pointer input arrives in screen space and is translated into typed
//! [`InteractionEvent`]s, or into pan and zoom of the view.

use log::{debug, info};

use super::config::MindMapConfig;
use super::error::CommandError;
use super::interaction::{EventKind, InteractionEvent, InteractionHandler, Transition, Tooltip};
use super::scene::{Frame, Scene};
use super::simulation::Simulation;
use super::store::GraphStore;
use super::theme::Theme;
use super::types::{CENTRAL_DESCRIPTION, Category, Point};
use super::view::{PanState, ViewTransform};

/// A user action from the command surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	/// Create the central node.
	SetTopic { topic: String },
	/// Create a category node linked from the central node.
	AddCategoryNode {
		category: Category,
		name: String,
		description: String,
	},
}

impl Command {
	pub fn set_topic(topic: impl Into<String>) -> Self {
		Command::SetTopic {
			topic: topic.into(),
		}
	}

	/// Build an add command from raw form fields.
	pub fn add_category_from_fields(
		category: &str,
		name: &str,
		description: &str,
	) -> Result<Self, CommandError> {
		let tag = non_empty(category, "category")?;
		let category: Category = tag
			.parse()
			.map_err(|_| CommandError::UnknownCategory(tag.to_string()))?;
		Ok(Command::AddCategoryNode {
			category,
			name: name.to_string(),
			description: description.to_string(),
		})
	}
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CommandError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		Err(CommandError::EmptyField(field))
	} else {
		Ok(trimmed)
	}
}

/// Owns everything one mind-map editor needs.
pub struct GraphSession {
	config: MindMapConfig,
	store: GraphStore,
	scene: Scene,
	simulation: Simulation,
	interaction: InteractionHandler,
	view: ViewTransform,
	pan: PanState,
	/// Node currently held by the pointer, with the grab offset in layout space.
	grabbed: Option<(String, Point)>,
	hovered: Option<String>,
}

impl GraphSession {
	/// Create an empty editor whose layout is centered in a `width` x `height` canvas.
	pub fn new(config: MindMapConfig, width: f64, height: f64) -> Self {
		Self::with_theme(config, Theme::default(), width, height)
	}

	pub fn with_theme(config: MindMapConfig, theme: Theme, width: f64, height: f64) -> Self {
		let center = Point::new(width / 2.0, height / 2.0);
		Self {
			store: GraphStore::new(center),
			scene: Scene::new(theme),
			simulation: Simulation::new(config.layout.clone(), center),
			interaction: InteractionHandler::new(
				config.layout.drag_alpha_target,
				config.tooltip.clone(),
			),
			view: ViewTransform::default(),
			pan: PanState::default(),
			grabbed: None,
			hovered: None,
			config,
		}
	}

	pub fn config(&self) -> &MindMapConfig {
		&self.config
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn interaction(&self) -> &InteractionHandler {
		&self.interaction
	}

	pub fn tooltip(&self) -> &Tooltip {
		self.interaction.tooltip()
	}

	pub fn view(&self) -> &ViewTransform {
		&self.view
	}

	/// Whether the central topic has been set.
	pub fn has_topic(&self) -> bool {
		self.store.central().is_some()
	}

	/// Validate and apply a command. A rejected command changes nothing.
	pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
		match command {
			Command::SetTopic { topic } => {
				let topic = non_empty(&topic, "topic")?;
				self.store.set_central_node(topic, CENTRAL_DESCRIPTION)?;
				info!("mindmap: central topic set to {topic:?}");
			}
			Command::AddCategoryNode {
				category,
				name,
				description,
			} => {
				let name = non_empty(&name, "name")?;
				let description = non_empty(&description, "description")?;
				self.store.add_category_node(name, category, description)?;
				info!(
					"mindmap: added {name:?} under {category} ({})",
					category.direction()
				);
			}
		}
		self.update_graph();
		Ok(())
	}

	/// Reconcile the scene with the store and restart the layout hot.
	fn update_graph(&mut self) {
		let diff = self.scene.reconcile(self.store.nodes(), self.store.links());
		debug!(
			"mindmap: reconciled +{}/-{} nodes, +{}/-{} links",
			diff.entered_nodes.len(),
			diff.exited_nodes.len(),
			diff.entered_links.len(),
			diff.exited_links.len()
		);
		self.simulation.sync(self.store.nodes(), self.store.links());
		self.simulation.reheat();
	}

	/// Advance one animation frame of `dt` seconds. Returns whether the layout moved.
	pub fn tick(&mut self, dt: f64) -> bool {
		let moved = self.simulation.step();
		self.interaction.tooltip_mut().tick(dt);
		moved
	}

	/// Renderer records for the current layout.
	pub fn frame(&self) -> Frame {
		self.scene.frame(&self.simulation)
	}

	/// Apply a typed interaction event.
	pub fn handle(&mut self, event: &InteractionEvent) -> Transition {
		self.interaction
			.handle(event, &mut self.simulation, &self.store)
	}

	/// Topmost node whose circle contains the screen point.
	pub fn node_at(&self, screen: Point) -> Option<String> {
		let p = self.view.screen_to_graph(screen);
		self.simulation
			.bodies()
			.iter()
			.rev()
			.find(|b| (b.x - p.x).powi(2) + (b.y - p.y).powi(2) < b.radius * b.radius)
			.map(|b| b.id.clone())
	}

	/// Pointer pressed: grab a node, or start panning the background.
	pub fn pointer_down(&mut self, screen: Point) -> Transition {
		let Some(id) = self.node_at(screen) else {
			self.pan.begin(screen, &self.view);
			return Transition::Ignored;
		};
		let pointer = self.view.screen_to_graph(screen);
		let transition = self.handle(&InteractionEvent::new(EventKind::DragStart, &id, pointer));
		if let Transition::DragStarted { pin, .. } = &transition {
			self.grabbed = Some((id, Point::new(pin.x - pointer.x, pin.y - pointer.y)));
		}
		transition
	}

	/// Pointer moved: drag, pan, or update hover.
	pub fn pointer_move(&mut self, screen: Point) -> Vec<Transition> {
		let pointer = self.view.screen_to_graph(screen);
		if let Some((id, offset)) = self.grabbed.clone() {
			let at = Point::new(pointer.x + offset.x, pointer.y + offset.y);
			return vec![self.handle(&InteractionEvent::new(EventKind::DragMove, id, at))];
		}
		if self.pan.active {
			self.pan.update(screen, &mut self.view);
			return Vec::new();
		}

		let hit = self.node_at(screen);
		if hit == self.hovered {
			return Vec::new();
		}
		let mut transitions = Vec::new();
		if let Some(old) = self.hovered.take() {
			transitions.push(self.handle(&InteractionEvent::new(EventKind::HoverLeave, old, pointer)));
		}
		if let Some(new) = hit {
			transitions.push(self.handle(&InteractionEvent::new(
				EventKind::HoverEnter,
				new.clone(),
				pointer,
			)));
			self.hovered = Some(new);
		}
		transitions
	}

	/// Pointer released: end any drag or pan.
	pub fn pointer_up(&mut self, screen: Point) -> Transition {
		self.pan.end();
		match self.grabbed.take() {
			Some((id, _)) => {
				let pointer = self.view.screen_to_graph(screen);
				self.handle(&InteractionEvent::new(EventKind::DragEnd, id, pointer))
			}
			None => Transition::Ignored,
		}
	}

	/// Pointer left the canvas: release everything and hide the tooltip.
	pub fn pointer_leave(&mut self, screen: Point) -> Vec<Transition> {
		let mut transitions = vec![self.pointer_up(screen)];
		if let Some(old) = self.hovered.take() {
			let pointer = self.view.screen_to_graph(screen);
			transitions.push(self.handle(&InteractionEvent::new(EventKind::HoverLeave, old, pointer)));
		}
		transitions
	}

	/// Wheel over the canvas: zoom in for negative `delta_y`, out for positive.
	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		let step = self.config.view.zoom_step;
		let factor = if delta_y > 0.0 { 1.0 / step } else { step };
		self.view.zoom_at(screen, factor, &self.config.view);
	}
}
