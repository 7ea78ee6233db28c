//! Pointer interaction: node dragging and hover tooltips.
//!
//! Each node is either at rest or being dragged. Dragging writes a transient
//! override pin into the layout's [`PinMap`](super::simulation::PinMap), and the
//! first active drag raises the solver's alpha target so the rest of the
//! layout keeps moving. Releasing clears the pin. Once the last drag ends the
//! alpha target drops back to zero and the layout settles.
//!
//! Hover only drives the [`Tooltip`] and never touches graph state.

use std::collections::HashSet;

use log::debug;

use super::config::TooltipConfig;
use super::simulation::Simulation;
use super::store::GraphStore;
use super::types::Point;

/// Kind of pointer event delivered to the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
	DragStart,
	DragMove,
	DragEnd,
	HoverEnter,
	HoverLeave,
}

/// A pointer event targeting a node. `pointer` is in layout space.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionEvent {
	pub kind: EventKind,
	pub node_id: String,
	pub pointer: Point,
}

impl InteractionEvent {
	pub fn new(kind: EventKind, node_id: impl Into<String>, pointer: Point) -> Self {
		Self {
			kind,
			node_id: node_id.into(),
			pointer,
		}
	}
}

/// Drag phase of a single node. Release resolves straight back to `AtRest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
	AtRest,
	Dragging,
}

/// Outcome of handling one event.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
	DragStarted { node_id: String, pin: Point },
	DragMoved { node_id: String, pin: Point },
	DragEnded { node_id: String },
	TooltipShown { node_id: String },
	TooltipHidden { node_id: String },
	/// The event did not apply in the node's current state.
	Ignored,
}

/// Tooltip text.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	pub title: String,
	pub body: String,
}

/// An opacity transition in progress.
#[derive(Clone, Copy, Debug)]
struct Fade {
	from: f64,
	to: f64,
	elapsed_ms: f64,
	duration_ms: f64,
}

/// Hover tooltip with timed fade in and out.
#[derive(Clone, Debug)]
pub struct Tooltip {
	config: TooltipConfig,
	content: Option<TooltipContent>,
	/// Pointer position (layout space) the tooltip was shown at.
	anchor: Point,
	opacity: f64,
	fade: Option<Fade>,
}

/// Cubic ease-in-out, the default easing for UI transitions.
fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

impl Tooltip {
	pub fn new(config: TooltipConfig) -> Self {
		Self {
			config,
			content: None,
			anchor: Point::default(),
			opacity: 0.0,
			fade: None,
		}
	}

	pub fn config(&self) -> &TooltipConfig {
		&self.config
	}

	pub fn content(&self) -> Option<&TooltipContent> {
		self.content.as_ref()
	}

	pub fn anchor(&self) -> Point {
		self.anchor
	}

	pub fn opacity(&self) -> f64 {
		self.opacity
	}

	pub fn is_visible(&self) -> bool {
		self.content.is_some() && self.opacity > 0.0
	}

	/// Whether the tooltip is fading, or holding its final shown state.
	pub fn is_fading(&self) -> bool {
		self.fade.is_some()
	}

	pub fn show(&mut self, content: TooltipContent, anchor: Point) {
		self.content = Some(content);
		self.anchor = anchor;
		self.fade_to(self.config.opacity, self.config.fade_in_ms);
	}

	/// Fade out. The content stays in place until replaced.
	pub fn hide(&mut self) {
		self.fade_to(0.0, self.config.fade_out_ms);
	}

	fn fade_to(&mut self, to: f64, duration_ms: f64) {
		self.fade = Some(Fade {
			from: self.opacity,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	/// Advance the running fade by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let Some(fade) = self.fade.as_mut() else {
			return;
		};
		fade.elapsed_ms += dt * 1000.0;
		let t = if fade.duration_ms > 0.0 {
			(fade.elapsed_ms / fade.duration_ms).min(1.0)
		} else {
			1.0
		};
		self.opacity = fade.from + (fade.to - fade.from) * ease_cubic_in_out(t);
		if t >= 1.0 {
			self.opacity = fade.to;
			self.fade = None;
		}
	}
}

/// Routes drag and hover events to the layout and the tooltip.
#[derive(Clone, Debug)]
pub struct InteractionHandler {
	dragging: HashSet<String>,
	drag_alpha_target: f64,
	tooltip: Tooltip,
}

impl InteractionHandler {
	pub fn new(drag_alpha_target: f64, tooltip: TooltipConfig) -> Self {
		Self {
			dragging: HashSet::new(),
			drag_alpha_target,
			tooltip: Tooltip::new(tooltip),
		}
	}

	pub fn phase(&self, node_id: &str) -> DragPhase {
		if self.dragging.contains(node_id) {
			DragPhase::Dragging
		} else {
			DragPhase::AtRest
		}
	}

	pub fn active_drags(&self) -> usize {
		self.dragging.len()
	}

	pub fn tooltip(&self) -> &Tooltip {
		&self.tooltip
	}

	pub fn tooltip_mut(&mut self) -> &mut Tooltip {
		&mut self.tooltip
	}

	pub fn handle(
		&mut self,
		event: &InteractionEvent,
		simulation: &mut Simulation,
		store: &GraphStore,
	) -> Transition {
		let id = event.node_id.as_str();
		match (event.kind, self.phase(id)) {
			(EventKind::DragStart, DragPhase::AtRest) => {
				let Some(pin) = simulation.position(id) else {
					return Transition::Ignored;
				};
				if self.dragging.is_empty() {
					simulation.set_alpha_target(self.drag_alpha_target);
					simulation.restart();
				}
				self.dragging.insert(id.to_string());
				simulation.pins_mut().set_override(id, pin);
				debug!("drag start {id} at ({:.1}, {:.1})", pin.x, pin.y);
				Transition::DragStarted {
					node_id: id.to_string(),
					pin,
				}
			}
			(EventKind::DragMove, DragPhase::Dragging) => {
				simulation.pins_mut().set_override(id, event.pointer);
				Transition::DragMoved {
					node_id: id.to_string(),
					pin: event.pointer,
				}
			}
			(EventKind::DragEnd, DragPhase::Dragging) => {
				self.dragging.remove(id);
				simulation.pins_mut().clear_override(id);
				if self.dragging.is_empty() {
					simulation.set_alpha_target(0.0);
				}
				debug!("drag end {id}");
				Transition::DragEnded {
					node_id: id.to_string(),
				}
			}
			(EventKind::HoverEnter, _) => {
				let Some(node) = store.node(id) else {
					return Transition::Ignored;
				};
				self.tooltip.show(
					TooltipContent {
						title: node.id.clone(),
						body: node.description.clone(),
					},
					event.pointer,
				);
				Transition::TooltipShown {
					node_id: id.to_string(),
				}
			}
			(EventKind::HoverLeave, _) => {
				self.tooltip.hide();
				Transition::TooltipHidden {
					node_id: id.to_string(),
				}
			}
			_ => Transition::Ignored,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::config::LayoutConfig;
	use crate::components::mind_map::types::Category;

	fn fixture() -> (GraphStore, Simulation, InteractionHandler) {
		let center = Point::new(400.0, 300.0);
		let mut store = GraphStore::new(center);
		store.set_central_node("Coffee", "topic").unwrap();
		store
			.add_category_node("Espresso", Category::Genre, "Strong coffee")
			.unwrap();
		store
			.add_category_node("Latte", Category::Species, "Milky")
			.unwrap();
		let mut sim = Simulation::new(LayoutConfig::default(), center);
		sim.sync(store.nodes(), store.links());
		(store, sim, InteractionHandler::new(0.3, TooltipConfig::default()))
	}

	fn event(kind: EventKind, id: &str, x: f64, y: f64) -> InteractionEvent {
		InteractionEvent::new(kind, id, Point::new(x, y))
	}

	#[test]
	fn drag_start_pins_current_position_and_warms_layout() {
		let (store, mut sim, mut handler) = fixture();
		let before = sim.position("Espresso").unwrap();

		let t = handler.handle(&event(EventKind::DragStart, "Espresso", 0.0, 0.0), &mut sim, &store);
		assert_eq!(
			t,
			Transition::DragStarted {
				node_id: "Espresso".into(),
				pin: before
			}
		);
		assert_eq!(handler.phase("Espresso"), DragPhase::Dragging);
		assert_eq!(sim.pins().get("Espresso"), Some(before));
		assert_eq!(sim.alpha_target(), 0.3);
		assert!(sim.is_running());
	}

	#[test]
	fn drag_move_and_end_update_then_clear_the_pin() {
		let (store, mut sim, mut handler) = fixture();
		handler.handle(&event(EventKind::DragStart, "Espresso", 0.0, 0.0), &mut sim, &store);
		handler.handle(&event(EventKind::DragMove, "Espresso", 150.0, 200.0), &mut sim, &store);
		assert_eq!(sim.pins().get("Espresso"), Some(Point::new(150.0, 200.0)));

		let t = handler.handle(&event(EventKind::DragEnd, "Espresso", 150.0, 200.0), &mut sim, &store);
		assert_eq!(
			t,
			Transition::DragEnded {
				node_id: "Espresso".into()
			}
		);
		assert_eq!(handler.phase("Espresso"), DragPhase::AtRest);
		assert_eq!(sim.pins().get("Espresso"), None);
		assert_eq!(sim.alpha_target(), 0.0);
	}

	#[test]
	fn alpha_target_stays_raised_until_last_drag_ends() {
		let (store, mut sim, mut handler) = fixture();
		handler.handle(&event(EventKind::DragStart, "Espresso", 0.0, 0.0), &mut sim, &store);
		handler.handle(&event(EventKind::DragStart, "Latte", 0.0, 0.0), &mut sim, &store);
		assert_eq!(handler.active_drags(), 2);

		handler.handle(&event(EventKind::DragEnd, "Espresso", 0.0, 0.0), &mut sim, &store);
		assert_eq!(sim.alpha_target(), 0.3);
		handler.handle(&event(EventKind::DragEnd, "Latte", 0.0, 0.0), &mut sim, &store);
		assert_eq!(sim.alpha_target(), 0.0);
	}

	#[test]
	fn releasing_central_node_restores_its_anchor() {
		let (store, mut sim, mut handler) = fixture();
		handler.handle(&event(EventKind::DragStart, "Coffee", 0.0, 0.0), &mut sim, &store);
		handler.handle(&event(EventKind::DragMove, "Coffee", 10.0, 20.0), &mut sim, &store);
		assert_eq!(sim.pins().get("Coffee"), Some(Point::new(10.0, 20.0)));
		handler.handle(&event(EventKind::DragEnd, "Coffee", 10.0, 20.0), &mut sim, &store);
		assert_eq!(sim.pins().get("Coffee"), Some(Point::new(400.0, 300.0)));
	}

	#[test]
	fn out_of_order_drag_events_are_ignored() {
		let (store, mut sim, mut handler) = fixture();
		assert_eq!(
			handler.handle(&event(EventKind::DragMove, "Espresso", 1.0, 1.0), &mut sim, &store),
			Transition::Ignored
		);
		assert_eq!(
			handler.handle(&event(EventKind::DragEnd, "Espresso", 1.0, 1.0), &mut sim, &store),
			Transition::Ignored
		);
		assert_eq!(
			handler.handle(&event(EventKind::DragStart, "Ghost", 1.0, 1.0), &mut sim, &store),
			Transition::Ignored
		);
		assert_eq!(sim.pins().get("Espresso"), None);
		assert_eq!(handler.active_drags(), 0);
	}

	#[test]
	fn hover_shows_description_without_touching_layout() {
		let (store, mut sim, mut handler) = fixture();
		let before = sim.bodies().to_vec();
		let t = handler.handle(&event(EventKind::HoverEnter, "Espresso", 5.0, 6.0), &mut sim, &store);
		assert_eq!(
			t,
			Transition::TooltipShown {
				node_id: "Espresso".into()
			}
		);
		let tip = handler.tooltip();
		assert_eq!(
			tip.content(),
			Some(&TooltipContent {
				title: "Espresso".into(),
				body: "Strong coffee".into()
			})
		);
		assert_eq!(tip.anchor(), Point::new(5.0, 6.0));
		assert_eq!(sim.bodies(), &before[..]);
		assert_eq!(sim.pins().get("Espresso"), None);
	}

	#[test]
	fn tooltip_fades_in_over_200ms_and_out_over_500ms() {
		let mut tip = Tooltip::new(TooltipConfig::default());
		tip.show(
			TooltipContent {
				title: "a".into(),
				body: "b".into(),
			},
			Point::default(),
		);
		tip.tick(0.1);
		assert!((tip.opacity() - 0.45).abs() < 1e-9);
		tip.tick(0.1);
		assert_eq!(tip.opacity(), 0.9);
		assert!(!tip.is_fading());

		tip.hide();
		tip.tick(0.25);
		assert!((tip.opacity() - 0.45).abs() < 1e-9);
		tip.tick(0.2);
		assert!(tip.opacity() > 0.0);
		tip.tick(0.05);
		assert_eq!(tip.opacity(), 0.0);
		assert!(!tip.is_visible());
	}

	#[test]
	fn easing_is_symmetric() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert!((ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75) - 1.0).abs() < 1e-12);
	}
}
