//! Iterative force-directed layout.
//!
//! Each tick decays the energy (`alpha`) towards its target, applies the link,
//! many-body, centering and collision forces to body velocities, then
//! integrates. Pinned bodies are placed at their pin with zero velocity, so a
//! pin always wins over the forces.
//!
//! The solver keeps running while alpha stays above `alpha_min`. Structural
//! changes call [`Simulation::reheat`]; drags raise the alpha target instead.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::warn;

use super::config::LayoutConfig;
use super::types::{Direction, Link, Node, Point, node_radius};

/// Initial placement for bodies with no pin and no direction hint.
const INITIAL_RADIUS: f64 = 10.0;

/// Perpendicular spacing between siblings seeded on the same side.
const SIBLING_SPREAD: f64 = 15.0;

/// Deterministic linear congruential generator used for jiggle.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 4_294_967_296;

	fn next(&mut self) -> f64 {
		self.0 = (Self::A.wrapping_mul(self.0).wrapping_add(Self::C)) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	/// Tiny random offset that separates coincident points.
	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Live layout state for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Visual radius of the node.
	pub radius: f64,
}

impl Body {
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

/// Position constraints consulted every tick.
///
/// Anchors come from the graph store and last for the session. Overrides are
/// transient (drag) and shadow the anchor while present.
#[derive(Clone, Debug, Default)]
pub struct PinMap {
	anchors: HashMap<String, Point>,
	overrides: HashMap<String, Point>,
}

impl PinMap {
	pub fn get(&self, id: &str) -> Option<Point> {
		self.overrides
			.get(id)
			.or_else(|| self.anchors.get(id))
			.copied()
	}

	pub fn anchor(&self, id: &str) -> Option<Point> {
		self.anchors.get(id).copied()
	}

	pub fn set_override(&mut self, id: &str, at: Point) {
		self.overrides.insert(id.to_string(), at);
	}

	pub fn clear_override(&mut self, id: &str) -> Option<Point> {
		self.overrides.remove(id)
	}

	pub fn is_overridden(&self, id: &str) -> bool {
		self.overrides.contains_key(id)
	}

	fn set_anchor(&mut self, id: &str, at: Option<Point>) {
		match at {
			Some(p) => {
				self.anchors.insert(id.to_string(), p);
			}
			None => {
				self.anchors.remove(id);
			}
		}
	}

	fn forget(&mut self, id: &str) {
		self.anchors.remove(id);
		self.overrides.remove(id);
	}
}

/// A link resolved to body indices, with its precomputed strength and bias.
#[derive(Clone, Debug)]
struct ResolvedLink {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// The layout engine.
pub struct Simulation {
	config: LayoutConfig,
	center: Point,
	bodies: Vec<Body>,
	index: HashMap<String, usize>,
	links: Vec<ResolvedLink>,
	pins: PinMap,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	random: Lcg,
}

impl Simulation {
	pub fn new(config: LayoutConfig, center: Point) -> Self {
		Self {
			config,
			center,
			bodies: Vec::new(),
			index: HashMap::new(),
			links: Vec::new(),
			pins: PinMap::default(),
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			random: Lcg(1),
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn center(&self) -> Point {
		self.center
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn body(&self, id: &str) -> Option<&Body> {
		self.index.get(id).map(|&i| &self.bodies[i])
	}

	pub fn position(&self, id: &str) -> Option<Point> {
		self.body(id).map(Body::position)
	}

	pub fn pins(&self) -> &PinMap {
		&self.pins
	}

	pub fn pins_mut(&mut self) -> &mut PinMap {
		&mut self.pins
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Resume ticking without touching alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Reset to maximum energy and resume ticking.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
		self.restart();
	}

	/// Replace the node and link sets.
	///
	/// Existing bodies keep their position and velocity. New bodies are placed
	/// at their pin if they have one, otherwise on their link's compass side of
	/// the source, otherwise on a phyllotaxis spiral around the center. Links
	/// are resolved to bodies once here.
	pub fn sync(&mut self, nodes: &[Node], links: &[Link]) {
		let keep: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let pins = &mut self.pins;
		self.bodies.retain(|b| {
			let kept = keep.contains(b.id.as_str());
			if !kept {
				pins.forget(&b.id);
			}
			kept
		});
		self.reindex();

		let hints = direction_hints(links);
		for node in nodes {
			self.pins.set_anchor(&node.id, node.position);
			if let Some(&i) = self.index.get(&node.id) {
				self.bodies[i].radius = node_radius(&node.group);
				continue;
			}

			let seed = self.seed_position(&node.id, hints.get(node.id.as_str()));
			self.index.insert(node.id.clone(), self.bodies.len());
			self.bodies.push(Body {
				id: node.id.clone(),
				x: seed.x,
				y: seed.y,
				vx: 0.0,
				vy: 0.0,
				radius: node_radius(&node.group),
			});
		}

		self.resolve_links(links);
	}

	fn reindex(&mut self) {
		self.index = self
			.bodies
			.iter()
			.enumerate()
			.map(|(i, b)| (b.id.clone(), i))
			.collect();
	}

	fn seed_position(&self, id: &str, hint: Option<&SeedHint<'_>>) -> Point {
		if let Some(pin) = self.pins.get(id) {
			return pin;
		}
		if let Some(hint) = hint {
			if let Some(source) = self.position(hint.source) {
				let (ux, uy) = hint.direction.unit();
				let (px, py) = (-uy, ux);
				let offset = sibling_offset(hint.ordinal) * SIBLING_SPREAD;
				return Point::new(
					source.x + ux * self.config.link_distance + px * offset,
					source.y + uy * self.config.link_distance + py * offset,
				);
			}
		}
		let i = self.bodies.len() as f64;
		let radius = INITIAL_RADIUS * (0.5 + i).sqrt();
		let angle = i * PI * (3.0 - 5.0_f64.sqrt());
		Point::new(
			self.center.x + radius * angle.cos(),
			self.center.y + radius * angle.sin(),
		)
	}

	fn resolve_links(&mut self, links: &[Link]) {
		let mut resolved = Vec::with_capacity(links.len());
		for link in links {
			match (self.index.get(&link.source), self.index.get(&link.target)) {
				(Some(&source), Some(&target)) => resolved.push(ResolvedLink {
					source,
					target,
					strength: 0.0,
					bias: 0.0,
				}),
				_ => warn!("layout: skipping link {} with a missing endpoint", link.key()),
			}
		}

		let mut degree = vec![0usize; self.bodies.len()];
		for link in &resolved {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		for link in &mut resolved {
			let (s, t) = (degree[link.source] as f64, degree[link.target] as f64);
			link.strength = 1.0 / s.min(t);
			link.bias = s / (s + t);
		}
		self.links = resolved;
	}

	/// Advance one tick if running. Returns whether a tick happened.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		if self.alpha < self.config.alpha_min {
			self.running = false;
		}
		true
	}

	/// Advance one tick unconditionally.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collision();

		let decay = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			if let Some(pin) = self.pins.get(&body.id) {
				body.x = pin.x;
				body.y = pin.y;
				body.vx = 0.0;
				body.vy = 0.0;
			} else {
				body.vx *= decay;
				body.vy *= decay;
				body.x += body.vx;
				body.y += body.vy;
			}
		}
	}

	fn apply_links(&mut self) {
		let distance = self.config.link_distance;
		for i in 0..self.links.len() {
			let ResolvedLink {
				source,
				target,
				strength,
				bias,
			} = self.links[i];
			let (s, t) = (&self.bodies[source], &self.bodies[target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.random.jiggle();
			}
			if y == 0.0 {
				y = self.random.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - distance) / l * self.alpha * strength;
			let (x, y) = (x * l, y * l);

			let t = &mut self.bodies[target];
			t.vx -= x * bias;
			t.vy -= y * bias;
			let s = &mut self.bodies[source];
			s.vx += x * (1.0 - bias);
			s.vy += y * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let n = self.bodies.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.bodies[j].x - self.bodies[i].x;
				let mut y = self.bodies[j].y - self.bodies[i].y;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < 1.0 {
					l = l.sqrt();
				}
				dvx += x * strength / l;
				dvy += y * strength / l;
			}
			self.bodies[i].vx += dvx;
			self.bodies[i].vy += dvy;
		}
	}

	fn apply_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let (dx, dy) = (sx / n - self.center.x, sy / n - self.center.y);
		for body in &mut self.bodies {
			body.x -= dx;
			body.y -= dy;
		}
	}

	fn apply_collision(&mut self) {
		let padding = self.config.collision_padding;
		let n = self.bodies.len();
		for i in 0..n {
			let ri = self.bodies[i].radius + padding;
			let ri2 = ri * ri;
			let xi = self.bodies[i].x + self.bodies[i].vx;
			let yi = self.bodies[i].y + self.bodies[i].vy;
			for j in (i + 1)..n {
				let rj = self.bodies[j].radius + padding;
				let r = ri + rj;
				let mut x = xi - self.bodies[j].x - self.bodies[j].vx;
				let mut y = yi - self.bodies[j].y - self.bodies[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				let l = l.sqrt();
				let l = (r - l) / l;
				let (x, y) = (x * l, y * l);
				let rj2 = rj * rj;
				let w = rj2 / (ri2 + rj2);

				self.bodies[i].vx += x * w;
				self.bodies[i].vy += y * w;
				self.bodies[j].vx -= x * (1.0 - w);
				self.bodies[j].vy -= y * (1.0 - w);
			}
		}
	}
}

/// Where a new body should be seeded relative to its link source.
#[derive(Clone, Copy, Debug)]
struct SeedHint<'a> {
	source: &'a str,
	direction: Direction,
	/// Position among links sharing the same source and direction.
	ordinal: usize,
}

fn direction_hints(links: &[Link]) -> HashMap<&str, SeedHint<'_>> {
	let mut seen: HashMap<(&str, Direction), usize> = HashMap::new();
	let mut hints = HashMap::new();
	for link in links {
		let ordinal = seen.entry((link.source.as_str(), link.direction)).or_insert(0);
		hints.insert(
			link.target.as_str(),
			SeedHint {
				source: &link.source,
				direction: link.direction,
				ordinal: *ordinal,
			},
		);
		*ordinal += 1;
	}
	hints
}

/// 0, +1, -1, +2, -2, ...
fn sibling_offset(ordinal: usize) -> f64 {
	let step = ordinal.div_ceil(2) as f64;
	if ordinal % 2 == 1 { step } else { -step }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::{Category, Group};

	fn central(id: &str, at: Point) -> Node {
		Node {
			id: id.into(),
			group: Group::Central,
			description: String::new(),
			position: Some(at),
		}
	}

	fn category(id: &str, category: Category) -> Node {
		Node {
			id: id.into(),
			group: Group::Category(category),
			description: String::new(),
			position: None,
		}
	}

	fn link(source: &str, target: &str, category: Category) -> Link {
		Link {
			source: source.into(),
			target: target.into(),
			direction: category.direction(),
		}
	}

	fn star() -> (Vec<Node>, Vec<Link>) {
		let nodes = vec![
			central("Coffee", Point::new(400.0, 300.0)),
			category("Espresso", Category::Genre),
			category("Latte", Category::Species),
			category("Arabica", Category::Genos),
			category("Mocha", Category::Telos),
		];
		let links = nodes[1..]
			.iter()
			.map(|n| match n.group {
				Group::Category(c) => link("Coffee", &n.id, c),
				_ => unreachable!(),
			})
			.collect();
		(nodes, links)
	}

	fn simulation() -> Simulation {
		Simulation::new(LayoutConfig::default(), Point::new(400.0, 300.0))
	}

	#[test]
	fn new_bodies_are_seeded_on_their_compass_side() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);

		assert_eq!(sim.position("Coffee"), Some(Point::new(400.0, 300.0)));
		assert_eq!(sim.position("Espresso"), Some(Point::new(400.0, 200.0)));
		assert_eq!(sim.position("Latte"), Some(Point::new(400.0, 400.0)));
		assert_eq!(sim.position("Arabica"), Some(Point::new(300.0, 300.0)));
		assert_eq!(sim.position("Mocha"), Some(Point::new(500.0, 300.0)));
	}

	#[test]
	fn siblings_on_the_same_side_are_spread_apart() {
		let nodes = vec![
			central("Coffee", Point::new(0.0, 0.0)),
			category("A", Category::Genre),
			category("B", Category::Genre),
		];
		let links = vec![
			link("Coffee", "A", Category::Genre),
			link("Coffee", "B", Category::Genre),
		];
		let mut sim = Simulation::new(LayoutConfig::default(), Point::default());
		sim.sync(&nodes, &links);
		let (a, b) = (sim.position("A").unwrap(), sim.position("B").unwrap());
		assert_eq!(a.y, b.y);
		assert_ne!(a.x, b.x);
	}

	#[test]
	fn pinned_body_never_moves() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		for _ in 0..50 {
			sim.tick();
			assert_eq!(sim.position("Coffee"), Some(Point::new(400.0, 300.0)));
		}
	}

	#[test]
	fn override_pin_wins_over_forces() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		sim.pins_mut().set_override("Espresso", Point::new(150.0, 200.0));
		for _ in 0..20 {
			sim.tick();
			assert_eq!(sim.position("Espresso"), Some(Point::new(150.0, 200.0)));
		}
		assert_eq!(sim.body("Espresso").unwrap().vx, 0.0);
	}

	#[test]
	fn override_shadows_anchor_until_cleared() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		sim.pins_mut().set_override("Coffee", Point::new(10.0, 10.0));
		sim.tick();
		assert_eq!(sim.position("Coffee"), Some(Point::new(10.0, 10.0)));

		sim.pins_mut().clear_override("Coffee");
		sim.tick();
		assert_eq!(sim.position("Coffee"), Some(Point::new(400.0, 300.0)));
	}

	#[test]
	fn alpha_decays_until_the_solver_stops() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		let mut ticks = 0;
		while sim.step() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!(!sim.is_running());
		assert!(sim.alpha() < sim.config().alpha_min);
		assert!((299..=301).contains(&ticks));
		assert!(!sim.step());
	}

	#[test]
	fn reheat_resumes_from_full_energy() {
		let mut sim = simulation();
		sim.set_alpha(0.0001);
		sim.step();
		assert!(!sim.is_running());
		sim.reheat();
		assert!(sim.is_running());
		assert_eq!(sim.alpha(), 1.0);
	}

	#[test]
	fn alpha_target_keeps_the_solver_warm() {
		let mut sim = simulation();
		sim.set_alpha(0.0);
		sim.set_alpha_target(0.3);
		for _ in 0..500 {
			assert!(sim.step());
		}
		assert!((sim.alpha() - 0.3).abs() < 1e-3);
	}

	#[test]
	fn settled_layout_respects_link_distance_and_collisions() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		while sim.step() {}

		let center = sim.position("Coffee").unwrap();
		for body in sim.bodies().iter().filter(|b| b.id != "Coffee") {
			let d = ((body.x - center.x).powi(2) + (body.y - center.y).powi(2)).sqrt();
			assert!(d > 50.0, "{} collapsed onto the center ({d})", body.id);
		}
		for (i, a) in sim.bodies().iter().enumerate() {
			for b in &sim.bodies()[i + 1..] {
				let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
				assert!(d > a.radius + b.radius, "{} overlaps {}", a.id, b.id);
			}
		}
	}

	#[test]
	fn settled_category_nodes_keep_their_side() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		while sim.step() {}

		let c = sim.position("Coffee").unwrap();
		assert!(sim.position("Espresso").unwrap().y < c.y);
		assert!(sim.position("Latte").unwrap().y > c.y);
		assert!(sim.position("Arabica").unwrap().x < c.x);
		assert!(sim.position("Mocha").unwrap().x > c.x);
	}

	#[test]
	fn coincident_bodies_are_separated() {
		let nodes = vec![
			Node {
				id: "a".into(),
				group: Group::Other("x".into()),
				description: String::new(),
				position: None,
			},
			Node {
				id: "b".into(),
				group: Group::Other("x".into()),
				description: String::new(),
				position: None,
			},
		];
		let mut sim = simulation();
		sim.sync(&nodes, &[]);
		sim.bodies[1].x = sim.bodies[0].x;
		sim.bodies[1].y = sim.bodies[0].y;
		for _ in 0..30 {
			sim.tick();
		}
		let (a, b) = (&sim.bodies()[0], &sim.bodies()[1]);
		assert!(a.x.is_finite() && b.x.is_finite());
		assert!(((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt() > 1.0);
	}

	#[test]
	fn sync_drops_missing_bodies_and_keeps_existing_state() {
		let (nodes, links) = star();
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		for _ in 0..10 {
			sim.tick();
		}
		let latte = sim.body("Latte").unwrap().clone();

		let kept: Vec<Node> = nodes.iter().filter(|n| n.id != "Mocha").cloned().collect();
		let kept_links: Vec<Link> = links.iter().filter(|l| l.target != "Mocha").cloned().collect();
		sim.sync(&kept, &kept_links);

		assert!(sim.body("Mocha").is_none());
		assert_eq!(sim.bodies().len(), 4);
		assert_eq!(sim.body("Latte"), Some(&latte));
	}

	#[test]
	fn dangling_links_are_skipped() {
		let nodes = vec![central("Coffee", Point::new(0.0, 0.0))];
		let links = vec![link("Coffee", "Ghost", Category::Genre)];
		let mut sim = simulation();
		sim.sync(&nodes, &links);
		assert!(sim.links.is_empty());
		sim.tick();
	}

	#[test]
	fn sibling_offsets_alternate() {
		let offsets: Vec<f64> = (0..5).map(sibling_offset).collect();
		assert_eq!(offsets, vec![0.0, 1.0, -1.0, 2.0, -2.0]);
	}
}
