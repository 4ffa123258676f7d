//! The layout engine: owns the recipe graph, its derived attributes and the
//! per-node position table, and advances the force simulation one tick at a
//! time.
//!
//! Charge and edge springs are integrated by [`force_graph`]; link rest
//! length, centring, level columns and collision are applied on top by
//! [`super::forces`], scaled by the cooling `alpha`. Pinned nodes become
//! anchors in the physics graph so they keep exerting force without moving.

use std::collections::HashMap;
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, info, warn};

use super::config::{LayoutConfig, LayoutVariant};
use super::error::LayoutError;
use super::forces::{self, Body};
use super::frame::{EdgeFrame, Frame, NodeFrame};
use super::highlight::Highlight;
use crate::recipe::{
	Classification, Direction, Levels, NodeIdx, RecipeGraph, assign_levels, classify, collect,
};

/// Radius of the ring the free layout is seeded on.
const SEED_RADIUS: f32 = 100.0;

/// Whether the engine is running its forces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Forces run every tick.
	Simulated,
	/// Frozen; only drags move nodes.
	Paused,
}

/// Physics-side payload: the graph index the node stands for.
#[derive(Clone, Debug, Default)]
struct NodeInfo {
	idx: NodeIdx,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Slot {
	x: f32,
	y: f32,
	pin: Option<(f32, f32)>,
}

impl Slot {
	fn position(&self) -> (f32, f32) {
		self.pin.unwrap_or((self.x, self.y))
	}
}

#[derive(Clone, Copy, Debug)]
struct DragState {
	node: NodeIdx,
	direction: Direction,
}

/// Positions, modes and highlight state for one laid-out recipe graph.
pub struct LayoutEngine {
	graph: RecipeGraph,
	classes: Vec<Classification>,
	levels: Levels,
	config: LayoutConfig,
	sim: ForceGraph<NodeInfo, ()>,
	links: Vec<(NodeIdx, NodeIdx)>,
	slots: Vec<Slot>,
	mode: Mode,
	alpha: f32,
	alpha_target: f32,
	drag: Option<DragState>,
	highlight: Highlight,
	elapsed: f64,
}

impl LayoutEngine {
	/// Lay out `graph`.
	///
	/// A dependency cycle is fatal for the leveled layout. The free layout logs
	/// it and carries on with every node at level 0.
	pub fn new(graph: RecipeGraph, config: LayoutConfig) -> Result<Self, LayoutError> {
		let levels = match assign_levels(&graph) {
			Ok(levels) => levels,
			Err(err) if config.variant == LayoutVariant::Free => {
				warn!("{err}; laying out without levels");
				Levels::flat(graph.node_count())
			}
			Err(err) => return Err(err.into()),
		};
		let classes = classify(&graph, config.raw_policy);

		let mut sim = ForceGraph::new(config.simulation_parameters());
		let handles: Vec<DefaultNodeIdx> = (0..graph.node_count())
			.map(|idx| {
				sim.add_node(NodeData {
					x: 0.0,
					y: 0.0,
					mass: config.node_mass,
					is_anchor: false,
					user_data: NodeInfo { idx },
				})
			})
			.collect();

		let mut links = Vec::with_capacity(graph.edge_count());
		for edge in graph.edges() {
			if edge.ingredient == edge.product {
				continue;
			}
			sim.add_edge(
				handles[edge.ingredient],
				handles[edge.product],
				EdgeData::default(),
			);
			links.push((edge.ingredient, edge.product));
		}

		let mut engine = Self {
			slots: vec![Slot::default(); graph.node_count()],
			graph,
			classes,
			levels,
			config,
			sim,
			links,
			mode: Mode::Simulated,
			alpha: 1.0,
			alpha_target: 0.0,
			drag: None,
			highlight: Highlight::default(),
			elapsed: 0.0,
		};
		engine.reset_positions();
		info!(
			"laid out {} items, {} edges, {} levels ({:?})",
			engine.graph.node_count(),
			engine.graph.edge_count(),
			engine.levels.max_level() + 1,
			engine.config.variant,
		);
		Ok(engine)
	}

	/// The graph being laid out.
	pub fn graph(&self) -> &RecipeGraph {
		&self.graph
	}

	/// Current tuning, including the grid snap toggle.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Level of every node; all 0 when a free layout hit a cycle.
	pub fn levels(&self) -> &Levels {
		&self.levels
	}

	/// Current mode.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// True in [`Mode::Paused`].
	pub fn is_paused(&self) -> bool {
		self.mode == Mode::Paused
	}

	/// Current cooling temperature.
	pub fn alpha(&self) -> f32 {
		self.alpha
	}

	/// Simulated seconds elapsed while not paused.
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	/// Marks set by the active drag.
	pub fn highlight(&self) -> &Highlight {
		&self.highlight
	}

	/// Structural role of `id`.
	pub fn classification(&self, id: &str) -> Option<Classification> {
		self.graph.index_of(id).map(|idx| self.classes[idx])
	}

	/// Where `id` currently is, its pin if it has one.
	pub fn position(&self, id: &str) -> Option<(f32, f32)> {
		self.graph.index_of(id).map(|idx| self.slots[idx].position())
	}

	/// Whether `id` is fixed in place.
	pub fn is_pinned(&self, id: &str) -> bool {
		self.graph
			.index_of(id)
			.is_some_and(|idx| self.slots[idx].pin.is_some())
	}

	/// Id of the node being dragged, if any.
	pub fn dragged(&self) -> Option<&str> {
		self.drag.map(|d| self.graph.id(d.node))
	}

	/// Direction of the active drag's highlight.
	pub fn drag_direction(&self) -> Option<Direction> {
		self.drag.map(|d| d.direction)
	}

	/// The grid overlay shows only while paused with snapping on.
	pub fn grid_visible(&self) -> bool {
		self.is_paused() && self.config.grid.snap
	}

	/// Nearest node within the hit radius of a graph-space point.
	pub fn node_at(&self, x: f32, y: f32) -> Option<&str> {
		let hit = self.config.hit_radius * self.config.hit_radius;
		self.slots
			.iter()
			.enumerate()
			.map(|(idx, slot)| {
				let (nx, ny) = slot.position();
				(idx, (nx - x).powi(2) + (ny - y).powi(2))
			})
			.filter(|&(_, d2)| d2 <= hit)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| self.graph.id(idx))
	}

	/// Deterministic leveled placement: one column per level, nodes stacked in
	/// input order and centred on the vertical focus.
	pub fn leveled_positions(&self) -> Vec<(f32, f32)> {
		let levels = self.levels.as_slice();
		let mut per_level: HashMap<u32, usize> = HashMap::new();
		for &level in levels {
			*per_level.entry(level).or_default() += 1;
		}
		let mut rows: HashMap<u32, usize> = HashMap::new();
		levels
			.iter()
			.map(|&level| {
				let row = rows.entry(level).or_default();
				let offset = *row as f32 - (per_level[&level] - 1) as f32 / 2.0;
				*row += 1;
				(
					level as f32 * self.config.level_spacing,
					self.config.vertical_center + offset * self.config.row_spacing,
				)
			})
			.collect()
	}

	fn seed_positions(&self) -> Vec<(f32, f32)> {
		match self.config.variant {
			LayoutVariant::Leveled => self.leveled_positions(),
			LayoutVariant::Free => {
				let n = self.slots.len().max(1) as f32;
				let [cx, cy] = self.config.center.unwrap_or([0.0, self.config.vertical_center]);
				(0..self.slots.len())
					.map(|i| {
						let angle = i as f32 * 2.0 * PI / n;
						(cx + SEED_RADIUS * angle.cos(), cy + SEED_RADIUS * angle.sin())
					})
					.collect()
			}
		}
	}

	/// Drop every pin, re-seed positions and reheat the simulation.
	pub fn reset_positions(&mut self) {
		let seeds = self.seed_positions();
		for (slot, (x, y)) in self.slots.iter_mut().zip(seeds) {
			*slot = Slot { x, y, pin: None };
		}
		self.alpha = 1.0;
		self.sync_to_sim();
	}

	/// Advance the layout by `dt` seconds. Does nothing while paused or once
	/// the simulation has cooled below `alpha_min`.
	pub fn tick(&mut self, dt: f32) {
		if self.is_paused() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		if self.alpha < self.config.alpha_min {
			return;
		}

		self.sim.update(dt * self.alpha.min(1.0));
		self.sync_from_sim();
		self.apply_forces();
		self.sync_to_sim();
		self.elapsed += f64::from(dt);
	}

	fn apply_forces(&mut self) {
		let (alpha, config) = (self.alpha, &self.config);
		let mut bodies: Vec<Body> = self
			.slots
			.iter()
			.map(|slot| {
				let (x, y) = slot.position();
				Body {
					x,
					y,
					fixed: slot.pin.is_some(),
				}
			})
			.collect();

		forces::link(
			&mut bodies,
			&self.links,
			config.link_distance,
			config.link_strength,
			alpha,
		);
		if config.level_strength > 0.0 {
			let levels = &self.levels;
			forces::axis_x(
				&mut bodies,
				|idx| levels.of(idx) as f32 * config.level_spacing,
				config.level_strength,
				alpha,
			);
		}
		if config.vertical_strength > 0.0 {
			forces::axis_y(
				&mut bodies,
				config.vertical_center,
				config.vertical_strength,
				alpha,
			);
		}
		forces::collide(&mut bodies, config.collision_radius, config.collision_strength);
		if let Some([cx, cy]) = config.center {
			forces::center(&mut bodies, cx, cy);
		}

		for (slot, body) in self.slots.iter_mut().zip(bodies) {
			if slot.pin.is_none() && body.x.is_finite() && body.y.is_finite() {
				slot.x = body.x;
				slot.y = body.y;
			}
		}
	}

	fn sync_to_sim(&mut self) {
		let slots = &self.slots;
		self.sim.visit_nodes_mut(|node| {
			let slot = &slots[node.data.user_data.idx];
			let (x, y) = slot.position();
			node.data.x = x;
			node.data.y = y;
			node.data.is_anchor = slot.pin.is_some();
		});
	}

	fn sync_from_sim(&mut self) {
		let slots = &mut self.slots;
		self.sim.visit_nodes(|node| {
			let slot = &mut slots[node.data.user_data.idx];
			if slot.pin.is_none() && node.x().is_finite() && node.y().is_finite() {
				slot.x = node.x();
				slot.y = node.y();
			}
		});
	}

	fn index_of(&self, id: &str) -> Result<NodeIdx, LayoutError> {
		self.graph
			.index_of(id)
			.ok_or_else(|| LayoutError::UnknownNode(id.to_string()))
	}

	/// Fix a node at `(x, y)`; the solver no longer moves it.
	pub fn pin(&mut self, id: &str, x: f32, y: f32) -> Result<(), LayoutError> {
		let idx = self.index_of(id)?;
		self.slots[idx] = Slot {
			x,
			y,
			pin: Some((x, y)),
		};
		self.sync_to_sim();
		Ok(())
	}

	/// Hand a node back to the solver at its current position.
	pub fn unpin(&mut self, id: &str) -> Result<(), LayoutError> {
		let idx = self.index_of(id)?;
		let slot = &mut self.slots[idx];
		(slot.x, slot.y) = slot.position();
		slot.pin = None;
		self.sync_to_sim();
		Ok(())
	}

	/// Unpin every node except the one being dragged.
	pub fn release_pins(&mut self) {
		let dragged = self.drag.map(|d| d.node);
		for (idx, slot) in self.slots.iter_mut().enumerate() {
			if Some(idx) != dragged {
				(slot.x, slot.y) = slot.position();
				slot.pin = None;
			}
		}
		self.sync_to_sim();
		debug!("released all pins");
	}

	/// Start dragging `id`: pin it where it is and highlight its closure in
	/// `direction`.
	///
	/// If the highlight walk hits a cycle the drag still starts, the highlight
	/// stays empty and the cycle error is returned.
	pub fn begin_drag(&mut self, id: &str, direction: Direction) -> Result<(), LayoutError> {
		if let Some(drag) = self.drag {
			return Err(LayoutError::DragInProgress(
				self.graph.id(drag.node).to_string(),
			));
		}
		let idx = self.index_of(id)?;
		let slot = &mut self.slots[idx];
		slot.pin = Some(slot.position());
		self.drag = Some(DragState {
			node: idx,
			direction,
		});
		if self.mode == Mode::Simulated {
			self.alpha_target = self.config.drag_alpha_target;
		}
		self.sync_to_sim();
		debug!("drag start on `{id}` ({direction:?})");
		self.set_highlight(id, direction)
	}

	/// Move the dragged node, snapping to the grid while paused with snapping
	/// on. Returns false when nothing is being dragged.
	pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
		let Some(drag) = self.drag else {
			return false;
		};
		let (x, y) = if self.grid_visible() {
			self.config.grid.snap(x, y)
		} else {
			(x, y)
		};
		self.slots[drag.node] = Slot {
			x,
			y,
			pin: Some((x, y)),
		};
		self.sync_to_sim();
		true
	}

	/// Finish the drag and clear every highlight mark. While simulating the
	/// node goes back to the solver; while paused it stays pinned where it was
	/// dropped. Either way the cooling target drops back to 0. Returns the id
	/// that was dragged.
	pub fn end_drag(&mut self) -> Option<&str> {
		self.highlight.clear();
		let drag = self.drag.take()?;
		self.alpha_target = 0.0;
		if self.mode == Mode::Simulated {
			let slot = &mut self.slots[drag.node];
			(slot.x, slot.y) = slot.position();
			slot.pin = None;
			self.sync_to_sim();
		}
		let id = self.graph.id(drag.node);
		debug!("drag end on `{id}`");
		Some(id)
	}

	/// Replace the highlight with the closure of `id` in `direction`.
	pub fn set_highlight(&mut self, id: &str, direction: Direction) -> Result<(), LayoutError> {
		match collect(&self.graph, id, direction) {
			Ok(reach) => {
				self.highlight = Highlight::from_reach(&self.graph, &reach);
				Ok(())
			}
			Err(err) => {
				warn!("highlight of `{id}` aborted: {err}");
				self.highlight.clear();
				Err(err.into())
			}
		}
	}

	/// Whether `id` is part of the current highlight.
	pub fn is_highlighted(&self, id: &str) -> bool {
		self.graph
			.index_of(id)
			.is_some_and(|idx| self.highlight.has_node(idx))
	}

	/// Freeze the layout. Drags still move nodes.
	pub fn pause(&mut self) {
		if self.mode == Mode::Paused {
			return;
		}
		self.mode = Mode::Paused;
		info!("layout paused");
	}

	/// Resume simulating, reheated so the layout visibly reorganizes.
	pub fn resume(&mut self) {
		if self.mode == Mode::Simulated {
			return;
		}
		self.mode = Mode::Simulated;
		self.alpha = self.alpha.max(self.config.reheat_alpha);
		if self.drag.is_some() {
			self.alpha_target = self.config.drag_alpha_target;
		}
		info!("layout resumed (alpha {:.2})", self.alpha);
	}

	/// Pause or resume; returns the new mode.
	pub fn toggle_pause(&mut self) -> Mode {
		match self.mode {
			Mode::Simulated => self.pause(),
			Mode::Paused => self.resume(),
		}
		self.mode
	}

	/// Turn grid snapping on or off.
	pub fn set_grid_snap(&mut self, enabled: bool) {
		self.config.grid.snap = enabled;
		debug!("grid snap {}", if enabled { "on" } else { "off" });
	}

	/// Snapshot of positions, classes and highlight marks.
	pub fn frame(&self) -> Frame<'_> {
		let nodes = self
			.slots
			.iter()
			.enumerate()
			.map(|(idx, slot)| {
				let item = self.graph.item(idx);
				let (x, y) = slot.position();
				NodeFrame {
					id: item.id.as_str(),
					name: item.name.as_str(),
					x,
					y,
					class: self.classes[idx],
					level: self.levels.of(idx),
					pinned: slot.pin.is_some(),
					highlighted: self.highlight.has_node(idx),
				}
			})
			.collect();
		let edges = self
			.graph
			.edges()
			.iter()
			.map(|edge| EdgeFrame {
				source: self.graph.id(edge.ingredient),
				target: self.graph.id(edge.product),
				from: self.slots[edge.ingredient].position(),
				to: self.slots[edge.product].position(),
				highlighted: self.highlight.has_edge(edge.ingredient, edge.product),
			})
			.collect();
		Frame {
			nodes,
			edges,
			grid: self.grid_visible().then_some(self.config.grid.cell_size),
		}
	}
}
