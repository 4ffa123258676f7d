//! Layout tuning knobs, with presets for the free and leveled views.

use force_graph::SimulationParameters;
use serde::{Deserialize, Serialize};

use crate::recipe::RawPolicy;

/// Converts a d3-style charge strength into the physics crate's charge.
const CHARGE_SCALE: f32 = 0.15;

/// Which arrangement the engine aims for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
	/// Free force layout pulled toward a focal point.
	#[default]
	Free,
	/// Nodes held in columns by level.
	Leveled,
}

/// Grid used for snapping while paused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
	/// Edge length of one grid cell in graph units.
	pub cell_size: f32,
	/// Snap dragged nodes to the grid while paused.
	pub snap: bool,
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			cell_size: 50.0,
			snap: false,
		}
	}
}

impl GridConfig {
	/// Round a coordinate pair to the nearest grid intersection.
	pub fn snap(&self, x: f32, y: f32) -> (f32, f32) {
		if self.cell_size <= 0.0 {
			return (x, y);
		}
		let c = self.cell_size;
		((x / c).round() * c, (y / c).round() * c)
	}
}

/// Every tunable of the layout engine. Missing fields deserialize to the
/// defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Arrangement to aim for.
	pub variant: LayoutVariant,
	/// Drawn node radius in graph units.
	pub node_radius: f32,
	/// Pointer hit radius in graph units.
	pub hit_radius: f32,

	/// Pairwise charge; negative repels.
	pub charge_strength: f32,
	/// Spring constant handed to the physics crate.
	pub spring_strength: f32,
	/// Rest length of an edge.
	pub link_distance: f32,
	/// How hard links pull toward their rest length, 0 to 1.
	pub link_strength: f32,
	/// Minimum distance between node centres.
	pub collision_radius: f32,
	/// Fraction of an overlap resolved per tick.
	pub collision_strength: f32,
	/// Focal point; `None` disables centring.
	pub center: Option<[f32; 2]>,

	/// Horizontal distance between level columns.
	pub level_spacing: f32,
	/// Pull toward the level column; 0 disables.
	pub level_strength: f32,
	/// Vertical spacing between nodes sharing a column in the seeded layout.
	pub row_spacing: f32,
	/// Vertical focus line.
	pub vertical_center: f32,
	/// Pull toward `vertical_center`; 0 disables.
	pub vertical_strength: f32,

	/// Cap on the force the physics crate applies to one node.
	pub max_force: f32,
	/// Velocity scale of the physics step.
	pub node_speed: f32,
	/// Velocity kept per physics step, 0 to 1.
	pub damping: f32,
	/// Mass of every node.
	pub node_mass: f32,

	/// Fraction of the gap to the alpha target closed per tick.
	pub alpha_decay: f32,
	/// The simulation stops once alpha cools below this.
	pub alpha_min: f32,
	/// Alpha after resuming from pause.
	pub reheat_alpha: f32,
	/// Alpha target while a node is dragged.
	pub drag_alpha_target: f32,

	/// Snapping grid.
	pub grid: GridConfig,
	/// How nodes with only dangling ingredients are classified.
	pub raw_policy: RawPolicy,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			variant: LayoutVariant::Free,
			node_radius: 10.0,
			hit_radius: 14.0,
			charge_strength: -1000.0,
			spring_strength: 0.05,
			link_distance: 500.0,
			link_strength: 0.1,
			collision_radius: 20.0,
			collision_strength: 1.0,
			center: Some([0.0, 0.0]),
			level_spacing: 200.0,
			level_strength: 0.0,
			row_spacing: 60.0,
			vertical_center: 0.0,
			vertical_strength: 0.0,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			node_mass: 10.0,
			// d3 defaults: alpha cools from 1 to 0.001 over ~300 ticks
			alpha_decay: 1.0 - 0.001f32.powf(1.0 / 300.0),
			alpha_min: 0.001,
			reheat_alpha: 0.3,
			drag_alpha_target: 0.3,
			grid: GridConfig::default(),
			raw_policy: RawPolicy::Listed,
		}
	}
}

impl LayoutConfig {
	/// Free layout centred in a `width` x `height` viewport.
	pub fn free(width: f32, height: f32) -> Self {
		Self {
			center: Some([width / 2.0, height / 2.0]),
			vertical_center: height / 2.0,
			..Self::default()
		}
	}

	/// Leveled layout: columns by level, gently centred vertically.
	pub fn leveled(height: f32) -> Self {
		Self {
			variant: LayoutVariant::Leveled,
			node_radius: 12.0,
			hit_radius: 16.0,
			charge_strength: -200.0,
			link_distance: 50.0,
			collision_radius: 30.0,
			center: None,
			level_spacing: 200.0,
			level_strength: 1.0,
			vertical_center: height / 2.0,
			vertical_strength: 0.05,
			..Self::default()
		}
	}

	/// The preset for `variant` sized to a `width` x `height` viewport.
	pub fn for_variant(variant: LayoutVariant, width: f32, height: f32) -> Self {
		match variant {
			LayoutVariant::Free => Self::free(width, height),
			LayoutVariant::Leveled => Self::leveled(height),
		}
	}

	/// Builder-style toggle for grid snapping.
	pub fn with_grid_snap(mut self, snap: bool) -> Self {
		self.grid.snap = snap;
		self
	}

	pub(crate) fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: -self.charge_strength * CHARGE_SCALE,
			force_spring: self.spring_strength,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snaps_to_nearest_cell() {
		let grid = GridConfig {
			cell_size: 50.0,
			snap: true,
		};
		assert_eq!(grid.snap(123.0, 77.0), (100.0, 100.0));
		assert_eq!(grid.snap(-26.0, 24.0), (-50.0, 0.0));
	}

	#[test]
	fn zero_cell_leaves_coordinates() {
		let grid = GridConfig {
			cell_size: 0.0,
			snap: true,
		};
		assert_eq!(grid.snap(1.5, 2.5), (1.5, 2.5));
	}

	#[test]
	fn presets_match_views() {
		let free = LayoutConfig::free(800.0, 600.0);
		assert_eq!(free.center, Some([400.0, 300.0]));
		assert_eq!(free.collision_radius, 2.0 * free.node_radius);

		let tree = LayoutConfig::leveled(600.0);
		assert_eq!(tree.variant, LayoutVariant::Leveled);
		assert_eq!(tree.center, None);
		assert_eq!(tree.vertical_center, 300.0);
		assert_eq!(tree.level_strength, 1.0);
	}

	#[test]
	fn repulsive_charge_is_positive_for_physics() {
		let params = LayoutConfig::default().simulation_parameters();
		assert!((params.force_charge - 150.0).abs() < 1e-3);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config: LayoutConfig =
			serde_json::from_str(r#"{"variant": "leveled", "grid": {"snap": true}}"#).unwrap();
		assert_eq!(config.variant, LayoutVariant::Leveled);
		assert!(config.grid.snap);
		assert_eq!(config.grid.cell_size, 50.0);
		assert_eq!(config.link_distance, 500.0);
	}
}
