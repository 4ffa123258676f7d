use crate::layout::{LayoutEngine, LayoutVariant};

/// Left margin keeping level 0 clear of the canvas edge.
const LEVELED_MARGIN: f64 = 80.0;
/// Zoom limits.
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 5.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Canvas-side view of a running layout: zoom/pan and viewport size.
pub struct CanvasState {
	pub engine: LayoutEngine,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(engine: LayoutEngine, width: f64, height: f64) -> Self {
		let x = match engine.config().variant {
			LayoutVariant::Free => 0.0,
			LayoutVariant::Leveled => LEVELED_MARGIN,
		};
		Self {
			engine,
			transform: ViewTransform { x, y: 0.0, k: 1.0 },
			pan: PanState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f32, f32) {
		(
			((sx - self.transform.x) / self.transform.k) as f32,
			((sy - self.transform.y) / self.transform.k) as f32,
		)
	}

	/// Id of the node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.engine.node_at(gx, gy).map(str::to_string)
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom around a screen point, keeping it fixed under the pointer.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.engine.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::LayoutConfig;
	use crate::recipe::{Item, RecipeGraph};

	fn state() -> CanvasState {
		let graph = RecipeGraph::build([
			Item::raw("ore", "Ore"),
			Item::crafted("plate", "Plate", ["ore"]),
		]);
		let engine = LayoutEngine::new(graph, LayoutConfig::free(800.0, 600.0)).unwrap();
		CanvasState::new(engine, 800.0, 600.0)
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let mut state = state();
		let before = state.screen_to_graph(300.0, 200.0);
		state.zoom_at(300.0, 200.0, true);
		let after = state.screen_to_graph(300.0, 200.0);
		assert!((before.0 - after.0).abs() < 1e-3);
		assert!((before.1 - after.1).abs() < 1e-3);
		assert!(state.transform.k > 1.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = state();
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, true);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			state.zoom_at(0.0, 0.0, false);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn hit_test_goes_through_transform() {
		let mut state = state();
		state.engine.pin("ore", 100.0, 100.0).unwrap();
		state.engine.pin("plate", 300.0, 300.0).unwrap();
		state.begin_pan(0.0, 0.0);
		state.pan_to(50.0, 0.0);
		state.end_pan();
		assert_eq!(state.node_at_position(150.0, 100.0).as_deref(), Some("ore"));
		assert_eq!(state.node_at_position(100.0, 100.0), None);
	}
}
