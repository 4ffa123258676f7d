use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::layout::{Frame, LayoutVariant, NodeFrame};
use crate::recipe::Classification;

const BACKGROUND: &str = "#1a1a2e";
const LINK: &str = "#555";
const LINK_HIGHLIGHT: &str = "#ffd54f";
const GRID: &str = "rgba(255, 255, 255, 0.08)";

const ORANGE: &str = "#ff9800";
const GREEN: &str = "#4caf50";
const BLUE: &str = "#2196f3";

fn class_color(class: Classification) -> &'static str {
	match class {
		Classification::Leaf => ORANGE,
		Classification::Raw => GREEN,
		Classification::Intermediate => BLUE,
	}
}

/// The free view colours by class; the leveled view only tells level 0
/// apart from everything crafted on top of it.
fn node_color(node: &NodeFrame<'_>, variant: LayoutVariant) -> &'static str {
	match variant {
		LayoutVariant::Free => class_color(node.class),
		LayoutVariant::Leveled if node.level == 0 => ORANGE,
		LayoutVariant::Leveled => BLUE,
	}
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let frame = state.engine.frame();
	let radius = f64::from(state.engine.config().node_radius);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	if let Some(cell) = frame.grid {
		draw_grid(state, ctx, f64::from(cell));
	}
	draw_edges(&frame, ctx, state.transform.k, radius);
	draw_nodes(&frame, state.engine.config().variant, ctx, state.transform.k, radius);
	ctx.restore();

	if state.engine.is_paused() {
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text("paused", 12.0, state.height - 12.0);
	}
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d, cell: f64) {
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let (x0, y0, x1, y1) = (f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1));

	ctx.set_stroke_style_str(GRID);
	ctx.set_line_width(1.0 / state.transform.k);
	ctx.begin_path();
	let mut x = (x0 / cell).floor() * cell;
	while x <= x1 {
		ctx.move_to(x, y0);
		ctx.line_to(x, y1);
		x += cell;
	}
	let mut y = (y0 / cell).floor() * cell;
	while y <= y1 {
		ctx.move_to(x0, y);
		ctx.line_to(x1, y);
		y += cell;
	}
	ctx.stroke();
}

fn draw_edges(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d, k: f64, radius: f64) {
	let dimmed = frame.has_highlight();
	let arrow_size = 8.0 / k;

	// highlighted edges last so they sit on top
	let ordered = frame
		.edges
		.iter()
		.filter(|e| !e.highlighted)
		.chain(frame.edges.iter().filter(|e| e.highlighted));
	for edge in ordered {
		let (x1, y1) = (f64::from(edge.from.0), f64::from(edge.from.1));
		let (x2, y2) = (f64::from(edge.to.0), f64::from(edge.to.1));
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let (color, alpha, width) = match (edge.highlighted, dimmed) {
			(true, _) => (LINK_HIGHLIGHT, 1.0, 2.5 / k),
			(false, true) => (LINK, 0.25, 1.0 / k),
			(false, false) => (LINK, 0.9, 1.5 / k),
		};
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(width);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(x2 - ux * (radius + arrow_size), y2 - uy * (radius + arrow_size));
		ctx.stroke();

		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(
	frame: &Frame<'_>,
	variant: LayoutVariant,
	ctx: &CanvasRenderingContext2d,
	k: f64,
	radius: f64,
) {
	let dimmed = frame.has_highlight();
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	for node in &frame.nodes {
		let alpha = if dimmed && !node.highlighted { 0.3 } else { 1.0 };
		ctx.set_global_alpha(alpha);
		draw_node(node, node_color(node, variant), ctx, k, radius);

		ctx.set_fill_style_str("white");
		ctx.set_font(&font);
		let (x, y) = (f64::from(node.x), f64::from(node.y));
		let _ = ctx.fill_text(node.name, x + radius + 5.0, y + 4.0);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(
	node: &NodeFrame<'_>,
	color: &str,
	ctx: &CanvasRenderingContext2d,
	k: f64,
	radius: f64,
) {
	let (x, y) = (f64::from(node.x), f64::from(node.y));
	let r = if node.highlighted { radius * 1.2 } else { radius };

	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();

	if node.highlighted {
		ctx.set_stroke_style_str(LINK_HIGHLIGHT);
		ctx.set_line_width(2.0 / k);
		ctx.stroke();
	}

	if node.pinned {
		let dash = 3.0 / k;
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(dash),
		));
		ctx.begin_path();
		let _ = ctx.arc(x, y, r + 4.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
		ctx.set_line_width(1.0 / k);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}
