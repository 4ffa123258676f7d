use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::state::CanvasState;
use crate::layout::{LayoutEngine, PointerButton};

type Shared<T> = Rc<RefCell<Option<T>>>;

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn viewport(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Keyboard shortcuts: `Space` pauses, `G` toggles grid snap, `R` releases
/// every pin.
fn on_key(state: &mut CanvasState, ev: &KeyboardEvent) {
	match ev.key().as_str() {
		" " => {
			ev.prevent_default();
			let mode = state.engine.on_toggle_pause();
			info!("layout {mode:?}");
		}
		"g" | "G" => {
			let enabled = !state.engine.config().grid.snap;
			state.engine.on_toggle_grid_snap(enabled);
		}
		"r" | "R" => state.engine.release_pins(),
		_ => {}
	}
}

#[component]
pub fn RecipeGraphCanvas(
	engine: LayoutEngine,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let pending = Rc::new(RefCell::new(Some(engine)));
	let state: Shared<CanvasState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let key_cb: Shared<Closure<dyn FnMut(KeyboardEvent)>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init, key_cb_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		key_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(engine) = pending.borrow_mut().take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("canvas has no 2d context");
				return;
			}
		};
		*state_init.borrow_mut() = Some(CanvasState::new(engine, w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let state_key = state_init.clone();
		*key_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(ref mut s) = *state_key.borrow_mut() {
				on_key(s, &ev);
			}
		}));
		if let Some(ref cb) = *key_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let button = PointerButton::from_dom(ev.button());
			match (s.node_at_position(x, y), button) {
				(Some(id), Some(button)) => {
					if let Err(err) = s.engine.on_pointer_down_on_node(&id, button) {
						warn!("{err}");
					}
				}
				(None, Some(PointerButton::Primary)) => s.begin_pan(x, y),
				_ => {}
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let (gx, gy) = s.screen_to_graph(x, y);
			if !s.engine.on_pointer_move(gx, gy) {
				s.pan_to(x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.engine.on_pointer_up();
			s.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.engine.on_pointer_up();
			s.end_pan();
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let link = state_dc.borrow().as_ref().and_then(|s| {
			let id = s.node_at_position(x, y)?;
			s.engine.on_activate_node(&id)
		});
		if let (Some(link), Some(win)) = (link, web_sys::window()) {
			info!("opening wiki page for `{}`", link.node_id);
			let _ = win.open_with_url_and_target(&link.url, "_blank");
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y() <= 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="recipe-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			on:contextmenu=|ev: MouseEvent| ev.prevent_default()
			style="display: block; cursor: grab;"
		/>
	}
}
