use leptos::prelude::*;

use crate::components::force_graph::RecipeGraphCanvas;
use crate::layout::{LayoutConfig, LayoutEngine, LayoutError, LayoutVariant};
use crate::recipe::{LoadError, RecipeGraph, parse_items};

/// Recipe records bundled with the app.
const RECIPES: &str = include_str!("../../data/recipes.json");

/// Why a page could not show a graph.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
	#[error(transparent)]
	Load(#[from] LoadError),
	#[error(transparent)]
	Layout(#[from] LayoutError),
}

/// Parse `json` and lay it out for a `width` x `height` viewport. Any failure
/// is fatal: no partial graph is shown.
pub fn load_engine(
	json: &str,
	variant: LayoutVariant,
	width: f64,
	height: f64,
) -> Result<LayoutEngine, PageError> {
	let items = parse_items(json)?;
	let config = LayoutConfig::for_variant(variant, width as f32, height as f32);
	Ok(LayoutEngine::new(RecipeGraph::build(items), config)?)
}

fn viewport() -> (f64, f64) {
	web_sys::window()
		.and_then(|w| Some((w.inner_width().ok()?.as_f64()?, w.inner_height().ok()?.as_f64()?)))
		.unwrap_or((800.0, 600.0))
}

/// Fullscreen graph of the bundled recipes, with errors reported in place.
#[component]
pub fn RecipePage(
	variant: LayoutVariant,
	title: &'static str,
	subtitle: &'static str,
) -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{move || {
					let (w, h) = viewport();
					load_engine(RECIPES, variant, w, h)
						.map(|engine| view! { <RecipeGraphCanvas engine=engine fullscreen=true /> })
				}}
				<div class="graph-overlay">
					<h1>{title}</h1>
					<p class="subtitle">{subtitle}</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

/// Default Home Page: free force layout.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<RecipePage
			variant=LayoutVariant::Free
			title="Recipe Graph"
			subtitle=concat!(
				"Left drag: ingredients. Right drag: products. ",
				"Space: pause. G: grid snap. Double click: wiki.",
			)
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_recipes_lay_out_in_both_views() {
		let free = load_engine(RECIPES, LayoutVariant::Free, 800.0, 600.0).unwrap();
		assert!(free.graph().node_count() > 0);
		let tree = load_engine(RECIPES, LayoutVariant::Leveled, 800.0, 600.0).unwrap();
		assert!(tree.levels().max_level() > 0);
	}

	#[test]
	fn load_failures_are_fatal() {
		assert!(matches!(
			load_engine("not json", LayoutVariant::Free, 800.0, 600.0),
			Err(PageError::Load(LoadError::Parse(_)))
		));
		let cyclic = r#"[{"id": "a", "name": "A", "recipe": {"ingredients": [{"id": "a"}]}}]"#;
		assert!(matches!(
			load_engine(cyclic, LayoutVariant::Leveled, 800.0, 600.0),
			Err(PageError::Layout(_))
		));
	}
}
