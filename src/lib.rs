//! Leptos client-side app for exploring crafting recipes as a dependency graph.
//!
//! [`recipe`] builds the graph, classifies and levels its nodes and walks
//! closures; [`layout`] places the nodes and handles drag, pin, pause and grid
//! snap. The canvas component and pages on top are thin wiring.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod layout;
pub mod recipe;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::tree::Tree;

pub use layout::{LayoutConfig, LayoutEngine, LayoutVariant};
pub use recipe::{Item, RecipeGraph};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the free graph at `/`, the leveled tree at `/tree` and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Recipe Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/tree") view=Tree />
			</Routes>
		</Router>
	}
}
