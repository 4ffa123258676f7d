use leptos::prelude::*;

use super::home::RecipePage;
use crate::layout::LayoutVariant;

/// Leveled view: raw materials on the left, each column one crafting step further.
#[component]
pub fn Tree() -> impl IntoView {
	view! {
		<RecipePage
			variant=LayoutVariant::Leveled
			title="Recipe Tree"
			subtitle=concat!(
				"Columns are crafting depth. ",
				"Left drag: ingredients. Right drag: products. Space: pause.",
			)
		/>
	}
}
