use leptos::prelude::*;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Nothing here"</h1>
			<p>
				<a href="/">"Back to the recipe graph"</a>
			</p>
		</div>
	}
}
