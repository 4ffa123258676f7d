use recipe_graph::layout::{LayoutConfig, LayoutEngine, Mode, PointerButton};
use recipe_graph::recipe::{
	Classification, Direction, GraphError, Item, RawPolicy, RecipeGraph, Visit, assign_levels,
	classify, parse_items, upstream,
};

const CHAIN: &str = r#"[
	{"id": "A", "name": "A"},
	{"id": "B", "name": "B", "recipe": {"ingredients": []}},
	{"id": "C", "name": "C", "recipe": {"ingredients": [{"id": "A"}, {"id": "B"}]}},
	{"id": "D", "name": "D", "recipe": {"ingredients": [{"id": "C"}]}}
]"#;

fn chain() -> RecipeGraph {
	RecipeGraph::build(parse_items(CHAIN).unwrap())
}

#[test]
fn chain_levels_and_classes() {
	let graph = chain();
	let levels = assign_levels(&graph).unwrap();
	let expected = [("A", 0), ("B", 0), ("C", 1), ("D", 2)];
	for (id, level) in expected {
		assert_eq!(levels.get(&graph, id), Some(level), "level of {id}");
	}

	let classes = classify(&graph, RawPolicy::default());
	assert_eq!(
		classes,
		vec![
			Classification::Raw,
			Classification::Raw,
			Classification::Intermediate,
			Classification::Leaf,
		]
	);
}

#[test]
fn levels_increase_along_every_edge_and_are_stable() {
	let items = parse_items(include_str!("../data/recipes.json")).unwrap();
	let graph = RecipeGraph::build(items);
	let levels = assign_levels(&graph).unwrap();
	for edge in graph.edges() {
		assert!(
			levels.of(edge.ingredient) < levels.of(edge.product),
			"{} -> {}",
			graph.id(edge.ingredient),
			graph.id(edge.product)
		);
	}
	assert_eq!(assign_levels(&graph).unwrap(), levels);

	// every node gets exactly one class
	assert_eq!(classify(&graph, RawPolicy::Listed).len(), graph.node_count());
}

#[test]
fn dangling_reference_is_dropped() {
	let graph = RecipeGraph::build([Item::crafted("E", "E", ["X"])]);
	assert_eq!(graph.edge_count(), 0);
	assert_eq!(assign_levels(&graph).unwrap().as_slice(), &[0]);
	// never consumed, so leaf wins whatever the raw policy says
	assert_eq!(classify(&graph, RawPolicy::Listed), vec![Classification::Leaf]);
	assert_eq!(classify(&graph, RawPolicy::Resolved), vec![Classification::Leaf]);
}

#[test]
fn upstream_walk_reaches_every_ingredient() {
	let graph = chain();
	let mut nodes = Vec::new();
	upstream(&graph, "D", |step| {
		if let Visit::Node(id) = step {
			nodes.push(id);
		}
	})
	.unwrap();
	assert_eq!(nodes, vec!["D", "C", "A", "B"]);
}

#[test]
fn drag_highlights_upstream_and_release_clears() {
	let mut engine = LayoutEngine::new(chain(), LayoutConfig::free(800.0, 600.0)).unwrap();
	engine
		.on_pointer_down_on_node("C", PointerButton::Primary)
		.unwrap();
	assert_eq!(engine.drag_direction(), Some(Direction::Upstream));

	engine.on_pointer_move(250.0, 250.0);
	engine.tick(0.016);

	let frame = engine.frame();
	let lit: Vec<_> = frame
		.nodes
		.iter()
		.filter(|n| n.highlighted)
		.map(|n| n.id)
		.collect();
	assert_eq!(lit, vec!["A", "B", "C"]);
	let lit_edges: Vec<_> = frame
		.edges
		.iter()
		.filter(|e| e.highlighted)
		.map(|e| (e.source, e.target))
		.collect();
	assert_eq!(lit_edges, vec![("A", "C"), ("B", "C")]);
	assert_eq!(frame.node("C").map(|n| (n.x, n.y)), Some((250.0, 250.0)));

	engine.on_pointer_up();
	let frame = engine.frame();
	assert!(!frame.has_highlight());
	assert!(!frame.node("C").unwrap().pinned);
}

#[test]
fn paused_drag_snaps_to_grid() {
	let mut engine = LayoutEngine::new(chain(), LayoutConfig::free(800.0, 600.0)).unwrap();
	assert_eq!(engine.on_toggle_pause(), Mode::Paused);
	assert!(engine.on_toggle_grid_snap(true));

	engine
		.on_pointer_down_on_node("C", PointerButton::Secondary)
		.unwrap();
	engine.on_pointer_move(123.0, 77.0);
	assert_eq!(engine.position("C"), Some((100.0, 100.0)));

	engine.on_pointer_up();
	engine.tick(0.016);
	assert_eq!(engine.position("C"), Some((100.0, 100.0)));
	assert_eq!(engine.frame().grid, Some(50.0));
}

#[test]
fn cycles_are_reported_not_followed() {
	let graph = RecipeGraph::build([
		Item::raw("ore", "Ore"),
		Item::crafted("x", "X", ["ore", "z"]),
		Item::crafted("y", "Y", ["x"]),
		Item::crafted("z", "Z", ["y"]),
	]);
	let Err(GraphError::CycleDetected { node }) = assign_levels(&graph) else {
		panic!("expected a cycle");
	};
	assert!(["x", "y", "z"].contains(&node.as_str()));
	assert!(matches!(
		upstream(&graph, "y", |_| {}),
		Err(GraphError::CycleDetected { .. })
	));
}
