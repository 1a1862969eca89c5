use depviz_core::{GraphPayload, Packaging, ProjectId, ProjectNode, RawLink};
use depviz_graph::{CollisionResolver, GraphEvent, GraphView, LayoutConfig, Rect, Selection, Vec2};

fn id(value: &str) -> ProjectId {
    ProjectId::from(value)
}

fn payload(nodes: &[(&str, &str)], links: &[(&str, &str)]) -> GraphPayload {
    GraphPayload::new(
        nodes
            .iter()
            .map(|(id, repo)| ProjectNode::new(*id, *id).with_repository(*repo))
            .collect(),
        links.iter().map(|(s, t)| RawLink::new(*s, *t)).collect(),
    )
}

fn view(nodes: &[(&str, &str)], links: &[(&str, &str)]) -> GraphView {
    GraphView::from_payload(LayoutConfig::default(), &payload(nodes, links))
}

#[test]
fn test_chain_levels_and_full_reachability() {
    let mut view = view(&[("A", "r"), ("B", "r"), ("C", "r")], &[("A", "B"), ("B", "C")]);

    assert_eq!(view.level(&id("A")), Some(0));
    assert_eq!(view.level(&id("B")), Some(1));
    assert_eq!(view.level(&id("C")), Some(2));

    assert!(view.select_node("A"));
    let scene = view.scene();
    assert_eq!(scene.visible_nodes().count(), 3);
    assert!(scene.edges.iter().all(|edge| !edge.highlight.hidden));
    assert!(!scene.repository("r").unwrap().highlight.dimmed);
}

#[test]
fn test_two_cycle_is_flattened() {
    let mut view = view(&[("A", "r"), ("B", "r")], &[("A", "B"), ("B", "A")]);

    assert_eq!(view.level(&id("A")), Some(0));
    assert_eq!(view.level(&id("B")), Some(0));

    view.select_node("B");
    let scene = view.scene();
    assert_eq!(scene.visible_nodes().count(), 2);
    assert!(scene.edges.iter().all(|edge| edge.highlight.emphasized));
}

#[test]
fn test_aggregator_is_excluded_everywhere() {
    let data = GraphPayload::new(
        vec![
            ProjectNode::new("P", "parent")
                .with_repository("r")
                .with_packaging(Packaging::Aggregator),
            ProjectNode::new("X", "x").with_repository("r"),
        ],
        vec![RawLink::new("P", "X")],
    );
    let mut view = GraphView::from_payload(LayoutConfig::default(), &data);

    assert_eq!(view.level(&id("P")), None);
    assert_eq!(view.level(&id("X")), Some(0));
    assert!(view.position(&id("P")).is_none());
    assert!(view.edges().is_empty());
    assert!(!view.select_node("P"));

    let scene = view.scene();
    assert!(scene.node(&id("P")).is_none());
    assert_eq!(scene.repository("r").unwrap().project_count, 1);
}

#[test]
fn test_drag_onto_sibling_keeps_separation() {
    let resolver = CollisionResolver::default();

    // Wide box: the push lands inside it.
    let mut wide = view(
        &[("root", "r"), ("a", "r"), ("b", "r"), ("c", "r")],
        &[("root", "a"), ("root", "b"), ("root", "c")],
    );
    let a = wide.position(&id("a")).unwrap();
    let moved = wide.drag_node(&id("b"), a).unwrap();
    assert!(!resolver.overlaps(moved, a));

    // Narrow box: the push would be clamped back onto the sibling.
    let mut narrow = view(&[("A", "r"), ("B", "r")], &[("A", "B")]);
    let a = narrow.position(&id("A")).unwrap();
    let moved = narrow.drag_node(&id("B"), a).unwrap();
    let dx = (moved.x - a.x).abs();
    let dy = (moved.y - a.y).abs();
    assert!(dx >= 155.0 || dy >= 85.0);
}

#[test]
fn test_dragged_positions_stay_inside_repository() {
    let mut view = view(
        &[("a", "r"), ("b", "r"), ("c", "s")],
        &[("a", "b"), ("b", "c")],
    );
    let size = view.config().node_size();

    for target in [
        Vec2::new(-1000.0, -1000.0),
        Vec2::new(5000.0, 20.0),
        Vec2::new(300.0, 5000.0),
    ] {
        let pos = view.drag_node(&id("a"), target).unwrap();
        let bounds = view.layout().repository("r").unwrap().bounds;
        assert!(bounds.contains_rect(&Rect::from_pos_size(pos, size)));
    }
}

#[test]
fn test_repository_selection_without_external_links() {
    let mut view = view(
        &[("a", "R"), ("b", "R"), ("c", "S"), ("d", "S")],
        &[("a", "b"), ("c", "d")],
    );

    assert!(view.select_repository("R"));
    let scene = view.scene();

    assert_eq!(scene.visible_nodes().count(), 4);
    assert!(scene.node(&id("a")).unwrap().highlight.emphasized);
    assert!(scene.node(&id("c")).unwrap().highlight.dimmed);
    assert!(scene.node(&id("d")).unwrap().highlight.dimmed);
    assert!(scene.edges[0].highlight.emphasized);
    assert!(scene.edges[1].highlight.dimmed);
    assert!(scene.repository("R").unwrap().highlight.selected);
}

#[test]
fn test_toggle_law_and_mutual_exclusion() {
    let mut view = view(&[("a", "r"), ("b", "s")], &[("a", "b")]);

    view.select_node("a");
    view.select_node("a");
    assert_eq!(view.selection(), &Selection::None);

    view.select_repository("s");
    view.select_node("a");
    assert_eq!(view.selection(), &Selection::Node(id("a")));

    view.select_repository("s");
    assert_eq!(view.selection(), &Selection::Repository("s".to_string()));
    view.select_repository("s");
    assert!(view.selection().is_none());
}

#[test]
fn test_layout_is_idempotent_across_loads() {
    let data = payload(
        &[("a", "x"), ("b", "y"), ("c", "y"), ("d", "z")],
        &[("a", "b"), ("b", "c"), ("a", "d")],
    );
    let first = GraphView::from_payload(LayoutConfig::default(), &data);
    let mut second = GraphView::default();
    second.handle(GraphEvent::Load {
        payload: data.clone(),
    });

    assert_eq!(first.positions(), second.positions());
    assert_eq!(first.layout(), second.layout());
}

#[test]
fn test_empty_payload_yields_empty_scene() {
    let mut view = GraphView::from_payload(LayoutConfig::default(), &GraphPayload::default());
    let scene = view.scene();

    assert!(scene.nodes.is_empty());
    assert!(scene.repositories.is_empty());
    assert!(scene.edges.is_empty());
    assert_eq!(scene.canvas_size, Vec2::default());
}

#[test]
fn test_analyzer_json_end_to_end() -> anyhow::Result<()> {
    let json = r#"{
        "nodes": [
            {"id": "g:parent:1", "name": "parent", "version": "1", "group": "g",
             "type": "Maven", "packaging": "pom", "nodeGroup": "platform"},
            {"id": "g:api:1", "name": "api", "version": "1", "group": "g",
             "type": "Maven", "packaging": "jar", "nodeGroup": "platform"},
            {"id": "g:web:1", "name": "web", "version": "1", "group": "g",
             "type": "Gradle", "packaging": "war", "nodeGroup": "frontend"},
            {"id": "g:tool:1", "name": "tool", "version": "1", "group": "g",
             "type": "Gradle", "packaging": "jar"}
        ],
        "links": [
            {"source": "g:parent:1", "target": "g:api:1", "value": 1},
            {"source": "g:web:1", "target": "g:api:1", "value": 1},
            {"source": "g:web:1", "target": "g:missing:1", "value": 1}
        ],
        "stats": {"totalProjects": 4, "totalDependencies": 3},
        "analysisDate": "2024-01-01T00:00:00Z",
        "issues": {
            "circularReferences": [],
            "unreferencedProjects": ["g:tool:1"],
            "duplicateArtifactIds": {},
            "duplicateGAVs": {}
        }
    }"#;
    let payload = GraphPayload::from_json_str(json)?;
    let mut view = GraphView::from_payload(LayoutConfig::default(), &payload);

    let names: Vec<String> = view.repositories().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["platform", "frontend", "default"]);
    assert_eq!(view.edges().len(), 1);
    assert_eq!(view.level(&id("g:web:1")), Some(0));
    assert_eq!(view.level(&id("g:api:1")), Some(1));

    view.handle(GraphEvent::SelectNode { id: id("g:web:1") });
    let scene = serde_json::to_value(view.scene())?;
    assert_eq!(scene["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(scene["edges"][0]["emphasized"], true);
    Ok(())
}
