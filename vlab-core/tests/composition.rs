use serde_json::{json, Value};
use vlab_core::{build, Container, NodeError, Widget, WidgetArena, WidgetKind};

fn compose(tree: Value) -> (WidgetArena, vlab_core::Composition) {
    let mut arena = WidgetArena::new();
    let tree = tree.as_array().cloned().unwrap_or_default();
    let composition = build(&tree, Container::Root, &mut arena);
    (arena, composition)
}

fn nested_frames(depth: usize) -> Value {
    let mut node = json!({"type": "checkbox", "text": "leaf", "name": "leaf"});
    for level in (0..depth).rev() {
        node = json!({
            "type": "frame",
            "name": format!("frame_{level}"),
            "children": [node],
        });
    }
    json!([node])
}

#[test]
fn single_button_registers_under_fallback_name() {
    let (arena, composition) = compose(json!([
        {"type": "button", "text": "Go", "row": 0, "column": 0, "padx": 1, "pady": 1}
    ]));
    assert_eq!(composition.registry.len(), 1);
    let handle = composition.registry.get("button").expect("button registered");
    let node = arena.get(handle).unwrap();
    assert_eq!(node.widget.kind(), WidgetKind::Button);
    assert_eq!(node.layout.padding.horizontal.before, 1.0);
    assert!(composition.report.is_clean());
}

#[test]
fn empty_tree_is_a_no_op() {
    let (arena, composition) = compose(json!([]));
    assert!(arena.is_empty());
    assert!(composition.registry.is_empty());
    assert!(composition.report.is_clean());
}

#[test]
fn every_kind_has_a_distinct_fallback_name() {
    let (_, composition) = compose(json!([
        {"type": "button", "text": "a"},
        {"type": "switch", "text": "b"},
        {"type": "radio_button", "text": "c", "variable": "v", "value": 1},
        {"type": "frame"},
        {"type": "checkbox", "text": "d"},
        {"type": "progress_bar"},
        {"type": "slider", "from": 0, "to": 10, "number_of_steps": 5},
        {"type": "knob"}
    ]));
    assert_eq!(composition.report.built, WidgetKind::ALL.len());
    for kind in WidgetKind::ALL {
        assert!(
            composition.registry.contains(kind.fallback_name()),
            "missing {kind}"
        );
    }
    assert!(composition.registry.contains("rotating_knob"));
}

#[test]
fn failing_nodes_do_not_abort_siblings() {
    let (_, composition) = compose(json!([
        {"type": "button", "name": "ok_1", "text": "one"},
        {"type": "button", "name": "no_text"},
        {"type": "hologram", "name": "unknown"},
        {"type": "slider", "name": "bad_slider", "from": 0, "to": 1},
        {"type": "switch", "name": "ok_2", "text": "two"}
    ]));
    assert_eq!(composition.registry.len(), 2);
    assert!(composition.registry.contains("ok_1"));
    assert!(composition.registry.contains("ok_2"));

    let failures = &composition.report.failures;
    assert_eq!(failures.len(), 3);
    assert_eq!(failures[0].path, "widgets[1]");
    assert_eq!(
        failures[0].error,
        NodeError::MissingField {
            kind: WidgetKind::Button,
            field: "text"
        }
    );
    assert_eq!(failures[1].error, NodeError::UnknownType("hologram".into()));
    assert_eq!(
        failures[2].error,
        NodeError::MissingField {
            kind: WidgetKind::Slider,
            field: "number_of_steps"
        }
    );
}

#[test]
fn failed_frame_skips_its_subtree() {
    let (arena, composition) = compose(json!([
        {"type": "frame", "name": "broken", "row": "top", "children": [
            {"type": "button", "name": "hidden", "text": "x"}
        ]},
        {"type": "button", "name": "visible", "text": "y"}
    ]));
    assert_eq!(arena.len(), 1);
    assert!(!composition.registry.contains("hidden"));
    assert!(composition.registry.contains("visible"));
    assert_eq!(composition.report.failures[0].path, "widgets[0]");
}

#[test]
fn deep_nesting_registers_all_descendants_in_pre_order() {
    let depth = 64;
    let (arena, composition) = compose(nested_frames(depth));
    assert_eq!(composition.registry.len(), depth + 1);

    let order: Vec<&str> = composition
        .registry
        .registrations()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    let mut expected: Vec<String> = (0..depth).map(|l| format!("frame_{l}")).collect();
    expected.push("leaf".into());
    assert_eq!(order, expected);

    let leaf = arena.get(composition.registry.get("leaf").unwrap()).unwrap();
    let parent = composition.registry.get(&format!("frame_{}", depth - 1)).unwrap();
    assert_eq!(leaf.parent, Container::Frame(parent));
}

#[test]
fn siblings_after_a_frame_follow_its_children() {
    let (_, composition) = compose(json!([
        {"type": "frame", "name": "outer", "children": [
            {"type": "switch", "name": "inner_a", "text": "a"},
            {"type": "frame", "name": "inner_frame", "children": [
                {"type": "checkbox", "name": "deepest", "text": "d"}
            ]},
            {"type": "switch", "name": "inner_b", "text": "b"}
        ]},
        {"type": "button", "name": "after", "text": "z"}
    ]));
    let order: Vec<&str> = composition
        .registry
        .registrations()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(
        order,
        ["outer", "inner_a", "inner_frame", "deepest", "inner_b", "after"]
    );
}

#[test]
fn frame_without_children_is_empty_not_an_error() {
    let (arena, composition) = compose(json!([{"type": "frame", "bg": "blue"}]));
    assert!(composition.report.is_clean());
    let frame = composition.registry.get("frame").unwrap();
    assert!(arena.placed_in(Container::Frame(frame)).is_empty());
}

#[test]
fn duplicate_names_last_registration_wins() {
    let (arena, composition) = compose(json!([
        {"type": "button", "name": "dup", "text": "first"},
        {"type": "button", "name": "dup", "text": "second"}
    ]));
    assert_eq!(arena.len(), 2);
    assert_eq!(composition.registry.len(), 1);
    assert_eq!(composition.registry.registrations().len(), 2);
    let node = arena.get(composition.registry.get("dup").unwrap()).unwrap();
    match &node.widget {
        Widget::Button(button) => assert_eq!(button.text, "second"),
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn legacy_type_tags_still_build() {
    let (_, composition) = compose(json!([
        {"type": "CTkSwitch", "text": "Power"},
        {"type": "CTkProgressBar"},
        {"type": "CTkSlider", "from": 0, "to": 100, "number_of_steps": 10},
        {"type": "RotatingKnobWithNumbers", "numbers": 12}
    ]));
    assert_eq!(composition.report.built, 4);
    assert!(composition.registry.contains("rotating_knob"));
}

#[test]
fn layout_is_applied_to_every_kind() {
    let (arena, _) = compose(json!([
        {"type": "knob", "row": 4, "column": 3, "padx": [10, 0], "pady": [10, 0]}
    ]));
    let node = arena.iter().next().unwrap();
    assert_eq!((node.layout.row, node.layout.column), (4, 3));
    assert_eq!(node.layout.padding.horizontal.before, 10.0);
    assert_eq!(node.layout.padding.vertical.after, 0.0);
}

#[test]
fn placed_in_orders_by_grid_cell() {
    let (arena, composition) = compose(json!([
        {"type": "switch", "name": "b", "text": "b", "row": 1, "column": 0},
        {"type": "switch", "name": "a", "text": "a", "row": 0, "column": 2},
        {"type": "switch", "name": "c", "text": "c", "row": 0, "column": 1}
    ]));
    let names: Vec<&str> = arena
        .placed_in(Container::Root)
        .into_iter()
        .map(|h| arena.get(h).unwrap().name.as_str())
        .collect();
    assert_eq!(names, ["c", "a", "b"]);
    assert_eq!(composition.registry.len(), 3);
}

#[test]
fn invalid_field_types_are_node_local() {
    let (_, composition) = compose(json!([
        {"type": "knob", "numbers": 0},
        {"type": "radio_button", "text": "r", "variable": "v", "value": [1]},
        {"type": "slider", "from": 3, "to": 3, "number_of_steps": 2},
        {"type": "progress_bar", "width": -5},
        "not an object",
        {"text": "no type"}
    ]));
    assert_eq!(composition.report.built, 0);
    assert_eq!(composition.report.failures.len(), 6);
    assert_eq!(composition.report.failures[4].error, NodeError::NotAnObject);
    assert_eq!(composition.report.failures[5].error, NodeError::MissingType);
}

#[test]
fn slider_with_overflowing_range_is_rejected() {
    let (arena, composition) = compose(json!([
        {"type": "slider", "from": -1e308, "to": 1e308, "number_of_steps": 4},
        {"type": "slider", "from": 0, "to": 100, "number_of_steps": 4}
    ]));
    assert_eq!(composition.report.built, 1);
    assert_eq!(composition.report.failures.len(), 1);
    assert_eq!(composition.report.failures[0].path, "widgets[0]");
    assert!(matches!(
        composition.report.failures[0].error,
        NodeError::InvalidField { field: "to", .. }
    ));
    let handle = composition.registry.get("slider").expect("valid slider built");
    match &arena.get(handle).unwrap().widget {
        Widget::Slider(slider) => assert!(slider.value().is_finite()),
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn non_string_name_falls_back_to_the_kind_name() {
    let (_, composition) = compose(json!([
        {"type": "checkbox", "text": "Enable", "name": 7},
        {"type": "knob", "name": null}
    ]));
    assert!(composition.report.is_clean());
    assert!(composition.registry.contains("checkbox"));
    assert!(composition.registry.contains("rotating_knob"));
}
