use serde_json::json;
use std::time::Instant;
use vlab_core::{ChartPoll, Panel, PanelConfig, Point, Scalar, Widget};

fn panel(document: serde_json::Value) -> Panel {
    Panel::from_config(PanelConfig::from_value(document).expect("valid document"))
}

#[test]
fn empty_widgets_without_chart_builds_nothing() {
    let panel = panel(json!({"widgets": []}));
    assert!(panel.registry().is_empty());
    assert!(panel.arena().is_empty());
    assert!(panel.chart().is_none());
}

#[test]
fn single_button_document_end_to_end() {
    let mut panel = panel(json!({
        "widgets": [{"type": "button", "text": "Go", "row": 0, "column": 0, "padx": 1, "pady": 1}]
    }));
    assert_eq!(panel.registry().len(), 1);
    let handle = panel.registry().get("button").expect("fallback name");
    panel.click(handle);
    panel.click(handle);
    match &panel.widget("button").unwrap().widget {
        Widget::Button(button) => assert_eq!(button.clicks(), 2),
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn named_knob_is_reachable_for_pointer_events() {
    let mut panel = panel(json!({
        "widgets": [{"type": "frame", "children": [
            {"type": "knob", "name": "gain", "numbers": 8}
        ]}]
    }));
    let knob = panel.knob_mut("gain").expect("knob registered");
    assert_eq!(knob.labels().len(), 8);
    knob.pointer_down(Point::new(250.0, 150.0));
    knob.pointer_move(Point::new(150.0, 250.0));
    knob.pointer_up();
    assert!((panel.knob_mut("gain").unwrap().value() - 90.0).abs() < 1e-9);
    assert!(panel.knob_mut("frame").is_none());
}

#[test]
fn radio_buttons_share_their_variable() {
    let mut panel = panel(json!({
        "widgets": [
            {"type": "radio_button", "name": "low", "text": "Low", "variable": "mode", "value": 1},
            {"type": "radio_button", "name": "high", "text": "High", "variable": "mode", "value": 2}
        ]
    }));
    let (_, groups) = panel.widgets_mut();
    groups.select("mode", Scalar::Number(2.0));
    assert!(panel
        .radio_groups()
        .is_selected("mode", &Scalar::Number(2.0)));
}

#[test]
fn chart_runs_until_shutdown() {
    let mut panel = panel(json!({
        "widgets": [],
        "figure": {"figsize": [4, 3], "dpi": 50},
        "axes": {"xlim": [0, 10], "ylim": [-1, 1]}
    }));
    let now = Instant::now();
    let chart = panel.chart_mut().expect("chart enabled");
    assert!(matches!(chart.poll(now), ChartPoll::Ticked { redraw: true, .. }));
    assert_eq!(chart.state().series().len(), 50);

    panel.shutdown();
    let chart = panel.chart_mut().unwrap();
    assert_eq!(chart.poll(now), ChartPoll::Cancelled);
}
