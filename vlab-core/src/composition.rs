use crate::error::NodeError;
use crate::knob::{KnobController, KnobGeometry};
use crate::spec::{NodeSpec, WidgetSpec};
use crate::widget::{Button, Container, Frame, ProgressBar, Slider, Widget, WidgetArena, WidgetHandle};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct WidgetRegistry {
    by_name: HashMap<String, WidgetHandle>,
    registrations: Vec<(String, WidgetHandle)>,
}

impl WidgetRegistry {
    /// Later registrations of the same name replace earlier ones.
    pub fn register(&mut self, name: &str, handle: WidgetHandle) {
        if let Some(previous) = self.by_name.insert(name.to_string(), handle) {
            log::debug!("widget name {name:?} re-registered, replacing {previous:?}");
        }
        self.registrations.push((name.to_string(), handle));
    }

    pub fn get(&self, name: &str) -> Option<WidgetHandle> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Every registration in pre-order, including shadowed names.
    pub fn registrations(&self) -> &[(String, WidgetHandle)] {
        &self.registrations
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeFailure {
    pub path: String,
    pub error: NodeError,
}

#[derive(Debug, Default, Clone)]
pub struct BuildReport {
    pub built: usize,
    pub failures: Vec<NodeFailure>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Composition {
    pub registry: WidgetRegistry,
    pub report: BuildReport,
}

/// Builds `tree` into `arena` below `parent`. Each entry is registered before
/// its children are built, so registration follows document pre-order; a
/// failed entry is skipped together with its subtree.
pub fn build(tree: &[Value], parent: Container, arena: &mut WidgetArena) -> Composition {
    let mut ctx = BuildContext {
        arena,
        knob_geometry: KnobGeometry::default(),
        composition: Composition::default(),
    };
    ctx.build_level(tree, parent, "widgets");
    let composition = ctx.composition;
    log::info!(
        "composed {} widgets ({} failed entries)",
        composition.report.built,
        composition.report.failures.len()
    );
    composition
}

struct BuildContext<'a> {
    arena: &'a mut WidgetArena,
    knob_geometry: KnobGeometry,
    composition: Composition,
}

impl BuildContext<'_> {
    fn build_level(&mut self, tree: &[Value], parent: Container, path: &str) {
        for (idx, node) in tree.iter().enumerate() {
            let node_path = format!("{path}[{idx}]");
            if let Err(error) = self.build_node(node, parent, &node_path) {
                log::warn!("skipping {node_path}: {error}");
                self.composition.report.failures.push(NodeFailure {
                    path: node_path,
                    error,
                });
            }
        }
    }

    fn build_node(&mut self, node: &Value, parent: Container, path: &str) -> Result<(), NodeError> {
        let NodeSpec { name, layout, spec } = NodeSpec::parse(node)?;
        let mut children: &[Value] = &[];
        let widget = match spec {
            WidgetSpec::Button(spec) => Widget::Button(Button::new(spec)),
            WidgetSpec::Switch(spec) => spec.into(),
            WidgetSpec::RadioButton(spec) => spec.into(),
            WidgetSpec::Frame(spec) => {
                children = spec.children;
                Widget::Frame(Frame { bg: spec.bg })
            }
            WidgetSpec::Checkbox(spec) => spec.into(),
            WidgetSpec::ProgressBar(spec) => Widget::ProgressBar(ProgressBar::new(spec)),
            WidgetSpec::Slider(spec) => Widget::Slider(Slider::new(spec)),
            WidgetSpec::Knob(spec) => {
                Widget::Knob(KnobController::new(self.knob_geometry, spec.numbers))
            }
            WidgetSpec::Unsupported { tag } => return Err(NodeError::UnknownType(tag)),
        };

        let name = name.unwrap_or_else(|| widget.kind().fallback_name().to_string());
        let handle = self.arena.insert(name.clone(), parent, widget);
        self.arena.place(handle, layout);
        self.composition.registry.register(&name, handle);
        self.composition.report.built += 1;

        if !children.is_empty() {
            self.build_level(children, Container::Frame(handle), &format!("{path}.children"));
        }
        Ok(())
    }
}
