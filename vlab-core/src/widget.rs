use crate::knob::KnobController;
use crate::spec::{
    ButtonSpec, CheckboxSpec, Layout, ProgressBarSpec, RadioButtonSpec, Rgb, Scalar, SliderSpec,
    SwitchSpec, WidgetKind,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(usize);

impl WidgetHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Root,
    Frame(WidgetHandle),
}

#[derive(Debug, Clone)]
pub struct Button {
    pub text: String,
    pub bg: Rgb,
    pub fg: Rgb,
    clicks: u64,
}

impl Button {
    pub fn new(spec: ButtonSpec) -> Self {
        Self {
            text: spec.text,
            bg: spec.bg,
            fg: spec.fg,
            clicks: 0,
        }
    }

    pub fn click(&mut self) -> u64 {
        self.clicks += 1;
        self.clicks
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }
}

#[derive(Debug, Clone)]
pub struct Switch {
    pub text: String,
    pub on: bool,
}

#[derive(Debug, Clone)]
pub struct RadioButton {
    pub text: String,
    pub variable: String,
    pub value: Scalar,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub bg: Rgb,
}

#[derive(Debug, Clone)]
pub struct Checkbox {
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressBar {
    pub width: f32,
    pub height: Option<f32>,
    pub bg_color: Rgb,
    fraction: f32,
}

impl ProgressBar {
    pub fn new(spec: ProgressBarSpec) -> Self {
        Self {
            width: spec.width,
            height: spec.height,
            bg_color: spec.bg_color,
            fraction: spec.fraction,
        }
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn set_fraction(&mut self, fraction: f32) {
        self.fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
    }
}

#[derive(Debug, Clone)]
pub struct Slider {
    pub from: f64,
    pub to: f64,
    pub number_of_steps: u32,
    value: f64,
}

impl Slider {
    pub fn new(spec: SliderSpec) -> Self {
        let mut slider = Self {
            from: spec.from,
            to: spec.to,
            number_of_steps: spec.number_of_steps.get(),
            value: spec.from,
        };
        slider.set_value((spec.from + spec.to) / 2.0);
        slider
    }

    pub fn step(&self) -> f64 {
        (self.to - self.from) / f64::from(self.number_of_steps)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Snaps to the nearest step inside the range.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let step = self.step();
        let steps = ((value - self.from) / step)
            .round()
            .clamp(0.0, f64::from(self.number_of_steps));
        self.value = self.from + steps * step;
    }
}

#[derive(Debug, Clone)]
pub enum Widget {
    Button(Button),
    Switch(Switch),
    RadioButton(RadioButton),
    Frame(Frame),
    Checkbox(Checkbox),
    ProgressBar(ProgressBar),
    Slider(Slider),
    Knob(KnobController),
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Button(_) => WidgetKind::Button,
            Widget::Switch(_) => WidgetKind::Switch,
            Widget::RadioButton(_) => WidgetKind::RadioButton,
            Widget::Frame(_) => WidgetKind::Frame,
            Widget::Checkbox(_) => WidgetKind::Checkbox,
            Widget::ProgressBar(_) => WidgetKind::ProgressBar,
            Widget::Slider(_) => WidgetKind::Slider,
            Widget::Knob(_) => WidgetKind::Knob,
        }
    }
}

impl From<SwitchSpec> for Widget {
    fn from(spec: SwitchSpec) -> Self {
        Widget::Switch(Switch {
            text: spec.text,
            on: false,
        })
    }
}

impl From<RadioButtonSpec> for Widget {
    fn from(spec: RadioButtonSpec) -> Self {
        Widget::RadioButton(RadioButton {
            text: spec.text,
            variable: spec.variable,
            value: spec.value,
        })
    }
}

impl From<CheckboxSpec> for Widget {
    fn from(spec: CheckboxSpec) -> Self {
        Widget::Checkbox(Checkbox {
            text: spec.text,
            checked: false,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WidgetNode {
    pub handle: WidgetHandle,
    pub name: String,
    pub parent: Container,
    pub layout: Layout,
    pub widget: Widget,
}

#[derive(Debug, Default)]
pub struct WidgetArena {
    nodes: Vec<WidgetNode>,
}

impl WidgetArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, parent: Container, widget: Widget) -> WidgetHandle {
        let handle = WidgetHandle(self.nodes.len());
        self.nodes.push(WidgetNode {
            handle,
            name,
            parent,
            layout: Layout::default(),
            widget,
        });
        handle
    }

    pub fn place(&mut self, handle: WidgetHandle, layout: Layout) {
        if let Some(node) = self.nodes.get_mut(handle.0) {
            node.layout = layout;
        }
    }

    pub fn get(&self, handle: WidgetHandle) -> Option<&WidgetNode> {
        self.nodes.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: WidgetHandle) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetNode> {
        self.nodes.iter()
    }

    /// Widgets placed directly in `container`, ordered by grid cell and then
    /// by construction order.
    pub fn placed_in(&self, container: Container) -> Vec<WidgetHandle> {
        let mut handles: Vec<&WidgetNode> = self
            .nodes
            .iter()
            .filter(|node| node.parent == container)
            .collect();
        handles.sort_by_key(|node| (node.layout.row, node.layout.column, node.handle));
        handles.into_iter().map(|node| node.handle).collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct RadioGroups {
    selected: HashMap<String, Scalar>,
}

impl RadioGroups {
    pub fn select(&mut self, variable: &str, value: Scalar) {
        log::info!("radio variable {variable:?} set to {value}");
        self.selected.insert(variable.to_string(), value);
    }

    pub fn selected(&self, variable: &str) -> Option<&Scalar> {
        self.selected.get(variable)
    }

    pub fn is_selected(&self, variable: &str, value: &Scalar) -> bool {
        self.selected(variable) == Some(value)
    }
}
