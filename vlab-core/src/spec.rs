use crate::error::NodeError;
use serde_json::{Map, Value};
use std::fmt;
use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    Switch,
    RadioButton,
    Frame,
    Checkbox,
    ProgressBar,
    Slider,
    Knob,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Button,
        WidgetKind::Switch,
        WidgetKind::RadioButton,
        WidgetKind::Frame,
        WidgetKind::Checkbox,
        WidgetKind::ProgressBar,
        WidgetKind::Slider,
        WidgetKind::Knob,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "button" => Some(Self::Button),
            "switch" | "CTkSwitch" => Some(Self::Switch),
            "radio_button" => Some(Self::RadioButton),
            "frame" => Some(Self::Frame),
            "checkbox" => Some(Self::Checkbox),
            "progress_bar" | "CTkProgressBar" => Some(Self::ProgressBar),
            "slider" | "CTkSlider" => Some(Self::Slider),
            "knob" | "RotatingKnobWithNumbers" => Some(Self::Knob),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Switch => "switch",
            Self::RadioButton => "radio_button",
            Self::Frame => "frame",
            Self::Checkbox => "checkbox",
            Self::ProgressBar => "progress_bar",
            Self::Slider => "slider",
            Self::Knob => "knob",
        }
    }

    /// Registry name used when an entry carries no `name`.
    pub fn fallback_name(self) -> &'static str {
        match self {
            Self::Knob => "rotating_knob",
            other => other.tag(),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);

    pub fn parse(text: &str) -> Option<Self> {
        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
            return Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }
        let rgb = match text.to_ascii_lowercase().as_str() {
            "white" => Rgb::WHITE,
            "black" => Rgb::BLACK,
            "red" => Rgb(255, 0, 0),
            "green" => Rgb::GREEN,
            "blue" => Rgb(0, 0, 255),
            "yellow" => Rgb(255, 255, 0),
            "orange" => Rgb(255, 165, 0),
            "purple" => Rgb(128, 0, 128),
            "gray" | "grey" => Rgb(190, 190, 190),
            "cyan" => Rgb(0, 255, 255),
            "magenta" => Rgb(255, 0, 255),
            "pink" => Rgb(255, 192, 203),
            "brown" => Rgb(165, 42, 42),
            _ => return None,
        };
        Some(rgb)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub before: f32,
    pub after: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub horizontal: Span,
    pub vertical: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub row: usize,
    pub column: usize,
    pub padding: Padding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub text: String,
    pub bg: Rgb,
    pub fg: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSpec {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioButtonSpec {
    pub text: String,
    pub variable: String,
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec<'a> {
    pub bg: Rgb,
    pub children: &'a [Value],
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxSpec {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBarSpec {
    pub width: f32,
    pub height: Option<f32>,
    pub bg_color: Rgb,
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub from: f64,
    pub to: f64,
    pub number_of_steps: NonZeroU32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnobSpec {
    pub numbers: NonZeroU32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetSpec<'a> {
    Button(ButtonSpec),
    Switch(SwitchSpec),
    RadioButton(RadioButtonSpec),
    Frame(FrameSpec<'a>),
    Checkbox(CheckboxSpec),
    ProgressBar(ProgressBarSpec),
    Slider(SliderSpec),
    Knob(KnobSpec),
    Unsupported { tag: String },
}

impl WidgetSpec<'_> {
    pub fn kind(&self) -> Option<WidgetKind> {
        Some(match self {
            WidgetSpec::Button(_) => WidgetKind::Button,
            WidgetSpec::Switch(_) => WidgetKind::Switch,
            WidgetSpec::RadioButton(_) => WidgetKind::RadioButton,
            WidgetSpec::Frame(_) => WidgetKind::Frame,
            WidgetSpec::Checkbox(_) => WidgetKind::Checkbox,
            WidgetSpec::ProgressBar(_) => WidgetKind::ProgressBar,
            WidgetSpec::Slider(_) => WidgetKind::Slider,
            WidgetSpec::Knob(_) => WidgetKind::Knob,
            WidgetSpec::Unsupported { .. } => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec<'a> {
    pub name: Option<String>,
    pub layout: Layout,
    pub spec: WidgetSpec<'a>,
}

const DEFAULT_KNOB_NUMBERS: u32 = 10;

impl<'a> NodeSpec<'a> {
    pub fn parse(node: &'a Value) -> Result<Self, NodeError> {
        let fields = node.as_object().ok_or(NodeError::NotAnObject)?;
        let tag = match fields.get("type") {
            None => return Err(NodeError::MissingType),
            Some(Value::String(tag)) => tag.as_str(),
            Some(_) => {
                return Err(NodeError::InvalidField {
                    field: "type",
                    expected: "a string",
                })
            }
        };
        let Some(kind) = WidgetKind::from_tag(tag) else {
            return Ok(NodeSpec {
                name: None,
                layout: Layout::default(),
                spec: WidgetSpec::Unsupported {
                    tag: tag.to_string(),
                },
            });
        };

        let props = Props { kind, fields };
        let spec = match kind {
            WidgetKind::Button => WidgetSpec::Button(ButtonSpec {
                text: props.required_str("text")?.to_string(),
                bg: props.color("bg", Rgb::WHITE),
                fg: props.color("fg", Rgb::BLACK),
            }),
            WidgetKind::Switch => WidgetSpec::Switch(SwitchSpec {
                text: props.required_str("text")?.to_string(),
            }),
            WidgetKind::RadioButton => WidgetSpec::RadioButton(RadioButtonSpec {
                text: props.required_str("text")?.to_string(),
                variable: props.required_str("variable")?.to_string(),
                value: Scalar::from_value(props.required("value")?).ok_or(
                    NodeError::InvalidField {
                        field: "value",
                        expected: "a string, number or boolean",
                    },
                )?,
            }),
            WidgetKind::Frame => WidgetSpec::Frame(FrameSpec {
                bg: props.color("bg", Rgb::WHITE),
                children: props.children()?,
            }),
            WidgetKind::Checkbox => WidgetSpec::Checkbox(CheckboxSpec {
                text: props.required_str("text")?.to_string(),
            }),
            WidgetKind::ProgressBar => WidgetSpec::ProgressBar(ProgressBarSpec {
                width: props.optional_extent("width")?.unwrap_or(20.0),
                height: props.optional_extent("height")?,
                bg_color: props.color("bg_color", Rgb::GREEN),
                fraction: props
                    .optional_f64("value")?
                    .map_or(0.5, |v| v.clamp(0.0, 1.0) as f32),
            }),
            WidgetKind::Slider => {
                let from = props.required_f64("from")?;
                let to = props.required_f64("to")?;
                if from == to {
                    return Err(NodeError::InvalidField {
                        field: "to",
                        expected: "a value different from `from`",
                    });
                }
                if !(to - from).is_finite() {
                    return Err(NodeError::InvalidField {
                        field: "to",
                        expected: "a range whose width is a finite number",
                    });
                }
                let number_of_steps = props
                    .positive_count("number_of_steps")?
                    .ok_or(NodeError::MissingField {
                        kind,
                        field: "number_of_steps",
                    })?;
                WidgetSpec::Slider(SliderSpec {
                    from,
                    to,
                    number_of_steps,
                })
            }
            WidgetKind::Knob => WidgetSpec::Knob(KnobSpec {
                numbers: props.positive_count("numbers")?.unwrap_or(
                    NonZeroU32::new(DEFAULT_KNOB_NUMBERS).unwrap_or(NonZeroU32::MIN),
                ),
            }),
        };

        if kind != WidgetKind::Frame && fields.contains_key("children") {
            log::warn!("ignoring `children` on {kind} entry; only frames have children");
        }

        Ok(NodeSpec {
            name: props.name(),
            layout: props.layout()?,
            spec,
        })
    }
}

struct Props<'a> {
    kind: WidgetKind,
    fields: &'a Map<String, Value>,
}

impl<'a> Props<'a> {
    fn name(&self) -> Option<String> {
        match self.fields.get("name")? {
            Value::String(name) => Some(name.clone()),
            Value::Null => None,
            other => {
                log::warn!(
                    "ignoring non-string name {other} on {} entry; using `{}`",
                    self.kind,
                    self.kind.fallback_name()
                );
                None
            }
        }
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, NodeError> {
        self.fields.get(field).ok_or(NodeError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn required_str(&self, field: &'static str) -> Result<&'a str, NodeError> {
        self.required(field)?
            .as_str()
            .ok_or(NodeError::InvalidField {
                field,
                expected: "a string",
            })
    }

    fn required_f64(&self, field: &'static str) -> Result<f64, NodeError> {
        self.required(field)?
            .as_f64()
            .ok_or(NodeError::InvalidField {
                field,
                expected: "a number",
            })
    }

    fn optional_f64(&self, field: &'static str) -> Result<Option<f64>, NodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or(NodeError::InvalidField {
                field,
                expected: "a number",
            }),
        }
    }

    fn optional_extent(&self, field: &'static str) -> Result<Option<f32>, NodeError> {
        match self.optional_f64(field)? {
            Some(v) if v < 0.0 || !v.is_finite() => Err(NodeError::InvalidField {
                field,
                expected: "a non-negative number",
            }),
            other => Ok(other.map(|v| v as f32)),
        }
    }

    fn optional_index(&self, field: &'static str) -> Result<usize, NodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(0),
            Some(value) => value
                .as_u64()
                .and_then(|v| usize::try_from(v).ok())
                .ok_or(NodeError::InvalidField {
                    field,
                    expected: "a non-negative integer",
                }),
        }
    }

    fn positive_count(&self, field: &'static str) -> Result<Option<NonZeroU32>, NodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .and_then(NonZeroU32::new)
                .map(Some)
                .ok_or(NodeError::InvalidField {
                    field,
                    expected: "a positive integer",
                }),
        }
    }

    fn span(&self, field: &'static str) -> Result<Span, NodeError> {
        let invalid = NodeError::InvalidField {
            field,
            expected: "a non-negative number or a [before, after] pair",
        };
        let side = |value: &Value| {
            value
                .as_f64()
                .filter(|v| *v >= 0.0 && v.is_finite())
                .map(|v| v as f32)
        };
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(Span::default()),
            Some(Value::Array(pair)) => match pair.as_slice() {
                [before, after] => match (side(before), side(after)) {
                    (Some(before), Some(after)) => Ok(Span { before, after }),
                    _ => Err(invalid),
                },
                _ => Err(invalid),
            },
            Some(value) => side(value)
                .map(|v| Span {
                    before: v,
                    after: v,
                })
                .ok_or(invalid),
        }
    }

    fn layout(&self) -> Result<Layout, NodeError> {
        Ok(Layout {
            row: self.optional_index("row")?,
            column: self.optional_index("column")?,
            padding: Padding {
                horizontal: self.span("padx")?,
                vertical: self.span("pady")?,
            },
        })
    }

    fn children(&self) -> Result<&'a [Value], NodeError> {
        match self.fields.get("children") {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(children)) => Ok(children.as_slice()),
            Some(_) => Err(NodeError::InvalidField {
                field: "children",
                expected: "an array of widget entries",
            }),
        }
    }

    fn color(&self, field: &'static str, default: Rgb) -> Rgb {
        match self.fields.get(field) {
            None | Some(Value::Null) => default,
            Some(Value::String(name)) => Rgb::parse(name).unwrap_or_else(|| {
                log::warn!("unknown colour {name:?} for {} `{field}`, using default", self.kind);
                default
            }),
            Some(other) => {
                log::warn!("colour {other} for {} `{field}` is not a string, using default", self.kind);
                default
            }
        }
    }
}
