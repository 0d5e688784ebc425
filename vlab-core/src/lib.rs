pub mod chart;
pub mod composition;
pub mod config;
pub mod error;
pub mod knob;
pub mod panel;
pub mod schedule;
pub mod spec;
pub mod widget;

pub use chart::{ChartDriver, ChartPoll, ChartState, SeriesGenerator, SineSeries, ViewBounds};
pub use composition::{build, BuildReport, Composition, NodeFailure, WidgetRegistry};
pub use config::{ChartSection, ChartSettings, PanelConfig};
pub use error::{ChartConfigError, ChartError, ConfigError, NodeError};
pub use knob::{KnobController, KnobGeometry, KnobState, KnobSweep, Point};
pub use panel::Panel;
pub use schedule::{CancellationToken, RefreshSchedule};
pub use spec::{Layout, Rgb, Scalar, WidgetKind};
pub use widget::{Container, RadioGroups, Widget, WidgetArena, WidgetHandle, WidgetNode};
