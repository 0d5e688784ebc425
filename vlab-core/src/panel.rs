use crate::chart::ChartDriver;
use crate::composition::{self, BuildReport, Composition, WidgetRegistry};
use crate::config::{ChartSection, PanelConfig};
use crate::error::{ChartConfigError, ConfigError};
use crate::knob::KnobController;
use crate::schedule::CancellationToken;
use crate::widget::{Container, RadioGroups, Widget, WidgetArena, WidgetHandle, WidgetNode};
use std::path::Path;

pub struct Panel {
    arena: WidgetArena,
    registry: WidgetRegistry,
    report: BuildReport,
    radio_groups: RadioGroups,
    chart: Option<ChartDriver>,
    chart_error: Option<ChartConfigError>,
    token: CancellationToken,
}

impl Panel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = PanelConfig::load_from_file(path)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: PanelConfig) -> Self {
        let mut arena = WidgetArena::new();
        let Composition { registry, report } =
            composition::build(&config.widgets, Container::Root, &mut arena);
        let token = CancellationToken::new();
        let (chart, chart_error) = match config.chart {
            ChartSection::Disabled => (None, None),
            ChartSection::Enabled(settings) => {
                (Some(ChartDriver::new(&settings, token.clone())), None)
            }
            ChartSection::Invalid(err) => {
                log::warn!("chart disabled: {err}");
                (None, Some(err))
            }
        };
        Self {
            arena,
            registry,
            report,
            radio_groups: RadioGroups::default(),
            chart,
            chart_error,
            token,
        }
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn arena(&self) -> &WidgetArena {
        &self.arena
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetNode> {
        self.registry.get(name).and_then(|h| self.arena.get(h))
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut WidgetNode> {
        let handle = self.registry.get(name)?;
        self.arena.get_mut(handle)
    }

    pub fn knob_mut(&mut self, name: &str) -> Option<&mut KnobController> {
        match &mut self.widget_mut(name)?.widget {
            Widget::Knob(knob) => Some(knob),
            _ => None,
        }
    }

    pub fn click(&mut self, handle: WidgetHandle) {
        if let Some(node) = self.arena.get_mut(handle) {
            if let Widget::Button(button) = &mut node.widget {
                let clicks = button.click();
                log::info!("button clicked: {} ({clicks} total)", node.name);
            }
        }
    }

    pub fn widgets_mut(&mut self) -> (&mut WidgetArena, &mut RadioGroups) {
        (&mut self.arena, &mut self.radio_groups)
    }

    pub fn radio_groups(&self) -> &RadioGroups {
        &self.radio_groups
    }

    pub fn chart(&self) -> Option<&ChartDriver> {
        self.chart.as_ref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut ChartDriver> {
        self.chart.as_mut()
    }

    pub fn chart_error(&self) -> Option<&ChartConfigError> {
        self.chart_error.as_ref()
    }

    pub fn shutdown(&self) {
        self.token.cancel();
    }
}
