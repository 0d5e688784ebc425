use crate::error::{ChartConfigError, ConfigError};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Largest chart surface edge, in pixels.
pub const MAX_SURFACE_EDGE: f64 = 16_384.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FigureSettings {
    pub figsize: [f64; 2],
    pub dpi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxesSettings {
    pub xlim: [f64; 2],
    pub ylim: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    pub figure: FigureSettings,
    pub axes: AxesSettings,
}

impl ChartSettings {
    pub fn parse(figure: &Value, axes: &Value) -> Result<Self, ChartConfigError> {
        let figure: FigureSettings =
            serde_json::from_value(figure.clone()).map_err(ChartConfigError::Figure)?;
        let axes: AxesSettings =
            serde_json::from_value(axes.clone()).map_err(ChartConfigError::Axes)?;
        if !(figure.dpi.is_finite() && figure.dpi > 0.0) {
            return Err(ChartConfigError::InvalidValue {
                field: "dpi",
                expected: "a positive number",
            });
        }
        if figure.figsize.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ChartConfigError::InvalidValue {
                field: "figsize",
                expected: "two positive numbers",
            });
        }
        if figure.figsize.iter().any(|v| v * figure.dpi > MAX_SURFACE_EDGE) {
            return Err(ChartConfigError::InvalidValue {
                field: "figsize",
                expected: "figsize * dpi of at most 16384 pixels per edge",
            });
        }
        for (field, [lo, hi]) in [("xlim", axes.xlim), ("ylim", axes.ylim)] {
            if !(lo.is_finite() && hi.is_finite() && lo != hi) {
                return Err(ChartConfigError::InvalidValue {
                    field,
                    expected: "two distinct finite numbers",
                });
            }
        }
        Ok(Self { figure, axes })
    }

    pub fn surface_size(&self) -> (f32, f32) {
        let [w, h] = self.figure.figsize;
        ((w * self.figure.dpi) as f32, (h * self.figure.dpi) as f32)
    }
}

#[derive(Debug)]
pub enum ChartSection {
    Disabled,
    Enabled(ChartSettings),
    Invalid(ChartConfigError),
}

#[derive(Debug)]
pub struct PanelConfig {
    pub widgets: Vec<Value>,
    pub chart: ChartSection,
}

impl PanelConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&data)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_slice(data)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut document) = document else {
            return Err(ConfigError::NotAnObject);
        };
        let widgets = match document.remove("widgets") {
            None => return Err(ConfigError::MissingWidgets),
            Some(Value::Array(widgets)) => widgets,
            Some(_) => return Err(ConfigError::WidgetsNotArray),
        };
        let chart = match (document.get("figure"), document.get("axes")) {
            (Some(figure), Some(axes)) => match ChartSettings::parse(figure, axes) {
                Ok(settings) => ChartSection::Enabled(settings),
                Err(err) => ChartSection::Invalid(err),
            },
            (None, None) => ChartSection::Disabled,
            (Some(_), None) | (None, Some(_)) => {
                log::warn!("chart disabled: 'figure' and 'axes' must be given together");
                ChartSection::Disabled
            }
        };
        Ok(Self { widgets, chart })
    }
}
