use crate::spec::WidgetKind;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration document must be a JSON object")]
    NotAnObject,
    #[error("'widgets' key is missing in the configuration")]
    MissingWidgets,
    #[error("'widgets' must be an array of widget entries")]
    WidgetsNotArray,
}

/// Problems with the `figure`/`axes` sections. These only disable the chart.
#[derive(thiserror::Error, Debug)]
pub enum ChartConfigError {
    #[error("invalid 'figure' section: {0}")]
    Figure(#[source] serde_json::Error),
    #[error("invalid 'axes' section: {0}")]
    Axes(#[source] serde_json::Error),
    #[error("chart setting `{field}` must be {expected}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
    },
}

/// Failure scoped to a single widget entry. Siblings keep building.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("widget entry is not an object")]
    NotAnObject,
    #[error("widget entry has no `type`")]
    MissingType,
    #[error("unsupported widget type `{0}`")]
    UnknownType(String),
    #[error("{kind} is missing required field `{field}`")]
    MissingField {
        kind: WidgetKind,
        field: &'static str,
    },
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("generator produced an empty series")]
    EmptySeries,
    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },
    #[error("series generator failed: {0}")]
    Generator(String),
}
