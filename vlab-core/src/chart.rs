use crate::config::ChartSettings;
use crate::error::ChartError;
use crate::schedule::{CancellationToken, RefreshSchedule};
use std::time::{Duration, Instant};

pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    pub fn from_limits(xlim: [f64; 2], ylim: [f64; 2]) -> Self {
        Self {
            x_min: xlim[0].min(xlim[1]),
            x_max: xlim[0].max(xlim[1]),
            y_min: ylim[0].min(ylim[1]),
            y_max: ylim[0].max(ylim[1]),
        }
    }

    /// Exact data extent; a zero-width span is widened by 0.5 on each side.
    pub fn fit(series: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = series.split_first()?;
        let mut extent = Self {
            x_min: first.0,
            x_max: first.0,
            y_min: first.1,
            y_max: first.1,
        };
        for &(x, y) in rest {
            extent.x_min = extent.x_min.min(x);
            extent.x_max = extent.x_max.max(x);
            extent.y_min = extent.y_min.min(y);
            extent.y_max = extent.y_max.max(y);
        }
        let (x_min, x_max) = widen_flat(extent.x_min, extent.x_max);
        let (y_min, y_max) = widen_flat(extent.y_min, extent.y_max);
        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

fn widen_flat(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo == 0.0 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

pub trait SeriesGenerator {
    fn generate(&mut self, tick: u64) -> Result<Vec<(f64, f64)>, ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineSeries {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for SineSeries {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            samples: 50,
        }
    }
}

impl SeriesGenerator for SineSeries {
    fn generate(&mut self, _tick: u64) -> Result<Vec<(f64, f64)>, ChartError> {
        let step = if self.samples > 1 {
            (self.end - self.start) / (self.samples - 1) as f64
        } else {
            0.0
        };
        Ok((0..self.samples)
            .map(|i| {
                let x = self.start + step * i as f64;
                (x, x.sin())
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    series: Vec<(f64, f64)>,
    view: ViewBounds,
}

impl ChartState {
    pub fn new(view: ViewBounds) -> Self {
        Self {
            series: Vec::new(),
            view,
        }
    }

    pub fn series(&self) -> &[(f64, f64)] {
        &self.series
    }

    pub fn view(&self) -> ViewBounds {
        self.view
    }

    pub fn replace_series(&mut self, series: Vec<(f64, f64)>) -> Result<(), ChartError> {
        if let Some(index) = series
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::NonFiniteSample { index });
        }
        let view = ViewBounds::fit(&series).ok_or(ChartError::EmptySeries)?;
        self.series = series;
        self.view = view;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartPoll {
    Waiting(Duration),
    Ticked { redraw: bool, next_in: Duration },
    Cancelled,
}

pub struct ChartDriver {
    state: ChartState,
    surface: (f32, f32),
    generator: Box<dyn SeriesGenerator>,
    schedule: RefreshSchedule,
    ticks: u64,
    failed_ticks: u64,
}

impl ChartDriver {
    pub fn new(settings: &ChartSettings, token: CancellationToken) -> Self {
        Self::with_generator(
            settings,
            Box::new(SineSeries::default()),
            DEFAULT_REFRESH_DELAY,
            token,
        )
    }

    pub fn with_generator(
        settings: &ChartSettings,
        generator: Box<dyn SeriesGenerator>,
        delay: Duration,
        token: CancellationToken,
    ) -> Self {
        Self {
            state: ChartState::new(ViewBounds::from_limits(
                settings.axes.xlim,
                settings.axes.ylim,
            )),
            surface: settings.surface_size(),
            generator,
            schedule: RefreshSchedule::new(delay, token),
            ticks: 0,
            failed_ticks: 0,
        }
    }

    /// Regenerates and swaps in a new series. The previous series stays on
    /// screen when this fails.
    pub fn tick(&mut self) -> Result<(), ChartError> {
        let tick = self.ticks;
        self.ticks += 1;
        let result = self
            .generator
            .generate(tick)
            .and_then(|series| self.state.replace_series(series));
        if result.is_err() {
            self.failed_ticks += 1;
        }
        result
    }

    pub fn poll(&mut self, now: Instant) -> ChartPoll {
        if self.schedule.is_cancelled() {
            return ChartPoll::Cancelled;
        }
        if let Some(wait) = self.schedule.remaining(now) {
            return ChartPoll::Waiting(wait);
        }
        let redraw = match self.tick() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("chart tick {} failed: {err}", self.ticks);
                false
            }
        };
        self.schedule.rearm(now);
        ChartPoll::Ticked {
            redraw,
            next_in: self.schedule.delay(),
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn surface_size(&self) -> (f32, f32) {
        self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn failed_ticks(&self) -> u64 {
        self.failed_ticks
    }

    pub fn is_cancelled(&self) -> bool {
        self.schedule.is_cancelled()
    }
}
