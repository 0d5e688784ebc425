use eframe::egui;
use std::time::Instant;
use vlab_core::{ChartPoll, Container, Panel, WidgetHandle};

mod chart;
mod knob;
mod widgets;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "VIRTUAL-LAB".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Opens the panel window and runs the event loop until it is closed.
///
/// All panel state moves into the eframe app and is only touched from the
/// UI thread: pointer handlers, button clicks and chart ticks each run to
/// completion inside a frame update.
pub fn run_gui(config: GuiConfig, panel: Panel) -> Result<(), GuiError> {
    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_title(config.title.clone()),
        ..Default::default()
    };
    // NOTE: Vsync generates hangs and lag on occluded windows.
    options.vsync = false;

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Box::new(PanelApp { panel })),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}

struct PanelApp {
    panel: Panel,
}

impl PanelApp {
    /// Runs a chart tick when due and asks egui to wake up for the next one.
    fn drive_chart(&mut self, ctx: &egui::Context) {
        let Some(chart) = self.panel.chart_mut() else {
            return;
        };
        match chart.poll(Instant::now()) {
            ChartPoll::Waiting(wait) => ctx.request_repaint_after(wait),
            ChartPoll::Ticked { next_in, .. } => ctx.request_repaint_after(next_in),
            ChartPoll::Cancelled => {}
        }
    }

    fn status_line(&self) -> String {
        let report = self.panel.report();
        let mut status = format!("{} widgets", report.built);
        if !report.failures.is_empty() {
            status.push_str(&format!(", {} entries skipped", report.failures.len()));
        }
        if let Some(err) = self.panel.chart_error() {
            status.push_str(&format!(", chart disabled: {err}"));
        }
        status
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_chart(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status_line());
        });

        if let Some(chart) = self.panel.chart() {
            egui::SidePanel::right("chart_panel")
                .resizable(false)
                .show(ctx, |ui| chart::chart_surface(ui, chart));
        }

        let mut clicked: Vec<WidgetHandle> = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(BACKGROUND))
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    let (arena, radio_groups) = self.panel.widgets_mut();
                    widgets::render_container(ui, arena, radio_groups, Container::Root, &mut clicked);
                });
            });
        for handle in clicked {
            self.panel.click(handle);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.panel.shutdown();
    }
}
