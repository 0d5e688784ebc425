use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use vlab_core::ChartDriver;

const LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(86, 156, 214);

/// Draws the current series inside the view chosen by the last tick.
pub(crate) fn chart_surface(ui: &mut egui::Ui, chart: &ChartDriver) {
    let (width, height) = chart.surface_size();
    let state = chart.state();
    let view = state.view();

    Plot::new("live_chart")
        .width(width)
        .height(height)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            if !state.series().is_empty() {
                let points: PlotPoints = state.series().iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(points).width(2.0).color(LINE_COLOR));
            }
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.x_min, view.y_min],
                [view.x_max, view.y_max],
            ));
        });
}
