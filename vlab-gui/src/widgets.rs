//! Grid placement and painting of composed widgets.
//!
//! Each container lays its widgets out on a grid keyed by `(row, column)`.
//! Only rows and columns that hold at least one widget take up space.

use eframe::egui;
use vlab_core::spec::Padding;
use vlab_core::{Container, RadioGroups, Rgb, Widget, WidgetArena, WidgetHandle, WidgetNode};

use crate::knob::knob_surface;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(160.0, 40.0);

pub(crate) fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn margin(padding: Padding) -> egui::Margin {
    egui::Margin {
        left: padding.horizontal.before,
        right: padding.horizontal.after,
        top: padding.vertical.before,
        bottom: padding.vertical.after,
    }
}

pub(crate) fn render_container(
    ui: &mut egui::Ui,
    arena: &mut WidgetArena,
    radio_groups: &mut RadioGroups,
    container: Container,
    clicked: &mut Vec<WidgetHandle>,
) {
    let cells: Vec<((usize, usize), WidgetHandle)> = arena
        .placed_in(container)
        .into_iter()
        .filter_map(|h| arena.get(h).map(|n| ((n.layout.row, n.layout.column), h)))
        .collect();
    if cells.is_empty() {
        return;
    }
    let mut rows: Vec<usize> = cells.iter().map(|((row, _), _)| *row).collect();
    rows.dedup();
    let mut columns: Vec<usize> = cells.iter().map(|((_, column), _)| *column).collect();
    columns.sort_unstable();
    columns.dedup();

    let grid_id = match container {
        Container::Root => egui::Id::new("panel_root"),
        Container::Frame(frame) => egui::Id::new(("panel_frame", frame.index())),
    };
    egui::Grid::new(grid_id)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for row in &rows {
                for column in &columns {
                    let here: Vec<WidgetHandle> = cells
                        .iter()
                        .filter(|(cell, _)| *cell == (*row, *column))
                        .map(|(_, h)| *h)
                        .collect();
                    if here.is_empty() {
                        ui.label("");
                        continue;
                    }
                    ui.vertical(|ui| {
                        for handle in here {
                            render_cell(ui, arena, radio_groups, handle, clicked);
                        }
                    });
                }
                ui.end_row();
            }
        });
}

fn render_cell(
    ui: &mut egui::Ui,
    arena: &mut WidgetArena,
    radio_groups: &mut RadioGroups,
    handle: WidgetHandle,
    clicked: &mut Vec<WidgetHandle>,
) {
    let Some(node) = arena.get(handle) else {
        return;
    };
    let outer = margin(node.layout.padding);
    let frame_fill = match &node.widget {
        Widget::Frame(frame) => Some(color(frame.bg)),
        _ => None,
    };

    egui::Frame::none().inner_margin(outer).show(ui, |ui| {
        if let Some(fill) = frame_fill {
            egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                render_container(ui, arena, radio_groups, Container::Frame(handle), clicked);
            });
        } else if let Some(node) = arena.get_mut(handle) {
            render_leaf(ui, node, radio_groups, clicked);
        }
    });
}

fn render_leaf(
    ui: &mut egui::Ui,
    node: &mut WidgetNode,
    radio_groups: &mut RadioGroups,
    clicked: &mut Vec<WidgetHandle>,
) {
    let handle = node.handle;
    match &mut node.widget {
        Widget::Button(button) => {
            let label = egui::RichText::new(&button.text)
                .color(color(button.fg))
                .size(13.0)
                .strong();
            let response = ui.add(
                egui::Button::new(label)
                    .fill(color(button.bg))
                    .stroke(egui::Stroke::new(2.0, egui::Color32::GRAY))
                    .min_size(BUTTON_SIZE),
            );
            if response.clicked() {
                clicked.push(handle);
            }
        }
        Widget::Switch(switch) => {
            ui.horizontal(|ui| {
                if toggle_switch(ui, &mut switch.on).changed() {
                    log::info!("switch {} turned {}", node.name, if switch.on { "on" } else { "off" });
                }
                ui.label(egui::RichText::new(&switch.text).size(15.0).strong());
            });
        }
        Widget::RadioButton(radio) => {
            let selected = radio_groups.is_selected(&radio.variable, &radio.value);
            if ui.radio(selected, radio.text.as_str()).clicked() {
                radio_groups.select(&radio.variable, radio.value.clone());
            }
        }
        Widget::Checkbox(checkbox) => {
            let text = egui::RichText::new(&checkbox.text).size(13.0).strong();
            if ui.checkbox(&mut checkbox.checked, text).changed() {
                log::info!("checkbox {} set to {}", node.name, checkbox.checked);
            }
        }
        Widget::ProgressBar(bar) => {
            egui::Frame::none()
                .fill(color(bar.bg_color))
                .show(ui, |ui| {
                    if let Some(height) = bar.height {
                        ui.set_min_height(height);
                    }
                    ui.add(egui::ProgressBar::new(bar.fraction()).desired_width(bar.width));
                });
        }
        Widget::Slider(slider) => {
            let mut value = slider.value();
            let range = slider.from..=slider.to;
            let response = ui.add(egui::Slider::new(&mut value, range).step_by(slider.step().abs()));
            if response.changed() {
                slider.set_value(value);
            }
        }
        Widget::Knob(knob) => knob_surface(ui, knob),
        // Frames are containers and are drawn by `render_cell`.
        Widget::Frame(_) => {}
    }
}

/// On/off switch painted in the same way as the knob: allocate, react, paint.
fn toggle_switch(ui: &mut egui::Ui, on: &mut bool) -> egui::Response {
    let size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
    let (rect, mut response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }
    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool(response.id, *on);
        let visuals = ui.style().interact_selectable(&response, *on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        ui.painter()
            .rect(rect, radius, visuals.bg_fill, visuals.bg_stroke);
        let knob_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
        ui.painter().circle(
            egui::pos2(knob_x, rect.center().y),
            0.75 * radius,
            visuals.bg_fill,
            visuals.fg_stroke,
        );
    }
    response
}
