use eframe::egui;
use vlab_core::{KnobController, KnobGeometry, KnobSweep, Point};

const SURFACE_FILL: egui::Color32 = egui::Color32::from_rgb(128, 0, 128);
const DISC_FILL: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const SWEEP_FILL: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);
const SWEEP_SEGMENT_DEGREES: f64 = 4.0;

/// Paints a knob surface and feeds its pointer drags into the controller.
///
/// The shape is rebuilt from the controller every frame, so the sweep
/// overlay only ever shows the latest move.
pub(crate) fn knob_surface(ui: &mut egui::Ui, knob: &mut KnobController) {
    let geometry = *knob.geometry();
    let size = egui::vec2(geometry.width as f32, geometry.height as f32);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());
    let to_local = |pos: egui::Pos2| {
        Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
    };
    let to_screen = |p: Point| rect.min + egui::vec2(p.x as f32, p.y as f32);

    if response.drag_started() {
        let press_origin = ui.ctx().input(|i| i.pointer.press_origin());
        if let Some(pos) = drag_anchor(press_origin, response.interact_pointer_pos()) {
            knob.pointer_down(to_local(pos));
        }
    }
    if response.dragged() && response.drag_delta() != egui::Vec2::ZERO {
        if let Some(pos) = response.interact_pointer_pos() {
            if knob.pointer_move(to_local(pos)).is_some() {
                ui.ctx().request_repaint();
            }
        }
    }
    if response.drag_stopped() {
        knob.pointer_up();
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, SURFACE_FILL);
    painter.circle(
        to_screen(geometry.center),
        geometry.disc_radius as f32,
        DISC_FILL,
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    );
    if let Some(sweep) = knob.sweep() {
        painter.add(sweep_shape(&geometry, sweep, to_screen));
    }
    for label in knob.labels() {
        painter.text(
            to_screen(label.position),
            egui::Align2::CENTER_CENTER,
            &label.text,
            egui::FontId::proportional(10.0),
            egui::Color32::BLACK,
        );
    }
}

/// Drag start is reported past egui's drag threshold; anchor at the press.
fn drag_anchor(
    press_origin: Option<egui::Pos2>,
    current: Option<egui::Pos2>,
) -> Option<egui::Pos2> {
    press_origin.or(current)
}

/// Filled pie slice from `start_degrees` over `extent_degrees`, as a
/// triangle fan so sweeps wider than 180° still fill correctly.
fn sweep_shape(
    geometry: &KnobGeometry,
    sweep: KnobSweep,
    to_screen: impl Fn(Point) -> egui::Pos2,
) -> egui::Shape {
    let segments = ((sweep.extent_degrees.abs() / SWEEP_SEGMENT_DEGREES).ceil() as u32).max(1);
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(to_screen(geometry.center), SWEEP_FILL);
    for i in 0..=segments {
        let degrees =
            sweep.start_degrees + sweep.extent_degrees * f64::from(i) / f64::from(segments);
        mesh.colored_vertex(
            to_screen(geometry.polar(geometry.disc_radius, degrees)),
            SWEEP_FILL,
        );
    }
    for i in 1..=segments {
        mesh.add_triangle(0, i, i + 1);
    }
    egui::Shape::mesh(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_anchor_prefers_the_press_origin() {
        let pressed = egui::pos2(160.0, 150.0);
        let moved = egui::pos2(170.0, 158.0);
        assert_eq!(drag_anchor(Some(pressed), Some(moved)), Some(pressed));
        assert_eq!(drag_anchor(None, Some(moved)), Some(moved));
        assert_eq!(drag_anchor(None, None), None);
    }

    #[test]
    fn anchoring_at_the_press_keeps_the_first_sweep() {
        let mut knob = KnobController::new(
            KnobGeometry::default(),
            std::num::NonZeroU32::new(10).unwrap(),
        );
        // Press on the +x axis, then cross the drag threshold a few degrees on.
        let pressed = egui::pos2(200.0, 150.0);
        let moved = egui::pos2(200.0, 154.0);
        let anchor = drag_anchor(Some(pressed), Some(moved)).unwrap();
        assert!(knob.pointer_down(Point::new(f64::from(anchor.x), f64::from(anchor.y))));
        knob.pointer_move(Point::new(f64::from(moved.x), f64::from(moved.y)));
        let expected = 4f64.atan2(50.0).to_degrees();
        assert!((knob.value() - expected).abs() < 1e-9);
    }
}
