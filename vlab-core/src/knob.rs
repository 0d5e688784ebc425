use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub disc_radius: f64,
    pub label_radius: f64,
}

impl Default for KnobGeometry {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            center: Point::new(150.0, 150.0),
            disc_radius: 50.0,
            label_radius: 60.0,
        }
    }
}

impl KnobGeometry {
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn angle_of(&self, point: Point) -> f64 {
        (point.y - self.center.y)
            .atan2(point.x - self.center.x)
            .to_degrees()
    }

    pub fn polar(&self, radius: f64, degrees: f64) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            self.center.x + radius * radians.cos(),
            self.center.y + radius * radians.sin(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobState {
    pub angle_degrees: f64,
    pub value: f64,
    pub division_count: NonZeroU32,
    pub drag_anchor_angle: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobSweep {
    pub start_degrees: f64,
    pub extent_degrees: f64,
}

#[derive(Debug, Clone)]
pub struct KnobController {
    geometry: KnobGeometry,
    state: KnobState,
    labels: Vec<TickLabel>,
    sweep: Option<KnobSweep>,
    redraws: u64,
}

impl KnobController {
    pub fn new(geometry: KnobGeometry, division_count: NonZeroU32) -> Self {
        let step = 360.0 / f64::from(division_count.get());
        let labels = (0..division_count.get())
            .map(|i| TickLabel {
                text: i.to_string(),
                position: geometry.polar(geometry.label_radius, f64::from(i) * step),
            })
            .collect();
        Self {
            geometry,
            state: KnobState {
                angle_degrees: 0.0,
                value: 0.0,
                division_count,
                drag_anchor_angle: None,
            },
            labels,
            sweep: None,
            redraws: 0,
        }
    }

    pub fn pointer_down(&mut self, point: Point) -> bool {
        if !self.geometry.contains(point) {
            return false;
        }
        let angle = self.geometry.angle_of(point);
        self.state.angle_degrees = angle;
        self.state.drag_anchor_angle = Some(angle);
        true
    }

    /// Dragging -> Dragging. Returns the delta added to `value`, or `None`
    /// when no drag is active. Neither `value` nor `angle_degrees` is ever
    /// wrapped, so both keep growing across full turns.
    pub fn pointer_move(&mut self, point: Point) -> Option<f64> {
        self.state.drag_anchor_angle?;
        let angle = self.geometry.angle_of(point);
        let delta = angle - self.state.angle_degrees;
        self.state.angle_degrees = angle;
        self.state.value += delta;
        // Redraw replaces the previous overlay; only `value` accumulates.
        self.sweep = Some(KnobSweep {
            start_degrees: 0.0,
            extent_degrees: delta,
        });
        self.redraws += 1;
        log::debug!("value: {:.2}", self.state.value);
        Some(delta)
    }

    pub fn pointer_up(&mut self) {
        self.state.drag_anchor_angle = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.state.drag_anchor_angle.is_some()
    }

    pub fn state(&self) -> &KnobState {
        &self.state
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn geometry(&self) -> &KnobGeometry {
        &self.geometry
    }

    pub fn labels(&self) -> &[TickLabel] {
        &self.labels
    }

    pub fn sweep(&self) -> Option<KnobSweep> {
        self.sweep
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}
