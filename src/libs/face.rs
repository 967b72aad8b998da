use super::config::FaceLayout;

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

/// Point at `radius` from `center`, `degrees` measured the cairo way
/// (0 is to the right, positive turns clockwise on screen).
pub fn on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

/// Screen angle for a dial position, 0 at 12 o'clock.
pub fn dial_angle(position: f64, degrees_per_unit: f64) -> f64 {
    position * degrees_per_unit - 90.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Minute,
    Hour,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: TickKind,
    pub start: Point,
    pub end: Point,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Numeral {
    pub text: String,
    pub anchor: Point,
}

impl Numeral {
    /// Top-left corner that centers text of the measured size on the anchor.
    pub fn top_left(&self, width: f64, height: f64) -> Point {
        Point::new(self.anchor.x - width / 2.0, self.anchor.y - height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    pub minute_ticks: Vec<Segment>,
    pub hour_ticks: Vec<Segment>,
    pub numerals: Vec<Numeral>,
}

fn tick(
    layout: &FaceLayout,
    kind: TickKind,
    angle: f64,
    radius: f64,
    length: f64,
    width: f64,
) -> Segment {
    let center = layout.center();
    Segment {
        kind,
        start: on_circle(center, radius, angle),
        end: on_circle(center, radius + length, angle),
        width,
    }
}

impl FaceGeometry {
    pub fn build(layout: &FaceLayout) -> Self {
        let minute_ticks = (0..60)
            .filter(|i| i % 5 != 0)
            .map(|i| {
                tick(
                    layout,
                    TickKind::Minute,
                    dial_angle(i as f64, 6.0),
                    layout.minute_mark_radius,
                    layout.minute_mark_length,
                    layout.minute_mark_width,
                )
            })
            .collect();

        let mut hour_ticks = Vec::with_capacity(12);
        let mut numerals = Vec::with_capacity(12);
        for hour in 1..=12 {
            let angle = dial_angle(hour as f64, 30.0);
            hour_ticks.push(tick(
                layout,
                TickKind::Hour,
                angle,
                layout.hour_mark_radius,
                layout.hour_mark_length,
                layout.hour_mark_width,
            ));
            numerals.push(Numeral {
                text: hour.to_string(),
                anchor: on_circle(layout.center(), layout.numeral_radius, angle),
            });
        }

        Self {
            minute_ticks,
            hour_ticks,
            numerals,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.minute_ticks.iter().chain(self.hour_ticks.iter())
    }
}
